//! Path resolution
//!
//! Maps a path string (as carried in the address-bar fragment) to the page it
//! displays. Pure and total: every input resolves to something, unknown paths
//! fall back to `Home`.


/// Prefix shared by the work list and every case study
const WORK_PREFIX: &str = "/work/";

/// Page identity, without parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    WorkList,
    CaseStudy,
    About,
    Contact,
    /// Presentation state for a case-study slug with no matching project.
    /// Never produced by [`resolve`]; see `pages::PageView`.
    NotFound,
}

/// A resolved route: page identity plus its parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    WorkList,
    /// Slug is the raw remainder after `/work/`, not validated here
    CaseStudy { slug: String },
    About,
    Contact,
}

impl Route {
    pub fn page(&self) -> Page {
        match self {
            Route::Home => Page::Home,
            Route::WorkList => Page::WorkList,
            Route::CaseStudy { .. } => Page::CaseStudy,
            Route::About => Page::About,
            Route::Contact => Page::Contact,
        }
    }

    pub fn slug(&self) -> Option<&str> {
        match self {
            Route::CaseStudy { slug } => Some(slug),
            _ => None,
        }
    }

    /// Canonical path for this route. `resolve(route.path()) == route`.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::WorkList => "/work".to_string(),
            Route::CaseStudy { slug } => format!("{WORK_PREFIX}{slug}"),
            Route::About => "/about".to_string(),
            Route::Contact => "/contact".to_string(),
        }
    }

    /// Path of the case study for `slug`
    pub fn case_study_path(slug: &str) -> String {
        format!("{WORK_PREFIX}{slug}")
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::CaseStudy { slug } => write!(f, "CaseStudy({slug})"),
            other => write!(f, "{:?}", other.page()),
        }
    }
}

/// Resolve a path to its route.
///
/// Rules, first match wins:
/// 1. `/` -> Home
/// 2. `/work` -> WorkList
/// 3. `/work/<rest>` -> CaseStudy with `slug = rest` (may be empty)
/// 4. `/about` -> About
/// 5. `/contact` -> Contact
/// 6. anything else, including the empty string -> Home
pub fn resolve(path: &str) -> Route {
    match path {
        "/" => Route::Home,
        "/work" => Route::WorkList,
        "/about" => Route::About,
        "/contact" => Route::Contact,
        _ => match path.strip_prefix(WORK_PREFIX) {
            Some(slug) => Route::CaseStudy {
                slug: slug.to_string(),
            },
            None => Route::Home,
        },
    }
}

/// Coerce a raw path into a valid navigation path.
///
/// Navigation paths always start with `/`; anything else (including the empty
/// string) would resolve to `Home` anyway, so it becomes `/`.
pub fn normalize_path(path: &str) -> &str {
    if path.starts_with('/') { path } else { "/" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_explicit_rules() {
        assert_eq!(resolve("/"), Route::Home);
        assert_eq!(resolve("/work"), Route::WorkList);
        assert_eq!(resolve("/about"), Route::About);
        assert_eq!(resolve("/contact"), Route::Contact);
        assert_eq!(
            resolve("/work/physical-ai-humanoid-robotics"),
            Route::CaseStudy {
                slug: "physical-ai-humanoid-robotics".to_string()
            }
        );
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(resolve(""), Route::Home);
        assert_eq!(resolve("/nope"), Route::Home);
        assert_eq!(resolve("work"), Route::Home);
        assert_eq!(resolve("/work/"), Route::CaseStudy { slug: String::new() });
        assert_eq!(resolve("/about/"), Route::Home);
        assert_eq!(resolve("/Work"), Route::Home);
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("about"), "/");
        assert_eq!(normalize_path("/about"), "/about");
        assert_eq!(normalize_path("/bogus"), "/bogus");
    }

    #[test]
    fn test_nested_slug_kept_verbatim() {
        let route = resolve("/work/a/b?c");
        assert_eq!(route.slug(), Some("a/b?c"));
        assert_eq!(route.page(), Page::CaseStudy);
    }

    #[test]
    fn test_display() {
        assert_eq!(resolve("/about").to_string(), "About");
        assert_eq!(resolve("/work/x").to_string(), "CaseStudy(x)");
    }

    proptest! {
        #[test]
        fn prop_unmatched_paths_resolve_home(p in ".*") {
            prop_assume!(!["/", "/work", "/about", "/contact"].contains(&p.as_str()));
            prop_assume!(!p.starts_with("/work/"));
            prop_assert_eq!(resolve(&p), resolve("/"));
        }

        #[test]
        fn prop_case_study_slug_roundtrips(s in ".*") {
            let route = resolve(&format!("/work/{s}"));
            prop_assert_eq!(route.slug(), Some(s.as_str()));
        }

        #[test]
        fn prop_canonical_path_resolves_back(s in "[a-z0-9-]{0,24}", pick in 0usize..5) {
            let route = match pick {
                0 => Route::Home,
                1 => Route::WorkList,
                2 => Route::CaseStudy { slug: s },
                3 => Route::About,
                _ => Route::Contact,
            };
            prop_assert_eq!(resolve(&route.path()), route);
        }
    }
}
