//! Page-level view resolution
//!
//! Turns a routed page into what is actually shown, using the content data.
//! Misses are presentation states, never errors.

use crate::content::{Portfolio, Project};
use crate::route::{Page, Route};

/// Tag filter entry that shows every project
pub const ALL_TAGS: &str = "All";

/// What a page layer displays
#[derive(Debug, Clone, PartialEq)]
pub enum PageView<'a> {
    Home { featured: Option<&'a Project> },
    Work,
    CaseStudy(&'a Project),
    /// Case-study slug with no matching project
    ProjectNotFound { slug: String },
    About { featured: Option<&'a Project> },
    Contact,
}

impl<'a> PageView<'a> {
    pub fn resolve(route: &Route, portfolio: &'a Portfolio) -> Self {
        match route {
            Route::Home => PageView::Home {
                featured: portfolio.featured(),
            },
            Route::WorkList => PageView::Work,
            Route::CaseStudy { slug } => match portfolio.find_project(slug) {
                Some(project) => PageView::CaseStudy(project),
                None => {
                    log::warn!("No project with slug {:?}", slug);
                    PageView::ProjectNotFound { slug: slug.clone() }
                }
            },
            Route::About => PageView::About {
                featured: portfolio.featured(),
            },
            Route::Contact => PageView::Contact,
        }
    }

    pub fn page(&self) -> Page {
        match self {
            PageView::Home { .. } => Page::Home,
            PageView::Work => Page::WorkList,
            PageView::CaseStudy(_) => Page::CaseStudy,
            PageView::ProjectNotFound { .. } => Page::NotFound,
            PageView::About { .. } => Page::About,
            PageView::Contact => Page::Contact,
        }
    }

    /// Path of the recovery action offered by the not-found state
    pub fn recovery_path(&self) -> Option<&'static str> {
        match self {
            PageView::ProjectNotFound { .. } => Some("/work"),
            _ => None,
        }
    }

    /// Document title for this view
    pub fn title(&self, portfolio: &Portfolio) -> String {
        let name = &portfolio.profile.name;
        match self {
            PageView::Home { .. } => format!("{} - {}", name, portfolio.profile.title),
            PageView::Work => format!("Work - {}", name),
            PageView::CaseStudy(project) => format!("{} - {}", project.title, name),
            PageView::ProjectNotFound { .. } => format!("Project Not Found - {}", name),
            PageView::About { .. } => format!("About - {}", name),
            PageView::Contact => format!("Contact - {}", name),
        }
    }
}

/// Tag filter on the work list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    selected: String,
}

impl Default for TagFilter {
    fn default() -> Self {
        Self {
            selected: ALL_TAGS.to_string(),
        }
    }
}

impl TagFilter {
    /// Filter options: "All" followed by every distinct tag
    pub fn options(portfolio: &Portfolio) -> Vec<&str> {
        std::iter::once(ALL_TAGS).chain(portfolio.tags()).collect()
    }

    pub fn select(&mut self, tag: &str) {
        self.selected = tag.to_string();
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn is_selected(&self, tag: &str) -> bool {
        self.selected == tag
    }

    pub fn apply<'a>(&self, portfolio: &'a Portfolio) -> Vec<&'a Project> {
        if self.selected == ALL_TAGS {
            return portfolio.projects.iter().collect();
        }
        portfolio
            .projects
            .iter()
            .filter(|p| p.tags.iter().any(|t| *t == self.selected))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::tests::sample;
    use crate::route::resolve;

    #[test]
    fn test_case_study_hit() {
        let portfolio = sample();
        let route = resolve("/work/physical-ai-humanoid-robotics");
        match PageView::resolve(&route, &portfolio) {
            PageView::CaseStudy(project) => assert_eq!(project.id, "1"),
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn test_case_study_miss_is_not_found() {
        let portfolio = sample();
        let route = resolve("/work/does-not-exist");
        assert_eq!(
            route,
            Route::CaseStudy {
                slug: "does-not-exist".to_string()
            }
        );
        let view = PageView::resolve(&route, &portfolio);
        assert_eq!(
            view,
            PageView::ProjectNotFound {
                slug: "does-not-exist".to_string()
            }
        );
        assert_eq!(view.page(), Page::NotFound);
        assert_eq!(view.recovery_path(), Some("/work"));
        assert_eq!(resolve(view.recovery_path().unwrap()), Route::WorkList);
    }

    #[test]
    fn test_empty_slug_is_not_found() {
        let portfolio = sample();
        let view = PageView::resolve(&resolve("/work/"), &portfolio);
        assert!(matches!(view, PageView::ProjectNotFound { .. }));
    }

    #[test]
    fn test_home_and_about_carry_featured() {
        let portfolio = sample();
        let featured = portfolio.featured();
        assert_eq!(
            PageView::resolve(&Route::Home, &portfolio),
            PageView::Home { featured }
        );
        assert_eq!(
            PageView::resolve(&Route::About, &portfolio),
            PageView::About { featured }
        );
    }

    #[test]
    fn test_titles() {
        let portfolio = sample();
        let view = PageView::resolve(&Route::Contact, &portfolio);
        assert_eq!(view.title(&portfolio), "Contact - Aaira Sheikh");
    }

    #[test]
    fn test_tag_filter() {
        let portfolio = sample();
        let options = TagFilter::options(&portfolio);
        assert_eq!(options[0], ALL_TAGS);
        assert!(options.contains(&"Rust"));

        let mut filter = TagFilter::default();
        assert_eq!(filter.apply(&portfolio).len(), 2);

        filter.select("Rust");
        let shown = filter.apply(&portfolio);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].slug, "edge-cache");
        assert!(filter.is_selected("Rust"));

        filter.select("Full-Stack");
        assert_eq!(filter.apply(&portfolio).len(), 2);

        filter.select("COBOL");
        assert!(filter.apply(&portfolio).is_empty());
    }
}
