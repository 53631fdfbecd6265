//! HTML rendering
//!
//! Pages render to plain strings that the shell sets as `innerHTML` of a
//! layer element. Interactive elements carry `data-*` attributes instead of
//! inline handlers:
//! - `data-nav="/path"`: navigate on click
//! - `data-tag="Tag"`: select a work-list tag filter
//! - `data-card="<mount key>:<slug>"`: tilting project card
//! - `data-copy-email`: copy the profile email

use std::fmt::Write;

use crate::content::{Portfolio, Profile, Project};
use crate::nav::{NAV_LINKS, NavState};
use crate::pages::{PageView, TagFilter};
use crate::route::Route;
use crate::transition::MountKey;

/// Identity of a project card: the page layer it lives in plus its project.
/// The same project rendered by two layers (mid-transition) gets two cards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardId {
    pub key: MountKey,
    pub slug: String,
}

impl CardId {
    pub fn new(key: MountKey, slug: &str) -> Self {
        Self {
            key,
            slug: slug.to_string(),
        }
    }

    /// Parse a `data-card` attribute value
    pub fn parse(attr: &str) -> Option<Self> {
        let (key, slug) = attr.split_once(':')?;
        Some(Self {
            key: MountKey(key.parse().ok()?),
            slug: slug.to_string(),
        })
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.key, self.slug)
    }
}

/// Escape text for HTML content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn list(items: &[String]) -> String {
    let mut out = String::from("<ul class=\"bullets\">");
    for item in items {
        let _ = write!(out, "<li>{}</li>", escape(item));
    }
    out.push_str("</ul>");
    out
}

fn nav_button(path: &str, label: &str, class: &str) -> String {
    format!(
        "<button class=\"{}\" data-nav=\"{}\">{}</button>",
        class,
        escape(path),
        escape(label)
    )
}

/// Navbar markup for the current path
pub fn render_nav(profile: &Profile, current_path: &str, nav: &NavState) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<nav class=\"navbar{}\"><div class=\"brand\">{}<span class=\"tagline\">{}</span></div>",
        if nav.scrolled() { " scrolled" } else { "" },
        nav_button("/", &profile.name, "brand-name"),
        escape(&profile.nav_tagline)
    );
    let _ = write!(
        out,
        "<button class=\"menu-toggle\" data-menu-toggle aria-expanded=\"{}\">Menu</button>",
        nav.menu_open()
    );
    let _ = write!(
        out,
        "<div class=\"nav-links{}\">",
        if nav.menu_open() { " open" } else { "" }
    );
    for link in NAV_LINKS.iter() {
        let class = if link.is_active(current_path) {
            "nav-link active"
        } else {
            "nav-link"
        };
        out.push_str(&nav_button(link.path, link.name, class));
    }
    out.push_str("</div></nav>");
    out
}

/// A tilting project card
pub fn render_card(key: MountKey, project: &Project) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<article class=\"project-card\" data-card=\"{}\" data-nav=\"{}\">",
        escape(&CardId::new(key, &project.slug).to_string()),
        escape(&Route::case_study_path(&project.slug))
    );
    out.push_str("<div class=\"card-glow\" hidden></div>");
    if project.featured {
        out.push_str("<span class=\"badge featured\">Featured</span>");
    }
    let _ = write!(
        out,
        "<h3>{}</h3><p>{}</p><div class=\"tags\">",
        escape(&project.title),
        escape(&project.summary)
    );
    for tag in &project.tags {
        let _ = write!(out, "<span class=\"badge\">{}</span>", escape(tag));
    }
    let _ = write!(
        out,
        "</div><a class=\"repo\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">View Code</a></article>",
        escape(&project.repo)
    );
    out
}

fn render_home(key: MountKey, portfolio: &Portfolio, featured: Option<&Project>) -> String {
    let profile = &portfolio.profile;
    let mut out = String::new();
    let _ = write!(
        out,
        "<section class=\"hero\"><h1>{}</h1><h2>{}</h2><p>{}</p>{}{}</section>",
        escape(&profile.name),
        escape(&profile.title),
        escape(&profile.hero.bio),
        nav_button("/work", &profile.hero.primary_cta, "btn primary"),
        nav_button("/contact", &profile.hero.secondary_cta, "btn secondary")
    );
    out.push_str("<ul class=\"highlights\">");
    for highlight in &profile.quick_highlights {
        let _ = write!(out, "<li>{}</li>", escape(highlight));
    }
    out.push_str("</ul><section id=\"featured-work\"><h2>Featured Work</h2>");
    if let Some(project) = featured {
        out.push_str(&render_card(key, project));
    }
    out.push_str(&nav_button("/work", "View All Work", "btn ghost"));
    out.push_str("</section>");
    out
}

fn render_work(key: MountKey, portfolio: &Portfolio, filter: &TagFilter) -> String {
    let mut out = String::from(
        "<header><h1>Work</h1><p>Projects showcasing full-stack development, AI integration, and product-minded design.</p></header><div class=\"tag-filter\">",
    );
    for tag in TagFilter::options(portfolio) {
        let _ = write!(
            out,
            "<button class=\"badge{}\" data-tag=\"{}\">{}</button>",
            if filter.is_selected(tag) { " selected" } else { "" },
            escape(tag),
            escape(tag)
        );
    }
    out.push_str("</div><div class=\"card-grid\">");
    let shown = filter.apply(portfolio);
    if shown.is_empty() {
        out.push_str("<p class=\"empty\">No projects with this tag yet.</p>");
    }
    for project in shown {
        out.push_str(&render_card(key, project));
    }
    out.push_str("</div>");
    out
}

fn render_case_study(project: &Project) -> String {
    let study = &project.case_study;
    let mut out = String::new();
    out.push_str(&nav_button("/work", "Back to Work", "btn ghost back"));
    let _ = write!(out, "<header><div class=\"tags\">");
    for tag in &project.tags {
        let _ = write!(out, "<span class=\"badge\">{}</span>", escape(tag));
    }
    let _ = write!(
        out,
        "</div><h1>{}</h1><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">View Code</a><p class=\"lead\">{}</p></header>",
        escape(&project.title),
        escape(&project.repo),
        escape(&project.summary)
    );

    let prose = [
        ("Overview", &study.overview),
        ("Problem", &study.problem),
        ("Goal", &study.goal),
        ("My Role", &study.my_role),
    ];
    for (title, text) in prose {
        let _ = write!(
            out,
            "<section><h2>{}</h2><p class=\"prose\">{}</p></section>",
            title,
            escape(text)
        );
    }
    let _ = write!(
        out,
        "<section><h2>Solution</h2><p class=\"prose\">{}</p><h3>Key Features</h3>{}</section>",
        escape(&study.solution),
        list(&study.key_features)
    );
    out.push_str("<section><h2>Architecture</h2><div class=\"arch-grid\">");
    for item in &study.architecture {
        let _ = write!(
            out,
            "<div class=\"arch-item\"><h4>{}</h4><p>{}</p></div>",
            escape(&item.label),
            escape(&item.value)
        );
    }
    out.push_str("</div></section>");
    let lists = [
        ("Technical Highlights", &study.technical_highlights),
        ("Outcome", &study.outcome),
        ("What I'd Add Next", &study.next_steps),
    ];
    for (title, items) in lists {
        let _ = write!(out, "<section><h2>{}</h2>{}</section>", escape(title), list(items));
    }
    let _ = write!(
        out,
        "<aside class=\"cta\"><h2>Interested in working together?</h2>{}</aside>",
        nav_button("/contact", "Get In Touch", "btn primary")
    );
    out
}

fn render_not_found(recovery: &str) -> String {
    format!(
        "<div class=\"not-found\"><h1>Project Not Found</h1>{}</div>",
        nav_button(recovery, "Back to Work", "btn")
    )
}

fn render_about(portfolio: &Portfolio, featured: Option<&Project>) -> String {
    let about = &portfolio.profile.about;
    let mut out = String::new();
    let _ = write!(
        out,
        "<header><h1>{}</h1><p>{}</p></header><p class=\"prose\">{}</p><div class=\"strengths\">",
        escape(&about.header.title),
        escape(&about.header.subtitle),
        escape(&about.bio)
    );
    for strength in &about.core_strengths {
        let _ = write!(
            out,
            "<div class=\"strength\"><h3>{}</h3><p>{}</p></div>",
            escape(&strength.title),
            escape(&strength.description)
        );
    }
    out.push_str("</div><div class=\"skills\">");
    for skill in &portfolio.profile.skills {
        let _ = write!(
            out,
            "<div class=\"skill\"><h3>{}</h3>{}</div>",
            escape(&skill.category),
            list(&skill.items)
        );
    }
    out.push_str("</div>");
    if let Some(project) = featured {
        if !project.case_study.resume_bullets.is_empty() {
            let _ = write!(
                out,
                "<section class=\"resume\"><h2>Highlights</h2><p>From {}</p>{}</section>",
                escape(&project.title),
                list(&project.case_study.resume_bullets)
            );
        }
    }
    out.push_str(&nav_button("/contact", "Get In Touch", "btn primary"));
    out
}

fn render_contact(profile: &Profile, copied: bool) -> String {
    let mut out = String::from(
        "<header><h1>Contact</h1><p>Let's discuss your next project or opportunity.</p></header>\
         <form id=\"contact-form\" novalidate>\
         <label for=\"name\">Name</label><input id=\"name\" name=\"name\" type=\"text\" required placeholder=\"Your name\">\
         <label for=\"email\">Email</label><input id=\"email\" name=\"email\" type=\"email\" required placeholder=\"your.email@example.com\">\
         <label for=\"message\">Message</label><textarea id=\"message\" name=\"message\" required placeholder=\"Tell me about your project or opportunity...\"></textarea>\
         <p class=\"form-error\" hidden></p>\
         <button type=\"submit\" class=\"btn primary\">Send Message</button>\
         <p class=\"hint\">This will open your email client with the message pre-filled.</p></form>",
    );
    let _ = write!(
        out,
        "<div class=\"contact-info\"><h3>Email</h3><p>{}</p><button class=\"btn secondary\" data-copy-email>{}</button>",
        escape(&profile.email),
        if copied { "Copied!" } else { "Copy Email" }
    );
    let _ = write!(
        out,
        "<h3>Connect</h3><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">LinkedIn</a><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">GitHub</a>",
        escape(&profile.links.linkedin),
        escape(&profile.links.github)
    );
    let _ = write!(
        out,
        "<h3>Availability</h3><p>{}</p></div>",
        escape(&profile.contact.availability_note)
    );
    out
}

/// Inner markup of the page layer `key` showing `view`
pub fn render_page(
    key: MountKey,
    view: &PageView,
    portfolio: &Portfolio,
    filter: &TagFilter,
    copied: bool,
) -> String {
    match view {
        PageView::Home { featured } => render_home(key, portfolio, *featured),
        PageView::Work => render_work(key, portfolio, filter),
        PageView::CaseStudy(project) => render_case_study(project),
        PageView::ProjectNotFound { .. } => {
            render_not_found(view.recovery_path().unwrap_or("/work"))
        }
        PageView::About { featured } => render_about(portfolio, *featured),
        PageView::Contact => render_contact(&portfolio.profile, copied),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::tests::sample;
    use crate::route::resolve;

    fn page(path: &str) -> String {
        let portfolio = sample();
        let view = PageView::resolve(&resolve(path), &portfolio);
        render_page(MountKey(3), &view, &portfolio, &TagFilter::default(), false)
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_card_id_roundtrip() {
        let id = CardId::new(MountKey(12), "edge-cache");
        assert_eq!(id.to_string(), "12:edge-cache");
        assert_eq!(CardId::parse("12:edge-cache"), Some(id));
        assert_eq!(CardId::parse("x:edge-cache"), None);
        assert_eq!(CardId::parse("nocolon"), None);
    }

    #[test]
    fn test_home_shows_featured_card() {
        let html = page("/");
        assert!(html.contains("data-card=\"3:physical-ai-humanoid-robotics\""));
        assert!(html.contains("data-nav=\"/work/physical-ai-humanoid-robotics\""));
        assert!(!html.contains("edge-cache"));
    }

    #[test]
    fn test_work_lists_all_cards_and_tags() {
        let html = page("/work");
        assert!(html.contains("data-card=\"3:edge-cache\""));
        assert!(html.contains("data-tag=\"All\""));
        assert!(html.contains("data-tag=\"AI/RAG\""));
    }

    #[test]
    fn test_not_found_offers_recovery() {
        let html = page("/work/does-not-exist");
        assert!(html.contains("Project Not Found"));
        assert!(html.contains("data-nav=\"/work\""));
    }

    #[test]
    fn test_case_study_sections() {
        let html = page("/work/physical-ai-humanoid-robotics");
        for heading in ["Overview", "Problem", "Architecture", "What I&#39;d Add Next"] {
            assert!(html.contains(heading), "missing {}", heading);
        }
        assert!(html.contains("Vector Search"));
    }

    #[test]
    fn test_nav_marks_active_link() {
        let portfolio = sample();
        let html = render_nav(&portfolio.profile, "/about", &NavState::new());
        assert!(html.contains("<button class=\"nav-link active\" data-nav=\"/about\">About</button>"));
        assert!(html.contains("<button class=\"nav-link\" data-nav=\"/work\">Work</button>"));
    }
}
