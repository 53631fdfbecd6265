//! Profile and project data
//!
//! Read-only content embedded at build time from `content/portfolio.json`.

use serde::{Deserialize, Serialize};

const EMBEDDED: &str = include_str!("../content/portfolio.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub bio: String,
    pub primary_cta: String,
    pub secondary_cta: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionHeading {
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strength {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct About {
    pub header: SectionHeading,
    pub bio: String,
    pub core_strengths: Vec<Strength>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub availability_note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Links {
    pub github: String,
    pub linkedin: String,
}

/// The site owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub nav_tagline: String,
    pub email: String,
    pub hero: Hero,
    pub quick_highlights: Vec<String>,
    pub about: About,
    pub skills: Vec<SkillCategory>,
    pub contact: ContactInfo,
    pub links: Links,
    pub location: String,
}

/// One labelled architecture component (e.g. "Backend" -> "FastAPI")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureItem {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStudy {
    pub overview: String,
    pub problem: String,
    pub goal: String,
    pub my_role: String,
    pub solution: String,
    pub key_features: Vec<String>,
    pub architecture: Vec<ArchitectureItem>,
    pub technical_highlights: Vec<String>,
    pub outcome: Vec<String>,
    pub next_steps: Vec<String>,
    #[serde(default)]
    pub resume_bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    /// Unique, used verbatim in `/work/<slug>`
    pub slug: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub repo: String,
    #[serde(default)]
    pub featured: bool,
    pub case_study: CaseStudy,
}

/// All site content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub profile: Profile,
    pub projects: Vec<Project>,
}

impl Portfolio {
    /// Content compiled into the binary
    pub fn embedded() -> Result<Self, serde_json::Error> {
        Self::from_json(EMBEDDED)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Exact, case-sensitive slug lookup
    pub fn find_project(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.slug == slug)
    }

    /// The project surfaced on the landing page: first one marked featured
    pub fn featured(&self) -> Option<&Project> {
        self.projects.iter().find(|p| p.featured)
    }

    /// Every distinct tag, in first-seen order
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for tag in self.projects.iter().flat_map(|p| p.tags.iter()) {
            if !tags.contains(&tag.as_str()) {
                tags.push(tag);
            }
        }
        tags
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Small two-project portfolio built on the embedded profile
    pub(crate) fn sample() -> Portfolio {
        let mut portfolio = Portfolio::embedded().unwrap();
        let mut second = portfolio.projects[0].clone();
        second.id = "2".to_string();
        second.slug = "edge-cache".to_string();
        second.title = "Edge Cache".to_string();
        second.featured = false;
        second.tags = vec!["Rust".to_string(), "Full-Stack".to_string()];
        portfolio.projects.push(second);
        portfolio
    }

    #[test]
    fn test_embedded_content_parses() {
        let portfolio = Portfolio::embedded().unwrap();
        assert_eq!(portfolio.profile.name, "Aaira Sheikh");
        assert!(!portfolio.projects.is_empty());
        assert!(portfolio.find_project("physical-ai-humanoid-robotics").is_some());
    }

    #[test]
    fn test_slugs_are_unique() {
        let portfolio = sample();
        for (i, a) in portfolio.projects.iter().enumerate() {
            for b in &portfolio.projects[i + 1..] {
                assert_ne!(a.slug, b.slug);
            }
        }
    }

    #[test]
    fn test_find_project_is_exact() {
        let portfolio = sample();
        assert_eq!(portfolio.find_project("edge-cache").unwrap().id, "2");
        assert!(portfolio.find_project("Edge-Cache").is_none());
        assert!(portfolio.find_project("edge-cache/").is_none());
        assert!(portfolio.find_project("").is_none());
        assert!(portfolio.find_project("does-not-exist").is_none());
    }

    #[test]
    fn test_featured() {
        let mut portfolio = sample();
        assert_eq!(
            portfolio.featured().unwrap().slug,
            "physical-ai-humanoid-robotics"
        );
        for p in &mut portfolio.projects {
            p.featured = false;
        }
        assert!(portfolio.featured().is_none());
    }

    #[test]
    fn test_tags_first_seen_order() {
        let portfolio = sample();
        let tags = portfolio.tags();
        assert_eq!(tags[0], "Full-Stack");
        assert_eq!(*tags.last().unwrap(), "Rust");
        assert_eq!(tags.iter().filter(|t| **t == "Full-Stack").count(), 1);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Portfolio::from_json("{\"profile\": 3}").is_err());
    }
}
