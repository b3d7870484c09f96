//! The configuration document: everything the page shows.
//!
//! The document is trusted; nothing here validates it. Lists default to
//! empty and the few optional fields are `Option`s, so a missing entry means
//! "feature absent" rather than a load failure.

pub mod loader;

use serde::{Deserialize, Serialize};

pub use loader::{ContentLoader, ContentSource, LoadError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub site_info: SiteInfo,
    pub profile: Profile,
    pub about: About,
    pub skills: Skills,
    pub projects: Projects,
    pub contact: Contact,
    pub footer: Footer,
    pub navigation: Navigation,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub tagline: String,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    pub section_title: String,
    #[serde(default)]
    pub introduction: Vec<String>,
    pub quick_facts: QuickFacts,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickFacts {
    pub title: String,
    #[serde(default)]
    pub facts: Vec<Fact>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fact {
    pub icon: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skills {
    pub section_title: String,
    #[serde(default)]
    pub categories: Vec<SkillCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCategory {
    pub icon: String,
    pub title: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projects {
    pub section_title: String,
    #[serde(default)]
    pub featured: Vec<Project>,
    pub all_projects_url: String,
    pub all_projects_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    pub long_description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    pub github_url: String,
    #[serde(default)]
    pub live_url: Option<String>,
}

impl Project {
    /// The live-demo URL, when the project has one.
    pub fn live_demo(&self) -> Option<&str> {
        self.live_url.as_deref().filter(|u| !u.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub section_title: String,
    pub description: String,
    #[serde(default)]
    pub methods: Vec<ContactMethod>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMethod {
    pub icon: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    pub copyright: String,
    pub source_url: String,
    pub source_text: String,
}

/// Labels for the four fixed navigation anchors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Navigation {
    pub about: String,
    pub skills: String,
    pub projects: String,
    pub contact: String,
}

impl Navigation {
    /// Label for a link target, if it is one of the four known anchors.
    pub fn label_for(&self, href: &str) -> Option<&str> {
        match href {
            "#about" => Some(&self.about),
            "#skills" => Some(&self.skills),
            "#projects" => Some(&self.projects),
            "#contact" => Some(&self.contact),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub icon: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_fields_default() {
        let project: Project = serde_json::from_value(json!({
            "title": "t",
            "description": "d",
            "longDescription": "l",
            "githubUrl": "https://github.com/x/y"
        }))
        .unwrap();
        assert!(project.technologies.is_empty());
        assert_eq!(project.live_demo(), None);

        let info: SiteInfo = serde_json::from_value(json!({
            "tagline": "t",
            "location": "l"
        }))
        .unwrap();
        assert!(info.title.is_none());
        assert!(info.description.is_none());
    }

    #[test]
    fn test_empty_live_url_counts_as_absent() {
        let project: Project = serde_json::from_value(json!({
            "title": "t",
            "description": "d",
            "longDescription": "l",
            "githubUrl": "g",
            "liveUrl": ""
        }))
        .unwrap();
        assert_eq!(project.live_demo(), None);
    }

    #[test]
    fn test_navigation_label_for() {
        let nav = Navigation {
            about: "About".into(),
            skills: "Skills".into(),
            projects: "Work".into(),
            contact: "Say hi".into(),
        };
        assert_eq!(nav.label_for("#projects"), Some("Work"));
        assert_eq!(nav.label_for("#home"), None);
        assert_eq!(nav.label_for("about"), None);
    }
}
