//! Content projection: configuration → page writes, run once after load.
//!
//! Every region is optional. A selector that matches nothing skips that
//! write without complaint; the page simply keeps its static markup there.

pub mod cards;

use log::warn;

use crate::content::SiteConfig;
use crate::page::{NodeId, PageSurface};
use crate::sanitize::safe_url;

// ── Anchors ──────────────────────────────────────────

const META_DESCRIPTION: &str = r#"meta[name="description"]"#;

const PROFILE_IMG: &str = ".profile-img";
const HERO_TITLE: &str = ".hero h1";
const HERO_SUBTITLE: &str = ".hero .subtitle";
const HERO_TAGLINE: &str = ".hero p:not(.subtitle)";

const ABOUT_TITLE: &str = "#about .section-title";
const ABOUT_TEXT: &str = "#about .about-text";
const QUICK_FACTS_TITLE: &str = "#about h3";
const QUICK_FACTS_LIST: &str = "#about ul";

const SKILLS_TITLE: &str = "#skills .section-title";
const SKILLS_GRID: &str = "#skills .skills-grid";

const PROJECTS_TITLE: &str = "#projects .section-title";
const PROJECTS_GRID: &str = "#projects .projects-grid";
const ALL_PROJECTS_LINK: &str = r#"#projects a[href*="github"]"#;

const CONTACT_TITLE: &str = "#contact .section-title";
const CONTACT_TEXT: &str = "#contact .contact-text";
const CONTACT_LINKS: &str = "#contact .contact-links";

const FOOTER_COPYRIGHT: &str = "footer p:first-child";
const FOOTER_SOURCE: &str = "footer a";

const NAV_LINKS: &str = ".nav-link";
const SOCIAL_LINKS: &str = ".social-links";

/// Writes one configuration onto a page.
pub struct Projector<'c> {
    config: &'c SiteConfig,
}

impl<'c> Projector<'c> {
    pub fn new(config: &'c SiteConfig) -> Self {
        Projector { config }
    }

    pub fn project(&self, page: &mut dyn PageSurface) {
        self.update_document_meta(page);
        self.update_profile(page);
        self.update_about(page);
        self.update_skills(page);
        self.update_projects(page);
        self.update_contact(page);
        self.update_footer(page);
        self.update_navigation(page);
        self.update_social_links(page);
    }

    /// Title and description are skipped when the fields are absent.
    fn update_document_meta(&self, page: &mut dyn PageSurface) {
        let info = &self.config.site_info;
        if let Some(title) = &info.title {
            page.set_title(title);
        }
        if let Some(description) = &info.description {
            if let Some(meta) = page.query(META_DESCRIPTION) {
                page.set_attr(meta, "content", description);
            }
        }
    }

    fn update_profile(&self, page: &mut dyn PageSurface) {
        let profile = &self.config.profile;
        let info = &self.config.site_info;

        let img = page.query(PROFILE_IMG);
        let title = page.query(HERO_TITLE);
        let subtitle = page.query(HERO_SUBTITLE);
        let tagline = page.query(HERO_TAGLINE);

        if let Some(img) = img {
            set_url(page, img, "src", &profile.image);
            page.set_attr(img, "alt", &profile.name);
        }
        set_text(page, title, &profile.name);
        set_text(page, subtitle, &profile.title);
        set_text(page, tagline, &format!("{} {}", info.location, info.tagline));
    }

    fn update_about(&self, page: &mut dyn PageSurface) {
        let about = &self.config.about;

        let title = page.query(ABOUT_TITLE);
        let paragraphs = page.query_all(ABOUT_TEXT);
        let facts_title = page.query(QUICK_FACTS_TITLE);
        let facts_list = page.query(QUICK_FACTS_LIST);

        set_text(page, title, &about.section_title);

        // Positional pairing; anchors without a (non-empty) paragraph keep their text.
        for (node, paragraph) in paragraphs.into_iter().zip(&about.introduction) {
            if !paragraph.is_empty() {
                page.set_text(node, paragraph);
            }
        }

        set_text(page, facts_title, &about.quick_facts.title);
        if let Some(list) = facts_list {
            let items = about.quick_facts.facts.iter().map(cards::quick_fact).collect();
            page.replace_children(list, items);
        }
    }

    fn update_skills(&self, page: &mut dyn PageSurface) {
        let skills = &self.config.skills;

        let title = page.query(SKILLS_TITLE);
        let grid = page.query(SKILLS_GRID);

        set_text(page, title, &skills.section_title);
        if let Some(grid) = grid {
            let categories = skills.categories.iter().map(cards::skill_category).collect();
            page.replace_children(grid, categories);
        }
    }

    fn update_projects(&self, page: &mut dyn PageSurface) {
        let projects = &self.config.projects;

        let title = page.query(PROJECTS_TITLE);
        let grid = page.query(PROJECTS_GRID);
        let all_link = page.query(ALL_PROJECTS_LINK);

        set_text(page, title, &projects.section_title);
        if let Some(grid) = grid {
            let items = projects.featured.iter().map(cards::project_card).collect();
            page.replace_children(grid, items);
        }
        if let Some(link) = all_link {
            set_url(page, link, "href", &projects.all_projects_url);
            page.replace_children(link, cards::all_projects_label(&projects.all_projects_text));
        }
    }

    fn update_contact(&self, page: &mut dyn PageSurface) {
        let contact = &self.config.contact;

        let title = page.query(CONTACT_TITLE);
        let text = page.query(CONTACT_TEXT);
        let links = page.query(CONTACT_LINKS);

        set_text(page, title, &contact.section_title);
        set_text(page, text, &contact.description);
        if let Some(links) = links {
            let methods = contact.methods.iter().map(cards::contact_link).collect();
            page.replace_children(links, methods);
        }
    }

    fn update_footer(&self, page: &mut dyn PageSurface) {
        let footer = &self.config.footer;

        let copyright = page.query(FOOTER_COPYRIGHT);
        let source = page.query(FOOTER_SOURCE);

        set_text(page, copyright, &footer.copyright);
        if let Some(source) = source {
            set_url(page, source, "href", &footer.source_url);
            page.set_text(source, &footer.source_text);
        }
    }

    /// Labels go to links by target, never by position.
    fn update_navigation(&self, page: &mut dyn PageSurface) {
        let nav = &self.config.navigation;
        for link in page.query_all(NAV_LINKS) {
            let href = page.attr(link, "href").unwrap_or_default();
            if let Some(label) = nav.label_for(&href) {
                page.set_text(link, label);
            }
        }
    }

    fn update_social_links(&self, page: &mut dyn PageSurface) {
        let container = match page.query(SOCIAL_LINKS) {
            Some(c) => c,
            None => return,
        };
        let links = self.config.social_links.iter().map(cards::social_link).collect();
        page.replace_children(container, links);
    }
}

fn set_text(page: &mut dyn PageSurface, node: Option<NodeId>, text: &str) {
    if let Some(node) = node {
        page.set_text(node, text);
    }
}

/// Write a URL attribute unless the URL could run script.
fn set_url(page: &mut dyn PageSurface, node: NodeId, attr: &str, url: &str) {
    match safe_url(url) {
        Some(url) => page.set_attr(node, attr, url),
        None => warn!("Skipping unsafe {} {:?}", attr, url),
    }
}
