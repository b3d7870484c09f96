//! Markup for the regions the projector regenerates wholesale.

use log::warn;

use crate::content::{ContactMethod, Fact, Project, SkillCategory, SocialLink};
use crate::page::fragment::{el, text, Fragment};
use crate::sanitize::{is_external, safe_url};

/// `<a>` pointing at a content URL. Script-capable URLs lose the `href`.
fn link(url: &str) -> Fragment {
    let href = safe_url(url);
    if href.is_none() {
        warn!("Dropping unsafe link target {:?}", url);
    }
    el("a").attr_opt("href", href)
}

/// Link that opens in a new tab.
fn external_link(url: &str) -> Fragment {
    link(url).attr("target", "_blank").attr("rel", "noopener")
}

fn icon(class: &str) -> Fragment {
    el("i").class(class)
}

pub fn quick_fact(fact: &Fact) -> Fragment {
    el("li")
        .attr("style", "margin-bottom: 10px;")
        .child(icon(&fact.icon).attr("style", "color: var(--primary-color); margin-right: 10px;"))
        .text(&format!(" {}", fact.text))
}

pub fn skill_category(category: &SkillCategory) -> Fragment {
    el("div")
        .class("skill-category")
        .child(
            el("h3")
                .child(icon(&category.icon))
                .text(&format!(" {}", category.title)),
        )
        .child(
            el("ul")
                .class("skill-list")
                .children(category.skills.iter().map(|s| el("li").text(s))),
        )
}

pub fn project_card(project: &Project) -> Fragment {
    let mut links = el("div").class("project-links").child(
        external_link(&project.github_url)
            .class("project-link")
            .child(icon("fab fa-github"))
            .text(" View Code"),
    );
    if let Some(live) = project.live_demo() {
        links = links.child(
            external_link(live)
                .class("project-link project-live")
                .child(icon("fas fa-external-link-alt"))
                .text(" Live Demo"),
        );
    }

    el("div")
        .class("project-card")
        .child(
            el("div")
                .class("project-header")
                .child(el("h3").class("project-title").text(&project.title))
                .child(el("p").class("project-description").text(&project.description)),
        )
        .child(
            el("div")
                .class("project-body")
                .child(
                    el("div")
                        .class("project-tech")
                        .children(project.technologies.iter().map(|t| el("span").class("tech-tag").text(t))),
                )
                .child(
                    el("p")
                        .attr("style", "color: var(--text-secondary); margin-bottom: 20px;")
                        .text(&project.long_description),
                )
                .child(links),
        )
}

/// Inner content of the "all projects" link.
pub fn all_projects_label(label: &str) -> Vec<Fragment> {
    vec![icon("fab fa-github"), text(&format!(" {}", label))]
}

pub fn contact_link(method: &ContactMethod) -> Fragment {
    let a = if is_external(&method.url) {
        external_link(&method.url)
    } else {
        link(&method.url)
    };
    a.class("contact-link")
        .child(icon(&method.icon))
        .text(&format!(" {}", method.title))
}

pub fn social_link(social: &SocialLink) -> Fragment {
    external_link(&social.url)
        .attr("title", &social.name)
        .child(icon(&social.icon))
}
