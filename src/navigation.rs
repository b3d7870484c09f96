//! Interaction wiring: theme toggle, mobile menu, smooth scroll, scroll-spy
//! and the load-time reveal.
//!
//! Click targets are resolved once, when the app is wired, the way listeners
//! are attached once in a browser. Content regenerated afterwards carries no
//! listeners.

use log::debug;

use crate::page::selector::Selector;
use crate::page::{NodeId, PageSurface};
use crate::theme::{Theme, ThemeController, ThemeStore};

const THEME_TOGGLE: &str = ".theme-toggle";
const MOBILE_TOGGLE: &str = ".mobile-menu-toggle";
const MOBILE_MENU: &str = ".nav-links.mobile-menu";
const IN_PAGE_LINKS: &str = r##"a[href^="#"]"##;
const SECTIONS: &str = "section[id]";
const SPY_LINKS: &str = r##".nav-link[href^="#"]"##;

/// Class marking both the open mobile menu and the highlighted nav link.
pub const ACTIVE_CLASS: &str = "active";
/// How far below the viewport top a section may start and still count as current.
pub const SCROLL_LOOKAHEAD: f64 = 200.0;

/// Something the host reports happening on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Click(NodeId),
    Scroll { y: f64 },
    Load,
}

/// What the host should do after an event ran.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Outcome {
    /// The host must not follow the link that was clicked.
    pub default_prevented: bool,
    /// Smoothly scroll this node to the top of the viewport.
    pub scroll_to: Option<NodeId>,
    pub theme: Option<Theme>,
    /// Section id highlighted by scroll-spy, if any.
    pub active_section: Option<String>,
}

/// Handles captured at wiring time.
#[derive(Debug, Clone)]
pub struct Navigation {
    theme_toggle: Option<NodeId>,
    mobile: Option<(NodeId, NodeId)>,
    in_page_links: Vec<NodeId>,
}

impl Navigation {
    pub fn wire(page: &dyn PageSurface) -> Self {
        let mobile = match (page.query(MOBILE_TOGGLE), page.query(MOBILE_MENU)) {
            (Some(toggle), Some(menu)) => Some((toggle, menu)),
            _ => None,
        };
        let nav = Navigation {
            theme_toggle: page.query(THEME_TOGGLE),
            mobile,
            in_page_links: page.query_all(IN_PAGE_LINKS),
        };
        debug!(
            "Wired {} in-page links, mobile menu {}",
            nav.in_page_links.len(),
            if nav.mobile.is_some() { "on" } else { "off" }
        );
        nav
    }

    pub fn dispatch<S: ThemeStore>(
        &self,
        page: &mut dyn PageSurface,
        theme: &mut ThemeController<S>,
        event: Event,
    ) -> Outcome {
        match event {
            Event::Click(target) => self.on_click(page, theme, target),
            Event::Scroll { y } => Outcome {
                active_section: self.on_scroll(page, y),
                ..Outcome::default()
            },
            Event::Load => {
                self.on_load(page);
                Outcome::default()
            }
        }
    }

    fn on_click<S: ThemeStore>(
        &self,
        page: &mut dyn PageSurface,
        theme: &mut ThemeController<S>,
        target: NodeId,
    ) -> Outcome {
        let mut outcome = Outcome::default();

        if let Some(toggle) = self.theme_toggle {
            if page.contains(toggle, target) {
                outcome.theme = Some(theme.toggle(page));
            }
        }

        if let Some((toggle, menu)) = self.mobile {
            if page.contains(toggle, target) {
                page.toggle_class(menu, ACTIVE_CLASS);
            }
        }

        if let Some(link) = self
            .in_page_links
            .iter()
            .copied()
            .find(|&link| page.contains(link, target))
        {
            outcome.default_prevented = true;
            outcome.scroll_to = self.scroll_target(page, link);
        }

        // Document-level listener: anything outside toggle and menu closes it.
        if let Some((toggle, menu)) = self.mobile {
            if !page.contains(toggle, target) && !page.contains(menu, target) {
                page.remove_class(menu, ACTIVE_CLASS);
            }
        }

        outcome
    }

    fn scroll_target(&self, page: &dyn PageSurface, link: NodeId) -> Option<NodeId> {
        let href = page.attr(link, "href").unwrap_or_default();
        let target = match Selector::parse(&href) {
            Ok(_) => page.query(&href),
            Err(_) => None,
        };
        if target.is_none() {
            debug!("In-page link {:?} has no target", href);
        }
        target
    }

    /// Highlight the nav link for the current section; returns its id.
    fn on_scroll(&self, page: &mut dyn PageSurface, scroll_y: f64) -> Option<String> {
        let sections: Vec<(String, f64)> = page
            .query_all(SECTIONS)
            .into_iter()
            // Unmeasured sections have no position to compare against.
            .filter_map(|s| Some((page.attr(s, "id").unwrap_or_default(), page.offset_top(s)?)))
            .collect();
        let current = active_section(&sections, scroll_y).map(|id| id.to_string());
        let current_href = current.as_ref().map(|id| format!("#{}", id));

        for link in page.query_all(SPY_LINKS) {
            page.remove_class(link, ACTIVE_CLASS);
            if current_href.is_some() && page.attr(link, "href") == current_href {
                page.add_class(link, ACTIVE_CLASS);
            }
        }
        current
    }

    fn on_load(&self, page: &mut dyn PageSurface) {
        if let Some(body) = page.query("body") {
            page.set_style(body, "opacity", "1");
        }
    }
}

/// The last section, in document order, whose top is within
/// `SCROLL_LOOKAHEAD` of the scroll position or above it.
pub fn active_section(sections: &[(String, f64)], scroll_y: f64) -> Option<&str> {
    sections
        .iter()
        .filter(|(_, top)| scroll_y >= top - SCROLL_LOOKAHEAD)
        .last()
        .map(|(id, _)| id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(offsets: &[(&str, f64)]) -> Vec<(String, f64)> {
        offsets.iter().map(|(id, top)| (id.to_string(), *top)).collect()
    }

    #[test]
    fn test_wiring_selectors_parse() {
        for sel in [THEME_TOGGLE, MOBILE_TOGGLE, MOBILE_MENU, IN_PAGE_LINKS, SECTIONS, SPY_LINKS] {
            assert!(Selector::parse(sel).is_ok(), "{} should parse", sel);
        }
        let links = Selector::parse(IN_PAGE_LINKS).unwrap();
        assert_eq!(links.parts.len(), 1);
        assert_eq!(links.parts[0].tag.as_deref(), Some("a"));
    }

    #[test]
    fn test_spy_threshold() {
        let s = sections(&[("home", 0.0), ("about", 800.0), ("skills", 1600.0)]);
        // 700 + 200 = 900 reaches the section at 800
        assert_eq!(active_section(&s, 700.0), Some("about"));
        assert_eq!(active_section(&s, 599.0), Some("home"));
        // exactly on the threshold counts
        assert_eq!(active_section(&s, 600.0), Some("about"));
        assert_eq!(active_section(&s, 1400.0), Some("skills"));
        assert_eq!(active_section(&s, 0.0), Some("home"));
    }

    #[test]
    fn test_spy_none_when_first_section_is_far_down() {
        let s = sections(&[("about", 500.0)]);
        assert_eq!(active_section(&s, 0.0), None);
        assert_eq!(active_section(&s, 300.0), Some("about"));
    }

    #[test]
    fn test_spy_uses_document_order_not_offsets() {
        // A later section with a smaller offset still wins when it qualifies.
        let s = sections(&[("a", 0.0), ("b", 900.0), ("c", 100.0)]);
        assert_eq!(active_section(&s, 1000.0), Some("c"));
    }
}
