use log::{debug, warn};

use super::{Theme, ThemeStore};
use crate::page::PageSurface;

/// Root attribute the stylesheet keys off.
pub const THEME_ATTRIBUTE: &str = "data-theme";
/// The control that cycles the theme.
pub const TOGGLE_SELECTOR: &str = ".theme-toggle";

/// Owns the current theme and mirrors it onto the page.
///
/// Touches exactly three things: the root `data-theme` attribute, the stored
/// preference, and the toggle control's class list and `aria-label`.
pub struct ThemeController<S: ThemeStore> {
    current: Theme,
    store: S,
}

impl<S: ThemeStore> ThemeController<S> {
    /// Read the stored preference; `system` when absent.
    pub fn new(store: S) -> Self {
        let current = store.get_theme();
        ThemeController { current, store }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn initialize(&mut self, page: &mut dyn PageSurface) {
        self.apply(page);
    }

    /// Advance to the next theme, persist it and re-apply.
    pub fn toggle(&mut self, page: &mut dyn PageSurface) -> Theme {
        self.current = self.current.next();
        if let Err(e) = self.store.set(self.current.name()) {
            warn!("Theme preference not saved: {}", e);
        }
        self.apply(page);
        debug!("Theme switched to {}", self.current);
        self.current
    }

    fn apply(&self, page: &mut dyn PageSurface) {
        if let Some(root) = page.document_element() {
            page.set_attr(root, THEME_ATTRIBUTE, self.current.name());
        }
        self.update_toggle(page);
    }

    fn update_toggle(&self, page: &mut dyn PageSurface) {
        let toggle = match page.query(TOGGLE_SELECTOR) {
            Some(t) => t,
            None => return,
        };
        for theme in Theme::ALL {
            page.remove_class(toggle, theme.name());
        }
        page.add_class(toggle, self.current.name());
        page.set_attr(toggle, "aria-label", self.current.toggle_label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::markup;
    use crate::theme::MemoryThemeStore;

    fn page() -> crate::page::Document {
        markup::parse(r#"<html><body><button class="theme-toggle icon-btn"></button></body></html>"#)
            .unwrap()
    }

    fn theme_classes(page: &crate::page::Document) -> Vec<&'static str> {
        let toggle = page.query(TOGGLE_SELECTOR).unwrap();
        Theme::ALL
            .iter()
            .filter(|t| page.has_class(toggle, t.name()))
            .map(|t| t.name())
            .collect()
    }

    #[test]
    fn test_initialize_uses_default() {
        let mut page = page();
        let mut ctl = ThemeController::new(MemoryThemeStore::new());
        ctl.initialize(&mut page);

        let root = page.document_element().unwrap();
        assert_eq!(page.attr(root, THEME_ATTRIBUTE).as_deref(), Some("system"));
        assert_eq!(theme_classes(&page), vec!["system"]);
        let toggle = page.query(TOGGLE_SELECTOR).unwrap();
        assert_eq!(page.attr(toggle, "aria-label").as_deref(), Some("Switch to light mode"));
        // initialize never writes the preference
        assert_eq!(ctl.store().get(), None);
    }

    #[test]
    fn test_toggle_keeps_one_class_and_labels_next() {
        let mut page = page();
        let mut ctl = ThemeController::new(MemoryThemeStore::with_value("light"));
        ctl.initialize(&mut page);

        for _ in 0..6 {
            let now = ctl.toggle(&mut page);
            assert_eq!(theme_classes(&page), vec![now.name()]);

            let toggle = page.query(TOGGLE_SELECTOR).unwrap();
            assert!(page.has_class(toggle, "icon-btn"));
            assert_eq!(
                page.attr(toggle, "aria-label").as_deref(),
                Some(now.toggle_label())
            );
            assert_eq!(ctl.store().get().as_deref(), Some(now.name()));
        }
        assert_eq!(ctl.current(), Theme::Light);
    }

    #[test]
    fn test_missing_toggle_still_sets_root() {
        let mut page = markup::parse("<html><body></body></html>").unwrap();
        let mut ctl = ThemeController::new(MemoryThemeStore::with_value("dark"));
        ctl.initialize(&mut page);
        assert_eq!(ctl.toggle(&mut page), Theme::System);
        let root = page.document_element().unwrap();
        assert_eq!(page.attr(root, THEME_ATTRIBUTE).as_deref(), Some("system"));
    }
}
