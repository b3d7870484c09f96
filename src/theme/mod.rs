pub mod controller;
pub mod store;

pub use controller::ThemeController;
pub use store::{FileThemeStore, MemoryThemeStore, ThemeStore};

/// Storage key the preference lives under.
pub const STORAGE_KEY: &str = "portfolio-theme";

/// Display mode, cycled light → dark → system → light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::System];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
            Self::System => Self::Light,
        }
    }

    /// Accessible label for the toggle: announces the theme a click switches to.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Self::Light => "Switch to dark mode",
            Self::Dark => "Switch to system mode",
            Self::System => "Switch to light mode",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_closes_after_three_steps() {
        for theme in Theme::ALL {
            assert_eq!(theme.next().next().next(), theme);
            assert_ne!(theme.next(), theme);
        }
    }

    #[test]
    fn test_cycle_order() {
        assert_eq!(Theme::Light.next(), Theme::Dark);
        assert_eq!(Theme::Dark.next(), Theme::System);
        assert_eq!(Theme::System.next(), Theme::Light);
    }

    #[test]
    fn test_label_names_next_theme() {
        for theme in Theme::ALL {
            let label = theme.toggle_label();
            assert!(label.contains(theme.next().name()), "{} -> {}", theme, label);
        }
    }

    #[test]
    fn test_from_str_round_trip() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_str(theme.name()), Some(theme));
        }
        assert_eq!(Theme::from_str("sepia"), None);
        assert_eq!(Theme::default(), Theme::System);
    }
}
