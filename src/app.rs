use log::{error, info};

use crate::content::{ContentLoader, LoadError, SiteConfig};
use crate::navigation::{Event, Navigation, Outcome};
use crate::page::PageSurface;
use crate::project::Projector;
use crate::theme::{Theme, ThemeController, ThemeStore};

/// The running application: configuration, theme state, wired navigation
/// and the page they act on. Built only by `boot`.
pub struct App<'p, S: ThemeStore> {
    config: SiteConfig,
    theme: ThemeController<S>,
    navigation: Navigation,
    page: &'p mut dyn PageSurface,
}

/// Load → theme → wiring → projection. A load failure stops everything
/// before the page is touched and is reported here, once.
pub fn boot<'p, S: ThemeStore>(
    loader: &dyn ContentLoader,
    page: &'p mut dyn PageSurface,
    store: S,
) -> Result<App<'p, S>, LoadError> {
    let config = match loader.load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let mut theme = ThemeController::new(store);
    theme.initialize(page);

    let navigation = Navigation::wire(page);

    Projector::new(&config).project(page);
    info!(
        "Projected {} projects, {} skill categories, {} social links (theme: {})",
        config.projects.featured.len(),
        config.skills.categories.len(),
        config.social_links.len(),
        theme.current()
    );

    Ok(App {
        config,
        theme,
        navigation,
        page,
    })
}

impl<'p, S: ThemeStore> App<'p, S> {
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    pub fn page(&self) -> &dyn PageSurface {
        &*self.page
    }

    pub fn dispatch(&mut self, event: Event) -> Outcome {
        self.navigation
            .dispatch(&mut *self.page, &mut self.theme, event)
    }

    /// Cycle the theme directly, as a click on the toggle would.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle(&mut *self.page)
    }
}
