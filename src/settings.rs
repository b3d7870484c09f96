use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use serde::Deserialize;

use crate::content::ContentSource;
use crate::theme::STORAGE_KEY;

/// Default settings file, looked up in the working directory.
pub const SETTINGS_FILE: &str = "folio.toml";

/// Tool settings read from `folio.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub content: ContentSettings,
    pub page: PageSettings,
    pub preferences: PreferenceSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContentSettings {
    /// Path or http(s) URL of the configuration document.
    pub source: String,
    pub timeout_secs: u64,
}

impl Default for ContentSettings {
    fn default() -> Self {
        ContentSettings {
            source: "config.json".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageSettings {
    /// Page markup; the built-in layout when unset.
    pub template: Option<PathBuf>,
    pub output: PathBuf,
}

impl Default for PageSettings {
    fn default() -> Self {
        PageSettings {
            template: None,
            output: PathBuf::from("dist/index.html"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreferenceSettings {
    pub path: PathBuf,
    pub key: String,
}

impl Default for PreferenceSettings {
    fn default() -> Self {
        PreferenceSettings {
            path: PathBuf::from(".folio/preferences.json"),
            key: STORAGE_KEY.to_string(),
        }
    }
}

impl Settings {
    /// Read settings from `path`. A missing file means defaults; a file that
    /// does not parse is an error.
    pub fn load(path: &Path) -> Result<Settings, String> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No {} found, using defaults", path.display());
                return Ok(Settings::default());
            }
            Err(e) => return Err(format!("Cannot read {}: {}", path.display(), e)),
        };
        Self::parse(&raw).map_err(|e| format!("Invalid {}: {}", path.display(), e))
    }

    pub fn parse(raw: &str) -> Result<Settings, String> {
        toml::from_str(raw).map_err(|e| e.to_string())
    }

    pub fn content_source(&self) -> ContentSource {
        ContentSource::parse(&self.content.source, self.content_source_timeout())
    }

    pub fn content_source_timeout(&self) -> Duration {
        Duration::from_secs(self.content.timeout_secs)
    }
}
