use std::fs;
use std::path::PathBuf;

use log::warn;
use serde_json::{Map, Value};

use super::{Theme, STORAGE_KEY};

/// A single durable key-value slot holding the theme name.
/// Implementations: `FileThemeStore` (JSON preference file) and
/// `MemoryThemeStore` (no persistence).
pub trait ThemeStore {
    fn get(&self) -> Option<String>;
    fn set(&mut self, value: &str) -> Result<(), String>;

    /// The stored theme, `system` when nothing usable is stored.
    fn get_theme(&self) -> Theme {
        match self.get() {
            Some(raw) => Theme::from_str(&raw).unwrap_or_else(|| {
                warn!("Ignoring unknown stored theme {:?}", raw);
                Theme::default()
            }),
            None => Theme::default(),
        }
    }
}

// ── File-backed ──────────────────────────────────────

/// Preferences kept as one JSON object on disk; only `key` is ours, other
/// entries are left as found.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
    key: String,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_key(path, STORAGE_KEY)
    }

    pub fn with_key(path: impl Into<PathBuf>, key: &str) -> Self {
        FileThemeStore {
            path: path.into(),
            key: key.to_string(),
        }
    }

    fn read_map(&self) -> Option<Map<String, Value>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Cannot read preferences {}: {}", self.path.display(), e);
                return None;
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) | Err(_) => {
                warn!("Preferences {} are not a JSON object", self.path.display());
                None
            }
        }
    }
}

impl ThemeStore for FileThemeStore {
    fn get(&self) -> Option<String> {
        self.read_map()?
            .get(&self.key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }

    fn set(&mut self, value: &str) -> Result<(), String> {
        let mut map = self.read_map().unwrap_or_default();
        map.insert(self.key.clone(), Value::String(value.to_string()));

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .map_err(|e| format!("Cannot create {}: {}", dir.display(), e))?;
        }
        let json = serde_json::to_string_pretty(&Value::Object(map)).map_err(|e| e.to_string())?;
        fs::write(&self.path, json)
            .map_err(|e| format!("Cannot write {}: {}", self.path.display(), e))
    }
}

// ── In-memory ────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    value: Option<String>,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: &str) -> Self {
        MemoryThemeStore {
            value: Some(value.to_string()),
        }
    }
}

impl ThemeStore for MemoryThemeStore {
    fn get(&self) -> Option<String> {
        self.value.clone()
    }

    fn set(&mut self, value: &str) -> Result<(), String> {
        self.value = Some(value.to_string());
        Ok(())
    }
}
