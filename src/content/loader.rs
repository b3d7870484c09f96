use std::path::PathBuf;
use std::time::Duration;

use log::info;
use url::Url;

use super::SiteConfig;

// ── Errors ───────────────────────────────────────────

/// Why the configuration document could not be obtained.
#[derive(Debug)]
pub enum LoadError {
    Read { path: PathBuf, message: String },
    Fetch(String),
    Status(u16),
    Parse(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Read { path, message } => {
                write!(f, "cannot read {}: {}", path.display(), message)
            }
            LoadError::Fetch(msg) => write!(f, "request failed: {}", msg),
            LoadError::Status(code) => write!(f, "server answered HTTP {}", code),
            LoadError::Parse(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {}

// ── Loader seam ──────────────────────────────────────

/// Anything that can hand the app a configuration document.
pub trait ContentLoader {
    fn load(&self) -> Result<SiteConfig, LoadError>;
}

/// Where the configuration document lives: a local file or an http(s) URL.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentSource {
    File(PathBuf),
    Url { url: Url, timeout: Duration },
}

impl ContentSource {
    /// Interpret a settings/CLI value. Anything that parses as an http(s)
    /// URL is fetched; everything else is a path.
    pub fn parse(raw: &str, timeout: Duration) -> Self {
        match Url::parse(raw) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                ContentSource::Url { url, timeout }
            }
            _ => ContentSource::File(PathBuf::from(raw)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            ContentSource::File(path) => path.display().to_string(),
            ContentSource::Url { url, .. } => url.to_string(),
        }
    }
}

impl ContentLoader for ContentSource {
    fn load(&self) -> Result<SiteConfig, LoadError> {
        info!("Loading configuration from {}", self.describe());
        match self {
            ContentSource::File(path) => {
                let raw = std::fs::read_to_string(path).map_err(|e| LoadError::Read {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
                parse_config(&raw)
            }
            ContentSource::Url { url, timeout } => fetch(url, *timeout),
        }
    }
}

pub fn parse_config(raw: &str) -> Result<SiteConfig, LoadError> {
    serde_json::from_str(raw).map_err(|e| LoadError::Parse(e.to_string()))
}

fn fetch(url: &Url, timeout: Duration) -> Result<SiteConfig, LoadError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LoadError::Fetch(format!("HTTP client error: {}", e)))?;

    let resp = client
        .get(url.as_str())
        .send()
        .map_err(|e| LoadError::Fetch(e.to_string()))?;

    if !resp.status().is_success() {
        return Err(LoadError::Status(resp.status().as_u16()));
    }

    let body = resp.text().map_err(|e| LoadError::Fetch(e.to_string()))?;
    parse_config(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_source_parse() {
        assert_eq!(
            ContentSource::parse("config.json", TIMEOUT),
            ContentSource::File(PathBuf::from("config.json"))
        );
        assert!(matches!(
            ContentSource::parse("https://example.com/config.json", TIMEOUT),
            ContentSource::Url { .. }
        ));
        // Windows-style drive letters parse as URLs with a one-letter scheme.
        assert!(matches!(
            ContentSource::parse("C:/site/config.json", TIMEOUT),
            ContentSource::File(_)
        ));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = ContentSource::File(dir.path().join("nope.json"));
        match source.load() {
            Err(LoadError::Read { path, .. }) => assert!(path.ends_with("nope.json")),
            other => panic!("expected read error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = ContentSource::File(path).load().unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
        assert!(err.to_string().starts_with("invalid configuration"));
    }
}
