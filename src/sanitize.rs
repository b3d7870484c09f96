/// URI schemes that execute or smuggle content when followed
const DANGEROUS_SCHEMES: &[&str] = &[
    "javascript:",
    "data:text/html",
    "data:application",
    "vbscript:",
];

/// True if a URL taken from content would run script when followed.
/// Leading whitespace and control characters are ignored the way browsers do.
pub fn has_dangerous_uri(value: &str) -> bool {
    let trimmed: String = value
        .trim_start_matches(|c: char| c.is_whitespace() || c.is_control())
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect::<String>()
        .to_lowercase();
    DANGEROUS_SCHEMES
        .iter()
        .any(|scheme| trimmed.starts_with(scheme))
}

/// The URL if it is safe to write into an `href`/`src`.
pub fn safe_url(value: &str) -> Option<&str> {
    if has_dangerous_uri(value) {
        None
    } else {
        Some(value)
    }
}

/// Links leaving the site open in a new tab.
pub fn is_external(url: &str) -> bool {
    url.starts_with("http")
}
