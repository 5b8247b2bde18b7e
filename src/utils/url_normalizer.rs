//! URL normalization and request-boundary validation.
//!
//! Equivalent spellings of the same target (`http://www.example.com/x`,
//! `https://example.com/x`, `example.com/x`) collapse to one canonical form so
//! they share a single short code.

use url::Url;

/// Longest payload accepted for shortening, in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

/// Prefixes stripped by [`normalize_url`], in priority order.
const STRIPPED_PREFIXES: &[&str] = &["https://www.", "http://www.", "https://", "http://", "www."];

/// Errors that can occur when validating a normalized URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL exceeds {} bytes", MAX_URL_LENGTH)]
    TooLong,

    #[error("URL must not contain whitespace or control characters")]
    IllegalCharacters,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL has no host")]
    MissingHost,

    #[error("Only http and https URLs can be shortened")]
    UnsupportedScheme,
}

/// Strips the scheme and a leading `www.` from a URL.
///
/// Prefixes are matched ASCII case-insensitively and removed repeatedly until
/// none matches, so the function is idempotent for any input. Input without a
/// known prefix is returned unchanged.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("https://www.openai.com/research"), "openai.com/research");
/// assert_eq!(normalize_url("example.com/x"), "example.com/x");
/// ```
pub fn normalize_url(input: &str) -> String {
    let mut rest = input;

    while let Some(prefix) = STRIPPED_PREFIXES
        .iter()
        .find(|p| starts_with_ignore_ascii_case(rest, p))
    {
        rest = &rest[prefix.len()..];
    }

    rest.to_string()
}

/// Checks that a normalized URL is something worth shortening.
///
/// The bare `host/path` form is re-parsed with an `http://` prefix, which is
/// enough to reject garbage without caring which scheme the user meant.
///
/// # Errors
///
/// Returns the first [`UrlNormalizationError`] rule the input violates.
pub fn validate_target(normalized: &str) -> Result<(), UrlNormalizationError> {
    if normalized.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    if normalized.len() > MAX_URL_LENGTH {
        return Err(UrlNormalizationError::TooLong);
    }

    if normalized
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(UrlNormalizationError::IllegalCharacters);
    }

    // Anything still carrying `scheme://` ahead of its first path, query or
    // fragment delimiter was not an http(s) URL.
    let authority_end = normalized.find(['/', '?', '#']).unwrap_or(normalized.len());
    if normalized[..authority_end].ends_with(':') && normalized[authority_end..].starts_with("//") {
        return Err(UrlNormalizationError::UnsupportedScheme);
    }

    let parsed = Url::parse(&format!("http://{normalized}"))
        .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlNormalizationError::MissingHost),
    }
}

fn starts_with_ignore_ascii_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_https_and_www() {
        assert_eq!(
            normalize_url("https://www.openai.com/research"),
            "openai.com/research"
        );
    }

    #[test]
    fn test_normalize_strips_http() {
        assert_eq!(normalize_url("http://example.com/x"), "example.com/x");
    }

    #[test]
    fn test_normalize_strips_https() {
        assert_eq!(normalize_url("https://example.com/x"), "example.com/x");
    }

    #[test]
    fn test_normalize_strips_bare_www() {
        assert_eq!(normalize_url("www.example.com"), "example.com");
    }

    #[test]
    fn test_normalize_equivalent_spellings_collapse() {
        let a = normalize_url("http://www.example.com/x");
        let b = normalize_url("https://example.com/x");
        assert_eq!(a, b);
        assert_eq!(a, "example.com/x");
    }

    #[test]
    fn test_normalize_without_prefix_is_unchanged() {
        assert_eq!(normalize_url("example.com/path?q=1"), "example.com/path?q=1");
        assert_eq!(normalize_url(""), "");
        assert_eq!(normalize_url("ftp://example.com"), "ftp://example.com");
    }

    #[test]
    fn test_normalize_is_case_insensitive_on_prefix_only() {
        assert_eq!(normalize_url("HTTPS://WWW.Example.com/Path"), "Example.com/Path");
    }

    #[test]
    fn test_normalize_keeps_www_inside_host() {
        assert_eq!(normalize_url("https://wwwx.example.com"), "wwwx.example.com");
        assert_eq!(normalize_url("example.com/www.page"), "example.com/www.page");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "https://www.openai.com/research",
            "http://https://example.com",
            "www.www.example.com",
            "https://www.http://www.example.com/a",
            "HTTP://WWW.",
            "http:/",
            "www",
            "example.com",
            "",
        ];

        for input in inputs {
            let once = normalize_url(input);
            assert_eq!(normalize_url(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_normalize_handles_multibyte_input() {
        assert_eq!(normalize_url("https://münchen.de"), "münchen.de");
        assert_eq!(normalize_url("ü"), "ü");
    }

    #[test]
    fn test_validate_accepts_host_and_path() {
        assert!(validate_target("example.com/x").is_ok());
        assert!(validate_target("localhost:3000/test").is_ok());
        assert!(validate_target("api.example.com/v1?q=rust#top").is_ok());
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(matches!(
            validate_target(""),
            Err(UrlNormalizationError::Empty)
        ));
    }

    #[test]
    fn test_validate_rejects_whitespace() {
        assert!(matches!(
            validate_target("not a url"),
            Err(UrlNormalizationError::IllegalCharacters)
        ));
    }

    #[test]
    fn test_validate_rejects_too_long() {
        let long = format!("example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(matches!(
            validate_target(&long),
            Err(UrlNormalizationError::TooLong)
        ));
    }

    #[test]
    fn test_validate_rejects_foreign_schemes() {
        for input in [
            "ftp://example.com/file",
            "javascript://example.com/%0Aalert(1)",
            "file:///etc/passwd",
            "https://ftp://example.com",
        ] {
            assert!(
                matches!(
                    validate_target(&normalize_url(input)),
                    Err(UrlNormalizationError::UnsupportedScheme)
                ),
                "{input}"
            );
        }
    }

    #[test]
    fn test_validate_keeps_ports_and_queries() {
        assert!(validate_target("example.com:8080/x").is_ok());
        assert!(validate_target("example.com?next=https://other.com").is_ok());
        assert!(validate_target("example.com/a?u=ftp://x").is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_host() {
        assert!(validate_target("?q=1").is_err());
        assert!(validate_target(":8080/x").is_err());
    }
}
