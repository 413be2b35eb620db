//! Listing-URL pattern extraction.
//!
//! Gallery listing pages follow a fixed naming convention: the page lives at
//! `{base}/{token}/index.html` and its images at
//! `{base}/{token}/images/{stem}{i}.jpg`, where `stem` is the alphabetic part
//! of `token`. This module derives that `(base_url, stem)` pair once, up
//! front, with no network access.

mod error;

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use url::Url;

pub use error::PatternError;

/// Regex for the final `/<token>/index.html` path of a listing URL.
/// The token is a run of word characters (letters, digits, underscore).
#[allow(clippy::expect_used)]
static LISTING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(\w+)/index\.html$").expect("listing regex is valid") // Static pattern, safe to panic
});

/// Base URL and filename stem derived from a gallery listing URL.
///
/// Immutable after creation. Invariants: `stem` contains only alphabetic
/// characters; `base_url` has no trailing slash, query, or fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReference {
    /// The listing URL with the trailing `/index.html` removed.
    pub base_url: String,
    /// Alphabetic-only identifier extracted from the gallery directory name.
    pub stem: String,
}

/// Derives a [`SourceReference`] from a gallery listing URL.
///
/// The URL must be a well-formed http(s) URL whose path ends in
/// `/<token>/index.html`, with no query string or fragment. The stem is the
/// token with all non-alphabetic characters (digits, underscores) removed.
///
/// # Errors
///
/// Returns [`PatternError`] if the URL fails to parse, uses a non-web scheme,
/// carries a query or fragment, does not end in the listing shape, or yields
/// an empty stem.
///
/// # Examples
///
/// ```
/// use harvester_core::pattern::extract;
///
/// let source = extract("https://site.example/gallery42/index.html").unwrap();
/// assert_eq!(source.base_url, "https://site.example/gallery42");
/// assert_eq!(source.stem, "gallery");
/// ```
pub fn extract(url: &str) -> Result<SourceReference, PatternError> {
    let parsed = Url::parse(url).map_err(|e| PatternError::malformed(url, &e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(PatternError::unsupported_scheme(url, parsed.scheme()));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(PatternError::has_query_or_fragment(url));
    }

    let Some(captures) = LISTING_PATTERN.captures(parsed.path()) else {
        return Err(PatternError::not_a_listing(url));
    };
    let token = &captures[1];

    let stem: String = token.chars().filter(char::is_ascii_alphabetic).collect();
    if stem.is_empty() {
        return Err(PatternError::empty_stem(token));
    }

    // The path is known to end in "/index.html"; the base is everything before it.
    let base_url = url
        .strip_suffix("/index.html")
        .unwrap_or(url)
        .trim_end_matches('/')
        .to_string();

    debug!(base_url = %base_url, stem = %stem, "extracted source reference");
    Ok(SourceReference { base_url, stem })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_well_formed_listing_url() {
        let source = extract("https://site.example/gallery42/index.html").unwrap();
        assert_eq!(source.base_url, "https://site.example/gallery42");
        assert_eq!(source.stem, "gallery");
    }

    #[test]
    fn test_extract_strips_digits_and_underscores_from_stem() {
        let source = extract("https://host.example/photos/ev_ent2024/index.html").unwrap();
        assert_eq!(source.stem, "event");
        assert_eq!(source.base_url, "https://host.example/photos/ev_ent2024");
    }

    #[test]
    fn test_extract_stem_is_alphabetic_only() {
        let source = extract("https://host.example/a1b2c3/index.html").unwrap();
        assert!(source.stem.chars().all(|c| c.is_ascii_alphabetic()));
        assert_eq!(source.stem, "abc");
    }

    #[test]
    fn test_extract_base_url_has_no_trailing_slash() {
        let source = extract("http://host.example/x/index.html").unwrap();
        assert!(!source.base_url.ends_with('/'));
    }

    #[test]
    fn test_extract_rejects_url_without_index_segment() {
        let result = extract("https://example.com/page.html");
        assert!(matches!(
            result,
            Err(PatternError::InvalidListingUrl { .. })
        ));
    }

    #[test]
    fn test_extract_rejects_index_not_at_path_end() {
        let result = extract("https://example.com/a/index.html/more");
        assert!(matches!(
            result,
            Err(PatternError::InvalidListingUrl { .. })
        ));
    }

    #[test]
    fn test_extract_rejects_bare_index_at_root() {
        // "/index.html" alone has no <token> segment
        let result = extract("https://example.com/index.html");
        assert!(matches!(
            result,
            Err(PatternError::InvalidListingUrl { .. })
        ));
    }

    #[test]
    fn test_extract_rejects_malformed_url() {
        let result = extract("not a url");
        assert!(matches!(
            result,
            Err(PatternError::InvalidListingUrl { .. })
        ));
    }

    #[test]
    fn test_extract_rejects_non_web_scheme() {
        let result = extract("ftp://example.com/a/index.html");
        assert!(matches!(
            result,
            Err(PatternError::InvalidListingUrl { .. })
        ));
    }

    #[test]
    fn test_extract_rejects_query_string() {
        let result = extract("https://example.com/a/index.html?page=2");
        assert!(matches!(
            result,
            Err(PatternError::InvalidListingUrl { .. })
        ));
    }

    #[test]
    fn test_extract_rejects_fragment() {
        let result = extract("https://example.com/a/index.html#top");
        assert!(matches!(
            result,
            Err(PatternError::InvalidListingUrl { .. })
        ));
    }

    #[test]
    fn test_extract_rejects_all_numeric_token() {
        let result = extract("https://example.com/12345/index.html");
        assert!(matches!(result, Err(PatternError::EmptyStem { .. })));
    }

    #[test]
    fn test_extract_is_deterministic() {
        let a = extract("https://site.example/gala9/index.html").unwrap();
        let b = extract("https://site.example/gala9/index.html").unwrap();
        assert_eq!(a, b);
    }
}
