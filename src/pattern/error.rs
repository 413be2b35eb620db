//! Error types for listing-URL pattern extraction.

use thiserror::Error;

/// Errors that can occur while deriving a source reference from a listing URL.
#[derive(Debug, Clone, Error)]
pub enum PatternError {
    /// URL is malformed or does not match the expected listing shape
    #[error("invalid listing URL '{url}': {reason}\n  Suggestion: {suggestion}")]
    InvalidListingUrl {
        /// The URL that failed extraction
        url: String,
        /// Why the URL was rejected
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// The gallery directory name contains no alphabetic characters,
    /// so no filename stem can be derived from it.
    #[error("no usable stem in gallery directory '{token}': it contains no alphabetic characters")]
    EmptyStem {
        /// The directory token that produced an empty stem
        token: String,
    },
}

impl PatternError {
    /// Creates an `InvalidListingUrl` error for a URL that failed to parse.
    #[must_use]
    pub fn malformed(url: &str, parse_error: &str) -> Self {
        Self::InvalidListingUrl {
            url: url.to_string(),
            reason: parse_error.to_string(),
            suggestion: "Check the URL format and try again".to_string(),
        }
    }

    /// Creates an `InvalidListingUrl` error for a non-web URL scheme.
    #[must_use]
    pub fn unsupported_scheme(url: &str, scheme: &str) -> Self {
        Self::InvalidListingUrl {
            url: url.to_string(),
            reason: format!("scheme '{scheme}' is not supported"),
            suggestion: "Use http:// or https:// URLs".to_string(),
        }
    }

    /// Creates an `InvalidListingUrl` error for a URL whose path does not end
    /// in the `/<name>/index.html` listing shape.
    #[must_use]
    pub fn not_a_listing(url: &str) -> Self {
        Self::InvalidListingUrl {
            url: url.to_string(),
            reason: "path does not end in /<name>/index.html".to_string(),
            suggestion: "Pass the gallery listing page URL, e.g. https://host/gallery1/index.html"
                .to_string(),
        }
    }

    /// Creates an `InvalidListingUrl` error for a URL carrying a query string
    /// or fragment, which would corrupt the derived base path.
    #[must_use]
    pub fn has_query_or_fragment(url: &str) -> Self {
        Self::InvalidListingUrl {
            url: url.to_string(),
            reason: "URL has a query string or fragment".to_string(),
            suggestion: "Remove everything after index.html".to_string(),
        }
    }

    /// Creates an `EmptyStem` error.
    #[must_use]
    pub fn empty_stem(token: &str) -> Self {
        Self::EmptyStem {
            token: token.to_string(),
        }
    }
}
