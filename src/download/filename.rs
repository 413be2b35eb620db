//! Filename derivation for downloaded images.

use url::Url;

/// Derives the on-disk filename from a URL's final path segment.
///
/// Candidate URLs built from the numeric-stem scheme always have a usable
/// last segment; for robustness, an empty path falls back to a host-derived
/// name. Two URLs mapping to the same basename overwrite each other — this is
/// accepted, not treated as an error.
#[must_use]
pub fn basename(url: &Url) -> String {
    let last = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty());

    match last {
        Some(segment) => sanitize_component(segment),
        None => {
            let host = url.host_str().unwrap_or("download");
            sanitize_component(&host.replace('.', "-"))
        }
    }
}

/// Maps path separators, control characters, and other filesystem-hostile
/// characters to underscores, collapsing runs.
fn sanitize_component(value: &str) -> String {
    let mut out = String::new();
    let mut prev_sep = false;
    for ch in value.chars() {
        let mapped = match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\'' => '_',
            c if c.is_whitespace() || c.is_control() => '_',
            c if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') => c,
            _ => '_',
        };
        if mapped == '_' {
            if !prev_sep {
                out.push('_');
                prev_sep = true;
            }
        } else {
            out.push(mapped);
            prev_sep = false;
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "download".to_string()
    } else {
        trimmed.to_string()
    }
}
