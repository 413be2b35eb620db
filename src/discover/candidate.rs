//! Speculative image-URL candidates built from a source reference.

use crate::pattern::SourceReference;

/// A speculatively constructed URL for a numbered image that may or may not
/// exist. Generated lazily and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The candidate image URL.
    pub url: String,
    /// One-based position in the numbered sequence.
    pub index: u32,
}

impl Candidate {
    /// Builds the candidate at `index` for a source reference, following the
    /// `{base_url}/images/{stem}{index}.jpg` convention exactly.
    #[must_use]
    pub fn new(source: &SourceReference, index: u32) -> Self {
        Self {
            url: format!("{}/images/{}{index}.jpg", source.base_url, source.stem),
            index,
        }
    }
}

/// Result of probing one candidate for existence. Produced by the prober,
/// consumed once by the pipeline driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// The probed candidate.
    pub candidate: Candidate,
    /// Whether the candidate was classified as an existing image.
    pub valid: bool,
}

/// Produces exactly `max_count` candidates with indices `1..=max_count`, in
/// increasing order. `max_count == 0` yields an empty sequence without error.
#[must_use]
pub fn bounded_candidates(source: &SourceReference, max_count: u32) -> Vec<Candidate> {
    (1..=max_count).map(|i| Candidate::new(source, i)).collect()
}
