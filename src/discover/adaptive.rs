//! Adaptive discovery: probe forward until a streak of misses.
//!
//! Generation and validation are interleaved in one sequential control loop
//! because the stopping condition depends on validation feedback: the loop
//! ends the moment `threshold` consecutive candidates have missed since the
//! last confirmed hit.

use tracing::{debug, instrument};

use super::candidate::Candidate;
use super::error::DiscoverError;
use super::probe::Prober;
use crate::pattern::SourceReference;
use crate::progress::{ProgressEvent, ProgressSink};

/// Default number of sequential misses that signals "no more images remain".
pub const DEFAULT_MISS_THRESHOLD: u32 = 3;

/// Result of an adaptive discovery run.
#[derive(Debug, Clone)]
pub struct AdaptiveOutcome {
    /// Candidates confirmed to exist, in increasing index order.
    pub valid: Vec<Candidate>,
    /// Total number of probes issued, hits and misses included.
    pub probes: u32,
}

/// Discovers valid candidates starting at index 1, stopping after exactly
/// `threshold` consecutive misses since the last hit.
///
/// The loop is inherently sequential: each step's continuation depends on the
/// running miss counter, so probes are issued one at a time on the calling
/// task. `Inconclusive` classifications count as misses.
///
/// # Errors
///
/// Returns [`DiscoverError::InvalidThreshold`] if `threshold` is zero, before
/// any probe is issued.
#[instrument(skip(prober, source, progress), fields(stem = %source.stem))]
pub async fn discover_adaptive(
    prober: &dyn Prober,
    source: &SourceReference,
    threshold: u32,
    progress: &ProgressSink,
) -> Result<AdaptiveOutcome, DiscoverError> {
    if threshold == 0 {
        return Err(DiscoverError::InvalidThreshold { value: threshold });
    }

    let mut valid = Vec::new();
    let mut consecutive_misses = 0u32;
    let mut index = 1u32;

    while consecutive_misses < threshold {
        let candidate = Candidate::new(source, index);
        let hit = prober.probe(&candidate.url).await.is_hit();
        progress.emit(ProgressEvent::Probed { index, valid: hit });

        if hit {
            consecutive_misses = 0;
            valid.push(candidate);
        } else {
            consecutive_misses += 1;
        }
        index += 1;
    }

    let probes = index - 1;
    debug!(hits = valid.len(), probes, "adaptive discovery complete");
    Ok(AdaptiveOutcome { valid, probes })
}
