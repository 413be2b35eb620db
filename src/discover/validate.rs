//! Concurrent existence validation for a bounded candidate set.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, instrument};

use super::candidate::{Candidate, ValidationResult};
use super::error::DiscoverError;
use super::probe::Prober;
use crate::progress::{ProgressEvent, ProgressSink};

/// Probes every candidate concurrently under a semaphore cap and returns the
/// results in candidate order.
///
/// Probe classifications never fail the pass; a miss only excludes the
/// candidate. Completion order of the probes themselves is unordered, but the
/// returned vector follows the input sequence.
///
/// # Errors
///
/// Returns [`DiscoverError::ValidationTask`] if a spawned probe task cannot
/// be joined (panic or runtime shutdown).
#[instrument(skip(prober, candidates, progress), fields(candidates = candidates.len()))]
pub async fn validate_bounded(
    prober: Arc<dyn Prober>,
    candidates: Vec<Candidate>,
    concurrency: usize,
    progress: &ProgressSink,
) -> Result<Vec<ValidationResult>, DiscoverError> {
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut handles = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| DiscoverError::ValidationTask {
                reason: e.to_string(),
            })?;
        let prober = Arc::clone(&prober);
        let progress = progress.clone();

        handles.push(tokio::spawn(async move {
            // Permit is dropped when this block exits (RAII)
            let _permit = permit;
            let valid = prober.probe(&candidate.url).await.is_hit();
            progress.emit(ProgressEvent::Probed {
                index: candidate.index,
                valid,
            });
            ValidationResult { candidate, valid }
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle.await.map_err(|e| DiscoverError::ValidationTask {
            reason: e.to_string(),
        })?;
        results.push(result);
    }

    let hits = results.iter().filter(|r| r.valid).count();
    debug!(total = results.len(), hits, "bounded validation complete");
    Ok(results)
}
