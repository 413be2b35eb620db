//! Concurrent download worker pool.
//!
//! A fixed-width pool pulls confirmed-valid URLs, fetches each one through a
//! shared [`FetchClient`], and reports exactly one terminal
//! [`DownloadOutcome`] per URL over an mpsc channel to a single aggregator.
//! Completion order across URLs is unordered; the aggregation is commutative,
//! so order never affects the final tally.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, info, instrument, warn};

use super::FetchClient;
use super::filename::basename;
use crate::progress::{ProgressEvent, ProgressSink};

/// Minimum allowed worker width.
const MIN_CONCURRENCY: usize = 1;

/// Maximum allowed worker width.
const MAX_CONCURRENCY: usize = 100;

/// Default worker width if not specified.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Error type for worker pool configuration and execution.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid worker width provided.
    #[error(
        "invalid concurrency value {value}: must be between {MIN_CONCURRENCY} and {MAX_CONCURRENCY}"
    )]
    InvalidConcurrency {
        /// The invalid value that was provided.
        value: usize,
    },

    /// Semaphore was closed unexpectedly.
    #[error("semaphore closed unexpectedly")]
    SemaphoreClosed,
}

/// Terminal result of one download attempt. Every assigned URL yields exactly
/// one outcome — no silent drops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// The URL that was assigned to a worker.
    pub url: String,
    /// Filename the body was (or would have been) written under.
    pub filename: String,
    /// Whether the file was fully written.
    pub succeeded: bool,
}

/// Fixed-width concurrent download pool.
///
/// # Concurrency model
///
/// - Each download runs in its own Tokio task
/// - A semaphore permit is acquired before each task starts
/// - Permits are released automatically when tasks complete (RAII)
/// - Workers send outcomes to a single aggregator over an mpsc channel,
///   so no counter is shared mutably between workers
#[derive(Debug)]
pub struct DownloadPool {
    /// Semaphore for concurrency control.
    semaphore: Arc<Semaphore>,
    /// Configured worker width.
    concurrency: usize,
}

impl DownloadPool {
    /// Creates a pool with the given worker width.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConcurrency`] if the value is outside
    /// the valid range (1-100).
    #[instrument(level = "debug")]
    pub fn new(concurrency: usize) -> Result<Self, EngineError> {
        if !(MIN_CONCURRENCY..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(EngineError::InvalidConcurrency { value: concurrency });
        }
        Ok(Self {
            semaphore: Arc::new(Semaphore::new(concurrency)),
            concurrency,
        })
    }

    /// Returns the configured worker width.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Downloads every URL into `dest_dir`, returning one outcome per URL.
    ///
    /// Individual download failures do NOT fail this method; they surface as
    /// outcomes with `succeeded == false`. The destination directory must
    /// already exist.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SemaphoreClosed`] if the semaphore is closed.
    #[instrument(skip(self, client, urls, progress), fields(urls = urls.len(), dest_dir = %dest_dir.display()))]
    pub async fn download_all(
        &self,
        client: &FetchClient,
        urls: Vec<String>,
        dest_dir: &Path,
        progress: &ProgressSink,
    ) -> Result<Vec<DownloadOutcome>, EngineError> {
        let total = urls.len();
        let (tx, mut rx) = mpsc::unbounded_channel::<DownloadOutcome>();
        let mut handles = Vec::with_capacity(total);

        info!(total, "starting download pool");

        for url in urls {
            let permit = self
                .semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| EngineError::SemaphoreClosed)?;

            let client = client.clone();
            let dest_dir = dest_dir.to_path_buf();
            let tx = tx.clone();
            let progress = progress.clone();
            let task_url = url.clone();

            handles.push((
                url,
                tokio::spawn(async move {
                    // Permit is dropped when this block exits (RAII)
                    let _permit = permit;
                    let outcome = fetch_one(&client, &task_url, &dest_dir).await;
                    progress.emit(ProgressEvent::Downloaded {
                        url: outcome.url.clone(),
                        succeeded: outcome.succeeded,
                    });
                    // Receiver outliving the workers is guaranteed by the
                    // aggregation loop below; a send failure means the pool
                    // driver itself is gone, so there is nobody to tell.
                    let _ = tx.send(outcome);
                }),
            ));
        }
        // All worker-held senders remain; drop the driver's own so the
        // aggregation loop terminates once every worker has reported.
        drop(tx);

        let mut outcomes = Vec::with_capacity(total);
        while let Some(outcome) = rx.recv().await {
            outcomes.push(outcome);
        }

        // Surface panicked tasks as failed outcomes rather than silent drops.
        let reported: HashSet<String> = outcomes.iter().map(|o| o.url.clone()).collect();
        for (url, handle) in handles {
            if let Err(e) = handle.await {
                warn!(url = %url, error = %e, "download task panicked");
                if !reported.contains(&url) {
                    outcomes.push(failed_outcome(&url));
                }
            }
        }

        let succeeded = outcomes.iter().filter(|o| o.succeeded).count();
        debug!(
            total,
            succeeded,
            failed = outcomes.len() - succeeded,
            "download pool complete"
        );
        Ok(outcomes)
    }
}

/// Runs one download to a terminal outcome. Never panics, never retries.
async fn fetch_one(client: &FetchClient, url: &str, dest_dir: &Path) -> DownloadOutcome {
    match client.fetch_to_file(url, dest_dir).await {
        Ok(path) => DownloadOutcome {
            url: url.to_string(),
            filename: path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string(),
            succeeded: true,
        },
        Err(e) => {
            warn!(url = %url, error = %e, "download failed");
            failed_outcome(url)
        }
    }
}

fn failed_outcome(url: &str) -> DownloadOutcome {
    let filename = url::Url::parse(url)
        .map(|parsed| basename(&parsed))
        .unwrap_or_default();
    DownloadOutcome {
        url: url.to_string(),
        filename,
        succeeded: false,
    }
}
