//! Run-once pipeline driver.
//!
//! Stage order: extract the source reference, create the destination folder,
//! discover valid candidates (bounded or adaptive), download them through the
//! worker pool, fold the outcomes into a [`RunReport`]. Fatal errors
//! (malformed URL, invalid configuration, destination-directory failure)
//! abort the run; per-item probe and download failures only shape the tally.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument};

use crate::discover::{
    DiscoverError, HeadProber, bounded_candidates, discover_adaptive, validate_bounded,
};
use crate::download::{DownloadPool, EngineError, FetchClient};
use crate::pattern::{self, PatternError};
use crate::progress::{ProgressEvent, ProgressSink};
use crate::report::RunReport;

/// How candidate URLs are enumerated and checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryMode {
    /// Generate exactly `max_count` candidates, then validate them all
    /// concurrently.
    Bounded {
        /// Number of candidates to generate; zero yields an empty run.
        max_count: u32,
    },
    /// Probe forward from index 1 until `threshold` consecutive misses.
    Adaptive {
        /// Consecutive-miss streak that ends discovery; must be at least 1.
        threshold: u32,
    },
}

/// In-memory configuration for one harvest run.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// The gallery listing URL.
    pub url: String,
    /// Directory the images are written into; created if absent.
    pub dest_dir: PathBuf,
    /// Discovery policy.
    pub mode: DiscoveryMode,
    /// Worker width for validation probes and downloads (1-100).
    pub concurrency: usize,
}

/// Fatal errors that abort a harvest run.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// The listing URL could not be parsed into a source reference.
    /// Raised before any network call.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// Discovery configuration or execution failed.
    #[error(transparent)]
    Discover(#[from] DiscoverError),

    /// Worker pool configuration or execution failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The destination directory could not be created.
    #[error("cannot create destination directory {path}: {source}")]
    DestinationDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Runs the whole discovery-and-download pipeline exactly once.
///
/// A run with zero valid candidates is a success with zero downloads. Invalid
/// candidates are not failures: `failed` counts download attempts only.
///
/// # Errors
///
/// Returns [`HarvestError`] for the fatal cases: malformed listing URL,
/// invalid threshold or concurrency, or a destination directory that cannot
/// be created. All of these are raised before any download starts.
#[instrument(skip(config, progress), fields(url = %config.url, dest_dir = %config.dest_dir.display()))]
pub async fn run_harvest(
    config: &HarvestConfig,
    progress: &ProgressSink,
) -> Result<RunReport, HarvestError> {
    let source = pattern::extract(&config.url)?;
    info!(base_url = %source.base_url, stem = %source.stem, "source reference extracted");

    // Fail fast on configuration before touching the network or filesystem.
    let pool = DownloadPool::new(config.concurrency)?;
    if let DiscoveryMode::Adaptive { threshold: 0 } = config.mode {
        return Err(DiscoverError::InvalidThreshold { value: 0 }.into());
    }

    // Created once, before any worker starts.
    tokio::fs::create_dir_all(&config.dest_dir)
        .await
        .map_err(|e| HarvestError::DestinationDir {
            path: config.dest_dir.clone(),
            source: e,
        })?;

    let prober = HeadProber::new();
    let (total_candidates, valid_urls) = match config.mode {
        DiscoveryMode::Bounded { max_count } => {
            let candidates = bounded_candidates(&source, max_count);
            progress.emit(ProgressEvent::Generated {
                total: candidates.len(),
            });
            let total = candidates.len();
            let results =
                validate_bounded(Arc::new(prober), candidates, config.concurrency, progress)
                    .await?;
            let valid: Vec<String> = results
                .into_iter()
                .filter(|r| r.valid)
                .map(|r| r.candidate.url)
                .collect();
            (total, valid)
        }
        DiscoveryMode::Adaptive { threshold } => {
            let outcome = discover_adaptive(&prober, &source, threshold, progress).await?;
            (
                usize::try_from(outcome.probes).unwrap_or(usize::MAX),
                outcome.valid.into_iter().map(|c| c.url).collect(),
            )
        }
    };

    progress.emit(ProgressEvent::Discovered {
        total_valid: valid_urls.len(),
    });
    info!(
        total_candidates,
        total_valid = valid_urls.len(),
        "discovery complete"
    );

    let mut report = RunReport::new(total_candidates, valid_urls.len());
    if valid_urls.is_empty() {
        // Nothing to download is a successful (empty) run.
        return Ok(report);
    }

    let client = FetchClient::new();
    let outcomes = pool
        .download_all(&client, valid_urls, &config.dest_dir, progress)
        .await?;
    for outcome in &outcomes {
        report.record(outcome);
    }

    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "harvest complete"
    );
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    fn config(url: &str, dest: PathBuf, mode: DiscoveryMode) -> HarvestConfig {
        HarvestConfig {
            url: url.to_string(),
            dest_dir: dest,
            mode,
            concurrency: 4,
        }
    }

    #[tokio::test]
    async fn test_malformed_url_fails_before_any_network_call() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("out");
        let cfg = config(
            "https://example.com/page.html",
            dest.clone(),
            DiscoveryMode::Bounded { max_count: 3 },
        );

        let result = run_harvest(&cfg, &ProgressSink::disabled()).await;
        assert!(matches!(result, Err(HarvestError::Pattern(_))));
        // No partial state: the destination directory was never created.
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_zero_threshold_fails_before_directory_creation() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("out");
        let cfg = config(
            "https://site.example/g1/index.html",
            dest.clone(),
            DiscoveryMode::Adaptive { threshold: 0 },
        );

        let result = run_harvest(&cfg, &ProgressSink::disabled()).await;
        assert!(matches!(
            result,
            Err(HarvestError::Discover(DiscoverError::InvalidThreshold { value: 0 }))
        ));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_invalid_concurrency_fails_fast() {
        let temp_dir = TempDir::new().unwrap();
        let mut cfg = config(
            "https://site.example/g1/index.html",
            temp_dir.path().join("out"),
            DiscoveryMode::Bounded { max_count: 3 },
        );
        cfg.concurrency = 0;

        let result = run_harvest(&cfg, &ProgressSink::disabled()).await;
        assert!(matches!(
            result,
            Err(HarvestError::Engine(EngineError::InvalidConcurrency { value: 0 }))
        ));
    }

    #[tokio::test]
    async fn test_bounded_zero_count_is_empty_success() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("out");
        let cfg = config(
            "https://site.example/g1/index.html",
            dest.clone(),
            DiscoveryMode::Bounded { max_count: 0 },
        );

        let report = run_harvest(&cfg, &ProgressSink::disabled()).await.unwrap();
        assert_eq!(report.total_candidates(), 0);
        assert_eq!(report.total_valid(), 0);
        assert_eq!(report.succeeded(), 0);
        assert_eq!(report.failed(), 0);
        // The destination folder exists (created before discovery) but is empty.
        assert!(dest.is_dir());
        assert_eq!(std::fs::read_dir(&dest).unwrap().count(), 0);
    }
}
