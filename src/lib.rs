//! Harvester Core Library
//!
//! This library implements the discovery-and-download pipeline for bulk
//! gallery image harvesting: given a listing-page URL following the
//! `/<name>/index.html` convention, it infers a base path and filename stem,
//! enumerates numbered candidate image URLs, checks which of them exist, and
//! downloads the confirmed ones concurrently.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`pattern`] - Listing-URL parsing into a base URL and filename stem
//! - [`discover`] - Candidate enumeration and existence probing
//! - [`download`] - Streaming HTTP fetch client and concurrent worker pool
//! - [`pipeline`] - The run-once driver tying the stages together
//! - [`progress`] - Injected progress event channel (the core never prints)
//! - [`report`] - Final success/failure tally

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod discover;
pub mod download;
pub mod pattern;
pub mod pipeline;
pub mod progress;
pub mod report;
#[cfg(test)]
pub mod test_support;

// Re-export commonly used types
pub use discover::{
    AdaptiveOutcome, Candidate, DEFAULT_MISS_THRESHOLD, DiscoverError, HeadProber, Probe, Prober,
    ValidationResult, bounded_candidates, discover_adaptive, validate_bounded,
};
pub use download::{
    DEFAULT_CONCURRENCY, DownloadError, DownloadOutcome, DownloadPool, EngineError, FetchClient,
};
pub use pattern::{PatternError, SourceReference, extract};
pub use pipeline::{DiscoveryMode, HarvestConfig, HarvestError, run_harvest};
pub use progress::{ProgressEvent, ProgressSink};
pub use report::RunReport;
