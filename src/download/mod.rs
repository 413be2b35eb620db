//! HTTP download engine for streaming images to disk.
//!
//! - Streaming downloads (memory use bounded by chunk size, not file size)
//! - Filenames derived from the URL's final path segment
//! - Fixed-width worker pool with exactly-one-outcome-per-URL accounting
//! - No partial files: failed writes are removed before the error surfaces

mod client;
mod engine;
mod error;
mod filename;

pub use client::{CONNECT_TIMEOUT_SECS, FetchClient, READ_TIMEOUT_SECS};
pub use engine::{DEFAULT_CONCURRENCY, DownloadOutcome, DownloadPool, EngineError};
pub use error::DownloadError;
pub use filename::basename;
