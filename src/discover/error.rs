//! Error types for candidate discovery.

use thiserror::Error;

/// Errors that can occur while configuring or running discovery.
#[derive(Debug, Clone, Error)]
pub enum DiscoverError {
    /// Adaptive discovery needs at least one consecutive miss to terminate.
    #[error("invalid consecutive-miss threshold {value}: must be at least 1")]
    InvalidThreshold {
        /// The invalid value that was provided.
        value: u32,
    },

    /// A concurrent validation task could not be joined.
    #[error("validation task failed: {reason}")]
    ValidationTask {
        /// Join failure description.
        reason: String,
    },
}
