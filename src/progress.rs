//! Injected progress reporting.
//!
//! The pipeline pushes [`ProgressEvent`]s into a channel owned by the caller;
//! the core never renders anything itself. A disabled sink drops events, so
//! library users that don't care pay nothing.

use tokio::sync::mpsc;

/// One observable step of a harvest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Candidate enumeration finished (bounded mode only).
    Generated {
        /// Number of candidates generated.
        total: usize,
    },
    /// One existence probe completed.
    Probed {
        /// Candidate index that was probed.
        index: u32,
        /// Whether the candidate was classified as an existing image.
        valid: bool,
    },
    /// Discovery finished; downloading starts next.
    Discovered {
        /// Number of confirmed-valid URLs.
        total_valid: usize,
    },
    /// One download reached a terminal outcome.
    Downloaded {
        /// The downloaded URL.
        url: String,
        /// Whether the download succeeded.
        succeeded: bool,
    },
}

/// Sending half of the progress channel, cloneable into worker tasks.
///
/// Send failures are ignored: a dropped receiver means the presentation layer
/// went away, which must never stall the pipeline.
#[derive(Debug, Clone)]
pub struct ProgressSink {
    tx: Option<mpsc::UnboundedSender<ProgressEvent>>,
}

impl ProgressSink {
    /// Creates a connected sink and the receiver to drain it.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ProgressEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// Creates a sink that drops every event.
    #[must_use]
    pub fn disabled() -> Self {
        Self { tx: None }
    }

    /// Pushes an event, ignoring a closed or absent receiver.
    pub fn emit(&self, event: ProgressEvent) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(event);
        }
    }
}
