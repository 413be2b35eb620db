//! Existence probing: lightweight HEAD checks classifying candidate URLs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, trace};

/// HEAD probe timeout. Probes are metadata-only and must stay cheap.
pub const PROBE_TIMEOUT_SECS: u64 = 5;

/// Classification of one existence check.
///
/// `Inconclusive` is reserved for transport-level ambiguity (e.g. a request
/// that could not be constructed or a malformed response). Callers must treat
/// it exactly like `NotFound`: the candidate is excluded, progress continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Success status with an image content type.
    Exists,
    /// Anything else: error status, non-image content type, timeout,
    /// connection failure.
    NotFound,
    /// Transport-level ambiguity. Equivalent to `NotFound` for all callers.
    Inconclusive,
}

impl Probe {
    /// Whether this classification confirms an existing image.
    #[must_use]
    pub fn is_hit(self) -> bool {
        matches!(self, Self::Exists)
    }
}

/// Existence check capability. Idempotent and side-effect-free on the remote
/// resource; infallible by contract — transport errors fold into the
/// classification.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Classifies a candidate URL.
    async fn probe(&self, url: &str) -> Probe;
}

/// Reqwest-backed prober issuing metadata-only HEAD requests.
///
/// A URL is classified `Exists` only when the response status indicates
/// success AND the declared Content-Type denotes an image.
#[derive(Debug, Clone)]
pub struct HeadProber {
    client: Client,
}

impl Default for HeadProber {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadProber {
    /// Creates a prober with the default 5-second timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static configuration.
    /// This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::new_with_timeout(PROBE_TIMEOUT_SECS)
    }

    /// Creates a prober with an explicit timeout in seconds.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the supplied timeout.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new_with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build HEAD probe client with static configuration");
        Self { client }
    }
}

#[async_trait]
impl Prober for HeadProber {
    async fn probe(&self, url: &str) -> Probe {
        let response = match self.client.head(url).send().await {
            Ok(response) => response,
            Err(e) if e.is_builder() || e.is_decode() => {
                debug!(url = %url, error = %e, "probe inconclusive");
                return Probe::Inconclusive;
            }
            Err(e) => {
                trace!(url = %url, error = %e, "probe transport failure");
                return Probe::NotFound;
            }
        };

        if !response.status().is_success() {
            trace!(url = %url, status = %response.status(), "probe miss");
            return Probe::NotFound;
        }

        let is_image = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.to_ascii_lowercase().contains("image"));

        if is_image {
            trace!(url = %url, "probe hit");
            Probe::Exists
        } else {
            trace!(url = %url, "probe success status but non-image content type");
            Probe::NotFound
        }
    }
}
