//! Streaming HTTP fetch client.
//!
//! One [`FetchClient`] is created per run and cloned into every worker so all
//! downloads share a connection pool. Bodies are streamed to disk in chunks,
//! keeping memory use proportional to the chunk size rather than the file
//! size.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use super::error::DownloadError;
use super::filename::basename;

/// Default HTTP connect timeout for fetches.
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default HTTP read timeout for fetches. Longer than the probe timeout
/// because full image bodies transfer here.
pub const READ_TIMEOUT_SECS: u64 = 30;

/// HTTP client for streaming image downloads.
///
/// Designed to be created once and cloned for each worker, taking advantage
/// of reqwest's internal connection pooling.
#[derive(Debug, Clone)]
pub struct FetchClient {
    client: Client,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Creates a client with the default timeouts (10 s connect, 30 s read).
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static configuration.
    /// This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::new_with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a client with explicit timeout values.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the supplied timeouts.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new_with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Fetches `url` and streams the body to `dest_dir/<basename(url)>`.
    ///
    /// On any transport error, non-success status, or filesystem write
    /// failure, the partial file is removed before the error is returned, so
    /// the file on disk is either absent or byte-complete.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] if the URL is invalid, the request fails,
    /// the server responds with a non-success status, or writing fails.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_to_file(&self, url: &str, dest_dir: &Path) -> Result<PathBuf, DownloadError> {
        let parsed = Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;
        let filename = basename(&parsed);
        let file_path = dest_dir.join(&filename);
        debug!(path = %file_path.display(), "starting fetch");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(url)
            } else {
                DownloadError::network(url, e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        let file = File::create(&file_path)
            .await
            .map_err(|e| DownloadError::io(file_path.clone(), e))?;

        match stream_to_file(file, response, url, &file_path).await {
            Ok(bytes) => {
                info!(path = %file_path.display(), bytes, "fetch complete");
                Ok(file_path)
            }
            Err(e) => {
                // Never leave a partial file behind.
                debug!(path = %file_path.display(), "removing partial file after error");
                let _ = tokio::fs::remove_file(&file_path).await;
                Err(e)
            }
        }
    }
}

/// Streams the response body to the file in chunks, returning bytes written.
async fn stream_to_file(
    file: File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;
        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}
