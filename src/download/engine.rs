//! Download engine: factory for downloads sharing one connection pool.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use libdl::download::{DownloadEngine, EngineConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = EngineConfig {
//!     request_timeout: Some(Duration::from_secs(600)),
//!     ..EngineConfig::default()
//! };
//! let engine = DownloadEngine::with_config(config)?;
//! for url in ["https://example.com/a.zip", "https://example.com/b.zip"] {
//!     let download = engine.create_download(url, ".", None).await?;
//!     download.run().await?;
//! }
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::time::Duration;

use tracing::instrument;

use super::client::HttpClient;
use super::constants::DEFAULT_CONNECT_TIMEOUT_SECS;
use super::error::{DownloadError, EngineError};
use super::single::Download;

/// Settings for the engine's HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum time to establish a connection.
    pub connect_timeout: Duration,
    /// Deadline for each request, body included. `None` means no deadline.
    pub request_timeout: Option<Duration>,
    /// User-Agent header. `None` sends no User-Agent.
    pub user_agent: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: None,
            user_agent: None,
        }
    }
}

/// Creates [`Download`]s over a shared, long-lived connection pool.
///
/// Clones share the pool; it is torn down when the last clone is dropped.
#[derive(Debug, Clone)]
pub struct DownloadEngine {
    client: HttpClient,
}

impl Default for DownloadEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DownloadEngine {
    /// Creates an engine with [`EngineConfig::default`].
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static default
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
            .expect("failed to build HTTP client with static configuration")
    }

    /// Creates an engine with explicit client settings.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ClientBuild`] if the HTTP client cannot be built.
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        Ok(Self {
            client: HttpClient::from_config(&config)?,
        })
    }

    /// Issues the GET for `url` and returns a [`Download`] ready to run.
    ///
    /// `directory` is where the file goes (relative paths resolve against the
    /// current directory). `filename` overrides the derived name verbatim.
    ///
    /// # Errors
    ///
    /// - [`DownloadError::InvalidUrl`] for malformed or unsupported URLs
    /// - [`DownloadError::ClientError`] for 4xx responses
    /// - [`DownloadError::ServerError`] for 5xx responses
    /// - [`DownloadError::Transport`] for any other transport failure
    #[instrument(skip(self, directory))]
    pub async fn create_download(
        &self,
        url: &str,
        directory: impl AsRef<Path>,
        filename: Option<&str>,
    ) -> Result<Download, DownloadError> {
        Download::open(&self.client, url, directory, filename).await
    }

    /// Same as [`create_download`](Self::create_download) into the current
    /// directory with a derived filename.
    ///
    /// # Errors
    ///
    /// Same as [`create_download`](Self::create_download).
    pub async fn create_download_in_cwd(&self, url: &str) -> Result<Download, DownloadError> {
        self.create_download(url, ".", None).await
    }
}
