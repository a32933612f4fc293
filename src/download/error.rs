//! Error types for the download module.
//!
//! Every failure a download can hit is a [`DownloadError`]. The first four
//! variants form the request-phase taxonomy (bad URL, 4xx, 5xx, anything
//! else on the wire); [`DownloadError::Io`] covers the local file system.
//! Display strings are part of the contract and are asserted by tests.

use std::path::PathBuf;

use thiserror::Error;

use super::status::status_line;

/// Errors that can occur while creating or running a download.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The transport rejected the URL as unparsable or unsupported.
    #[error("Invalid URL: {url}")]
    InvalidUrl {
        /// The URL as given by the caller.
        url: String,
    },

    /// The server answered with a 4xx status.
    #[error("Client Error: {}", status_message(.status))]
    ClientError {
        /// The HTTP status code.
        status: u16,
    },

    /// The server answered with a 5xx status.
    #[error("Server Error: {}", status_message(.status))]
    ServerError {
        /// The HTTP status code.
        status: u16,
    },

    /// Any other transport failure (DNS, refused connection, reset mid-body, timeout).
    #[error("Error: {url}")]
    Transport {
        /// The URL that failed.
        url: String,
        /// The underlying transport error, when one is available.
        #[source]
        source: Option<reqwest::Error>,
    },

    /// File system error while writing the body.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a generic transport error from a reqwest error.
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source: Some(source),
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Classifies a response status.
    ///
    /// Returns `Some` for 4xx and 5xx codes, `None` for everything else.
    #[must_use]
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            400..=499 => Some(Self::ClientError { status }),
            500..=599 => Some(Self::ServerError { status }),
            _ => None,
        }
    }

    /// Returns the HTTP status code for status errors.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ClientError { status } | Self::ServerError { status } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for 4xx responses.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ClientError { .. })
    }

    /// Returns true for 5xx responses.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ServerError { .. })
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn status_message(status: &u16) -> String {
    status_line(*status)
}

// No `From<reqwest::Error>` / `From<std::io::Error>`: every variant needs the
// url or path for its message, which the source errors don't carry.

/// Error type for engine construction.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The pooled HTTP client could not be built from the given config.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}
