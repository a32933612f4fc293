//! HTTP download engine for streaming single files to disk.
//!
//! # Features
//!
//! - One shared connection pool per [`DownloadEngine`]
//! - Headers are read when a [`Download`] is created, the body only on [`Download::run`]
//! - Filename taken from `Content-Disposition`, else the URL path, else `index.html`
//! - Status classification into client (4xx) and server (5xx) errors
//!
//! # Example
//!
//! ```no_run
//! use libdl::download::DownloadEngine;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = DownloadEngine::new();
//! let download = engine
//!     .create_download("https://example.com/file.zip", "./downloads", None)
//!     .await?;
//! println!("Saving to {}", download.path().display());
//! download.run().await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod engine;
mod error;
mod filename;
mod single;
mod status;

pub use client::HttpClient;
pub use constants::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_FILENAME, DOWNLOAD_CHUNK_SIZE};
pub use engine::{DownloadEngine, EngineConfig};
pub use error::{DownloadError, EngineError};
pub use single::Download;
pub use status::status_line;

// Note: we do NOT define module-local Result aliases.
// Use `Result<T, DownloadError>` explicitly in function signatures.
