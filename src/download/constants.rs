//! Constants for the download module.

/// Size of each body chunk written to disk (64 KiB).
pub const DOWNLOAD_CHUNK_SIZE: usize = 64 * 1024;

/// Filename used when neither the response headers nor the URL yield one.
pub const DEFAULT_FILENAME: &str = "index.html";

/// Default HTTP connect timeout (30 seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
