//! libdl
//!
//! A minimal single-file HTTP downloader. A [`DownloadEngine`] owns one
//! pooled HTTP client and hands out [`Download`]s; each download reads the
//! response headers up front, works out where the body should land, and
//! streams the body to disk when [`Download::run`] is called.
//!
//! # Architecture
//!
//! - [`download`] - engine, single download, filename derivation and errors

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;

// Re-export commonly used types
pub use download::{
    DOWNLOAD_CHUNK_SIZE, Download, DownloadEngine, DownloadError, EngineConfig, EngineError,
    HttpClient,
};
