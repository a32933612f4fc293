//! A single download: request phase on construction, streaming phase on [`Download::run`].

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use reqwest::Response;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, HeaderMap};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use super::client::HttpClient;
use super::constants::DOWNLOAD_CHUNK_SIZE;
use super::error::DownloadError;
use super::filename::derive_filename;

/// One request/response/file-write unit of work.
///
/// Created by [`DownloadEngine::create_download`](super::DownloadEngine::create_download)
/// with the response headers already read. The body is left on the
/// connection until [`run`](Self::run) streams it to [`path`](Self::path).
///
/// `run` consumes the download, so a body can only be streamed once. Dropping
/// a download without running it drops the response and frees its connection.
#[derive(Debug)]
pub struct Download {
    url: String,
    directory: PathBuf,
    filename: String,
    path: PathBuf,
    filesize: Option<u64>,
    response: Response,
}

impl Download {
    /// Performs the request phase.
    ///
    /// `filename`, when given and non-empty, is used verbatim. Otherwise it is derived
    /// from `Content-Disposition`, then the final URL, then `index.html`.
    /// `directory` is made absolute against the current working directory.
    ///
    /// # Errors
    ///
    /// Returns the request errors of [`HttpClient::get`], or
    /// [`DownloadError::Io`] if the current directory cannot be read
    /// while resolving a relative `directory`.
    #[instrument(level = "debug", skip(client, directory))]
    pub(crate) async fn open(
        client: &HttpClient,
        url: &str,
        directory: impl AsRef<Path>,
        filename: Option<&str>,
    ) -> Result<Self, DownloadError> {
        let response = client.get(url).await?;

        // An empty explicit name would make `path` the directory itself.
        let filename = match filename.filter(|name| !name.is_empty()) {
            Some(explicit) => explicit.to_string(),
            None => derive_filename(
                content_disposition(response.headers()).as_deref(),
                response.url(),
            ),
        };
        let filesize = content_length(response.headers());

        let directory = directory.as_ref();
        let directory =
            std::path::absolute(directory).map_err(|e| DownloadError::io(directory, e))?;
        let path = directory.join(&filename);

        debug!(filename = %filename, path = %path.display(), ?filesize, "resolved download target");

        Ok(Self {
            url: url.to_string(),
            directory,
            filename,
            path,
            filesize,
            response,
        })
    }

    /// Streams the response body to [`path`](Self::path) and returns the bytes written.
    ///
    /// The file is created or truncated. On a transport or write failure the
    /// partial file is left in place.
    ///
    /// # Errors
    ///
    /// - [`DownloadError::Io`] if the file cannot be opened or written
    /// - [`DownloadError::Transport`] if the connection fails mid-body
    #[instrument(skip(self), fields(url = %self.url, path = %self.path.display()))]
    pub async fn run(self) -> Result<u64, DownloadError> {
        let Self {
            url,
            path,
            response,
            ..
        } = self;

        let file = File::create(&path)
            .await
            .map_err(|e| DownloadError::io(path.clone(), e))?;

        let bytes_written = stream_to_file(file, response, &url, &path).await?;

        info!(bytes = bytes_written, "download complete");
        Ok(bytes_written)
    }

    /// The requested URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The URL the response came from, after redirects.
    #[must_use]
    pub fn final_url(&self) -> &Url {
        self.response.url()
    }

    /// The HTTP status of the accepted response.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.response.status().as_u16()
    }

    /// Absolute directory the file is written to.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Resolved output filename, never empty.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// `directory` joined with `filename`.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Body size from `Content-Length`, or `None` if missing or unparsable.
    #[must_use]
    pub fn filesize(&self) -> Option<u64> {
        self.filesize
    }
}

/// Streams the response body through a 64 KiB buffer, returning bytes written.
///
/// The body stream is dropped when this returns; a fully read body hands its
/// connection back to the pool.
async fn stream_to_file(
    file: File,
    response: Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::with_capacity(DOWNLOAD_CHUNK_SIZE, file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = match chunk_result {
            Ok(chunk) => chunk,
            Err(e) => {
                // Keep what already arrived on disk.
                if let Err(flush_err) = writer.flush().await {
                    debug!(
                        error = %flush_err,
                        path = %file_path.display(),
                        "partial body flush failed"
                    );
                }
                debug!(bytes = bytes_written, "body stream failed mid-transfer");
                return Err(DownloadError::transport(url, e));
            }
        };

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path, e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path, e))?;

    Ok(bytes_written)
}

/// Header value as text: UTF-8 when valid, otherwise each byte as Latin-1.
fn content_disposition(headers: &HeaderMap) -> Option<Cow<'_, str>> {
    let raw = headers.get(CONTENT_DISPOSITION)?.as_bytes();
    Some(match std::str::from_utf8(raw) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(raw.iter().map(|&b| char::from(b)).collect()),
    })
}

fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}
