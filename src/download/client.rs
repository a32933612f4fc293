//! HTTP client wrapper owning the shared connection pool.
//!
//! `HttpClient` issues the GET for a download and turns transport failures
//! and error statuses into [`DownloadError`]s. The returned response has only
//! its headers read; the body stays on the connection until it is streamed.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use tracing::{debug, instrument};
use url::Url;

use super::engine::EngineConfig;
use super::error::{DownloadError, EngineError};

/// HTTP client with a reusable connection pool.
///
/// Cloning is cheap; clones share the same pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    request_timeout: Option<Duration>,
}

impl HttpClient {
    /// Builds a client from the engine configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ClientBuild`] if the TLS backend or resolver
    /// cannot be initialised.
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        let client = base_client_builder(config)
            .build()
            .map_err(EngineError::ClientBuild)?;
        Ok(Self {
            client,
            request_timeout: config.request_timeout,
        })
    }

    /// Sends a GET for `url` and returns the response once its headers are in.
    ///
    /// # Errors
    ///
    /// - [`DownloadError::InvalidUrl`] if the URL cannot be parsed or its scheme is unsupported
    /// - [`DownloadError::ClientError`] / [`DownloadError::ServerError`] for 4xx / 5xx
    /// - [`DownloadError::Transport`] for any other transport failure
    #[instrument(level = "debug", skip(self))]
    pub async fn get(&self, url: &str) -> Result<reqwest::Response, DownloadError> {
        let parsed = Url::parse(url).map_err(|e| {
            debug!(error = %e, "URL rejected");
            DownloadError::invalid_url(url)
        })?;

        let mut request = self.client.get(parsed);
        if let Some(timeout) = self.request_timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| classify_send_error(url, e))?;

        let status = response.status().as_u16();
        debug!(status, final_url = %response.url(), "response headers received");
        if let Some(error) = DownloadError::from_status(status) {
            return Err(error);
        }

        Ok(response)
    }
}

/// Maps a send failure onto the error taxonomy.
///
/// reqwest reports URLs it refuses to request (bad scheme, no host) as
/// builder errors; everything else is a transport problem.
fn classify_send_error(url: &str, error: reqwest::Error) -> DownloadError {
    if error.is_builder() {
        debug!(error = %error, "request rejected before sending");
        DownloadError::invalid_url(url)
    } else {
        debug!(error = %error, timeout = error.is_timeout(), "request failed");
        DownloadError::transport(url, error)
    }
}

fn base_client_builder(config: &EngineConfig) -> ClientBuilder {
    let mut builder = Client::builder().connect_timeout(config.connect_timeout);
    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent.as_str());
    }
    builder
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> HttpClient {
        HttpClient::from_config(&EngineConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_get_returns_response_for_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hello".to_vec()))
            .mount(&server)
            .await;

        let response = client().get(&format!("{}/ok", server.uri())).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);
    }

    #[tokio::test]
    async fn test_get_classifies_404_as_client_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client().get(&format!("{}/missing", server.uri())).await.unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "Client Error: 404 Not Found");
    }

    #[tokio::test]
    async fn test_get_classifies_503_as_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client().get(&server.uri()).await.unwrap_err();
        assert!(err.is_server_error());
        assert_eq!(err.to_string(), "Server Error: 503 Service Unavailable");
    }

    #[tokio::test]
    async fn test_get_unparsable_url_is_invalid() {
        let url = r#"https://@"@@/"#;
        let err = client().get(url).await.unwrap_err();
        assert!(matches!(err, DownloadError::InvalidUrl { .. }));
        assert_eq!(err.to_string(), format!("Invalid URL: {url}"));
    }

    #[tokio::test]
    async fn test_get_unsupported_scheme_is_invalid() {
        let url = "ftp://www.example.com/file.zip";
        let err = client().get(url).await.unwrap_err();
        assert!(matches!(err, DownloadError::InvalidUrl { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn test_get_sends_configured_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", "libdl-test/1.0"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let config = EngineConfig {
            user_agent: Some("libdl-test/1.0".to_string()),
            ..EngineConfig::default()
        };
        let client = HttpClient::from_config(&config).unwrap();
        client.get(&server.uri()).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_request_timeout_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let config = EngineConfig {
            request_timeout: Some(Duration::from_millis(200)),
            ..EngineConfig::default()
        };
        let client = HttpClient::from_config(&config).unwrap();
        let url = format!("{}/slow", server.uri());
        let err = client.get(&url).await.unwrap_err();
        assert!(matches!(err, DownloadError::Transport { .. }), "got {err:?}");
        assert_eq!(err.to_string(), format!("Error: {url}"));
    }
}
