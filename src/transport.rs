//! Outbound HTTP transport.
//!
//! Everything that talks to a third-party service goes through
//! [`HttpTransport`], so resolvers can be exercised against canned responses
//! and failures can be attributed to the transport rather than the parser.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

const DEFAULT_USER_AGENT: &str = concat!("mediabridge/", env!("CARGO_PKG_VERSION"));

/// Errors raised while fetching a remote resource.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// A fetch-only HTTP client.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// GET `url` and return the response body.
    ///
    /// Non-2xx responses are errors.
    async fn fetch(&self, url: &str) -> Result<Bytes, TransportError>;
}

/// [`HttpTransport`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport whose requests give up after `timeout`.
    pub fn new(timeout: Duration, user_agent: Option<&str>) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .build()
            .map_err(|source| TransportError::Request {
                url: String::new(),
                source,
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn fetch(&self, url: &str) -> Result<Bytes, TransportError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| TransportError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        debug!(url = %parsed, "fetching remote resource");

        let to_error = |source: reqwest::Error| {
            if source.is_timeout() {
                TransportError::Timeout {
                    url: url.to_string(),
                }
            } else {
                TransportError::Request {
                    url: url.to_string(),
                    source,
                }
            }
        };

        let resp = self.client.get(parsed).send().await.map_err(to_error)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        resp.bytes().await.map_err(to_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_unparseable_url() {
        let transport = ReqwestTransport::new(Duration::from_secs(1), None).unwrap();
        let err = transport.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl { .. }));
    }

    #[tokio::test]
    async fn connection_refused_is_request_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let transport = ReqwestTransport::new(Duration::from_secs(2), None).unwrap();
        let err = transport.fetch("http://127.0.0.1:9/feed.xml").await.unwrap_err();
        assert!(matches!(
            err,
            TransportError::Request { .. } | TransportError::Timeout { .. }
        ));
    }

    #[test]
    fn status_error_message() {
        let err = TransportError::Status {
            url: "https://example.com/x".into(),
            status: 503,
        };
        assert_eq!(err.to_string(), "https://example.com/x returned HTTP 503");
    }
}
