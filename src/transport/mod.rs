//! HTTP transport boundary.
//!
//! Providers never talk to the network directly. They hold an
//! [`HttpTransport`] and describe requests in terms of URLs and form
//! bodies; the transport decides how those hit the wire. Production code
//! uses [`ReqwestTransport`]; tests swap in a canned-response mock so
//! adapter logic runs without sockets.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors raised below the provider layer.
///
/// These describe the mechanics of the exchange, not the meaning of the
/// payload. Providers wrap them unmodified so callers can always tell a
/// dead host apart from an upstream that answered with nonsense.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-success status code.
    #[error("HTTP {status} from {url}")]
    Http {
        /// Status code of the response.
        status: u16,
        /// URL the request was sent to.
        url: String,
    },

    /// The request never completed: DNS, connect, TLS, or timeout failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// A completed HTTP exchange: status code plus the raw body text.
///
/// The body is kept as text because upstreams are split between JSON
/// endpoints and plain-text ones (several block explorers answer a balance
/// query with a bare number).
#[derive(Debug, Clone)]
pub struct TransportResponse {
    status: u16,
    body: String,
}

impl TransportResponse {
    /// Build a response from its parts.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Raw body text.
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Outbound HTTP operations available to providers.
///
/// Two verbs cover the whole upstream inventory: every read is a GET and
/// the only writes are form-encoded POSTs used to broadcast transactions.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a GET request.
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError>;

    /// Issue a POST request with a form-urlencoded body.
    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<TransportResponse, TransportError>;
}

/// Production transport backed by a shared [`reqwest::Client`].
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with the default 30-second timeout.
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// Create a transport around an existing client, keeping its pool and
    /// middleware settings.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn into_response(
        url: &str,
        response: reqwest::Response,
    ) -> Result<TransportResponse, TransportError> {
        let status = response.status().as_u16();
        if !(200..300).contains(&status) {
            return Err(TransportError::Http {
                status,
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        Ok(TransportResponse::new(status, body))
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, TransportError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        Self::into_response(url, response).await
    }

    async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
    ) -> Result<TransportResponse, TransportError> {
        debug!("POST {}", url);
        let response = self.client.post(url).form(form).send().await?;
        Self::into_response(url, response).await
    }
}
