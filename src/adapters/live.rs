//! Live adapter for the `RemoteTransport` port using reqwest.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::ports::{
    Method, RemoteRequest, RemoteResponse, RemoteTransport, TransportError, TransportFuture,
};

/// Live transport that calls the hosted REST store.
pub struct LiveRemote {
    client: Client,
    base_url: String,
}

impl LiveRemote {
    /// Creates a live transport for `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Other(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl RemoteTransport for LiveRemote {
    fn send(&self, request: &RemoteRequest) -> TransportFuture<'_> {
        let url = self.endpoint(&request.path);
        let method = request.method;
        let body = request.body.clone();

        Box::pin(async move {
            let builder = match method {
                Method::Get => self.client.get(&url),
                Method::Post => self.client.post(&url),
                Method::Put => self.client.put(&url),
                Method::Delete => self.client.delete(&url),
            };
            let builder = match &body {
                Some(body) => builder.json(body),
                None => builder,
            };

            let response = builder.send().await.map_err(|e| classify(&url, &e))?;
            let status = response.status().as_u16();
            let text = response
                .text()
                .await
                .map_err(|e| {
                    TransportError::Other(format!("Failed to read response from {url}: {e}"))
                })?;

            tracing::debug!(%method, %url, status, "remote call finished");
            Ok(RemoteResponse { status, body: parse_body(text) })
        })
    }
}

fn classify(url: &str, err: &reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(url.to_string())
    } else if err.is_connect() {
        TransportError::Connect { url: url.to_string(), message: err.to_string() }
    } else {
        TransportError::Other(format!("Request to {url} failed: {err}"))
    }
}

// The store answers 404s with a bare `Not found` text body.
fn parse_body(text: String) -> Value {
    if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(Value::String(text))
    }
}
