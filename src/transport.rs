//! Outbound HTTP for the Adaptive Payments operations

use crate::settings::Settings;
use crate::{Error, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::Value;

/// Sends a serialized payload and returns the parsed JSON body
pub trait Transport: Send + Sync {
    fn post_json(&self, url: &str, headers: HeaderMap, body: Vec<u8>) -> Result<Value>;
}

/// Blocking reqwest transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport honoring the timeout in `settings`
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut client_builder = Client::builder();

        if let Some(timeout) = settings.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &str, mut headers: HeaderMap, body: Vec<u8>) -> Result<Value> {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self.client.post(url).headers(headers).body(body).send()?;
        let status = response.status();
        let bytes = response.bytes()?;

        // PayPal reports API failures inside the body; the status only
        // matters when the body is not JSON at all.
        serde_json::from_slice(&bytes).map_err(|e| {
            if status.is_success() {
                Error::Json(e)
            } else {
                Error::malformed_response(format!(
                    "HTTP {} with non-JSON body: {}",
                    status, e
                ))
            }
        })
    }
}
