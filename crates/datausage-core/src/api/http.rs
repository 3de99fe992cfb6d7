//! Transport seam for the dataset endpoint.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

/// HTTP request timeout in seconds.
/// 30s allows for slow responses while failing fast enough to fall back.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// The one status code the dataset contract treats as success.
const STATUS_OK: u16 = 200;

/// A raw transport response: status code plus body bytes.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// True only for status 200. Other 2xx codes do not count as success
    /// here.
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Minimal GET-only client so the transport can be swapped in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// Production transport backed by reqwest.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read response body from {}", url))?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}
