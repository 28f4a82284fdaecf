//! HTTP request issuer backed by reqwest

use crate::config::BenchmarkConfig;
use crate::error::{BenchError, BenchResult, ErrorKind};
use crate::response::RequestOutcome;
use crate::traits::RequestIssuer;

use async_trait::async_trait;
use reqwest::{redirect, Client, Method, RequestBuilder, Url};
use std::time::Duration;
use tokio::time::Instant;

/// Fixed per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Issues the configured request against the target
///
/// Built once per run and shared by every worker. The underlying client may
/// reuse keep-alive connections; that is transparent to latency measurement,
/// which always spans send to full body consumption.
///
/// Redirects are not followed: one call is exactly one exchange, and a 3xx
/// response is classified as received.
#[derive(Debug, Clone)]
pub struct HttpIssuer {
    client: Client,
    url: Url,
    target: String,
    method: Method,
    headers: Vec<(String, String)>,
    body: Option<String>,
    timeout: Duration,
}

impl HttpIssuer {
    /// Create an issuer for the given config
    ///
    /// # Errors
    /// Fails when the target is not a valid http(s) URL or the client cannot
    /// be constructed. Header names and values are not validated here: a
    /// bad header fails each exchange as a transport error instead.
    pub fn new(config: &BenchmarkConfig) -> BenchResult<Self> {
        let url = config.parse_target()?;
        let client = Client::builder()
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| BenchError::client(e.to_string()))?;

        Ok(Self {
            client,
            url,
            target: config.target.clone(),
            method: config.method.into(),
            headers: config
                .headers
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            body: config.body.clone(),
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Override the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Per-request timeout in effect
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn request(&self) -> RequestBuilder {
        let mut builder = self.client.request(self.method.clone(), self.url.clone());
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &self.body {
            builder = builder.body(body.clone());
        }
        builder
    }

    /// Send, then drain the body so latency covers the full transfer
    async fn exchange(&self) -> Result<u16, reqwest::Error> {
        let mut response = self.request().send().await?;
        let status = response.status().as_u16();
        while response.chunk().await?.is_some() {}
        Ok(status)
    }
}

#[async_trait]
impl RequestIssuer for HttpIssuer {
    fn target(&self) -> &str {
        &self.target
    }

    async fn issue(&self) -> RequestOutcome {
        let start = Instant::now();

        // Dropping the exchange future on timeout cancels the request.
        match tokio::time::timeout(self.timeout, self.exchange()).await {
            Ok(Ok(status)) => RequestOutcome::from_status(status, start.elapsed()),
            Ok(Err(e)) => {
                tracing::debug!(target_url = %self.target, error = %e, "Request failed");
                RequestOutcome::Untimed(ErrorKind::Transport)
            }
            Err(_) => {
                tracing::debug!(
                    target_url = %self.target,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Request timed out"
                );
                RequestOutcome::Untimed(ErrorKind::Timeout)
            }
        }
    }
}
