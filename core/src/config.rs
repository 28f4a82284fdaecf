//! Benchmark configuration types

use crate::error::{BenchError, BenchResult};
use crate::request::HttpMethod;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Benchmark configuration
///
/// Describes one run: where to send requests, how, for how long and with how
/// many concurrent request streams. A config is consumed by exactly one
/// engine invocation and never mutated once the run starts.
///
/// Bounds on `duration` and `connections` are the caller's business; the
/// engine accepts zero for either and simply produces an empty result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Absolute target URL
    pub target: String,

    /// HTTP method
    #[serde(default)]
    pub method: HttpMethod,

    /// Wall-clock length of the run
    pub duration: Duration,

    /// Number of concurrent workers
    pub connections: usize,

    /// Extra request headers
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,

    /// Raw request payload, sent only when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl BenchmarkConfig {
    /// Create a config with 10 connections for 10 seconds
    pub fn new(target: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            target: target.into(),
            method,
            duration: Duration::from_secs(10),
            connections: 10,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Set the run duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the number of concurrent workers
    pub fn with_connections(mut self, connections: usize) -> Self {
        self.connections = connections;
        self
    }

    /// Add a request header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the request body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Parse the target into a URL with an http(s) scheme and a host
    ///
    /// # Errors
    /// Returns an `InvalidTarget` error for anything that cannot be sent to.
    pub fn parse_target(&self) -> BenchResult<Url> {
        let url = Url::parse(self.target.trim()).map_err(|e| {
            BenchError::invalid_target(format!("`{}` is not a valid URL: {e}", self.target))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(BenchError::invalid_target(format!(
                "unsupported scheme `{}` in `{}`",
                url.scheme(),
                self.target
            )));
        }

        match url.host_str() {
            Some(host) if !host.is_empty() => Ok(url),
            _ => Err(BenchError::invalid_target(format!(
                "`{}` has no host",
                self.target
            ))),
        }
    }
}
