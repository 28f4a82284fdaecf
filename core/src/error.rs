//! Error types for http-bench-core
//!
//! Two families live here. [`BenchError`] is the run-level error: the only
//! thing that can make [`crate::run`] return without a result. [`ErrorKind`]
//! classifies a single failed exchange; those never abort a run and end up in
//! the failure counters instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of a run-level error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchErrorKind {
    /// The target URL cannot be turned into a network destination
    InvalidTarget,
    /// Invalid or missing configuration value
    Config,
    /// The HTTP client could not be constructed
    Client,
    /// Scheduler or collector task failure
    Scheduler,
}

impl std::fmt::Display for BenchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BenchErrorKind::InvalidTarget => write!(f, "invalid target"),
            BenchErrorKind::Config => write!(f, "configuration error"),
            BenchErrorKind::Client => write!(f, "client error"),
            BenchErrorKind::Scheduler => write!(f, "scheduler error"),
        }
    }
}

/// Run-level error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct BenchError {
    /// Error category
    pub kind: BenchErrorKind,
    /// Human readable detail
    pub message: String,
}

impl BenchError {
    /// Create an error of the given kind
    pub fn new(kind: BenchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Target URL could not be parsed or resolved
    pub fn invalid_target(message: impl Into<String>) -> Self {
        Self::new(BenchErrorKind::InvalidTarget, message)
    }

    /// Generic configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(BenchErrorKind::Config, message)
    }

    /// A required builder field was never set
    pub fn missing_config(field: &str) -> Self {
        Self::config(format!("missing required field `{field}`"))
    }

    /// HTTP client construction failed
    pub fn client(message: impl Into<String>) -> Self {
        Self::new(BenchErrorKind::Client, message)
    }

    /// Scheduler-level failure
    pub fn scheduler(message: impl Into<String>) -> Self {
        Self::new(BenchErrorKind::Scheduler, message)
    }

    /// Whether this error was raised before any request was sent
    pub fn is_config(&self) -> bool {
        matches!(
            self.kind,
            BenchErrorKind::InvalidTarget | BenchErrorKind::Config | BenchErrorKind::Client
        )
    }
}

/// Result type alias
pub type BenchResult<T> = std::result::Result<T, BenchError>;

/// Classification of a failed exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A full response arrived with a status outside [200, 400)
    HttpStatus,
    /// The exchange exceeded the per-request timeout and was cancelled
    Timeout,
    /// Connection refused, DNS failure, reset, invalid header, body read error
    Transport,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::HttpStatus => write!(f, "http_status"),
            ErrorKind::Timeout => write!(f, "timeout"),
            ErrorKind::Transport => write!(f, "transport"),
        }
    }
}
