//! Core traits
//!
//! The worker loop only needs something that can perform one exchange and
//! say how it went. [`crate::issuer::HttpIssuer`] is the real implementation;
//! tests plug in scripted issuers.

use crate::response::RequestOutcome;
use async_trait::async_trait;

/// Performs one request/response exchange against the target
///
/// Implementations must never panic or return early on network trouble:
/// every failure is folded into a [`RequestOutcome`]. A single instance is
/// shared by all workers of a run via `Arc`.
#[async_trait]
pub trait RequestIssuer: Send + Sync {
    /// Target description for logs (usually the URL)
    fn target(&self) -> &str;

    /// Issue one request and classify the result
    async fn issue(&self) -> RequestOutcome;
}
