//! Builder pattern for Scheduler construction

use std::sync::Arc;
use std::time::Duration;

use crate::channel::ChannelConfig;
use crate::config::BenchmarkConfig;
use crate::error::{BenchError, BenchResult};
use crate::progress::ProgressCallback;
use crate::traits::RequestIssuer;

use super::executor::Scheduler;

/// Builder for creating a Scheduler
///
/// # Example
///
/// ```ignore
/// let scheduler = SchedulerBuilder::new()
///     .connections(50)
///     .duration(Duration::from_secs(30))
///     .issuer(issuer)
///     .build()?;
/// ```
pub struct SchedulerBuilder {
    duration: Duration,
    connections: usize,
    issuer: Option<Arc<dyn RequestIssuer>>,
    on_progress: Option<ProgressCallback>,
    channel_config: ChannelConfig,
}

impl SchedulerBuilder {
    /// Create a new scheduler builder: 10 connections for 10 seconds
    pub fn new() -> Self {
        Self {
            duration: Duration::from_secs(10),
            connections: 10,
            issuer: None,
            on_progress: None,
            channel_config: ChannelConfig::default(),
        }
    }

    /// Take the run shape (duration and connections) from a config
    pub fn config(mut self, config: &BenchmarkConfig) -> Self {
        self.duration = config.duration;
        self.connections = config.connections;
        self
    }

    /// Set the run duration
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the number of concurrent workers
    pub fn connections(mut self, connections: usize) -> Self {
        self.connections = connections;
        self
    }

    /// Set the request issuer shared by all workers
    pub fn issuer(mut self, issuer: Arc<dyn RequestIssuer>) -> Self {
        self.issuer = Some(issuer);
        self
    }

    /// Set the progress callback
    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.on_progress = Some(callback);
        self
    }

    /// Set the channel configuration
    pub fn channel_config(mut self, config: ChannelConfig) -> Self {
        self.channel_config = config;
        self
    }

    /// Build the scheduler
    ///
    /// # Errors
    ///
    /// Returns an error if no issuer was set.
    pub fn build(self) -> BenchResult<Scheduler> {
        let issuer = self
            .issuer
            .ok_or_else(|| BenchError::missing_config("issuer"))?;

        Ok(Scheduler::new(
            self.duration,
            self.connections,
            issuer,
            self.on_progress,
            self.channel_config,
        ))
    }
}

impl Default for SchedulerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
