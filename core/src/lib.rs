//! http-bench-core: duration-bound HTTP load generation
//!
//! This crate holds the benchmark engine behind the `http-bench` CLI:
//!
//! - Configuration and target validation
//! - The HTTP request issuer and its trait seam
//! - Workers, the scheduler and sample collection
//! - Progress reporting
//! - The statistics finalizer and the result type
//!
//! # Example
//!
//! ```ignore
//! use http_bench_core::{run, BenchmarkConfig, HttpMethod};
//! use std::time::Duration;
//!
//! let config = BenchmarkConfig::new("http://localhost:8080/", HttpMethod::Get)
//!     .with_duration(Duration::from_secs(5))
//!     .with_connections(20);
//!
//! let result = run(config, |percent| println!("{percent:.0}%")).await?;
//! println!("{:.1} req/s", result.requests_per_second);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod channel;
pub mod config;
pub mod engine;
pub mod error;
pub mod finalize;
pub mod issuer;
pub mod metrics;
pub mod progress;
pub mod request;
pub mod response;
pub mod result;
pub mod scheduler;
pub mod traits;
pub mod worker;

pub use channel::ChannelConfig;
pub use config::BenchmarkConfig;
pub use engine::{run, run_with_issuer};
pub use error::*;
pub use finalize::{finalize, percentile, LatencySummary};
pub use issuer::{HttpIssuer, REQUEST_TIMEOUT};
pub use metrics::*;
pub use progress::{ProgressCallback, ProgressReporter};
pub use request::*;
pub use response::*;
pub use result::BenchmarkResult;
pub use scheduler::{RunOutput, Scheduler, SchedulerBuilder};
pub use traits::*;
pub use worker::{Worker, WorkerBuilder, WorkerStats};
