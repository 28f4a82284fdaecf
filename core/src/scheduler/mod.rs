//! Scheduler for run lifecycle management
//!
//! The Scheduler coordinates one benchmark run:
//! - Spawning exactly `connections` worker tasks sharing one deadline
//! - Owning the sample channel and the collector task behind it
//! - Waiting for every worker to stop, in-flight requests included
//! - Measuring the actual wall-clock duration of the run
//!
//! # Example
//!
//! ```ignore
//! use http_bench_core::SchedulerBuilder;
//!
//! let scheduler = SchedulerBuilder::new()
//!     .config(&config)
//!     .issuer(issuer)
//!     .on_progress(callback)
//!     .build()?;
//!
//! let output = scheduler.run().await?;
//! ```

mod aggregator;
mod builder;
mod executor;

pub use aggregator::{aggregate_worker_stats, AggregatedStats};
pub use builder::SchedulerBuilder;
pub use executor::{RunOutput, Scheduler};

#[cfg(test)]
mod tests;
