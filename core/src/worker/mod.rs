//! Worker module for issuing benchmark requests
//!
//! A Worker is one of the `connections` concurrent request streams of a run.
//! Each Worker is a tokio task running a strictly sequential loop:
//!
//! 1. Stop if the shared deadline has been reached
//! 2. Issue one request via the shared [`crate::RequestIssuer`]
//! 3. Commit the resulting sample to the collector channel
//! 4. Report progress
//! 5. Repeat
//!
//! # Example
//!
//! ```ignore
//! use http_bench_core::worker::WorkerBuilder;
//!
//! let worker = WorkerBuilder::new(0)
//!     .issuer(issuer)
//!     .samples_tx(tx)
//!     .progress(progress)
//!     .deadline(start + duration)
//!     .build()?;
//!
//! let stats = worker.run().await;
//! println!("Completed: {}", stats.completed);
//! ```

mod builder;
mod executor;
mod stats;

pub use builder::WorkerBuilder;
pub use executor::Worker;
pub use stats::WorkerStats;
