//! Terminal progress bar driven by the engine's progress callback

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Percent-of-duration progress bar
///
/// Workers report independently, so a late report can carry a smaller
/// percentage than one already shown. The bar only ever moves forward.
#[derive(Clone)]
pub struct ProgressDisplay {
    bar: ProgressBar,
    shown: Arc<AtomicU64>,
}

impl ProgressDisplay {
    /// A visible bar on stderr
    pub fn new() -> Result<Self> {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}%")?
                .progress_chars("#>-"),
        );
        Ok(Self::with_bar(bar))
    }

    /// A bar that draws nothing
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            shown: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Feed one progress report
    pub fn update(&self, percent: f64) {
        let position = percent.clamp(0.0, 100.0).floor() as u64;
        let previous = self.shown.fetch_max(position, Ordering::SeqCst);
        if position > previous {
            self.bar.set_position(position);
        }
    }

    /// Highest percentage shown so far
    pub fn position(&self) -> u64 {
        self.shown.load(Ordering::SeqCst)
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
