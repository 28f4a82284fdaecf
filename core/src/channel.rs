//! Channel configuration for worker to collector communication

/// Channel buffer configuration
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Sample channel buffer size (workers -> collector)
    pub samples_buffer: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            samples_buffer: 10_000,
        }
    }
}

impl ChannelConfig {
    /// Override the sample buffer size (minimum 1)
    pub fn with_samples_buffer(mut self, size: usize) -> Self {
        self.samples_buffer = size.max(1);
        self
    }
}
