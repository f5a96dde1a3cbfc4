//! Batch resolution configuration.

use std::time::Duration;

use super::defaults::DEFAULT_BATCH_DELAY_MS;

/// Configuration for the batch resolution driver.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tripmap::config::BatchConfig;
///
/// let config = BatchConfig::default();
/// assert_eq!(config.delay(), Duration::from_millis(500));
///
/// let config = BatchConfig::new().with_delay(Duration::from_millis(200));
/// assert_eq!(config.delay(), Duration::from_millis(200));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchConfig {
    /// Pause inserted before every request except the first
    delay: Duration,
}

impl BatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inter-request delay.
    ///
    /// Keeps sequential lookups under the provider's QPS limit.
    /// Default: 500 ms.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(DEFAULT_BATCH_DELAY_MS),
        }
    }
}
