//! Pool configuration options

use std::time::Duration;

/// How the pool picks which blocked waiter to satisfy when resources free up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FairnessPolicy {
    /// Strict arrival order: only the head-of-line waiter may be satisfied.
    /// A large request at the head is never skipped by smaller later ones,
    /// so the oldest waiter unblocks as soon as enough capacity accumulates.
    #[default]
    FifoConservative,

    /// A later waiter may proceed when every waiter ahead of it needs more
    /// than is currently free. Improves utilization but lets small requests
    /// overtake large ones while the head stays blocked.
    OpportunisticSmallestFit,
}

/// Configuration for pool behavior
///
/// # Examples
///
/// ```
/// use mergebuffer_pool::{FairnessPolicy, PoolConfig};
/// use std::time::Duration;
///
/// let config = PoolConfig::new()
///     .with_fairness(FairnessPolicy::FifoConservative)
///     .with_operation_timeout(Duration::from_secs(10));
///
/// assert_eq!(config.fairness, FairnessPolicy::FifoConservative);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Waiter satisfaction order when capacity frees up
    pub fairness: FairnessPolicy,

    /// Timeout applied to async acquisition variants
    pub operation_timeout: Option<Duration>,

    /// Interval between availability polls in async acquisition variants
    pub poll_interval: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            fairness: FairnessPolicy::default(),
            operation_timeout: Some(Duration::from_secs(30)),
            poll_interval: Duration::from_millis(10),
        }
    }
}

impl PoolConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the waiter fairness policy
    pub fn with_fairness(mut self, fairness: FairnessPolicy) -> Self {
        self.fairness = fairness;
        self
    }

    /// Set the timeout for async acquisition variants
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = Some(timeout);
        self
    }

    /// Set the poll interval for async acquisition variants
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}
