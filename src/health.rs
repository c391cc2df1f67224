//! Health assessment derived from pool snapshots

use crate::metrics::PoolStats;

/// Health status of a blocking pool
///
/// # Examples
///
/// ```
/// use mergebuffer_pool::BlockingPool;
///
/// let pool = BlockingPool::new(3, || vec![0u8; 64]);
///
/// let health = pool.health();
/// assert!(health.is_healthy());
/// assert_eq!(health.free, 3);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HealthStatus {
    /// Whether the pool is healthy
    pub is_healthy: bool,

    /// Current pool utilization (0.0 to 1.0)
    pub utilization: f64,

    /// Resources currently free
    pub free: usize,

    /// Resources held by live batches
    pub used: usize,

    /// Requests blocked waiting for capacity
    pub pending_waiters: usize,

    /// Total capacity
    pub capacity: usize,

    /// Warning messages
    pub warnings: Vec<String>,
}

impl HealthStatus {
    /// Assess health from a consistent snapshot
    pub fn from_stats(stats: &PoolStats) -> Self {
        let mut warnings = Vec::new();
        let mut is_healthy = true;

        if stats.utilization > 0.9 {
            warnings.push(format!(
                "High utilization: {:.1}%",
                stats.utilization * 100.0
            ));
            is_healthy = false;
        }

        if stats.pending_waiters > 0 {
            warnings.push(format!(
                "{} request(s) blocked on capacity",
                stats.pending_waiters
            ));
        }

        if stats.free == 0 && stats.capacity > 0 {
            warnings.push("Pool is exhausted".to_string());
        }

        Self {
            is_healthy,
            utilization: stats.utilization,
            free: stats.free,
            used: stats.used,
            pending_waiters: stats.pending_waiters,
            capacity: stats.capacity,
            warnings,
        }
    }

    /// Check if the pool is healthy
    pub fn is_healthy(&self) -> bool {
        self.is_healthy
    }
}
