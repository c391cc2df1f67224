//! Point-in-time pool statistics and export

use crate::health::HealthStatus;
use std::collections::HashMap;

/// Snapshot of pool occupancy, taken under the pool's lock so that the
/// free, used, and pending-waiter counts are mutually consistent.
///
/// # Examples
///
/// ```
/// use mergebuffer_pool::BlockingPool;
///
/// let pool = BlockingPool::new(4, || vec![0u8; 64]);
/// let _batch = pool.take_batch(3).unwrap();
///
/// let stats = pool.stats();
/// assert_eq!(stats.free, 1);
/// assert_eq!(stats.used, 3);
/// assert_eq!(stats.pending_waiters, 0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PoolStats {
    /// Total inventory size
    pub capacity: usize,

    /// Resources currently free
    pub free: usize,

    /// Resources held by live batches
    pub used: usize,

    /// Requests currently blocked waiting for capacity
    pub pending_waiters: usize,

    /// Pool utilization ratio (0.0 to 1.0)
    pub utilization: f64,
}

impl PoolStats {
    pub fn new(capacity: usize, free: usize, pending_waiters: usize) -> Self {
        let used = capacity - free;
        let utilization = if capacity > 0 {
            used as f64 / capacity as f64
        } else {
            0.0
        };

        Self {
            capacity,
            free,
            used,
            pending_waiters,
            utilization,
        }
    }

    /// Export the snapshot as a flat string map
    pub fn export(&self) -> HashMap<String, String> {
        let mut stats = HashMap::new();
        stats.insert("capacity".to_string(), self.capacity.to_string());
        stats.insert("free".to_string(), self.free.to_string());
        stats.insert("used".to_string(), self.used.to_string());
        stats.insert(
            "pending_waiters".to_string(),
            self.pending_waiters.to_string(),
        );
        stats.insert("utilization".to_string(), format!("{:.2}", self.utilization));
        stats
    }

    /// Derive a health assessment from this snapshot
    pub fn health(&self) -> HealthStatus {
        HealthStatus::from_stats(self)
    }
}

/// Exporter for Prometheus exposition format
pub struct StatsExporter;

impl StatsExporter {
    /// Export the snapshot in Prometheus exposition format
    ///
    /// # Examples
    ///
    /// ```
    /// use mergebuffer_pool::{BlockingPool, StatsExporter};
    /// use std::collections::HashMap;
    ///
    /// let pool = BlockingPool::new(2, || vec![0u8; 64]);
    ///
    /// let mut tags = HashMap::new();
    /// tags.insert("service".to_string(), "broker".to_string());
    ///
    /// let output = StatsExporter::export_prometheus(&pool.stats(), "merge_buffers", Some(&tags));
    /// assert!(output.contains("mergebufferpool_buffers_free"));
    /// assert!(output.contains("service=\"broker\""));
    /// ```
    pub fn export_prometheus(
        stats: &PoolStats,
        pool_name: &str,
        tags: Option<&HashMap<String, String>>,
    ) -> String {
        let mut output = String::new();
        let labels = Self::format_labels(pool_name, tags);

        output.push_str("# HELP mergebufferpool_buffers_free Buffers currently free\n");
        output.push_str("# TYPE mergebufferpool_buffers_free gauge\n");
        output.push_str(&format!(
            "mergebufferpool_buffers_free{{{}}} {}\n",
            labels, stats.free
        ));

        output.push_str("# HELP mergebufferpool_buffers_used Buffers held by live batches\n");
        output.push_str("# TYPE mergebufferpool_buffers_used gauge\n");
        output.push_str(&format!(
            "mergebufferpool_buffers_used{{{}}} {}\n",
            labels, stats.used
        ));

        output.push_str("# HELP mergebufferpool_pending_queries Requests blocked on capacity\n");
        output.push_str("# TYPE mergebufferpool_pending_queries gauge\n");
        output.push_str(&format!(
            "mergebufferpool_pending_queries{{{}}} {}\n",
            labels, stats.pending_waiters
        ));

        output.push_str("# HELP mergebufferpool_utilization Pool utilization ratio\n");
        output.push_str("# TYPE mergebufferpool_utilization gauge\n");
        output.push_str(&format!(
            "mergebufferpool_utilization{{{}}} {:.2}\n",
            labels, stats.utilization
        ));

        output
    }

    fn format_labels(pool_name: &str, tags: Option<&HashMap<String, String>>) -> String {
        let mut labels = vec![format!("pool=\"{}\"", pool_name)];

        if let Some(tags) = tags {
            for (key, value) in tags {
                labels.push(format!("{}=\"{}\"", key, value));
            }
        }

        labels.join(",")
    }
}
