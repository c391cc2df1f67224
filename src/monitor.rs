//! Pending-waiter monitoring for blocking pools

use crate::errors::EmitError;
use std::collections::HashMap;

/// Metric name reported for the pending-waiter gauge.
pub const PENDING_QUERIES_METRIC: &str = "mergebuffer/pendingQueries";

/// Read-only capability to observe how many requests are currently blocked
/// on a pool. The monitor depends on this trait rather than a concrete pool
/// so alternative pool implementations remain monitorable.
///
/// Implementations must not block: a single atomically-read integer is
/// expected, safe to call concurrently with any number of in-flight
/// acquisitions and releases.
pub trait PendingWaiterSource {
    fn pending_waiters(&self) -> usize;
}

impl<P: PendingWaiterSource> PendingWaiterSource for std::sync::Arc<P> {
    fn pending_waiters(&self) -> usize {
        (**self).pending_waiters()
    }
}

/// Sink for gauge samples. Service identity and transport belong to the
/// implementation; the monitor only supplies a name, dimensions, and a value.
pub trait MetricEmitter {
    fn emit(
        &self,
        metric: &str,
        dimensions: &HashMap<String, String>,
        value: i64,
    ) -> Result<(), EmitError>;
}

/// Periodic probe over a pool's pending-waiter count.
///
/// Invoked by an external scheduler; it never self-schedules and never calls
/// acquisition or release. Each [`sample`](Self::sample) reads the count as a
/// point-in-time value and emits it as [`PENDING_QUERIES_METRIC`] with no
/// dimensions.
///
/// # Examples
///
/// ```
/// use mergebuffer_pool::{BlockingPool, MergeBufferPoolMonitor, MetricEmitter, EmitError};
/// use std::collections::HashMap;
///
/// struct PrintEmitter;
///
/// impl MetricEmitter for PrintEmitter {
///     fn emit(
///         &self,
///         metric: &str,
///         _dimensions: &HashMap<String, String>,
///         value: i64,
///     ) -> Result<(), EmitError> {
///         println!("{metric} = {value}");
///         Ok(())
///     }
/// }
///
/// let pool = BlockingPool::new(2, || vec![0u8; 64]);
/// let monitor = MergeBufferPoolMonitor::new(pool.clone());
/// assert!(monitor.sample(&PrintEmitter));
/// ```
pub struct MergeBufferPoolMonitor<P> {
    pool: P,
}

impl<P: PendingWaiterSource> MergeBufferPoolMonitor<P> {
    pub fn new(pool: P) -> Self {
        Self { pool }
    }

    /// Take one sample and hand it to `emitter`.
    ///
    /// Returns `true` when the monitor should keep being scheduled. A reading
    /// of zero is a normal sample: it is emitted and still returns `true`.
    /// Only an emitter failure stops the monitor, converted to `false` at
    /// this boundary instead of propagating into the scheduler.
    pub fn sample<E: MetricEmitter + ?Sized>(&self, emitter: &E) -> bool {
        let pending = self.pool.pending_waiters();

        match emitter.emit(PENDING_QUERIES_METRIC, &HashMap::new(), pending as i64) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%err, "stopping merge buffer pool monitor: emitter failed");
                false
            }
        }
    }
}
