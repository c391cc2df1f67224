//! # mergebuffer_pool
//!
//! Bounded, blocking buffer pool with atomic batch acquisition and
//! pending-waiter monitoring.
//!
//! A [`BlockingPool`] owns a fixed inventory of reusable resources, created
//! once by a factory at construction. Callers acquire one resource or a batch
//! of them atomically, blocking (with or without a timeout) until the whole
//! request can be satisfied; batches return to the pool on drop. A
//! [`MergeBufferPoolMonitor`] samples how many requests are currently blocked
//! and forwards the count to a metric emitter.
//!
//! ## Features
//!
//! - Fixed inventory: `free + in-use == capacity` at every instant
//! - All-or-nothing batch acquisition, exactly-once hand-out
//! - Blocking, timed, non-blocking, and async acquisition variants
//! - FIFO-conservative waiter fairness (opportunistic policy available)
//! - Lock-free pending-waiter reads for monitoring
//! - Clean shutdown: blocked waiters unblock with `PoolClosed`
//!
//! ## Quick Start
//!
//! ```rust
//! use mergebuffer_pool::BlockingPool;
//!
//! let pool = BlockingPool::new(3, || vec![0u8; 1024]);
//! {
//!     let batch = pool.take_batch(2).unwrap();
//!     assert_eq!(batch.len(), 2);
//!     // Batch automatically returned when it goes out of scope
//! }
//! assert_eq!(pool.free_count(), 3);
//! ```

mod pool;
mod config;
mod metrics;
mod health;
mod monitor;
mod errors;

pub use pool::{BatchHandle, BlockingPool};
pub use config::{FairnessPolicy, PoolConfig};
pub use metrics::{PoolStats, StatsExporter};
pub use health::HealthStatus;
pub use monitor::{
    MergeBufferPoolMonitor, MetricEmitter, PendingWaiterSource, PENDING_QUERIES_METRIC,
};
pub use errors::{EmitError, PoolError, PoolResult};
