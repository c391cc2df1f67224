//! Blocking pool core: bounded inventory, batch acquisition, waiter accounting

use crate::config::{FairnessPolicy, PoolConfig};
use crate::errors::{PoolError, PoolResult};
use crate::health::HealthStatus;
use crate::metrics::PoolStats;
use crate::monitor::PendingWaiterSource;

use dashmap::DashMap;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// One blocked acquisition request, queued in arrival order.
struct Waiter {
    id: u64,
    count: usize,
}

/// Everything that must be observed consistently together: the free list,
/// the waiter queue, and the closed flag live under one mutex.
struct PoolState<T> {
    free: Vec<T>,
    waiters: VecDeque<Waiter>,
    closed: bool,
}

struct Shared<T: Send> {
    state: Mutex<PoolState<T>>,
    available: Condvar,
    /// Mirror of `state.waiters.len()`, maintained under the lock so the
    /// monitor can read it without taking the lock.
    pending: AtomicUsize,
    /// Live batch handles: batch id -> batch size.
    live: DashMap<u64, usize>,
    next_id: AtomicU64,
    capacity: usize,
    config: PoolConfig,
}

impl<T: Send> Shared<T> {
    fn restore(&self, batch_id: u64, resources: Vec<T>) {
        if self.live.remove(&batch_id).is_none() {
            tracing::warn!(batch_id, "returned batch was not tracked as live");
        }
        let mut state = self.state.lock();
        state.free.extend(resources);
        self.available.notify_all();
    }
}

/// A batch of resources acquired atomically from a [`BlockingPool`].
///
/// Holds exactly the requested number of resources, exclusively, until it is
/// dropped or passed to [`BlockingPool::release`]. Dropping the handle
/// returns every resource to the pool and wakes blocked waiters.
pub struct BatchHandle<T: Send> {
    resources: Vec<T>,
    batch_id: u64,
    shared: Option<Arc<Shared<T>>>,
}

impl<T: Send> BatchHandle<T> {
    fn empty() -> Self {
        Self {
            resources: Vec::new(),
            batch_id: 0,
            shared: None,
        }
    }
}

impl<T: Send> std::fmt::Debug for BatchHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchHandle")
            .field("batch_id", &self.batch_id)
            .field("len", &self.resources.len())
            .finish()
    }
}

impl<T: Send> Deref for BatchHandle<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.resources
    }
}

impl<T: Send> DerefMut for BatchHandle<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.resources
    }
}

impl<T: Send> Drop for BatchHandle<T> {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.take() {
            let resources = std::mem::take(&mut self.resources);
            shared.restore(self.batch_id, resources);
        }
    }
}

/// Bounded blocking pool over a fixed inventory of reusable resources.
///
/// The pool is populated eagerly at construction and never grows or shrinks:
/// at every instant `free + in-use == capacity`. Acquisition is all-or-nothing
/// per batch, waiters are served in arrival order by default, and the number
/// of currently blocked requests is exposed for monitoring.
///
/// Cloning the pool produces another handle to the same inventory.
///
/// # Examples
///
/// ```
/// use mergebuffer_pool::BlockingPool;
///
/// let pool = BlockingPool::new(3, || vec![0u8; 1024]);
/// {
///     let batch = pool.take_batch(2).unwrap();
///     assert_eq!(batch.len(), 2);
///     assert_eq!(pool.free_count(), 1);
///     // batch returned to the pool when dropped
/// }
/// assert_eq!(pool.free_count(), 3);
/// ```
pub struct BlockingPool<T: Send> {
    shared: Arc<Shared<T>>,
}

impl<T: Send> Clone for BlockingPool<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Send + 'static> BlockingPool<T> {
    /// Create a pool of `capacity` resources, invoking `factory` exactly
    /// `capacity` times up front. A panicking factory aborts construction
    /// entirely; the pool never starts partially populated.
    pub fn new<F>(capacity: usize, factory: F) -> Self
    where
        F: FnMut() -> T,
    {
        Self::with_config(capacity, PoolConfig::default(), factory)
    }

    /// Create a pool with explicit configuration.
    pub fn with_config<F>(capacity: usize, config: PoolConfig, mut factory: F) -> Self
    where
        F: FnMut() -> T,
    {
        let free: Vec<T> = (0..capacity).map(|_| factory()).collect();

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(PoolState {
                    free,
                    waiters: VecDeque::new(),
                    closed: false,
                }),
                available: Condvar::new(),
                pending: AtomicUsize::new(0),
                live: DashMap::new(),
                next_id: AtomicU64::new(1),
                capacity,
                config,
            }),
        }
    }

    /// Acquire `count` resources, blocking without bound until they are
    /// simultaneously free.
    ///
    /// Fails fast with [`PoolError::InvalidRequest`] when `count` exceeds the
    /// pool capacity (such a request could never be satisfied). `count == 0`
    /// succeeds immediately with an empty batch. While blocked, the call is
    /// counted as exactly one pending waiter regardless of `count`.
    pub fn take_batch(&self, count: usize) -> PoolResult<BatchHandle<T>> {
        self.acquire(count, None)
    }

    /// Acquire `count` resources, giving up with
    /// [`PoolError::AcquireTimeout`] if they do not all become free within
    /// `timeout`. No partial allocation: on timeout nothing is granted and
    /// the pending-waiter count is restored.
    pub fn take_batch_timeout(&self, count: usize, timeout: Duration) -> PoolResult<BatchHandle<T>> {
        self.acquire(count, Some((Instant::now() + timeout, timeout)))
    }

    /// Acquire a single resource, blocking without bound.
    pub fn take(&self) -> PoolResult<BatchHandle<T>> {
        self.take_batch(1)
    }

    /// Acquire a single resource with a timeout.
    pub fn take_timeout(&self, timeout: Duration) -> PoolResult<BatchHandle<T>> {
        self.take_batch_timeout(1, timeout)
    }

    /// Non-blocking acquisition: `Ok(Some(batch))` when `count` resources are
    /// free right now and no blocked waiter would be bypassed, `Ok(None)`
    /// otherwise. Never registers as a pending waiter.
    pub fn try_take_batch(&self, count: usize) -> PoolResult<Option<BatchHandle<T>>> {
        if count > self.shared.capacity {
            return Err(PoolError::InvalidRequest {
                requested: count,
                capacity: self.shared.capacity,
            });
        }

        let mut state = self.shared.state.lock();
        if state.closed {
            return Err(PoolError::PoolClosed);
        }
        if count == 0 {
            return Ok(Some(BatchHandle::empty()));
        }
        if state.waiters.is_empty() && state.free.len() >= count {
            Ok(Some(self.grab(&mut state, count)))
        } else {
            Ok(None)
        }
    }

    /// Non-blocking acquisition of a single resource.
    pub fn try_take(&self) -> PoolResult<Option<BatchHandle<T>>> {
        self.try_take_batch(1)
    }

    /// Acquire `count` resources asynchronously by polling the non-blocking
    /// path, bounded by the configured operation timeout. Never blocks a
    /// thread and never bypasses queued waiters.
    pub async fn take_batch_async(&self, count: usize) -> PoolResult<BatchHandle<T>> {
        let timeout = self
            .shared
            .config
            .operation_timeout
            .unwrap_or(Duration::from_secs(30));
        let poll = self.shared.config.poll_interval;

        tokio::time::timeout(timeout, async {
            loop {
                match self.try_take_batch(count)? {
                    Some(batch) => return Ok(batch),
                    None => tokio::time::sleep(poll).await,
                }
            }
        })
        .await
        .map_err(|_| PoolError::AcquireTimeout(timeout))?
    }

    /// Acquire a single resource asynchronously.
    pub async fn take_async(&self) -> PoolResult<BatchHandle<T>> {
        self.take_batch_async(1).await
    }

    /// Explicit, checked release. Equivalent to dropping the handle, except
    /// that releasing a batch into a pool that does not own it fails with
    /// [`PoolError::InvalidRelease`] (the batch still returns to its owning
    /// pool, so no inventory is lost). Double release cannot compile: the
    /// batch is consumed here.
    pub fn release(&self, batch: BatchHandle<T>) -> PoolResult<()> {
        let owned = match batch.shared.as_ref() {
            // An empty batch holds nothing; releasing it is a no-op.
            None => return Ok(()),
            Some(owner) => Arc::ptr_eq(owner, &self.shared),
        };

        if owned {
            drop(batch);
            Ok(())
        } else {
            tracing::warn!(
                batch_id = batch.batch_id,
                "batch released into a pool that does not own it"
            );
            Err(PoolError::InvalidRelease)
        }
    }

    /// Close the pool: every blocked waiter unblocks with
    /// [`PoolError::PoolClosed`] and new acquisitions fail with the same
    /// error. Outstanding batches still return their resources on drop.
    pub fn close(&self) {
        let mut state = self.shared.state.lock();
        if !state.closed {
            state.closed = true;
            tracing::debug!(
                capacity = self.shared.capacity,
                waiters = state.waiters.len(),
                "blocking pool closed"
            );
            self.shared.available.notify_all();
        }
    }

    /// Whether the pool has been closed.
    pub fn is_closed(&self) -> bool {
        self.shared.state.lock().closed
    }

    /// Total inventory size, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    /// Resources currently free.
    pub fn free_count(&self) -> usize {
        self.shared.state.lock().free.len()
    }

    /// Resources currently held by live batches.
    pub fn used_count(&self) -> usize {
        self.shared.capacity - self.shared.state.lock().free.len()
    }

    /// Point-in-time snapshot of free/used/pending, read under one lock hold
    /// so the counts are mutually consistent.
    pub fn stats(&self) -> PoolStats {
        let state = self.shared.state.lock();
        PoolStats::new(
            self.shared.capacity,
            state.free.len(),
            state.waiters.len(),
        )
    }

    /// Health assessment derived from the current snapshot.
    pub fn health(&self) -> HealthStatus {
        self.stats().health()
    }

    fn acquire(
        &self,
        count: usize,
        deadline: Option<(Instant, Duration)>,
    ) -> PoolResult<BatchHandle<T>> {
        if count > self.shared.capacity {
            return Err(PoolError::InvalidRequest {
                requested: count,
                capacity: self.shared.capacity,
            });
        }

        let mut state = self.shared.state.lock();
        if state.closed {
            return Err(PoolError::PoolClosed);
        }
        if count == 0 {
            return Ok(BatchHandle::empty());
        }

        // Fast path: nobody queued and enough free right now.
        if state.waiters.is_empty() && state.free.len() >= count {
            return Ok(self.grab(&mut state, count));
        }

        let ticket = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        state.waiters.push_back(Waiter { id: ticket, count });

        // The request only counts as a pending waiter once it actually
        // waits; the first eligibility check below happens before any wait.
        let mut counted = false;

        let outcome = loop {
            if state.closed {
                break Err(PoolError::PoolClosed);
            }
            if self.eligible(&state, ticket, count) {
                break Ok(());
            }
            if !counted {
                counted = true;
                // Guarded by the state lock; Relaxed is enough.
                self.shared.pending.fetch_add(1, Ordering::Relaxed);
            }
            match deadline {
                Some((when, timeout)) => {
                    let timed_out = self
                        .shared
                        .available
                        .wait_until(&mut state, when)
                        .timed_out();
                    // A wake-up racing the deadline still wins: re-check
                    // closed/eligible at the top before giving up.
                    if timed_out && !state.closed && !self.eligible(&state, ticket, count) {
                        break Err(PoolError::AcquireTimeout(timeout));
                    }
                }
                None => self.shared.available.wait(&mut state),
            }
        };

        // Every exit path leaves the queue and the counter exactly once.
        if let Some(pos) = state.waiters.iter().position(|w| w.id == ticket) {
            state.waiters.remove(pos);
        }
        if counted {
            self.shared.pending.fetch_sub(1, Ordering::Relaxed);
        }

        let result = outcome.map(|()| self.grab(&mut state, count));

        // The head of the queue may have changed; let the next waiter re-check.
        self.shared.available.notify_all();
        result
    }

    fn eligible(&self, state: &PoolState<T>, ticket: u64, count: usize) -> bool {
        if state.free.len() < count {
            return false;
        }
        match self.shared.config.fairness {
            FairnessPolicy::FifoConservative => {
                state.waiters.front().is_some_and(|w| w.id == ticket)
            }
            FairnessPolicy::OpportunisticSmallestFit => state
                .waiters
                .iter()
                .take_while(|w| w.id != ticket)
                .all(|w| w.count > state.free.len()),
        }
    }

    fn grab(&self, state: &mut PoolState<T>, count: usize) -> BatchHandle<T> {
        let at = state.free.len() - count;
        let resources = state.free.split_off(at);
        let batch_id = self.shared.next_id.fetch_add(1, Ordering::Relaxed);
        self.shared.live.insert(batch_id, count);

        BatchHandle {
            resources,
            batch_id,
            shared: Some(Arc::clone(&self.shared)),
        }
    }
}

impl<T: Send + 'static> PendingWaiterSource for BlockingPool<T> {
    fn pending_waiters(&self) -> usize {
        self.shared.pending.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;

    fn numbered() -> impl FnMut() -> usize {
        let mut n = 0;
        move || {
            n += 1;
            n
        }
    }

    fn settle() {
        thread::sleep(Duration::from_millis(200));
    }

    #[test]
    fn take_and_return_round_trip() {
        let pool = BlockingPool::new(3, numbered());

        {
            let batch = pool.take_batch(2).unwrap();
            assert_eq!(batch.len(), 2);
            assert_eq!(pool.free_count(), 1);
            assert_eq!(pool.used_count(), 2);
        }

        assert_eq!(pool.free_count(), 3);
        assert_eq!(pool.used_count(), 0);
    }

    #[test]
    fn batches_are_all_or_nothing() {
        let pool = BlockingPool::new(4, numbered());

        let _held = pool.take_batch(3).unwrap();
        assert_eq!(pool.free_count(), 1);

        // One buffer is free but two are wanted: nothing is granted.
        assert!(pool.try_take_batch(2).unwrap().is_none());
        assert_eq!(pool.free_count(), 1);
    }

    #[test]
    fn resources_are_handed_out_exactly_once() {
        let pool = BlockingPool::new(3, numbered());

        let a = pool.take().unwrap();
        let b = pool.take().unwrap();
        let c = pool.take().unwrap();

        let mut seen = vec![a[0], b[0], c[0]];
        seen.sort_unstable();
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn zero_count_is_an_empty_batch() {
        let pool = BlockingPool::new(2, numbered());

        let batch = pool.take_batch(0).unwrap();
        assert!(batch.is_empty());
        assert_eq!(pool.free_count(), 2);

        pool.release(batch).unwrap();
        assert_eq!(pool.free_count(), 2);
    }

    #[test]
    fn oversized_request_fails_fast() {
        let pool = BlockingPool::new(2, numbered());

        let err = pool.take_batch(3).unwrap_err();
        assert_eq!(
            err,
            PoolError::InvalidRequest {
                requested: 3,
                capacity: 2
            }
        );
        assert_eq!(pool.pending_waiters(), 0);
        assert_eq!(pool.free_count(), 2);

        assert!(pool.try_take_batch(3).is_err());
    }

    #[test]
    fn timed_acquire_times_out_on_exhausted_pool() {
        let pool = BlockingPool::new(1, numbered());
        let _held = pool.take().unwrap();

        let start = Instant::now();
        let err = pool
            .take_batch_timeout(1, Duration::from_millis(100))
            .unwrap_err();
        let elapsed = start.elapsed();

        assert!(matches!(err, PoolError::AcquireTimeout(_)));
        assert!(elapsed >= Duration::from_millis(90), "returned too early: {elapsed:?}");
        assert!(elapsed < Duration::from_secs(2), "returned too late: {elapsed:?}");
        assert_eq!(pool.pending_waiters(), 0);
        assert_eq!(pool.free_count(), 0);
    }

    #[test]
    fn timed_acquire_succeeds_when_capacity_frees_in_time() {
        let pool = BlockingPool::new(1, numbered());
        let held = pool.take().unwrap();

        let releaser = thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            drop(held);
        });

        let batch = pool.take_batch_timeout(1, Duration::from_secs(5)).unwrap();
        assert_eq!(batch.len(), 1);
        releaser.join().unwrap();
    }

    #[test]
    fn blocked_batch_counts_as_a_single_waiter() {
        let pool = BlockingPool::new(2, numbered());
        let held = pool.take_batch(2).unwrap();

        let waiter = {
            let pool = pool.clone();
            thread::spawn(move || pool.take_batch(2).unwrap())
        };

        settle();
        // One waiter regardless of how many buffers it asked for.
        assert_eq!(pool.pending_waiters(), 1);

        drop(held);
        let batch = waiter.join().unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(pool.pending_waiters(), 0);
    }

    #[test]
    fn fourth_take_blocks_until_any_release() {
        let pool = BlockingPool::new(3, numbered());

        let a = pool.take().unwrap();
        let b = pool.take().unwrap();
        let c = pool.take().unwrap();
        assert_eq!(pool.pending_waiters(), 0);

        let fourth = {
            let pool = pool.clone();
            thread::spawn(move || pool.take().unwrap())
        };

        settle();
        assert_eq!(pool.pending_waiters(), 1);

        drop(b);
        let batch = fourth.join().unwrap();
        assert_eq!(pool.pending_waiters(), 0);
        assert_eq!(pool.free_count(), 0);

        drop(a);
        drop(c);
        drop(batch);
        assert_eq!(pool.free_count(), 3);
    }

    #[test]
    fn fifo_head_is_not_skipped_by_smaller_waiters() {
        let pool = BlockingPool::new(2, numbered());
        let h1 = pool.take().unwrap();
        let h2 = pool.take().unwrap();

        let (tx, rx) = mpsc::channel();

        let large = {
            let pool = pool.clone();
            let tx = tx.clone();
            thread::spawn(move || {
                let batch = pool.take_batch(2).unwrap();
                tx.send("large").unwrap();
                drop(batch);
            })
        };
        settle();

        let small = {
            let pool = pool.clone();
            let tx = tx.clone();
            thread::spawn(move || {
                let batch = pool.take().unwrap();
                tx.send("small").unwrap();
                drop(batch);
            })
        };
        settle();
        assert_eq!(pool.pending_waiters(), 2);

        // One buffer frees up. The head wants two, so under the conservative
        // policy nobody proceeds yet.
        drop(h1);
        settle();
        assert_eq!(pool.pending_waiters(), 2);

        drop(h2);
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), "large");
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), "small");

        large.join().unwrap();
        small.join().unwrap();
        assert_eq!(pool.pending_waiters(), 0);
        assert_eq!(pool.free_count(), 2);
    }

    #[test]
    fn opportunistic_policy_lets_a_smaller_waiter_fit() {
        let config = PoolConfig::new().with_fairness(FairnessPolicy::OpportunisticSmallestFit);
        let pool = BlockingPool::with_config(2, config, numbered());
        let h1 = pool.take().unwrap();
        let h2 = pool.take().unwrap();

        let (tx, rx) = mpsc::channel();

        let large = {
            let pool = pool.clone();
            let tx = tx.clone();
            thread::spawn(move || {
                let batch = pool.take_batch(2).unwrap();
                tx.send("large").unwrap();
                drop(batch);
            })
        };
        settle();

        let small = {
            let pool = pool.clone();
            let tx = tx.clone();
            thread::spawn(move || {
                let batch = pool.take().unwrap();
                tx.send("small").unwrap();
                drop(batch);
            })
        };
        settle();

        // One buffer frees up: not enough for the head, so the later single
        // waiter may overtake it.
        drop(h1);
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), "small");
        small.join().unwrap();

        drop(h2);
        assert_eq!(rx.recv_timeout(Duration::from_secs(2)).unwrap(), "large");
        large.join().unwrap();

        assert_eq!(pool.free_count(), 2);
    }

    #[test]
    fn close_unblocks_waiters_and_rejects_new_requests() {
        let pool = BlockingPool::new(1, numbered());
        let held = pool.take().unwrap();

        let blocked = {
            let pool = pool.clone();
            thread::spawn(move || pool.take())
        };
        settle();
        assert_eq!(pool.pending_waiters(), 1);

        pool.close();
        assert_eq!(blocked.join().unwrap().unwrap_err(), PoolError::PoolClosed);
        assert_eq!(pool.pending_waiters(), 0);

        assert_eq!(pool.take().unwrap_err(), PoolError::PoolClosed);
        assert!(pool.try_take().is_err());

        // Outstanding batches still come home after close.
        drop(held);
        assert_eq!(pool.free_count(), 1);
        assert!(pool.is_closed());
    }

    #[test]
    fn close_unblocks_timed_waiters() {
        let pool = BlockingPool::new(1, numbered());
        let _held = pool.take().unwrap();

        let blocked = {
            let pool = pool.clone();
            thread::spawn(move || pool.take_batch_timeout(1, Duration::from_secs(30)))
        };
        settle();

        pool.close();
        assert_eq!(blocked.join().unwrap().unwrap_err(), PoolError::PoolClosed);
        assert_eq!(pool.pending_waiters(), 0);
    }

    #[test]
    fn explicit_release_returns_the_batch() {
        let pool = BlockingPool::new(3, numbered());

        let batch = pool.take_batch(2).unwrap();
        assert_eq!(pool.free_count(), 1);

        pool.release(batch).unwrap();
        assert_eq!(pool.free_count(), 3);
    }

    #[test]
    fn releasing_into_a_foreign_pool_is_rejected() {
        let owner = BlockingPool::new(1, numbered());
        let other = BlockingPool::new(1, numbered());

        let batch = owner.take().unwrap();
        assert_eq!(other.release(batch).unwrap_err(), PoolError::InvalidRelease);

        // The stray batch went back to its owner, not the foreign pool.
        assert_eq!(owner.free_count(), 1);
        assert_eq!(other.free_count(), 1);
    }

    #[test]
    fn inventory_invariant_holds_across_error_paths() {
        let pool = BlockingPool::new(3, numbered());

        assert!(pool.take_batch(4).is_err());
        assert_eq!(pool.free_count() + pool.used_count(), 3);

        let held = pool.take_batch(3).unwrap();
        assert!(pool.take_batch_timeout(1, Duration::from_millis(50)).is_err());
        assert_eq!(pool.free_count() + pool.used_count(), 3);

        drop(held);
        assert_eq!(pool.free_count() + pool.used_count(), 3);
        assert_eq!(pool.free_count(), 3);
    }

    #[test]
    fn concurrent_churn_preserves_the_inventory() {
        let pool = BlockingPool::new(4, numbered());

        let workers: Vec<_> = (0..8)
            .map(|i| {
                let pool = pool.clone();
                thread::spawn(move || {
                    let count = i % 3 + 1;
                    for _ in 0..50 {
                        let batch = pool.take_batch(count).unwrap();
                        assert_eq!(batch.len(), count);
                        thread::sleep(Duration::from_micros(100));
                        drop(batch);
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(pool.free_count(), 4);
        assert_eq!(pool.used_count(), 0);
        assert_eq!(pool.pending_waiters(), 0);
    }

    #[test]
    fn stats_snapshot_is_consistent() {
        let pool = BlockingPool::new(4, numbered());
        let _held = pool.take_batch(3).unwrap();

        let stats = pool.stats();
        assert_eq!(stats.capacity, 4);
        assert_eq!(stats.free, 1);
        assert_eq!(stats.used, 3);
        assert_eq!(stats.pending_waiters, 0);
    }

    #[tokio::test]
    async fn async_take_round_trip() {
        let pool = BlockingPool::new(2, numbered());

        {
            let batch = pool.take_batch_async(2).await.unwrap();
            assert_eq!(batch.len(), 2);
        }

        assert_eq!(pool.free_count(), 2);
    }

    #[tokio::test]
    async fn async_take_times_out_on_exhausted_pool() {
        let config = PoolConfig::new().with_operation_timeout(Duration::from_millis(100));
        let pool = BlockingPool::with_config(1, config, numbered());
        let _held = pool.take().unwrap();

        let err = pool.take_async().await.unwrap_err();
        assert!(matches!(err, PoolError::AcquireTimeout(_)));
        assert_eq!(pool.pending_waiters(), 0);
    }

    #[tokio::test]
    async fn async_take_waits_for_release() {
        let pool = BlockingPool::new(1, numbered());
        let held = pool.take().unwrap();

        let acquirer = {
            let pool = pool.clone();
            tokio::spawn(async move { pool.take_async().await.unwrap() })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(held);

        let batch = acquirer.await.unwrap();
        assert_eq!(batch.len(), 1);
    }
}
