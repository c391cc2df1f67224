//! Basic usage examples for BlockingPool

use mergebuffer_pool::{BlockingPool, PoolError};
use std::time::Duration;

fn main() {
    println!("=== mergebuffer_pool - Basic Examples ===\n");

    // Example 1: Simple take and return
    simple_pool();

    // Example 2: Batch acquisition
    batch_acquisition();

    // Example 3: Non-blocking and timed variants
    try_and_timed();

    // Example 4: Stats and health
    stats_and_health();
}

fn simple_pool() {
    println!("1. Simple Pool:");
    let pool = BlockingPool::new(3, || vec![0u8; 1024]);

    {
        let batch = pool.take().unwrap();
        println!("   Got {} buffer of {} bytes", batch.len(), batch[0].len());
        // Batch automatically returned when dropped
    }

    println!("   Free after return: {}\n", pool.free_count());
}

fn batch_acquisition() {
    println!("2. Batch Acquisition:");
    let pool = BlockingPool::new(5, || vec![0u8; 1024]);

    {
        let batch = pool.take_batch(3).unwrap();
        println!("   Took a batch of {}", batch.len());
        println!("   Free: {}, used: {}", pool.free_count(), pool.used_count());
    }

    // A request beyond capacity can never succeed and fails immediately
    match pool.take_batch(6) {
        Err(PoolError::InvalidRequest { requested, capacity }) => {
            println!("   Rejected: asked for {requested}, capacity is {capacity}\n");
        }
        other => println!("   Unexpected: {other:?}\n"),
    }
}

fn try_and_timed() {
    println!("3. Try and Timed Variants:");
    let pool = BlockingPool::new(1, || vec![0u8; 1024]);

    let held = pool.try_take().unwrap();
    println!("   First try: {}", if held.is_some() { "Success" } else { "None" });

    let second = pool.try_take().unwrap();
    println!("   Second try: {}", if second.is_some() { "Success" } else { "None (exhausted)" });

    match pool.take_timeout(Duration::from_millis(100)) {
        Err(PoolError::AcquireTimeout(timeout)) => {
            println!("   Timed take gave up after {timeout:?}");
        }
        other => println!("   Unexpected: {other:?}"),
    }

    drop(held);
    println!("   Free after return: {}\n", pool.free_count());
}

fn stats_and_health() {
    println!("4. Stats and Health:");
    let pool = BlockingPool::new(5, || vec![0u8; 1024]);

    {
        let _batch = pool.take_batch(2).unwrap();

        let health = pool.health();
        println!("   Health: {}", if health.is_healthy() { "Healthy" } else { "Unhealthy" });
        println!("   Utilization: {:.1}%", health.utilization * 100.0);
        println!("   Used: {}, Free: {}", health.used, health.free);
    }

    println!("\n   Stats:");
    for (key, value) in pool.stats().export() {
        println!("     {}: {}", key, value);
    }
}
