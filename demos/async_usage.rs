//! Async usage examples

use mergebuffer_pool::{BlockingPool, PoolConfig};
use std::time::Duration;
use tokio::time::sleep;

#[tokio::main]
async fn main() {
    println!("=== mergebuffer_pool - Async Examples ===\n");

    // Example 1: Async take
    async_take().await;

    // Example 2: Async with timeout
    async_with_timeout().await;

    // Example 3: Concurrent access
    concurrent_access().await;
}

async fn async_take() {
    println!("1. Async Take:");
    let pool = BlockingPool::new(3, || vec![0u8; 1024]);

    {
        let batch = pool.take_batch_async(2).await.unwrap();
        println!("   Got batch of {} asynchronously", batch.len());
    }

    println!();
}

async fn async_with_timeout() {
    println!("2. Async with Timeout:");

    let config = PoolConfig::new().with_operation_timeout(Duration::from_millis(100));
    let pool = BlockingPool::with_config(1, config, || vec![0u8; 1024]);

    // Take the only buffer
    let _held = pool.take().unwrap();

    // Try to take another (should time out)
    match pool.take_async().await {
        Ok(_) => println!("   Got a buffer"),
        Err(e) => println!("   Error: {}", e),
    }

    println!();
}

async fn concurrent_access() {
    println!("3. Concurrent Access:");

    let pool = BlockingPool::new(5, || vec![0u8; 1024]);

    let mut handles = vec![];

    for i in 0..10 {
        let pool = pool.clone();
        let handle = tokio::spawn(async move {
            match pool.take_async().await {
                Ok(batch) => {
                    println!("   Task {} got {} buffer(s)", i, batch.len());
                    sleep(Duration::from_millis(50)).await;
                }
                Err(e) => println!("   Task {} failed: {}", i, e),
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.await.unwrap();
    }

    println!("   Final free: {}", pool.free_count());
}
