// Binary wrapper - the actual library is in lib.rs
// Run examples with: cargo run --example basic

use mergebuffer_pool::BlockingPool;

fn main() {
    println!("=== mergebuffer_pool ===");
    println!("See demos/ directory for usage examples");
    println!("Run: cargo run --example basic");
    println!();

    println!("Quick Demo:");
    let pool = BlockingPool::new(3, || vec![0u8; 1024]);

    {
        let batch = pool.take_batch(2).expect("pool has capacity");
        println!("  Got batch of {} buffers", batch.len());
        println!("  Free while held: {}", pool.free_count());
    }

    println!("  Free after return: {}", pool.free_count());
}
