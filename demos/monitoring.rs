//! Monitoring example: sampling the pending-waiter gauge

use mergebuffer_pool::{
    BlockingPool, EmitError, MergeBufferPoolMonitor, MetricEmitter, StatsExporter,
};
use std::collections::HashMap;
use std::thread;
use std::time::Duration;

/// Emitter that prints samples to stdout.
struct ConsoleEmitter;

impl MetricEmitter for ConsoleEmitter {
    fn emit(
        &self,
        metric: &str,
        _dimensions: &HashMap<String, String>,
        value: i64,
    ) -> Result<(), EmitError> {
        println!("   metric {metric} = {value}");
        Ok(())
    }
}

fn main() {
    println!("=== mergebuffer_pool - Monitoring Example ===\n");

    let pool = BlockingPool::new(2, || vec![0u8; 1024]);
    let monitor = MergeBufferPoolMonitor::new(pool.clone());

    println!("1. Idle pool:");
    monitor.sample(&ConsoleEmitter);

    println!("\n2. Exhausted pool with a blocked request:");
    let held = pool.take_batch(2).unwrap();

    let blocked = {
        let pool = pool.clone();
        thread::spawn(move || pool.take().unwrap())
    };
    thread::sleep(Duration::from_millis(200));

    monitor.sample(&ConsoleEmitter);

    drop(held);
    drop(blocked.join().unwrap());

    println!("\n3. After release:");
    monitor.sample(&ConsoleEmitter);

    println!("\n4. Prometheus export:");
    print!("{}", StatsExporter::export_prometheus(&pool.stats(), "merge_buffers", None));
}
