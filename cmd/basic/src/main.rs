//! Basic flexpool example
//!
//! Starts a pool (max 10, min 3 workers, 20 queued tasks), submits 15
//! two-second tasks, lets the controller scale for a while, then shuts
//! down.
//!
//! # Environment Variables
//!
//! - `FLEXPOOL_LOG_LEVEL=debug` - Show controller ticks (off, error, warn, info, debug, trace)
//! - `FLEXPOOL_ADMIN_INTERVAL_MS=1000` - Tick faster than the 3s default
//! - `BASIC_TASKS=15`, `BASIC_TASK_MS=2000`, `BASIC_RUN_SECS=10` - Workload shape

use flexpool::{env_get, kinfo, PoolConfig, ScalingPool};
use std::thread;
use std::time::Duration;

fn sample_task(id: usize, work: Duration) {
    kinfo!("task {} started", id);
    thread::sleep(work);
    kinfo!("task {} completed", id);
}

// FLEXPOOL_LOG_LEVEL=debug cargo run -p flexpool-basic
fn main() {
    println!("=== flexpool Basic Example ===\n");

    let tasks: usize = env_get("BASIC_TASKS", 15);
    let work = Duration::from_millis(env_get("BASIC_TASK_MS", 2000));
    let run_for = Duration::from_secs(env_get("BASIC_RUN_SECS", 10));

    let config = PoolConfig::from_env()
        .max_threads(10)
        .min_threads(3)
        .max_tasks(20);
    config.log();

    let pool = match ScalingPool::with_config(config) {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Failed to initialize thread pool: {}", e);
            std::process::exit(1);
        }
    };

    for i in 0..tasks {
        match pool.submit_with(move |id: usize| sample_task(id, work), i) {
            Ok(()) => println!("Added task {}", i),
            Err(e) => println!("Task {} rejected: {}", i, e),
        }
    }

    thread::sleep(run_for);
    println!("\nBefore shutdown: {}", pool.snapshot());

    pool.shutdown();

    let stats = pool.stats();
    println!(
        "Completed {} task(s), discarded {}, workers spawned {}, retired {}",
        stats.tasks_completed, stats.tasks_discarded, stats.workers_spawned, stats.workers_retired
    );
    println!("\n=== Example Complete ===");
}
