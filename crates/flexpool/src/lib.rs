//! # flexpool - Self-Scaling Worker Pool
//!
//! A bounded task queue serviced by a worker set that grows and shrinks
//! with load.
//!
//! ## Features
//!
//! - **Backpressure**: `submit` blocks while the queue is at `max_tasks`
//! - **Elastic workers**: between `min_threads` and `max_threads` OS threads
//! - **Periodic controller**: adds capacity when saturated, retires idle workers
//! - **Strict FIFO**: tasks start in submission order
//! - **Supervised tasks**: a panicking task is logged, its worker survives
//! - **Clean shutdown**: running tasks finish, queued tasks are discarded
//!
//! ## Quick Start
//!
//! ```ignore
//! use flexpool::{PoolConfig, ScalingPool};
//! use std::time::Duration;
//!
//! fn main() -> flexpool::PoolResult<()> {
//!     let pool = ScalingPool::with_config(
//!         PoolConfig::from_env()
//!             .max_threads(10)
//!             .min_threads(3)
//!             .max_tasks(20)
//!             .admin_interval(Duration::from_secs(3)),
//!     )?;
//!
//!     for i in 0..15 {
//!         pool.submit_with(|id: usize| println!("task {}", id), i)?;
//!     }
//!
//!     pool.shutdown();
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Caller threads                         │
//! │        submit() / try_submit() / snapshot() / shutdown()    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  blocks at max_tasks
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Bounded FIFO queue                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//!    ┌───────────┐      ┌───────────┐      ┌───────────┐
//!    │  Worker   │      │  Worker   │ ...  │   Admin   │
//!    │  slot 0   │      │  slot 1   │      │ controller│
//!    └───────────┘      └───────────┘      └───────────┘
//!                                     spawn ▲ │ exit credits
//!                                           └─┘
//! ```

// Re-export core types
pub use flexpool_core::{
    ConfigError,
    LoadSnapshot,
    PoolError,
    PoolResult,
    PoolStats,
    Task,
    TaskPool,
    ThreadMain,
    ThreadRole,
    ThreadSpawner,
    TrySubmitError,
    WorkerError,
};

// Re-export kprint macros for leveled logging
pub use flexpool_core::{kerror, kwarn, kinfo, kdebug, ktrace};
pub use flexpool_core::kprint::{LogLevel, init as init_logging, set_log_level, set_flush_enabled};

// Re-export env utilities
pub use flexpool_core::{env_get, env_get_bool, env_get_opt};

// Re-export runtime types
pub use flexpool_runtime::{
    OsThreadSpawner,
    PoolConfig,
    ScaleDecision,
    ScalePolicy,
    ScalingPool,
};

/// Create a pool with the given bounds. Equivalent to `ScalingPool::new`.
pub fn init(max_threads: usize, min_threads: usize, max_tasks: usize) -> PoolResult<ScalingPool> {
    ScalingPool::new(max_threads, min_threads, max_tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_facade_round_trip() {
        let pool = init(2, 1, 4).unwrap();
        let (tx, rx) = mpsc::channel();
        pool.submit_with(move |x: u32| tx.send(x * 2).unwrap(), 21).unwrap();
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), 42);
        pool.shutdown();
        assert_eq!(pool.snapshot().alive, 0);
    }

    #[test]
    fn test_facade_rejects_bad_bounds() {
        assert!(matches!(
            init(1, 2, 4),
            Err(PoolError::InvalidConfig(ConfigError::MinExceedsMax { .. }))
        ));
    }
}
