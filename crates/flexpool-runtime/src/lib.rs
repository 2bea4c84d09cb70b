//! # flexpool-runtime
//!
//! OS-thread implementation of the flexpool worker pool.
//!
//! This crate provides:
//! - Pool configuration with environment overrides
//! - The bounded FIFO task queue
//! - Worker threads and the slot table they live in
//! - The admin controller that grows and shrinks the worker set
//! - The default `ThreadSpawner`

pub mod config;
pub mod queue;
pub mod spawner;
pub mod admin;
pub mod pool;

mod state;
mod worker;

// Re-exports
pub use config::PoolConfig;
pub use queue::TaskQueue;
pub use spawner::OsThreadSpawner;
pub use admin::{ScaleDecision, ScalePolicy};
pub use pool::ScalingPool;
