//! # flexpool-core
//!
//! Core types and traits for the flexpool self-scaling worker pool.
//!
//! This crate is platform-agnostic and spawns no threads of its own.
//! The OS-thread implementation lives in `flexpool-runtime`.
//!
//! ## Modules
//!
//! - `task` - Unit of work submitted to a pool
//! - `error` - Error types
//! - `slot` - Worker slot arena with O(1) slot reuse
//! - `stats` - Load snapshot and lifetime counters
//! - `traits` - Pool and thread-spawner traits
//! - `kprint` - Kernel-style leveled logging macros
//! - `env` - Environment variable utilities

pub mod task;
pub mod error;
pub mod slot;
pub mod stats;
pub mod traits;
pub mod kprint;
pub mod env;

// Re-exports for convenience
pub use task::Task;
pub use error::{ConfigError, PoolError, PoolResult, TrySubmitError, WorkerError};
pub use slot::SlotTable;
pub use stats::{LoadSnapshot, PoolStats};
pub use traits::{TaskPool, ThreadMain, ThreadRole, ThreadSpawner};
pub use env::{env_get, env_get_bool, env_get_opt, parse_opt};

/// Pool-wide constants
pub mod constants {
    /// Upper bound on workers added or retired by one controller tick
    pub const DEFAULT_SCALE_STEP: usize = 5;

    /// Default controller period in milliseconds
    pub const DEFAULT_ADMIN_INTERVAL_MS: u64 = 3000;
}
