//! Library defaults for `PoolConfig`
//!
//! Overridden at runtime by the `FLEXPOOL_*` environment variables.

use flexpool_core::constants::{DEFAULT_ADMIN_INTERVAL_MS, DEFAULT_SCALE_STEP};

pub const MAX_THREADS: usize = 10;
pub const MIN_THREADS: usize = 3;
pub const MAX_TASKS: usize = 20;
pub const ADMIN_INTERVAL_MS: u64 = DEFAULT_ADMIN_INTERVAL_MS;
pub const SCALE_STEP: usize = DEFAULT_SCALE_STEP;
pub const THREAD_NAME: &str = "flexpool";
