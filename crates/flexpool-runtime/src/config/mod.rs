//! Pool Configuration
//!
//! Compile-time defaults with runtime environment overrides.
//!
//! # Configuration Priority (highest wins)
//!
//! 1. Builder calls
//! 2. Environment variables (`from_env()` only)
//! 3. Library defaults (`config::defaults`)
//!
//! # Example
//!
//! ```rust,ignore
//! use flexpool_runtime::config::PoolConfig;
//!
//! let config = PoolConfig::from_env()
//!     .max_threads(6)
//!     .min_threads(2)
//!     .admin_interval(Duration::from_millis(500));
//! ```

pub mod defaults;

use std::time::Duration;

use flexpool_core::env::parse_opt;
use flexpool_core::error::ConfigError;
use flexpool_core::kinfo;

/// Pool configuration with builder pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Upper bound on live workers (size of the slot table)
    pub max_threads: usize,
    /// Workers spawned at init; scale-down never goes below this
    pub min_threads: usize,
    /// Queue capacity; `submit` blocks at this length
    pub max_tasks: usize,
    /// Period of the admin controller
    pub admin_interval: Duration,
    /// Most workers added or retired in a single controller tick
    pub scale_step: usize,
    /// Thread name prefix (`<name>-worker-<slot>`, `<name>-admin`)
    pub thread_name: String,
    /// Stack size for pool threads, `None` for the platform default
    pub stack_size: Option<usize>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl PoolConfig {
    /// Create config from library defaults with environment overrides.
    ///
    /// Environment variables (all optional):
    /// - `FLEXPOOL_MAX_THREADS` - Upper worker bound
    /// - `FLEXPOOL_MIN_THREADS` - Lower worker bound
    /// - `FLEXPOOL_MAX_TASKS` - Queue capacity
    /// - `FLEXPOOL_ADMIN_INTERVAL_MS` - Controller period in milliseconds
    /// - `FLEXPOOL_SCALE_STEP` - Max workers added/retired per tick
    /// - `FLEXPOOL_THREAD_NAME` - Thread name prefix
    /// - `FLEXPOOL_STACK_SIZE` - Stack size in bytes
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env()`, resolving each key through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = Self::new();
        Self {
            max_threads: parse_opt(lookup("FLEXPOOL_MAX_THREADS")).unwrap_or(base.max_threads),
            min_threads: parse_opt(lookup("FLEXPOOL_MIN_THREADS")).unwrap_or(base.min_threads),
            max_tasks: parse_opt(lookup("FLEXPOOL_MAX_TASKS")).unwrap_or(base.max_tasks),
            admin_interval: parse_opt(lookup("FLEXPOOL_ADMIN_INTERVAL_MS"))
                .map(Duration::from_millis)
                .unwrap_or(base.admin_interval),
            scale_step: parse_opt(lookup("FLEXPOOL_SCALE_STEP")).unwrap_or(base.scale_step),
            thread_name: parse_opt(lookup("FLEXPOOL_THREAD_NAME")).unwrap_or(base.thread_name),
            stack_size: parse_opt(lookup("FLEXPOOL_STACK_SIZE")),
        }
    }

    /// Create config from library defaults only (no env override).
    pub fn new() -> Self {
        Self {
            max_threads: defaults::MAX_THREADS,
            min_threads: defaults::MIN_THREADS,
            max_tasks: defaults::MAX_TASKS,
            admin_interval: Duration::from_millis(defaults::ADMIN_INTERVAL_MS),
            scale_step: defaults::SCALE_STEP,
            thread_name: defaults::THREAD_NAME.to_string(),
            stack_size: None,
        }
    }

    /// Library defaults with the three pool bounds set.
    pub fn bounded(max_threads: usize, min_threads: usize, max_tasks: usize) -> Self {
        Self::new()
            .max_threads(max_threads)
            .min_threads(min_threads)
            .max_tasks(max_tasks)
    }

    // Builder methods

    pub fn max_threads(mut self, n: usize) -> Self {
        self.max_threads = n;
        self
    }

    pub fn min_threads(mut self, n: usize) -> Self {
        self.min_threads = n;
        self
    }

    pub fn max_tasks(mut self, n: usize) -> Self {
        self.max_tasks = n;
        self
    }

    pub fn admin_interval(mut self, d: Duration) -> Self {
        self.admin_interval = d;
        self
    }

    pub fn scale_step(mut self, n: usize) -> Self {
        self.scale_step = n;
        self
    }

    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    pub fn stack_size(mut self, size: usize) -> Self {
        self.stack_size = Some(size);
        self
    }

    /// Check pool bounds. Every init path calls this first.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_threads == 0 {
            return Err(ConfigError::ZeroMaxThreads);
        }
        if self.min_threads == 0 {
            return Err(ConfigError::ZeroMinThreads);
        }
        if self.min_threads > self.max_threads {
            return Err(ConfigError::MinExceedsMax {
                min: self.min_threads,
                max: self.max_threads,
            });
        }
        if self.max_tasks == 0 {
            return Err(ConfigError::ZeroMaxTasks);
        }
        if self.scale_step == 0 {
            return Err(ConfigError::ZeroScaleStep);
        }
        if self.admin_interval.is_zero() {
            return Err(ConfigError::ZeroAdminInterval);
        }
        Ok(())
    }

    /// Log the configuration at info level
    pub fn log(&self) {
        kinfo!("flexpool configuration:");
        kinfo!("  max_threads:     {}", self.max_threads);
        kinfo!("  min_threads:     {}", self.min_threads);
        kinfo!("  max_tasks:       {}", self.max_tasks);
        kinfo!("  admin_interval:  {:?}", self.admin_interval);
        kinfo!("  scale_step:      {}", self.scale_step);
        kinfo!("  thread_name:     {}", self.thread_name);
        kinfo!("  stack_size:      {:?}", self.stack_size);
    }
}
