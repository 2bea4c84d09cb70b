//! Error types for the flexpool worker pool

use core::fmt;

use crate::task::Task;

/// Result type for pool operations
pub type PoolResult<T> = Result<T, PoolError>;

/// Errors surfaced by pool operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// Pool bounds rejected at init
    InvalidConfig(ConfigError),

    /// Pool is shutting down or already shut down
    ShuttingDown,

    /// Queue at capacity (non-blocking admission only)
    QueueFull,

    /// Thread creation failed
    WorkerError(WorkerError),
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::InvalidConfig(e) => write!(f, "invalid pool configuration: {}", e),
            PoolError::ShuttingDown => write!(f, "pool is shutting down"),
            PoolError::QueueFull => write!(f, "task queue full"),
            PoolError::WorkerError(e) => write!(f, "worker error: {}", e),
        }
    }
}

impl std::error::Error for PoolError {}

/// Invalid pool bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_threads` must be at least 1
    ZeroMaxThreads,

    /// `min_threads` must be at least 1
    ZeroMinThreads,

    /// `min_threads` larger than `max_threads`
    MinExceedsMax { min: usize, max: usize },

    /// `max_tasks` must be at least 1
    ZeroMaxTasks,

    /// Controller may not scale by zero workers per tick
    ZeroScaleStep,

    /// Controller period must be non-zero
    ZeroAdminInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroMaxThreads => write!(f, "max_threads must be at least 1"),
            ConfigError::ZeroMinThreads => write!(f, "min_threads must be at least 1"),
            ConfigError::MinExceedsMax { min, max } => {
                write!(f, "min_threads ({}) exceeds max_threads ({})", min, max)
            }
            ConfigError::ZeroMaxTasks => write!(f, "max_tasks must be at least 1"),
            ConfigError::ZeroScaleStep => write!(f, "scale_step must be at least 1"),
            ConfigError::ZeroAdminInterval => write!(f, "admin_interval must be non-zero"),
        }
    }
}

impl From<ConfigError> for PoolError {
    fn from(e: ConfigError) -> Self {
        PoolError::InvalidConfig(e)
    }
}

/// Thread creation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerError {
    /// Failed to spawn a worker thread
    SpawnFailed,

    /// Failed to spawn the admin controller thread
    ControllerSpawnFailed,

    /// Every worker slot is occupied
    NoFreeSlot,
}

impl fmt::Display for WorkerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerError::SpawnFailed => write!(f, "failed to spawn worker thread"),
            WorkerError::ControllerSpawnFailed => {
                write!(f, "failed to spawn admin controller thread")
            }
            WorkerError::NoFreeSlot => write!(f, "no free worker slot"),
        }
    }
}

impl From<WorkerError> for PoolError {
    fn from(e: WorkerError) -> Self {
        PoolError::WorkerError(e)
    }
}

/// Rejected non-blocking submission. Hands the task back to the caller.
#[derive(Debug)]
pub enum TrySubmitError {
    /// Queue at capacity
    Full(Task),

    /// Pool is shutting down
    ShuttingDown(Task),
}

impl TrySubmitError {
    /// Recover the rejected task
    pub fn into_task(self) -> Task {
        match self {
            TrySubmitError::Full(t) | TrySubmitError::ShuttingDown(t) => t,
        }
    }

    /// The equivalent `PoolError`, dropping the task
    pub fn kind(&self) -> PoolError {
        match self {
            TrySubmitError::Full(_) => PoolError::QueueFull,
            TrySubmitError::ShuttingDown(_) => PoolError::ShuttingDown,
        }
    }
}

impl fmt::Display for TrySubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind(), f)
    }
}

impl std::error::Error for TrySubmitError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = PoolError::ShuttingDown;
        assert_eq!(format!("{}", e), "pool is shutting down");

        let e = PoolError::InvalidConfig(ConfigError::MinExceedsMax { min: 4, max: 2 });
        assert_eq!(
            format!("{}", e),
            "invalid pool configuration: min_threads (4) exceeds max_threads (2)"
        );
    }

    #[test]
    fn test_error_conversion() {
        let pool_err: PoolError = ConfigError::ZeroMaxTasks.into();
        assert!(matches!(pool_err, PoolError::InvalidConfig(ConfigError::ZeroMaxTasks)));

        let pool_err: PoolError = WorkerError::ControllerSpawnFailed.into();
        assert!(matches!(
            pool_err,
            PoolError::WorkerError(WorkerError::ControllerSpawnFailed)
        ));
    }

    #[test]
    fn test_try_submit_error_returns_task() {
        let err = TrySubmitError::Full(Task::new(|| {}));
        assert_eq!(err.kind(), PoolError::QueueFull);
        assert_eq!(format!("{}", err), "task queue full");
        let task = err.into_task();
        assert_eq!(task.run_supervised(), Ok(()));
    }
}
