//! Pool and thread-spawner traits
//!
//! `TaskPool` is what callers program against. `ThreadSpawner` is the one
//! place a pool creates OS threads, so alternate spawners (named threads,
//! pinned threads, failure injection in tests) can be swapped in without
//! touching the pool.

use std::io;
use std::thread::JoinHandle;

use crate::error::{PoolResult, TrySubmitError};
use crate::stats::{LoadSnapshot, PoolStats};
use crate::task::Task;

/// Entry point handed to a spawner
pub type ThreadMain = Box<dyn FnOnce() + Send + 'static>;

/// What a spawned thread is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadRole {
    /// Executes tasks
    Worker,
    /// Runs the periodic scaling controller
    Admin,
}

/// Creates the OS threads a pool runs on.
pub trait ThreadSpawner: Send + Sync {
    /// Start `main` on a new thread called `name`.
    fn spawn(&self, role: ThreadRole, name: String, main: ThreadMain) -> io::Result<JoinHandle<()>>;
}

/// A bounded, self-sizing task pool.
///
/// **Contract:**
/// - `submit()` blocks while the queue is at capacity (backpressure).
/// - `try_submit()` never blocks; a full queue hands the task back.
/// - Tasks start in submission order. Completion order across workers
///   is unspecified.
/// - Tasks still queued when `shutdown()` begins are dropped unrun.
pub trait TaskPool: Send + Sync {
    /// Enqueue a task, waiting for queue space if necessary.
    fn submit(&self, task: Task) -> PoolResult<()>;

    /// Enqueue a task only if there is room right now.
    fn try_submit(&self, task: Task) -> Result<(), TrySubmitError>;

    /// Consistent view of queue length and worker counters.
    fn snapshot(&self) -> LoadSnapshot;

    /// Lifetime counters.
    fn stats(&self) -> PoolStats;

    /// Maximum number of workers this pool can have.
    fn max_workers(&self) -> usize;

    /// Stop all threads and discard queued tasks. Blocks until joined.
    /// Calling it again is a no-op.
    fn shutdown(&self);
}
