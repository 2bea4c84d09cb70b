//! `ScalingPool` - bounded queue, elastic worker set, admin controller.
//!
//! ```text
//!  submit() ──▶ [ bounded FIFO ] ──▶ worker ─┐
//!     ▲   (blocks at max_tasks)    ──▶ worker ─┼─ min_threads..=max_threads
//!     │                            ──▶ worker ─┘
//!     └──── queue_not_full ◀──────────┘   ▲
//!                                          │ spawn / exit credits
//!                                  admin controller (every admin_interval)
//! ```
//!
//! Shutdown discards tasks that have not started. Tasks already running
//! finish before their worker exits.

use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use flexpool_core::{
    kerror, kinfo, LoadSnapshot, PoolError, PoolResult, PoolStats, Task, TaskPool,
    ThreadSpawner, TrySubmitError,
};

use crate::admin::{self, ScaleDecision};
use crate::config::PoolConfig;
use crate::spawner::OsThreadSpawner;
use crate::state::{Shared, StatCounters};
use crate::worker::spawn_worker;

/// Self-scaling worker pool
pub struct ScalingPool {
    shared: Arc<Shared>,
    admin: Mutex<Option<JoinHandle<()>>>,
}

impl ScalingPool {
    /// Create a pool with the given bounds and library defaults for the rest.
    pub fn new(max_threads: usize, min_threads: usize, max_tasks: usize) -> PoolResult<Self> {
        Self::with_config(PoolConfig::bounded(max_threads, min_threads, max_tasks))
    }

    /// Create a pool on plain OS threads.
    pub fn with_config(config: PoolConfig) -> PoolResult<Self> {
        let spawner = Arc::new(OsThreadSpawner::new(config.stack_size));
        Self::with_spawner(config, spawner)
    }

    /// Create a pool whose threads come from `spawner`.
    ///
    /// Spawns `min_threads` workers, then the admin controller. A worker
    /// that fails to spawn is logged and the pool starts short-handed. If
    /// the controller fails to spawn, every worker is stopped and joined
    /// before the error is returned.
    pub fn with_spawner(config: PoolConfig, spawner: Arc<dyn ThreadSpawner>) -> PoolResult<Self> {
        config.validate()?;
        let min_threads = config.min_threads;
        let shared = Arc::new(Shared::new(config, spawner));

        {
            let mut state = shared.lock();
            for _ in 0..min_threads {
                // Failure already logged and counted
                let _ = spawn_worker(&shared, &mut state);
            }
        }

        let admin = match admin::spawn_controller(&shared) {
            Ok(handle) => handle,
            Err(e) => {
                Self::terminate(&shared, None);
                return Err(e.into());
            }
        };

        let alive = shared.lock().alive;
        kinfo!("pool initialized, initial workers: {}/{}", alive, min_threads);

        Ok(Self {
            shared,
            admin: Mutex::new(Some(admin)),
        })
    }

    /// Enqueue a task, blocking while the queue is full.
    ///
    /// Fails with `ShuttingDown` if the pool is, or starts, shutting down
    /// before the task is accepted.
    pub fn submit(&self, task: Task) -> PoolResult<()> {
        let shared = &self.shared;
        let mut state = shared.lock();

        while !state.shutting_down && shared.queue.len() >= shared.config.max_tasks {
            state = shared
                .queue_not_full
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        if state.shutting_down {
            return Err(PoolError::ShuttingDown);
        }

        shared.queue.enqueue(task);
        StatCounters::bump(&shared.counters.tasks_submitted, 1);
        drop(state);
        shared.queue_not_empty.notify_one();
        Ok(())
    }

    /// Enqueue a closure. See [`submit`](Self::submit).
    pub fn execute<F>(&self, f: F) -> PoolResult<()>
    where
        F: FnOnce() + Send + 'static,
    {
        self.submit(Task::new(f))
    }

    /// Enqueue `func(arg)`. See [`submit`](Self::submit).
    pub fn submit_with<A, R, F>(&self, func: F, arg: A) -> PoolResult<()>
    where
        F: FnOnce(A) -> R + Send + 'static,
        A: Send + 'static,
    {
        self.submit(Task::with_arg(func, arg))
    }

    /// Enqueue a task only if there is room now. Never blocks.
    pub fn try_submit(&self, task: Task) -> Result<(), TrySubmitError> {
        let shared = &self.shared;
        let state = shared.lock();

        if state.shutting_down {
            return Err(TrySubmitError::ShuttingDown(task));
        }
        if shared.queue.len() >= shared.config.max_tasks {
            return Err(TrySubmitError::Full(task));
        }

        shared.queue.enqueue(task);
        StatCounters::bump(&shared.counters.tasks_submitted, 1);
        drop(state);
        shared.queue_not_empty.notify_one();
        Ok(())
    }

    /// Run one controller tick on the calling thread.
    ///
    /// Same routine the admin thread runs each period; returns what it
    /// applied. A no-op once shutdown has begun.
    pub fn rebalance(&self) -> ScaleDecision {
        admin::run_tick(&self.shared)
    }

    /// Consistent view of queue length and worker counters.
    pub fn snapshot(&self) -> LoadSnapshot {
        let state = self.shared.lock();
        self.shared.snapshot_locked(&state)
    }

    /// Lifetime counters.
    pub fn stats(&self) -> PoolStats {
        self.shared.counters.snapshot()
    }

    pub fn config(&self) -> &PoolConfig {
        &self.shared.config
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shared.lock().shutting_down
    }

    /// Stop the controller and every worker, then discard queued tasks.
    ///
    /// Blocks until all pool threads are joined. Running tasks finish
    /// first. Later or concurrent calls wait for the first to complete.
    /// Must not be called from inside a task running on this pool.
    pub fn shutdown(&self) {
        {
            let mut state = self.shared.lock();
            if state.shutting_down {
                while !state.terminated {
                    state = self
                        .shared
                        .terminated
                        .wait(state)
                        .unwrap_or_else(PoisonError::into_inner);
                }
                return;
            }
            state.shutting_down = true;
        }

        let admin = self
            .admin
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        Self::terminate(&self.shared, admin);
    }

    /// Wake everything, join the controller then every worker, mark the
    /// pool terminated, then drop queued tasks.
    fn terminate(shared: &Arc<Shared>, admin: Option<JoinHandle<()>>) {
        shared.lock().shutting_down = true;
        shared.wake_all();

        if let Some(handle) = admin {
            if handle.join().is_err() {
                kerror!("admin controller thread panicked");
            }
        }

        let handles = shared.lock().take_all_handles();
        let joined = handles.len();
        for handle in handles {
            if handle.join().is_err() {
                kerror!("worker thread panicked");
            }
        }

        // Waiters on `terminated` are released before any task is dropped
        let leftover = shared.queue.drain();
        let discarded = leftover.len();
        StatCounters::bump(&shared.counters.tasks_discarded, discarded as u64);

        shared.lock().terminated = true;
        shared.terminated.notify_all();

        for task in leftover {
            if let Err(msg) = task.discard_supervised() {
                kerror!("dropping discarded task panicked: {}", msg);
            }
        }

        kinfo!(
            "pool shut down: joined {} worker(s), discarded {} queued task(s)",
            joined,
            discarded
        );
    }
}

impl TaskPool for ScalingPool {
    fn submit(&self, task: Task) -> PoolResult<()> {
        ScalingPool::submit(self, task)
    }

    fn try_submit(&self, task: Task) -> Result<(), TrySubmitError> {
        ScalingPool::try_submit(self, task)
    }

    fn snapshot(&self) -> LoadSnapshot {
        ScalingPool::snapshot(self)
    }

    fn stats(&self) -> PoolStats {
        ScalingPool::stats(self)
    }

    fn max_workers(&self) -> usize {
        self.shared.config.max_threads
    }

    fn shutdown(&self) {
        ScalingPool::shutdown(self)
    }
}

impl Drop for ScalingPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
