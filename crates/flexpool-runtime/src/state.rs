//! State shared by the pool handle, its workers and the admin controller
//!
//! Everything that drives scheduling decisions (worker counters, the slot
//! table, the shutdown flag) sits behind one coordination mutex, so any
//! reader gets a consistent `LoadSnapshot`. The task queue lives outside
//! the mutex but is only pushed and popped while the mutex is held.
//!
//! Workers, the controller and the handle each hold an `Arc<Shared>`, so
//! shared state outlives every thread that can observe it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use flexpool_core::{LoadSnapshot, PoolStats, SlotTable, ThreadSpawner};

use crate::config::PoolConfig;
use crate::queue::TaskQueue;

/// Fields guarded by the coordination lock
pub(crate) struct PoolState {
    /// Join handles of live workers, indexed by worker slot
    pub(crate) slots: SlotTable<JoinHandle<()>>,

    /// Handles of workers that have exited but not been joined yet
    pub(crate) retired: Vec<JoinHandle<()>>,

    /// Live workers
    pub(crate) alive: usize,

    /// Workers executing a task
    pub(crate) busy: usize,

    /// Exit credits not yet consumed
    pub(crate) pending_exit: usize,

    /// Set once, never cleared
    pub(crate) shutting_down: bool,

    /// All threads joined and the queue drained
    pub(crate) terminated: bool,
}

impl PoolState {
    fn new(max_threads: usize) -> Self {
        Self {
            slots: SlotTable::new(max_threads),
            retired: Vec::new(),
            alive: 0,
            busy: 0,
            pending_exit: 0,
            shutting_down: false,
            terminated: false,
        }
    }

    /// Account for a worker leaving its loop.
    ///
    /// The worker cannot join itself, so its handle moves to `retired`
    /// for the controller or shutdown to join. The slot becomes free.
    pub(crate) fn release_worker(&mut self, slot: usize) {
        debug_assert!(self.alive > 0);
        // Shutdown drains the table before workers leave
        let tracked = !self.shutting_down;
        debug_assert!(!tracked || self.slots.is_occupied(slot), "worker slot {} vacant", slot);
        self.alive -= 1;
        if let Some(handle) = self.slots.take(slot) {
            self.retired.push(handle);
        }
        debug_assert!(!tracked || self.slots.occupied() == self.alive);
    }

    /// Every handle the pool still owns, live or retired
    pub(crate) fn take_all_handles(&mut self) -> Vec<JoinHandle<()>> {
        let mut handles = self.slots.drain();
        handles.append(&mut self.retired);
        handles
    }
}

/// Lifetime counters, updated without the coordination lock
#[derive(Default)]
pub(crate) struct StatCounters {
    pub(crate) tasks_submitted: AtomicU64,
    pub(crate) tasks_completed: AtomicU64,
    pub(crate) tasks_panicked: AtomicU64,
    pub(crate) tasks_discarded: AtomicU64,
    pub(crate) workers_spawned: AtomicU64,
    pub(crate) workers_retired: AtomicU64,
    pub(crate) spawn_failures: AtomicU64,
    pub(crate) admin_ticks: AtomicU64,
}

impl StatCounters {
    #[inline]
    pub(crate) fn bump(counter: &AtomicU64, n: u64) {
        counter.fetch_add(n, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> PoolStats {
        PoolStats {
            tasks_submitted: self.tasks_submitted.load(Ordering::Relaxed),
            tasks_completed: self.tasks_completed.load(Ordering::Relaxed),
            tasks_panicked: self.tasks_panicked.load(Ordering::Relaxed),
            tasks_discarded: self.tasks_discarded.load(Ordering::Relaxed),
            workers_spawned: self.workers_spawned.load(Ordering::Relaxed),
            workers_retired: self.workers_retired.load(Ordering::Relaxed),
            spawn_failures: self.spawn_failures.load(Ordering::Relaxed),
            admin_ticks: self.admin_ticks.load(Ordering::Relaxed),
        }
    }
}

/// Shared pool internals
pub(crate) struct Shared {
    pub(crate) config: PoolConfig,
    pub(crate) queue: TaskQueue,
    pub(crate) state: Mutex<PoolState>,

    /// Workers wait here for work, exit credits or shutdown
    pub(crate) queue_not_empty: Condvar,

    /// Blocked submitters wait here for queue space
    pub(crate) queue_not_full: Condvar,

    /// Controller sleeps here between ticks
    pub(crate) admin_wakeup: Condvar,

    /// Secondary `shutdown()` callers wait here for the first to finish
    pub(crate) terminated: Condvar,

    pub(crate) counters: StatCounters,
    pub(crate) spawner: Arc<dyn ThreadSpawner>,
}

impl Shared {
    pub(crate) fn new(config: PoolConfig, spawner: Arc<dyn ThreadSpawner>) -> Self {
        Self {
            state: Mutex::new(PoolState::new(config.max_threads)),
            queue: TaskQueue::new(),
            queue_not_empty: Condvar::new(),
            queue_not_full: Condvar::new(),
            admin_wakeup: Condvar::new(),
            terminated: Condvar::new(),
            counters: StatCounters::default(),
            spawner,
            config,
        }
    }

    /// Take the coordination lock.
    ///
    /// Tasks never run under this lock, so poisoning can only come from a
    /// bug in the pool itself; the state is still usable and is recovered.
    #[inline]
    pub(crate) fn lock(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read the load counters. Caller holds the lock.
    #[inline]
    pub(crate) fn snapshot_locked(&self, state: &PoolState) -> LoadSnapshot {
        LoadSnapshot {
            queued: self.queue.len(),
            busy: state.busy,
            alive: state.alive,
            pending_exit: state.pending_exit,
        }
    }

    /// Wake every thread that may be waiting on the pool.
    pub(crate) fn wake_all(&self) {
        self.queue_not_empty.notify_all();
        self.queue_not_full.notify_all();
        self.admin_wakeup.notify_all();
    }
}
