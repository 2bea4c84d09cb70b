//! Worker threads
//!
//! A worker loops between waiting for work and running one task at a
//! time. While waiting it holds the coordination lock and, on every wake,
//! checks in order:
//!
//! 1. an exit credit is pending: consume it and retire
//! 2. the pool is shutting down: exit
//! 3. a task is queued: take it, drop the lock, run it
//!
//! Anything else (including spurious wakeups) goes back to waiting.
//! Which idle worker consumes an exit credit is whichever wakes first.

use std::sync::{Arc, PoisonError};

use flexpool_core::{kdebug, kerror, kinfo, kwarn, ThreadRole, WorkerError};

use crate::state::{PoolState, Shared, StatCounters};

/// Spawn one worker into a free slot. Caller holds the coordination lock.
///
/// On success the worker is counted in `alive` before this returns, and
/// its handle is in the slot table before the worker can take the lock.
pub(crate) fn spawn_worker(shared: &Arc<Shared>, state: &mut PoolState) -> Result<usize, WorkerError> {
    let slot = state.slots.reserve().ok_or(WorkerError::NoFreeSlot)?;
    let name = format!("{}-worker-{}", shared.config.thread_name, slot);
    let worker_shared = Arc::clone(shared);

    match shared.spawner.spawn(
        ThreadRole::Worker,
        name,
        Box::new(move || worker_loop(worker_shared, slot)),
    ) {
        Ok(handle) => {
            state.slots.fill(slot, handle);
            state.alive += 1;
            debug_assert_eq!(state.slots.occupied(), state.alive);
            debug_assert!(state.alive <= state.slots.capacity());
            StatCounters::bump(&shared.counters.workers_spawned, 1);
            Ok(slot)
        }
        Err(e) => {
            state.slots.release(slot);
            StatCounters::bump(&shared.counters.spawn_failures, 1);
            kwarn!("failed to spawn worker in slot {}: {}", slot, e);
            Err(WorkerError::SpawnFailed)
        }
    }
}

/// Worker thread main loop
fn worker_loop(shared: Arc<Shared>, slot: usize) {
    kdebug!("worker {} started", slot);
    let mut state = shared.lock();

    loop {
        let task = loop {
            if state.pending_exit > 0 {
                state.pending_exit -= 1;
                state.release_worker(slot);
                StatCounters::bump(&shared.counters.workers_retired, 1);
                kinfo!("worker {} retired, alive={}", slot, state.alive);
                // Pass the wake on if someone else still needs it
                if state.pending_exit > 0 || !shared.queue.is_empty() {
                    shared.queue_not_empty.notify_one();
                }
                return;
            }

            if state.shutting_down {
                state.release_worker(slot);
                kdebug!("worker {} stopped for shutdown, alive={}", slot, state.alive);
                return;
            }

            if let Some(task) = shared.queue.dequeue() {
                break task;
            }

            state = shared
                .queue_not_empty
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        };

        state.busy += 1;
        drop(state);
        shared.queue_not_full.notify_one();

        if let Err(msg) = task.run_supervised() {
            StatCounters::bump(&shared.counters.tasks_panicked, 1);
            kerror!("worker {}: task panicked: {}", slot, msg);
        }
        StatCounters::bump(&shared.counters.tasks_completed, 1);

        state = shared.lock();
        state.busy -= 1;
    }
}
