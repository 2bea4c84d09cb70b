//! Admin controller
//!
//! One thread per pool. Every `admin_interval` it samples the load,
//! decides how many workers to add or retire, applies the decision, and
//! joins workers that retired since the last tick. Shutdown wakes it
//! immediately instead of waiting out the period.
//!
//! # Policy
//!
//! - **Scale up** when every live worker is busy, work is queued and the
//!   pool is below `max_threads`: spawn up to `scale_step` workers.
//! - **Scale down** when fewer than half the workers are busy, the queue
//!   is empty and the pool is above `min_threads`: grant up to
//!   `scale_step` exit credits. Credits still outstanding count against
//!   the surplus so the pool never retires below `min_threads`.
//!
//! Both rules are evaluated on the same snapshot; either, both or neither
//! may fire in one tick.

use std::mem;
use std::sync::{Arc, PoisonError};
use std::thread::JoinHandle;

use flexpool_core::{kdebug, kerror, kinfo, LoadSnapshot, ThreadRole, WorkerError};

use crate::config::PoolConfig;
use crate::state::{Shared, StatCounters};
use crate::worker::spawn_worker;

/// Workers to add and exit credits to grant in one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScaleDecision {
    pub spawn: usize,
    pub retire: usize,
}

impl ScaleDecision {
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.spawn == 0 && self.retire == 0
    }
}

/// Scaling thresholds, independent of any threads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScalePolicy {
    pub min_threads: usize,
    pub max_threads: usize,
    pub step: usize,
}

impl ScalePolicy {
    pub fn from_config(config: &PoolConfig) -> Self {
        Self {
            min_threads: config.min_threads,
            max_threads: config.max_threads,
            step: config.scale_step,
        }
    }

    /// Decide what one tick should do for the given load.
    pub fn decide(&self, load: &LoadSnapshot) -> ScaleDecision {
        let mut decision = ScaleDecision::default();

        if load.busy == load.alive && load.queued > 0 && load.alive < self.max_threads {
            decision.spawn = self.step.min(self.max_threads - load.alive);
        }

        let staying = load.staying();
        if load.busy < load.idle() && load.queued == 0 && staying > self.min_threads {
            decision.retire = self.step.min(staying - self.min_threads);
        }

        decision
    }
}

/// Start the controller thread.
pub(crate) fn spawn_controller(shared: &Arc<Shared>) -> Result<JoinHandle<()>, WorkerError> {
    let name = format!("{}-admin", shared.config.thread_name);
    let admin_shared = Arc::clone(shared);
    shared
        .spawner
        .spawn(ThreadRole::Admin, name, Box::new(move || controller_loop(admin_shared)))
        .map_err(|e| {
            kerror!("failed to spawn admin controller: {}", e);
            WorkerError::ControllerSpawnFailed
        })
}

fn controller_loop(shared: Arc<Shared>) {
    let interval = shared.config.admin_interval;
    kdebug!("admin controller started, interval={:?}", interval);

    loop {
        {
            let state = shared.lock();
            let (state, _) = shared
                .admin_wakeup
                .wait_timeout_while(state, interval, |s| !s.shutting_down)
                .unwrap_or_else(PoisonError::into_inner);
            if state.shutting_down {
                break;
            }
        }
        run_tick(&shared);
    }

    kdebug!("admin controller stopped");
}

/// One controller tick. Returns what was actually applied.
///
/// Spawn failures are logged and skipped; the next tick retries if the
/// load persists.
pub(crate) fn run_tick(shared: &Arc<Shared>) -> ScaleDecision {
    let policy = ScalePolicy::from_config(&shared.config);
    let mut applied = ScaleDecision::default();

    let mut state = shared.lock();
    if state.shutting_down {
        return applied;
    }

    let load = shared.snapshot_locked(&state);
    StatCounters::bump(&shared.counters.admin_ticks, 1);
    kdebug!("admin tick: {}", load);

    let decision = policy.decide(&load);

    for _ in 0..decision.spawn {
        if let Ok(slot) = spawn_worker(shared, &mut state) {
            applied.spawn += 1;
            kinfo!("added worker {}, alive={}", slot, state.alive);
        }
    }

    if decision.retire > 0 {
        state.pending_exit += decision.retire;
        applied.retire = decision.retire;
        for _ in 0..decision.retire {
            shared.queue_not_empty.notify_one();
        }
        kinfo!("retiring {} worker(s), alive={}", decision.retire, state.alive);
    }

    let retired = mem::take(&mut state.retired);
    drop(state);

    for handle in retired {
        if handle.join().is_err() {
            kerror!("retired worker thread panicked");
        }
    }

    applied
}
