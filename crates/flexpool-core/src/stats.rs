//! Load snapshot and lifetime statistics

use core::fmt;

/// Scheduling-relevant pool state, read in one critical section.
///
/// Invariants of a snapshot taken from a live pool:
/// `busy <= alive`, `pending_exit <= alive`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSnapshot {
    /// Tasks waiting in the queue
    pub queued: usize,

    /// Workers currently executing a task
    pub busy: usize,

    /// Live workers
    pub alive: usize,

    /// Exit credits granted but not yet consumed
    pub pending_exit: usize,
}

impl LoadSnapshot {
    /// Live workers not currently running a task
    #[inline]
    pub fn idle(&self) -> usize {
        self.alive.saturating_sub(self.busy)
    }

    /// Live workers that have not been asked to retire
    #[inline]
    pub fn staying(&self) -> usize {
        self.alive.saturating_sub(self.pending_exit)
    }
}

impl fmt::Display for LoadSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "queue={} busy={} alive={} pending_exit={}",
            self.queued, self.busy, self.alive, self.pending_exit
        )
    }
}

/// Monotonic counters over the life of a pool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Tasks accepted into the queue
    pub tasks_submitted: u64,

    /// Tasks that ran to completion (including panicked ones)
    pub tasks_completed: u64,

    /// Tasks whose closure panicked
    pub tasks_panicked: u64,

    /// Tasks dropped unrun at shutdown
    pub tasks_discarded: u64,

    /// Worker threads started
    pub workers_spawned: u64,

    /// Workers that consumed an exit credit
    pub workers_retired: u64,

    /// Worker spawn attempts that failed
    pub spawn_failures: u64,

    /// Controller ticks executed
    pub admin_ticks: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_derived_counts() {
        let s = LoadSnapshot { queued: 0, busy: 1, alive: 4, pending_exit: 2 };
        assert_eq!(s.idle(), 3);
        assert_eq!(s.staying(), 2);
        assert_eq!(format!("{}", s), "queue=0 busy=1 alive=4 pending_exit=2");
    }
}
