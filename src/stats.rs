use std::sync::atomic::{AtomicU64, Ordering};

/// Counters describing what a unit did since init.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnitStats {
    /// Tasks accepted by a dispatch pass.
    pub dispatched: u64,
    /// Tasks skipped (and finished) because they did not prefer this unit.
    pub skipped: u64,
    /// Tasks rendered by the executor.
    pub executed: u64,
    /// Tasks this unit moved to finished after executing them (immediately or via a flush).
    pub finished: u64,
    /// Finish attempts refused because the task was already finished.
    pub refused_finishes: u64,
    /// Dispatch passes that found no task for this unit.
    pub idle_passes: u64,
    /// Flushes forced by the pending-operation watermark.
    pub watermark_flushes: u64,
    /// Flushes performed because the unit ran out of tasks.
    pub idle_flushes: u64,
    /// Flushes requested explicitly or during shutdown.
    pub explicit_flushes: u64,
    /// Driver calls that failed after init.
    pub driver_errors: u64,
}

impl UnitStats {
    /// All flushes regardless of trigger.
    pub fn flushes(&self) -> u64 {
        self.watermark_flushes + self.idle_flushes + self.explicit_flushes
    }
}

#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    pub(crate) dispatched: AtomicU64,
    pub(crate) skipped: AtomicU64,
    pub(crate) executed: AtomicU64,
    pub(crate) finished: AtomicU64,
    pub(crate) refused_finishes: AtomicU64,
    pub(crate) idle_passes: AtomicU64,
    pub(crate) watermark_flushes: AtomicU64,
    pub(crate) idle_flushes: AtomicU64,
    pub(crate) explicit_flushes: AtomicU64,
    pub(crate) driver_errors: AtomicU64,
}

pub(crate) fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

pub(crate) fn add(counter: &AtomicU64, n: usize) {
    counter.fetch_add(n as u64, Ordering::Relaxed);
}

impl StatsCounters {
    pub(crate) fn snapshot(&self) -> UnitStats {
        let get = |c: &AtomicU64| c.load(Ordering::Relaxed);
        UnitStats {
            dispatched: get(&self.dispatched),
            skipped: get(&self.skipped),
            executed: get(&self.executed),
            finished: get(&self.finished),
            refused_finishes: get(&self.refused_finishes),
            idle_passes: get(&self.idle_passes),
            watermark_flushes: get(&self.watermark_flushes),
            idle_flushes: get(&self.idle_flushes),
            explicit_flushes: get(&self.explicit_flushes),
            driver_errors: get(&self.driver_errors),
        }
    }
}
