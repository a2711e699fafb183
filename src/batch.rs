use crate::task::{TaskHandle, TaskState};
use std::collections::VecDeque;

/// Tasks whose commands sit in the render buffer, waiting for a flush to confirm them.
///
/// Also carries the pending-operation counter that drives watermark flushes.
#[derive(Debug)]
pub(crate) struct BatchQueue {
    entries: VecDeque<TaskHandle>,
    pending_ops: u32,
    watermark: u32,
}

impl BatchQueue {
    pub(crate) fn new(watermark: u32) -> Self {
        Self {
            entries: VecDeque::new(),
            pending_ops: 0,
            watermark,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn pending_ops(&self) -> u32 {
        self.pending_ops
    }

    /// Add `ops` to the pending counter. Returns `true` once the counter exceeds the watermark.
    pub(crate) fn account(&mut self, ops: u32) -> bool {
        self.pending_ops = self.pending_ops.saturating_add(ops);
        self.pending_ops > self.watermark
    }

    pub(crate) fn push(&mut self, task: TaskHandle) {
        self.entries.push_back(task);
    }

    /// Confirm every queued task in FIFO order and reset the counter.
    ///
    /// Returns `(confirmed, refused)`: tasks moved to finished by this call and tasks that were
    /// already finished.
    pub(crate) fn drain_finished(&mut self) -> (usize, usize) {
        self.pending_ops = 0;
        let mut confirmed = 0usize;
        let mut refused = 0usize;
        while let Some(task) = self.entries.pop_front() {
            if task.advance(TaskState::Finished) {
                confirmed += 1;
            } else {
                tracing::warn!(task = ?task.id(), "batched task was already finished");
                refused += 1;
            }
        }
        (confirmed, refused)
    }
}

#[cfg(test)]
#[path = "../tests/unit/batch.rs"]
mod tests;
