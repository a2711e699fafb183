//! Hand-off between the dispatching thread and the render worker.
//!
//! The [`TaskSlot`] holds the single active task. Dispatch fills it, the executor's completion
//! path empties it, and in worker mode the render thread sleeps on the slot's condition variable
//! until it is filled.

use crate::executor::{complete_active, execute_drawing};
use crate::foundation::error::{Dave2dError, Dave2dResult};
use crate::task::TaskHandle;
use crate::unit::UnitShared;
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::thread::JoinHandle;

#[derive(Debug, Default)]
struct SlotState {
    active: Option<TaskHandle>,
    in_pass: bool,
    shutdown: bool,
}

/// The unit's single active-task slot and its wake-up signal.
#[derive(Debug, Default)]
pub(crate) struct TaskSlot {
    state: Mutex<SlotState>,
    ready: Condvar,
}

/// Exclusive right to run one dispatch pass. Released on drop.
pub(crate) struct PassGuard<'a> {
    slot: &'a TaskSlot,
}

impl PassGuard<'_> {
    /// Install `task` as the active task and wake the worker.
    pub(crate) fn activate(self, task: TaskHandle) {
        let mut s = self.slot.state.lock();
        s.active = Some(task);
        self.slot.ready.notify_one();
    }
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.slot.state.lock().in_pass = false;
    }
}

impl TaskSlot {
    pub(crate) fn is_busy(&self) -> bool {
        self.state.lock().active.is_some()
    }

    /// Start a dispatch pass. `None` while a task is active or another pass is running.
    pub(crate) fn begin_pass(&self) -> Option<PassGuard<'_>> {
        let mut s = self.state.lock();
        if s.active.is_some() || s.in_pass {
            return None;
        }
        s.in_pass = true;
        Some(PassGuard { slot: self })
    }

    pub(crate) fn clear(&self) -> Option<TaskHandle> {
        self.state.lock().active.take()
    }

    /// Block until a task is active. Returns `None` once shutdown was requested and the slot is
    /// empty.
    fn wait_for_task(&self) -> Option<TaskHandle> {
        let mut s = self.state.lock();
        loop {
            if let Some(task) = s.active.as_ref() {
                return Some(Arc::clone(task));
            }
            if s.shutdown {
                return None;
            }
            self.ready.wait(&mut s);
        }
    }

    fn request_shutdown(&self) {
        let mut s = self.state.lock();
        s.shutdown = true;
        self.ready.notify_all();
    }
}

/// How a dispatched task reaches the executor.
pub(crate) enum Strategy {
    /// Executed on the dispatching thread before `dispatch` returns.
    Inline,
    /// Executed by the unit's render worker.
    Worker(WorkerHandle),
}

/// The unit's render thread.
pub(crate) struct WorkerHandle {
    join: JoinHandle<()>,
}

impl WorkerHandle {
    pub(crate) fn spawn(shared: Arc<UnitShared>) -> Dave2dResult<Self> {
        let mut builder = std::thread::Builder::new().name(shared.config.worker_name.clone());
        if let Some(size) = shared.config.worker_stack_size {
            builder = builder.stack_size(size);
        }
        let join = builder
            .spawn(move || render_loop(&shared))
            .map_err(|e| Dave2dError::worker(format!("failed to spawn render worker: {e}")))?;
        Ok(Self { join })
    }

    /// Let the worker finish its active task, then join it.
    pub(crate) fn shutdown(self, shared: &UnitShared) {
        shared.slot.request_shutdown();
        if self.join.join().is_err() {
            tracing::error!("render worker panicked");
        }
    }
}

fn render_loop(shared: &UnitShared) {
    tracing::debug!(unit = %shared.config.name, "render worker started");
    while let Some(task) = shared.slot.wait_for_task() {
        execute_drawing(shared, &task);
        complete_active(shared, &task);
    }
    tracing::debug!(unit = %shared.config.name, "render worker stopped");
}

#[cfg(test)]
#[path = "../tests/unit/worker.rs"]
mod tests;
