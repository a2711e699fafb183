use crate::config::FlushPolicy;
use crate::device::GpuContext;
use crate::executor::{complete_active, execute_drawing};
use crate::foundation::error::Dave2dResult;
use crate::stats::{add, bump};
use crate::task::{Layer, TaskState};
use crate::unit::UnitShared;
use crate::worker::Strategy;
use std::sync::Arc;

/// Result of one dispatch pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A task was claimed and handed to the executor.
    Accepted,
    /// Nothing was started: the unit is busy, has no task, or lacks resources.
    Idle,
}

/// What caused a flush of the batch queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FlushTrigger {
    Watermark,
    Idle,
    Explicit,
}

/// One dispatch pass: claim at most one task for this unit and start it.
pub(crate) fn dispatch(shared: &UnitShared, strategy: &Strategy, layer: &Layer) -> DispatchOutcome {
    let Some(pass) = shared.slot.begin_pass() else {
        return DispatchOutcome::Idle;
    };
    let unit = shared.config.unit_id;
    let host = shared.host.as_ref();
    let batched = shared.config.flush == FlushPolicy::Batched;

    // Head-of-line skip: tasks nobody bid this unit for would otherwise block the traversal.
    let task = loop {
        match host.get_available_task(layer, unit) {
            Some(t) if !t.prefers(unit) => {
                tracing::trace!(task = ?t.id(), "skipping task not preferring this unit");
                if !t.mark_finished() {
                    bump(&shared.stats.refused_finishes);
                }
                bump(&shared.stats.skipped);
            }
            other => break other,
        }
    };

    let Some(task) = task else {
        bump(&shared.stats.idle_passes);
        if batched {
            let mut gpu = shared.gpu.lock();
            if !gpu.batch.is_empty() {
                let confirmed = run_flush(shared, &mut gpu, FlushTrigger::Idle).unwrap_or(0);
                drop(gpu);
                if confirmed > 0 {
                    host.request_dispatch();
                }
            }
        }
        return DispatchOutcome::Idle;
    };

    if !host.is_dest_color_format_supported(layer.color_format) {
        tracing::debug!(cf = ?layer.color_format, "destination format not supported");
        return DispatchOutcome::Idle;
    }

    if host.alloc_layer_buffer(layer).is_none() {
        tracing::debug!(task = ?task.id(), "layer buffer allocation failed");
        return DispatchOutcome::Idle;
    }

    if batched {
        let ops = host.get_dependent_count(&task);
        let mut gpu = shared.gpu.lock();
        if gpu.batch.account(ops) {
            // Flush before the new task joins the batch; it is confirmed by the next flush.
            if let Err(err) = run_flush(shared, &mut gpu, FlushTrigger::Watermark) {
                tracing::debug!(error = %err, "accepting task after failed watermark flush");
            }
        }
        gpu.batch.push(Arc::clone(&task));
    }

    task.advance(TaskState::InProgress);
    tracing::trace!(task = ?task.id(), kind = ?task.kind(), "dispatched");
    bump(&shared.stats.dispatched);
    pass.activate(Arc::clone(&task));

    if let Strategy::Inline = strategy {
        execute_drawing(shared, &task);
        complete_active(shared, &task);
    }

    DispatchOutcome::Accepted
}

/// Flush the batch queue while holding the GPU lock.
///
/// Driver failures are logged and counted; the batch is drained either way.
#[tracing::instrument(level = "debug", skip(shared, gpu), fields(batched = gpu.batch.len()))]
pub(crate) fn run_flush(
    shared: &UnitShared,
    gpu: &mut GpuContext,
    trigger: FlushTrigger,
) -> Dave2dResult<usize> {
    let report = gpu.execute_and_flush();
    let counter = match trigger {
        FlushTrigger::Watermark => &shared.stats.watermark_flushes,
        FlushTrigger::Idle => &shared.stats.idle_flushes,
        FlushTrigger::Explicit => &shared.stats.explicit_flushes,
    };
    bump(counter);
    add(&shared.stats.finished, report.confirmed);
    add(&shared.stats.refused_finishes, report.refused);

    match report.result {
        Ok(()) => Ok(report.confirmed),
        Err(e) => {
            tracing::error!(error = %e, confirmed = report.confirmed, "flush failed");
            bump(&shared.stats.driver_errors);
            Err(e.into())
        }
    }
}
