use crate::cache::task_dirty_region;
use crate::config::FlushPolicy;
use crate::device::GpuContext;
use crate::stats::bump;
use crate::task::{DrawDescriptor, DrawTask};
use crate::unit::UnitShared;

/// Render the active task: cache maintenance first, then the kind-specific routine under the
/// GPU lock.
pub(crate) fn execute_drawing(shared: &UnitShared, task: &DrawTask) {
    task.set_claimed_by(shared.config.unit_id);

    if let Some(cache) = shared.cache.as_deref()
        && let Some(region) = task_dirty_region(task)
    {
        cache.invalidate(&task.target().draw_buf, region);
    }

    let mut gpu = shared.gpu.lock();
    render_task(&mut gpu, task);
    drop(gpu);
    bump(&shared.stats.executed);
}

/// Release the slot after `task` was rendered and ask the host for another pass.
pub(crate) fn complete_active(shared: &UnitShared, task: &DrawTask) {
    if shared.config.flush == FlushPolicy::Immediate {
        shared.finish(task);
    }
    shared.slot.clear();
    shared.host.request_dispatch();
}

fn render_task(ctx: &mut GpuContext, task: &DrawTask) {
    let GpuContext {
        device, renderer, ..
    } = ctx;
    let gpu = device.as_mut();
    let area = task.area();

    match task.descriptor() {
        DrawDescriptor::Fill(dsc) => renderer.fill(gpu, task, dsc, area),
        DrawDescriptor::Border(dsc) => renderer.border(gpu, task, dsc, area),
        DrawDescriptor::Label(dsc) => renderer.label(gpu, task, dsc, area),
        DrawDescriptor::Image(dsc) => renderer.image(gpu, task, dsc, area),
        DrawDescriptor::Line(dsc) => renderer.line(gpu, task, dsc),
        DrawDescriptor::Arc(dsc) => renderer.arc(gpu, task, dsc, area),
        DrawDescriptor::Triangle(dsc) => renderer.triangle(gpu, task, dsc),
        // No GPU routine for these yet.
        DrawDescriptor::BoxShadow(_)
        | DrawDescriptor::Layer(_)
        | DrawDescriptor::MaskRect(_)
        | DrawDescriptor::MaskBitmap
        | DrawDescriptor::Other(_) => {
            tracing::trace!(task = ?task.id(), kind = ?task.kind(), "no routine, skipped");
        }
    }
}
