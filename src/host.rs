use crate::foundation::core::{ColorFormat, DrawBuf, UnitId};
use crate::task::{DrawTask, Layer, TaskHandle};

/// Services the host graphics library provides to its draw units.
///
/// Called from the dispatching thread and, in worker mode, from the render worker
/// (`request_dispatch` only).
pub trait DrawHost: Send + Sync {
    /// Next queued task of `layer` whose dependencies are done and which may go to `unit`.
    ///
    /// Must be callable repeatedly: the unit keeps pulling while it skips tasks it does not own.
    fn get_available_task(&self, layer: &Layer, unit: UnitId) -> Option<TaskHandle>;

    /// Estimated number of GPU operations `task` generates.
    fn get_dependent_count(&self, task: &DrawTask) -> u32;

    /// Allocate or map the layer's destination buffer. `None` means resources are exhausted
    /// for now.
    fn alloc_layer_buffer(&self, layer: &Layer) -> Option<DrawBuf>;

    /// Hint that a unit has free capacity and a new dispatch pass should run.
    ///
    /// Must not call back into `dispatch` on the same stack.
    fn request_dispatch(&self);

    /// Whether the GPU can render into a buffer of format `cf`.
    fn is_dest_color_format_supported(&self, cf: ColorFormat) -> bool {
        is_dave2d_dest_format(cf)
    }
}

/// Destination formats the Dave2D engine can write.
pub fn is_dave2d_dest_format(cf: ColorFormat) -> bool {
    matches!(
        cf,
        ColorFormat::Rgb565 | ColorFormat::Rgb888 | ColorFormat::Argb8888 | ColorFormat::Xrgb8888
    )
}
