//! Per-primitive GPU drawing routines.
//!
//! The routines translate a descriptor into driver calls on the currently selected render
//! buffer. They run with the GPU lock held and are assumed not to fail at this layer.

use crate::device::GpuDevice;
use crate::foundation::core::Rect;
use crate::task::{
    ArcDescriptor, BorderDescriptor, DrawTask, FillDescriptor, ImageDescriptor, LabelDescriptor,
    LineDescriptor, TriangleDescriptor,
};

/// Renders one primitive kind per method into `gpu`.
///
/// `area` is the task's absolute draw area; lines and triangles carry their geometry in the
/// descriptor.
pub trait PrimitiveRenderer: Send {
    /// Rectangle fill.
    fn fill(&mut self, gpu: &mut dyn GpuDevice, task: &DrawTask, dsc: &FillDescriptor, area: Rect);

    /// Rectangle outline.
    fn border(
        &mut self,
        gpu: &mut dyn GpuDevice,
        task: &DrawTask,
        dsc: &BorderDescriptor,
        area: Rect,
    );

    /// Bitmap blit.
    fn image(
        &mut self,
        gpu: &mut dyn GpuDevice,
        task: &DrawTask,
        dsc: &ImageDescriptor,
        area: Rect,
    );

    /// Text run.
    fn label(
        &mut self,
        gpu: &mut dyn GpuDevice,
        task: &DrawTask,
        dsc: &LabelDescriptor,
        area: Rect,
    );

    /// Straight line.
    fn line(&mut self, gpu: &mut dyn GpuDevice, task: &DrawTask, dsc: &LineDescriptor);

    /// Circular arc.
    fn arc(&mut self, gpu: &mut dyn GpuDevice, task: &DrawTask, dsc: &ArcDescriptor, area: Rect);

    /// Filled triangle.
    fn triangle(&mut self, gpu: &mut dyn GpuDevice, task: &DrawTask, dsc: &TriangleDescriptor);
}
