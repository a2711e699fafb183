//! GPU driver boundary and the unit's GPU context.
//!
//! [`GpuDevice`] is the opaque command-list engine. [`GpuContext`] bundles an opened device with
//! the active render buffer, the primitive renderers and the batch queue; the unit keeps it
//! behind a single mutex so rendering and flushing never interleave.

use crate::batch::BatchQueue;
use crate::config::DeviceParams;
use crate::foundation::error::{Dave2dError, Dave2dResult, DriverError, DriverResult};
use crate::render::PrimitiveRenderer;

/// Handle of a driver-side render buffer (display list).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderBufferId(pub u32);

/// Blend factor applied to source or destination color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendFactor {
    /// Factor 0.
    Zero,
    /// Factor 1.
    One,
    /// Source alpha.
    Alpha,
    /// One minus source alpha.
    OneMinusAlpha,
}

/// How global alpha combines with per-primitive alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaMode {
    /// A single constant alpha.
    Constant,
    /// Alpha interpolated across the primitive.
    Gradient,
}

/// Line end style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    /// Flat end at the endpoint.
    Butt,
    /// Half-disc end.
    Round,
    /// Flat end extended by half the width.
    Square,
}

/// Polyline corner style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineJoin {
    /// No corner fill.
    None,
    /// Sharp corner.
    Miter,
    /// Rounded corner.
    Round,
}

/// An opened 2D GPU with a fixed operation set.
///
/// Every call blocks until the hardware accepted it; there is no timeout. Primitive-specific
/// calls are issued by [`PrimitiveRenderer`] implementations, which know their concrete device
/// type.
pub trait GpuDevice: Send {
    /// Bind the hardware to this handle.
    fn init_hw(&mut self) -> DriverResult<()>;

    /// Set the blend equation factors.
    fn set_blend_mode(&mut self, src: BlendFactor, dst: BlendFactor) -> DriverResult<()>;

    /// Set the alpha mode.
    fn set_alpha_mode(&mut self, mode: AlphaMode) -> DriverResult<()>;

    /// Set the global alpha.
    fn set_alpha(&mut self, alpha: u8) -> DriverResult<()>;

    /// Enable or disable antialiasing.
    fn set_antialiasing(&mut self, enabled: bool) -> DriverResult<()>;

    /// Set the default line cap.
    fn set_line_cap(&mut self, cap: LineCap) -> DriverResult<()>;

    /// Set the default line join.
    fn set_line_join(&mut self, join: LineJoin) -> DriverResult<()>;

    /// Set the block size of the default display list.
    fn set_dlist_block_size(&mut self, size: u32) -> DriverResult<()>;

    /// Allocate a render buffer.
    fn new_render_buffer(&mut self, initial: u32, stride: u32) -> DriverResult<RenderBufferId>;

    /// Make `rb` the target of subsequent drawing calls.
    fn select_render_buffer(&mut self, rb: RenderBufferId) -> DriverResult<()>;

    /// Submit the commands recorded in `rb` to the hardware.
    fn execute_render_buffer(&mut self, rb: RenderBufferId) -> DriverResult<()>;

    /// Block until all submitted commands completed.
    fn flush_frame(&mut self) -> DriverResult<()>;

    /// Release the hardware. Called at most once.
    fn close(&mut self);
}

/// Result of one flush of the batch queue.
#[derive(Debug)]
pub(crate) struct FlushReport {
    /// Tasks moved to finished.
    pub(crate) confirmed: usize,
    /// Tasks that were already finished.
    pub(crate) refused: usize,
    /// Outcome of the execute/flush/reselect sequence.
    pub(crate) result: DriverResult<()>,
}

/// Opened device, render buffer, renderers and batch queue. Always used under the unit's GPU
/// mutex.
pub(crate) struct GpuContext {
    pub(crate) device: Box<dyn GpuDevice>,
    pub(crate) renderer: Box<dyn PrimitiveRenderer>,
    pub(crate) renderbuffer: RenderBufferId,
    pub(crate) batch: BatchQueue,
    closed: bool,
}

impl GpuContext {
    /// Bring up `device`. On failure the device is closed before the error is returned.
    #[tracing::instrument(skip(device, renderer))]
    pub(crate) fn open(
        params: &DeviceParams,
        watermark: u32,
        mut device: Box<dyn GpuDevice>,
        renderer: Box<dyn PrimitiveRenderer>,
    ) -> Dave2dResult<Self> {
        match bring_up(device.as_mut(), params) {
            Ok(renderbuffer) => Ok(Self {
                device,
                renderer,
                renderbuffer,
                batch: BatchQueue::new(watermark),
                closed: false,
            }),
            Err(err) => {
                tracing::error!(error = %err, "device bring-up failed");
                device.close();
                Err(err)
            }
        }
    }

    /// Execute the render buffer, wait for the hardware, reselect the buffer, then confirm
    /// every batched task.
    ///
    /// The batch is drained even when a driver call fails so no task stays in progress.
    pub(crate) fn execute_and_flush(&mut self) -> FlushReport {
        let rb = self.renderbuffer;
        let result = self
            .device
            .execute_render_buffer(rb)
            .and_then(|()| self.device.flush_frame())
            .and_then(|()| self.device.select_render_buffer(rb));
        let (confirmed, refused) = self.batch.drain_finished();
        FlushReport {
            confirmed,
            refused,
            result,
        }
    }

    pub(crate) fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.device.close();
        }
    }
}

fn bring_up(device: &mut dyn GpuDevice, params: &DeviceParams) -> Dave2dResult<RenderBufferId> {
    fn at<T>(stage: &'static str, r: DriverResult<T>) -> Dave2dResult<T> {
        r.map_err(|e: DriverError| Dave2dError::device_init(stage, e))
    }

    at("init_hw", device.init_hw())?;
    at(
        "set_blend_mode",
        device.set_blend_mode(params.blend_src, params.blend_dst),
    )?;
    at("set_alpha_mode", device.set_alpha_mode(params.alpha_mode))?;
    at("set_alpha", device.set_alpha(params.alpha))?;
    at("set_antialiasing", device.set_antialiasing(params.antialiasing))?;
    at("set_line_cap", device.set_line_cap(params.line_cap))?;
    at("set_line_join", device.set_line_join(params.line_join))?;
    at(
        "set_dlist_block_size",
        device.set_dlist_block_size(params.dlist_block_size),
    )?;
    let rb = at(
        "new_render_buffer",
        device.new_render_buffer(params.renderbuffer_initial, params.renderbuffer_stride),
    )?;
    at("select_render_buffer", device.select_render_buffer(rb))?;
    Ok(rb)
}

#[cfg(test)]
#[path = "../tests/unit/device.rs"]
mod tests;
