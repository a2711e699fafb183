//! A draw unit that offloads 2D primitives from a host's software rasterizer onto a
//! Dave2D-class GPU.
//!
//! The host splits a frame into draw tasks and lets every registered draw unit bid on them.
//! This crate implements the Dave2D unit's side of that protocol:
//!
//! 1. **Evaluate**: [`Dave2dUnit::evaluate`] claims the tasks the GPU can render exactly
//!    (solid fills and triangles, borders, labels, lines, arcs, images in supported formats).
//! 2. **Dispatch**: [`Dave2dUnit::dispatch`] pulls the next task for this unit from the host,
//!    skips tasks nobody claimed for it, and starts at most one task at a time.
//! 3. **Execute**: the task is rendered inline or on the unit's render worker
//!    ([`ExecutionModel`]), after an optional data-cache invalidation of the touched region.
//! 4. **Flush**: with [`FlushPolicy::Batched`], tasks accumulate in the GPU command list and are
//!    confirmed together when the pending-operation watermark is exceeded or when the unit runs
//!    out of work.
//!
//! The GPU driver, the primitive routines and the host's task queue are collaborators behind the
//! [`GpuDevice`], [`PrimitiveRenderer`] and [`DrawHost`] traits.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod batch;
mod cache;
mod config;
mod device;
mod dispatch;
mod evaluate;
mod executor;
mod foundation;
mod host;
mod render;
mod stats;
mod task;
mod unit;
mod worker;

pub use cache::{CacheMaintenance, dirty_line_ranges, task_dirty_region};
pub use config::{
    DEFAULT_UNIT_ID, DEFAULT_WATERMARK, DeviceParams, ExecutionModel, FlushPolicy, UnitConfig,
};
pub use device::{AlphaMode, BlendFactor, GpuDevice, LineCap, LineJoin, RenderBufferId};
pub use dispatch::DispatchOutcome;
pub use evaluate::{Bid, PREFERENCE_SCORE, is_image_format_supported};
pub use foundation::core::{
    Color, ColorFormat, DrawBuf, PROPRIETARY_FORMAT_START, Point, Rect, UnitId, Vec2,
};
pub use foundation::error::{Dave2dError, Dave2dResult, DriverError, DriverResult};
pub use host::{DrawHost, is_dave2d_dest_format};
pub use render::PrimitiveRenderer;
pub use stats::UnitStats;
pub use task::{
    ArcDescriptor, BorderDescriptor, BoxShadowDescriptor, DrawDescriptor, DrawTask,
    FillDescriptor, GradDir, GradStop, Gradient, ImageDescriptor, ImageHeader, LabelDescriptor,
    Layer, LayerDescriptor, LineDescriptor, MaskRectDescriptor, Preference, TaskHandle, TaskId,
    TaskKind, TaskState, TriangleDescriptor,
};
pub use unit::{Dave2dUnit, DrawUnit, UnitParts};
