//! Draw task data model shared between the host and the draw unit.
//!
//! Tasks are created and owned by the host and handed around as [`TaskHandle`]s. The draw unit
//! mutates three things on a task: its backend preference (while bidding), its lifecycle state,
//! and the id of the unit that executed it.

use crate::foundation::core::{Color, ColorFormat, DrawBuf, Point, Rect, UnitId};
use parking_lot::Mutex;
use smallvec::SmallVec;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Shared reference to a host-owned draw task.
pub type TaskHandle = Arc<DrawTask>;

/// Host-assigned task identifier, used for diagnostics only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

/// What a draw task renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Solid or gradient rectangle fill.
    Fill,
    /// Rectangle outline.
    Border,
    /// Blurred rectangle shadow.
    BoxShadow,
    /// Text run.
    Label,
    /// Bitmap blit.
    Image,
    /// Composition of an offscreen layer.
    Layer,
    /// Straight line.
    Line,
    /// Circular arc.
    Arc,
    /// Filled triangle.
    Triangle,
    /// Rounded-rectangle mask.
    MaskRect,
    /// Bitmap mask.
    MaskBitmap,
    /// A kind this unit does not know about.
    Other,
}

/// Lifecycle of a draw task. Transitions only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TaskState {
    /// Waiting for a draw unit.
    Queued = 0,
    /// Claimed and being rendered.
    InProgress = 1,
    /// Done; the host may reclaim it.
    Finished = 2,
}

impl TaskState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::Queued,
            1 => Self::InProgress,
            _ => Self::Finished,
        }
    }
}

/// Which draw unit a task prefers, as decided during bidding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Preference {
    /// Preferred unit, `None` while no unit has bid.
    pub unit: Option<UnitId>,
    /// Bid score; lower wins in the host's comparison.
    pub score: i32,
}

/// Destination layer of a draw task.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    /// Pixel format the layer renders into.
    pub color_format: ColorFormat,
    /// Absolute area covered by the layer's buffer; its origin maps to buffer pixel (0, 0).
    pub buf_area: Rect,
    /// Geometry of the layer's pixel buffer.
    pub draw_buf: DrawBuf,
}

impl Layer {
    /// A layer whose buffer is packed and covers `buf_area`.
    pub fn new(color_format: ColorFormat, buf_area: Rect) -> Self {
        let width = buf_area.width().max(0.0).round() as u32;
        let height = buf_area.height().max(0.0).round() as u32;
        Self {
            color_format,
            buf_area,
            draw_buf: DrawBuf::packed(width, height, color_format),
        }
    }
}

/// Gradient direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GradDir {
    /// No gradient; the main color is used.
    #[default]
    None,
    /// Top to bottom.
    Vertical,
    /// Left to right.
    Horizontal,
    /// Along an arbitrary line.
    Linear,
    /// From a center outward.
    Radial,
    /// Around a center.
    Conical,
}

/// One gradient stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GradStop {
    /// Stop color.
    pub color: Color,
    /// Stop opacity.
    pub opa: u8,
    /// Position along the gradient, 0..=255.
    pub frac: u8,
}

impl GradStop {
    /// Fully opaque stop.
    pub fn new(color: Color, frac: u8) -> Self {
        Self {
            color,
            opa: u8::MAX,
            frac,
        }
    }
}

/// Gradient description attached to fills and triangles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gradient {
    /// Direction; [`GradDir::None`] disables the gradient.
    pub dir: GradDir,
    /// Ordered stops.
    pub stops: SmallVec<[GradStop; 2]>,
}

impl Gradient {
    /// A gradient with the given direction and stops.
    pub fn new(dir: GradDir, stops: impl IntoIterator<Item = GradStop>) -> Self {
        Self {
            dir,
            stops: stops.into_iter().collect(),
        }
    }

    /// Return `true` when the gradient renders as a single color: either it has no direction,
    /// or its first and last stops share red, green and blue.
    ///
    /// A directed gradient without stops is not solid.
    pub fn is_solid(&self) -> bool {
        if self.dir == GradDir::None {
            return true;
        }
        match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => first.color == last.color,
            _ => false,
        }
    }
}

/// Rectangle fill.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FillDescriptor {
    /// Main color.
    pub color: Color,
    /// Opacity.
    pub opa: u8,
    /// Corner radius in pixels.
    pub radius: i32,
    /// Optional gradient.
    pub grad: Gradient,
}

/// Rectangle outline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BorderDescriptor {
    /// Outline color.
    pub color: Color,
    /// Opacity.
    pub opa: u8,
    /// Outline width in pixels.
    pub width: i32,
    /// Corner radius in pixels.
    pub radius: i32,
}

/// Rectangle shadow.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoxShadowDescriptor {
    /// Shadow color.
    pub color: Color,
    /// Opacity.
    pub opa: u8,
    /// Blur width.
    pub width: i32,
    /// Spread.
    pub spread: i32,
}

/// Text run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LabelDescriptor {
    /// UTF-8 text.
    pub text: String,
    /// Glyph color.
    pub color: Color,
    /// Opacity.
    pub opa: u8,
}

/// Header of an image source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageHeader {
    /// Source pixel format.
    pub color_format: ColorFormat,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Line stride in bytes.
    pub stride: u32,
}

/// Bitmap blit.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageDescriptor {
    /// Source header.
    pub header: ImageHeader,
    /// Opacity.
    pub opa: u8,
    /// Rotation in 0.1 degree units.
    pub rotation: i32,
    /// Scale, 256 = 1.0.
    pub scale: u32,
}

/// Straight line.
#[derive(Clone, Debug, PartialEq)]
pub struct LineDescriptor {
    /// Start point.
    pub p1: Point,
    /// End point.
    pub p2: Point,
    /// Line color.
    pub color: Color,
    /// Opacity.
    pub opa: u8,
    /// Stroke width in pixels.
    pub width: i32,
    /// Round the start cap.
    pub round_start: bool,
    /// Round the end cap.
    pub round_end: bool,
}

/// Circular arc.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcDescriptor {
    /// Arc center.
    pub center: Point,
    /// Outer radius.
    pub radius: u16,
    /// Start angle in degrees.
    pub start_angle: f64,
    /// End angle in degrees.
    pub end_angle: f64,
    /// Stroke width.
    pub width: i32,
    /// Arc color.
    pub color: Color,
    /// Opacity.
    pub opa: u8,
    /// Rounded ends.
    pub rounded: bool,
}

/// Filled triangle.
#[derive(Clone, Debug, PartialEq)]
pub struct TriangleDescriptor {
    /// Corner points.
    pub points: [Point; 3],
    /// Main color.
    pub color: Color,
    /// Opacity.
    pub opa: u8,
    /// Optional gradient.
    pub grad: Gradient,
}

/// Offscreen layer composition.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerDescriptor {
    /// Opacity of the composed layer.
    pub opa: u8,
}

/// Rounded-rectangle mask.
#[derive(Clone, Debug, PartialEq)]
pub struct MaskRectDescriptor {
    /// Masked area.
    pub area: Rect,
    /// Corner radius.
    pub radius: i32,
}

/// Kind-specific payload of a draw task.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawDescriptor {
    /// See [`FillDescriptor`].
    Fill(FillDescriptor),
    /// See [`BorderDescriptor`].
    Border(BorderDescriptor),
    /// See [`BoxShadowDescriptor`].
    BoxShadow(BoxShadowDescriptor),
    /// See [`LabelDescriptor`].
    Label(LabelDescriptor),
    /// See [`ImageDescriptor`].
    Image(ImageDescriptor),
    /// See [`LayerDescriptor`].
    Layer(LayerDescriptor),
    /// See [`LineDescriptor`].
    Line(LineDescriptor),
    /// See [`ArcDescriptor`].
    Arc(ArcDescriptor),
    /// See [`TriangleDescriptor`].
    Triangle(TriangleDescriptor),
    /// See [`MaskRectDescriptor`].
    MaskRect(MaskRectDescriptor),
    /// Bitmap mask; the payload stays with the host.
    MaskBitmap,
    /// Host task type unknown to this unit (raw host type code).
    Other(u32),
}

impl DrawDescriptor {
    /// Kind of task this payload belongs to.
    pub fn kind(&self) -> TaskKind {
        match self {
            Self::Fill(_) => TaskKind::Fill,
            Self::Border(_) => TaskKind::Border,
            Self::BoxShadow(_) => TaskKind::BoxShadow,
            Self::Label(_) => TaskKind::Label,
            Self::Image(_) => TaskKind::Image,
            Self::Layer(_) => TaskKind::Layer,
            Self::Line(_) => TaskKind::Line,
            Self::Arc(_) => TaskKind::Arc,
            Self::Triangle(_) => TaskKind::Triangle,
            Self::MaskRect(_) => TaskKind::MaskRect,
            Self::MaskBitmap => TaskKind::MaskBitmap,
            Self::Other(_) => TaskKind::Other,
        }
    }
}

/// One unit of requested rendering work.
#[derive(Debug)]
pub struct DrawTask {
    id: TaskId,
    descriptor: DrawDescriptor,
    area: Rect,
    clip_area: Rect,
    target: Arc<Layer>,
    state: AtomicU8,
    preference: Mutex<Preference>,
    claimed_by: Mutex<Option<UnitId>>,
}

impl DrawTask {
    /// Create a queued task whose clip area equals its draw area.
    pub fn new(id: TaskId, descriptor: DrawDescriptor, area: Rect, target: Arc<Layer>) -> Self {
        Self {
            id,
            descriptor,
            area,
            clip_area: area,
            target,
            state: AtomicU8::new(TaskState::Queued as u8),
            preference: Mutex::new(Preference::default()),
            claimed_by: Mutex::new(None),
        }
    }

    /// Replace the clip area.
    pub fn with_clip_area(mut self, clip_area: Rect) -> Self {
        self.clip_area = clip_area;
        self
    }

    /// Wrap into a shareable handle.
    pub fn into_handle(self) -> TaskHandle {
        Arc::new(self)
    }

    /// Host-assigned id.
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Kind of work.
    pub fn kind(&self) -> TaskKind {
        self.descriptor.kind()
    }

    /// Kind-specific payload.
    pub fn descriptor(&self) -> &DrawDescriptor {
        &self.descriptor
    }

    /// Absolute area the task draws into.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Absolute clip area.
    pub fn clip_area(&self) -> Rect {
        self.clip_area
    }

    /// Destination layer.
    pub fn target(&self) -> &Layer {
        &self.target
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TaskState {
        TaskState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Move the task forward to `next`.
    ///
    /// Returns `false` and leaves the state untouched when `next` is not strictly after the
    /// current state, so a task can never go backwards or be finished twice.
    pub fn advance(&self, next: TaskState) -> bool {
        let next = next as u8;
        let mut cur = self.state.load(Ordering::Acquire);
        loop {
            if cur >= next {
                return false;
            }
            match self
                .state
                .compare_exchange_weak(cur, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => return true,
                Err(actual) => cur = actual,
            }
        }
    }

    /// Shorthand for `advance(TaskState::Finished)`.
    pub fn mark_finished(&self) -> bool {
        self.advance(TaskState::Finished)
    }

    /// Current bid annotation.
    pub fn preference(&self) -> Preference {
        *self.preference.lock()
    }

    /// Record a bid.
    pub fn set_preference(&self, unit: UnitId, score: i32) {
        *self.preference.lock() = Preference {
            unit: Some(unit),
            score,
        };
    }

    /// Return `true` when the task's bid names `unit`.
    pub fn prefers(&self, unit: UnitId) -> bool {
        self.preference.lock().unit == Some(unit)
    }

    /// Unit that executed the task, once execution started.
    pub fn claimed_by(&self) -> Option<UnitId> {
        *self.claimed_by.lock()
    }

    pub(crate) fn set_claimed_by(&self, unit: UnitId) {
        *self.claimed_by.lock() = Some(unit);
    }
}

#[cfg(test)]
#[path = "../tests/unit/task.rs"]
mod tests;
