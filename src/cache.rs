//! Data-cache maintenance ahead of GPU reads.
//!
//! On cores with a write-back data cache the CPU may hold dirty lines for the region the GPU is
//! about to blend into. The executor hands the region to a [`CacheMaintenance`] hook before the
//! task is rendered.

use crate::foundation::core::{DrawBuf, Rect};
use crate::task::DrawTask;
use std::ops::Range;

/// Cleans and invalidates the data cache for a buffer region.
pub trait CacheMaintenance: Send + Sync {
    /// `area` is in buffer-local pixel coordinates (the buffer's first pixel is `(0, 0)`).
    fn invalidate(&self, buf: &DrawBuf, area: Rect);
}

impl<F> CacheMaintenance for F
where
    F: Fn(&DrawBuf, Rect) + Send + Sync,
{
    fn invalidate(&self, buf: &DrawBuf, area: Rect) {
        self(buf, area)
    }
}

/// Buffer-local region a task touches: `area ∩ clip_area`, shifted so the target layer's buffer
/// origin becomes `(0, 0)`. `None` when the two areas do not overlap.
pub fn task_dirty_region(task: &DrawTask) -> Option<Rect> {
    let clipped = task.area().intersect(task.clip_area());
    if clipped.is_zero_area() {
        return None;
    }
    let origin = task.target().buf_area.origin().to_vec2();
    Some(clipped - origin)
}

/// Byte ranges, one per line, covering `area` of `buf`.
///
/// Helper for [`CacheMaintenance`] implementors: feed each range to the platform's
/// clean/invalidate-by-address routine, offset by the buffer's base address.
///
/// Offsets are relative to the buffer start: `x * bytes_per_pixel + y * stride`. The area is
/// snapped outward to whole pixels and clamped to the buffer.
pub fn dirty_line_ranges(buf: &DrawBuf, area: Rect) -> Vec<Range<usize>> {
    let bpp = buf.color_format.size_bytes() as usize;
    let stride = buf.stride as usize;
    let bounds = Rect::new(0.0, 0.0, f64::from(buf.width), f64::from(buf.height));
    let area = area.expand().intersect(bounds);
    if bpp == 0 || area.is_zero_area() {
        return Vec::new();
    }

    let x0 = area.x0 as usize;
    let y0 = area.y0 as usize;
    let width = area.width() as usize;
    let lines = area.height() as usize;
    let bytes_per_line = width * bpp;

    (0..lines)
        .map(|line| {
            let start = x0 * bpp + (y0 + line) * stride;
            start..start + bytes_per_line
        })
        .collect()
}

#[cfg(test)]
#[path = "../tests/unit/cache.rs"]
mod tests;
