use crate::foundation::core::{ColorFormat, UnitId};
use crate::host::DrawHost;
use crate::task::{DrawDescriptor, DrawTask};

/// Score recorded with every bid. Constant, so ties are broken by the host's bidding order.
pub const PREFERENCE_SCORE: i32 = 0;

/// Outcome of [`evaluate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bid {
    /// The task now prefers this unit.
    Claimed,
    /// The task was left untouched.
    Declined,
}

/// Return `true` when an image of format `cf` can be sourced by the GPU.
pub fn is_image_format_supported(cf: ColorFormat) -> bool {
    !(cf.is_proprietary() || cf == ColorFormat::Rgb888 || cf == ColorFormat::Rgb565A8)
}

/// Decide whether `unit` should render `task`, and annotate the task when it should.
pub(crate) fn evaluate(host: &dyn DrawHost, unit: UnitId, task: &DrawTask) -> Bid {
    if !host.is_dest_color_format_supported(task.target().color_format) {
        return Bid::Declined;
    }

    let eligible = match task.descriptor() {
        DrawDescriptor::Fill(dsc) => dsc.grad.is_solid(),
        DrawDescriptor::Triangle(dsc) => dsc.grad.is_solid(),
        DrawDescriptor::Image(dsc) => is_image_format_supported(dsc.header.color_format),
        DrawDescriptor::Border(_)
        | DrawDescriptor::Label(_)
        | DrawDescriptor::Line(_)
        | DrawDescriptor::Arc(_) => true,
        DrawDescriptor::Layer(_)
        | DrawDescriptor::BoxShadow(_)
        | DrawDescriptor::MaskRect(_)
        | DrawDescriptor::MaskBitmap
        | DrawDescriptor::Other(_) => false,
    };

    if !eligible {
        return Bid::Declined;
    }
    task.set_preference(unit, PREFERENCE_SCORE);
    Bid::Claimed
}

#[cfg(test)]
#[path = "../tests/unit/evaluate.rs"]
mod tests;
