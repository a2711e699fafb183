pub use kurbo::{Point, Rect, Vec2};

/// Identifier a host uses to route draw tasks to a draw unit.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct UnitId(pub u32);

/// 24-bit color as stored in draw descriptors and gradient stops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub red: u8,
    /// Green channel.
    pub green: u8,
    /// Blue channel.
    pub blue: u8,
}

impl Color {
    /// Build a color from its channels.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);
}

/// First raw color-format code reserved for vendor-specific formats.
pub const PROPRIETARY_FORMAT_START: u8 = 0x30;

/// Pixel formats understood by the host library.
///
/// Codes follow the host's numbering so formats can cross the host boundary as raw bytes via
/// [`ColorFormat::from_raw`] / [`ColorFormat::to_raw`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorFormat {
    /// Not set.
    Unknown,
    /// Opaque bytes with no pixel interpretation.
    Raw,
    /// Opaque bytes carrying alpha.
    RawAlpha,
    /// 8-bit luminance.
    L8,
    /// 1-bit indexed.
    I1,
    /// 2-bit indexed.
    I2,
    /// 4-bit indexed.
    I4,
    /// 8-bit indexed.
    I8,
    /// 1-bit alpha only.
    A1,
    /// 2-bit alpha only.
    A2,
    /// 4-bit alpha only.
    A4,
    /// 8-bit alpha only.
    A8,
    /// 24-bit RGB.
    Rgb888,
    /// 32-bit ARGB.
    Argb8888,
    /// 32-bit RGB with an ignored byte.
    Xrgb8888,
    /// 16-bit RGB.
    Rgb565,
    /// RGB565 with an interleaved alpha byte.
    Argb8565,
    /// RGB565 plane followed by a separate A8 plane.
    Rgb565A8,
    /// 8-bit luminance with 8-bit alpha.
    Al88,
    /// Planar or packed YUV family (raw code kept).
    Yuv(u8),
    /// Vendor-specific format (raw code kept).
    Proprietary(u8),
}

impl ColorFormat {
    /// Decode a raw host color-format code. Unassigned codes map to [`ColorFormat::Unknown`].
    pub fn from_raw(code: u8) -> Self {
        match code {
            0x01 => Self::Raw,
            0x02 => Self::RawAlpha,
            0x06 => Self::L8,
            0x07 => Self::I1,
            0x08 => Self::I2,
            0x09 => Self::I4,
            0x0A => Self::I8,
            0x0B => Self::A1,
            0x0C => Self::A2,
            0x0D => Self::A4,
            0x0E => Self::A8,
            0x0F => Self::Rgb888,
            0x10 => Self::Argb8888,
            0x11 => Self::Xrgb8888,
            0x12 => Self::Rgb565,
            0x13 => Self::Argb8565,
            0x14 => Self::Rgb565A8,
            0x15 => Self::Al88,
            0x20..=0x2F => Self::Yuv(code),
            c if c >= PROPRIETARY_FORMAT_START => Self::Proprietary(c),
            _ => Self::Unknown,
        }
    }

    /// Encode back to the host's raw code.
    pub fn to_raw(self) -> u8 {
        match self {
            Self::Unknown => 0x00,
            Self::Raw => 0x01,
            Self::RawAlpha => 0x02,
            Self::L8 => 0x06,
            Self::I1 => 0x07,
            Self::I2 => 0x08,
            Self::I4 => 0x09,
            Self::I8 => 0x0A,
            Self::A1 => 0x0B,
            Self::A2 => 0x0C,
            Self::A4 => 0x0D,
            Self::A8 => 0x0E,
            Self::Rgb888 => 0x0F,
            Self::Argb8888 => 0x10,
            Self::Xrgb8888 => 0x11,
            Self::Rgb565 => 0x12,
            Self::Argb8565 => 0x13,
            Self::Rgb565A8 => 0x14,
            Self::Al88 => 0x15,
            Self::Yuv(c) | Self::Proprietary(c) => c,
        }
    }

    /// Return `true` for codes in the vendor-specific range.
    pub fn is_proprietary(self) -> bool {
        self.to_raw() >= PROPRIETARY_FORMAT_START
    }

    /// Bits per pixel of the color plane. Zero when the format has no fixed pixel size.
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            Self::I1 | Self::A1 => 1,
            Self::I2 | Self::A2 => 2,
            Self::I4 | Self::A4 => 4,
            Self::L8 | Self::I8 | Self::A8 => 8,
            Self::Rgb565 | Self::Rgb565A8 | Self::Al88 => 16,
            Self::Rgb888 | Self::Argb8565 => 24,
            Self::Argb8888 | Self::Xrgb8888 => 32,
            Self::Unknown | Self::Raw | Self::RawAlpha | Self::Yuv(_) | Self::Proprietary(_) => 0,
        }
    }

    /// Bytes per pixel, rounded up for sub-byte formats.
    pub fn size_bytes(self) -> u32 {
        self.bits_per_pixel().div_ceil(8)
    }
}

/// Geometry of a destination pixel buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawBuf {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Bytes between the starts of two consecutive lines.
    pub stride: u32,
    /// Pixel format of the buffer.
    pub color_format: ColorFormat,
}

impl DrawBuf {
    /// Describe a tightly packed buffer (`stride = width * bytes_per_pixel`).
    pub fn packed(width: u32, height: u32, color_format: ColorFormat) -> Self {
        Self {
            width,
            height,
            stride: width.saturating_mul(color_format.size_bytes()),
            color_format,
        }
    }

    /// Total byte length covered by the buffer.
    pub fn byte_len(&self) -> usize {
        (self.stride as usize).saturating_mul(self.height as usize)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
