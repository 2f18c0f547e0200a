//! Color types and sRGB <-> linear conversion.
//!
//! Blending always happens on [`LinearColor`]. Properties that store an 8-bit
//! gamma-encoded [`Color`] are decoded on capture and re-encoded on write.

use glam::Vec4;

/// 8-bit sRGB color with linear alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Linear-space RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl LinearColor {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Decodes an sRGB color. Alpha is stored linearly and only rescaled.
    #[must_use]
    pub fn from_srgb_color(color: Color) -> Self {
        Self::new(
            srgb_to_linear(f32::from(color.r) / 255.0),
            srgb_to_linear(f32::from(color.g) / 255.0),
            srgb_to_linear(f32::from(color.b) / 255.0),
            f32::from(color.a) / 255.0,
        )
    }

    /// Encodes into 8-bit sRGB, clamping out-of-gamut channels.
    #[must_use]
    pub fn to_srgb_color(self) -> Color {
        Color::new(
            quantize(linear_to_srgb(self.r)),
            quantize(linear_to_srgb(self.g)),
            quantize(linear_to_srgb(self.b)),
            quantize(self.a),
        )
    }

    /// Per-channel linear interpolation.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Vec4::from(self).lerp(Vec4::from(other), t).into()
    }
}

impl From<Vec4> for LinearColor {
    #[inline]
    fn from(v: Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<LinearColor> for Vec4 {
    #[inline]
    fn from(c: LinearColor) -> Self {
        Vec4::new(c.r, c.g, c.b, c.a)
    }
}

impl From<[f32; 4]> for LinearColor {
    #[inline]
    fn from(arr: [f32; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }
}

/// Native storage format of a color property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorFormat {
    /// 8-bit gamma-encoded RGBA
    Srgb8,
    /// Floating point linear RGBA
    Linear,
}

/// A color value in the representation its property declares.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorValue {
    Srgb(Color),
    Linear(LinearColor),
}

impl ColorValue {
    #[must_use]
    pub fn format(self) -> ColorFormat {
        match self {
            Self::Srgb(_) => ColorFormat::Srgb8,
            Self::Linear(_) => ColorFormat::Linear,
        }
    }

    #[must_use]
    pub fn to_linear(self) -> LinearColor {
        match self {
            Self::Srgb(c) => LinearColor::from_srgb_color(c),
            Self::Linear(c) => c,
        }
    }

    /// Converts a linear color into the given native representation.
    #[must_use]
    pub fn from_linear(color: LinearColor, format: ColorFormat) -> Self {
        match format {
            ColorFormat::Srgb8 => Self::Srgb(color.to_srgb_color()),
            ColorFormat::Linear => Self::Linear(color),
        }
    }
}

#[inline]
fn srgb_to_linear(x: f32) -> f32 {
    if x <= 0.04045 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn linear_to_srgb(x: f32) -> f32 {
    if x <= 0.003_130_8 {
        x * 12.92
    } else {
        1.055 * x.powf(1.0 / 2.4) - 0.055
    }
}

#[inline]
fn quantize(x: f32) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}
