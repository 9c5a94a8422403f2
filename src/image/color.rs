// src/image/color.rs

//! Color formats and packed color values.
//!
//! A [`Color`] is always a packed `0xAARRGGBB` value. The free functions in
//! this module convert between that representation and the packed 16-bit
//! encodings. Their bit layouts are relied upon by screenshot and texture
//! upload code, so the exact shifts and masks are part of the contract:
//! expanding A1R5G5B5 replicates the top bits of each channel, every other
//! narrowing or widening simply truncates or shifts.

use bytemuck::{Pod, Zeroable};

/// The closed set of pixel encodings understood by the blitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorFormat {
    /// 16 bit, 1 bit alpha and 5 bits per color channel.
    A1R5G5B5,
    /// 16 bit, no alpha, 5/6/5 bits.
    R5G6B5,
    /// 24 bit, stored as the bytes R, G, B.
    R8G8B8,
    /// 32 bit, 8 bits per channel including alpha.
    A8R8G8B8,
}

impl ColorFormat {
    pub const ALL: [ColorFormat; 4] = [
        ColorFormat::A1R5G5B5,
        ColorFormat::R5G6B5,
        ColorFormat::R8G8B8,
        ColorFormat::A8R8G8B8,
    ];

    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            ColorFormat::A1R5G5B5 | ColorFormat::R5G6B5 => 2,
            ColorFormat::R8G8B8 => 3,
            ColorFormat::A8R8G8B8 => 4,
        }
    }

    pub const fn bits_per_pixel(self) -> u32 {
        self.bytes_per_pixel() as u32 * 8
    }

    pub const fn has_alpha(self) -> bool {
        matches!(self, ColorFormat::A1R5G5B5 | ColorFormat::A8R8G8B8)
    }

    pub const fn red_mask(self) -> u32 {
        match self {
            ColorFormat::A1R5G5B5 => 0x1F << 10,
            ColorFormat::R5G6B5 => 0x1F << 11,
            ColorFormat::R8G8B8 | ColorFormat::A8R8G8B8 => 0x00FF_0000,
        }
    }

    pub const fn green_mask(self) -> u32 {
        match self {
            ColorFormat::A1R5G5B5 => 0x1F << 5,
            ColorFormat::R5G6B5 => 0x3F << 5,
            ColorFormat::R8G8B8 | ColorFormat::A8R8G8B8 => 0x0000_FF00,
        }
    }

    pub const fn blue_mask(self) -> u32 {
        match self {
            ColorFormat::A1R5G5B5 | ColorFormat::R5G6B5 => 0x1F,
            ColorFormat::R8G8B8 | ColorFormat::A8R8G8B8 => 0x0000_00FF,
        }
    }

    pub const fn alpha_mask(self) -> u32 {
        match self {
            ColorFormat::A1R5G5B5 => 0x1 << 15,
            ColorFormat::A8R8G8B8 => 0xFF00_0000,
            ColorFormat::R5G6B5 | ColorFormat::R8G8B8 => 0,
        }
    }
}

/// A color packed as `0xAARRGGBB`.
#[repr(transparent)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Color(pub u32);

impl Color {
    pub const TRANSPARENT_BLACK: Color = Color(0);
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const WHITE: Color = Color(0xFFFF_FFFF);

    pub const fn new(a: u32, r: u32, g: u32, b: u32) -> Self {
        Color(((a & 0xFF) << 24) | ((r & 0xFF) << 16) | ((g & 0xFF) << 8) | (b & 0xFF))
    }

    pub const fn argb(self) -> u32 {
        self.0
    }

    pub const fn alpha(self) -> u32 {
        self.0 >> 24
    }

    pub const fn red(self) -> u32 {
        (self.0 >> 16) & 0xFF
    }

    pub const fn green(self) -> u32 {
        (self.0 >> 8) & 0xFF
    }

    pub const fn blue(self) -> u32 {
        self.0 & 0xFF
    }

    pub fn set_alpha(&mut self, a: u32) {
        self.0 = ((a & 0xFF) << 24) | (self.0 & 0x00FF_FFFF);
    }

    pub fn set_red(&mut self, r: u32) {
        self.0 = ((r & 0xFF) << 16) | (self.0 & 0xFF00_FFFF);
    }

    pub fn set_green(&mut self, g: u32) {
        self.0 = ((g & 0xFF) << 8) | (self.0 & 0xFFFF_00FF);
    }

    pub fn set_blue(&mut self, b: u32) {
        self.0 = (b & 0xFF) | (self.0 & 0xFFFF_FF00);
    }

    /// Perceptual luminance in `[0, 255]`.
    pub fn luminance(self) -> f32 {
        0.3 * self.red() as f32 + 0.59 * self.green() as f32 + 0.11 * self.blue() as f32
    }

    /// Integer mean of the three color channels.
    pub fn average(self) -> u32 {
        (self.red() + self.green() + self.blue()) / 3
    }

    /// Linear interpolation towards `other`; `d = 1.0` yields `self`.
    pub fn interpolated(self, other: Color, d: f32) -> Color {
        let d = d.clamp(0.0, 1.0);
        let inv = 1.0 - d;
        let mix = |a: u32, b: u32| (b as f32 * inv + a as f32 * d) as u32;
        Color::new(
            mix(self.alpha(), other.alpha()),
            mix(self.red(), other.red()),
            mix(self.green(), other.green()),
            mix(self.blue(), other.blue()),
        )
    }

    pub fn to_a1r5g5b5(self) -> u16 {
        a8r8g8b8_to_a1r5g5b5(self.0)
    }

    pub fn from_a1r5g5b5(c: u16) -> Color {
        Color(a1r5g5b5_to_a8r8g8b8(c))
    }
}

impl From<u32> for Color {
    fn from(argb: u32) -> Self {
        Color(argb)
    }
}

impl From<Color> for u32 {
    fn from(c: Color) -> Self {
        c.0
    }
}

/// One 24-bit pixel as stored in an R8G8B8 buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgb24 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb24 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb24 { r, g, b }
    }

    /// Opaque `0xFFRRGGBB`.
    pub const fn to_argb(self) -> u32 {
        0xFF00_0000 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Drops alpha.
    pub const fn from_argb(argb: u32) -> Self {
        Rgb24 {
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }
}

// --- Packed conversions ---

/// Packs 8-bit channels into A1R5G5B5; the alpha bit is the top bit of `a`.
pub const fn rgba16(r: u32, g: u32, b: u32, a: u32) -> u16 {
    ((a & 0x80) << 8 | (r & 0xF8) << 7 | (g & 0xF8) << 2 | (b & 0xF8) >> 3) as u16
}

pub const fn x8r8g8b8_to_a1r5g5b5(c: u32) -> u16 {
    (0x8000 | (c & 0x00F8_0000) >> 9 | (c & 0x0000_F800) >> 6 | (c & 0x0000_00F8) >> 3) as u16
}

pub const fn a8r8g8b8_to_a1r5g5b5(c: u32) -> u16 {
    ((c & 0x8000_0000) >> 16
        | (c & 0x00F8_0000) >> 9
        | (c & 0x0000_F800) >> 6
        | (c & 0x0000_00F8) >> 3) as u16
}

pub const fn a8r8g8b8_to_r5g6b5(c: u32) -> u16 {
    ((c & 0x00F8_0000) >> 8 | (c & 0x0000_FC00) >> 5 | (c & 0x0000_00F8) >> 3) as u16
}

/// Expands A1R5G5B5, replicating the top bits of each 5-bit channel into the
/// low bits of the 8-bit result so that 0x1F maps to 0xFF.
pub const fn a1r5g5b5_to_a8r8g8b8(c: u16) -> u32 {
    let c = c as u32;
    let alpha = if c & 0x8000 != 0 { 0xFF00_0000 } else { 0 };
    alpha
        | (c & 0x7C00) << 9
        | (c & 0x7000) << 4
        | (c & 0x03E0) << 6
        | (c & 0x0380) << 1
        | (c & 0x001F) << 3
        | (c & 0x001C) >> 2
}

/// Expands R5G6B5 by shifting only; low bits stay zero.
pub const fn r5g6b5_to_a8r8g8b8(c: u16) -> u32 {
    let c = c as u32;
    0xFF00_0000 | (c & 0xF800) << 8 | (c & 0x07E0) << 5 | (c & 0x001F) << 3
}

pub const fn r5g6b5_to_a1r5g5b5(c: u16) -> u16 {
    0x8000 | ((c & 0xFFC0) >> 1) | (c & 0x1F)
}

pub const fn a1r5g5b5_to_r5g6b5(c: u16) -> u16 {
    ((c & 0x7FE0) << 1) | (c & 0x1F)
}
