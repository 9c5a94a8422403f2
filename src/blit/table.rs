// src/blit/table.rs

//! The ordered dispatch table mapping (operation, destination format,
//! source format) to a routine.
//!
//! Lookup is a linear scan returning the first matching row, so the order of
//! [`BLIT_TABLE`] is significant: the same-format copy must stay ahead of the
//! converting copies.

use super::routines::{self, BlitRoutine};
use crate::image::color::ColorFormat;

/// Logical blit operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlitOp {
    /// Copy without blending; converts formats where a routine exists.
    Texture,
    /// Composite the source over the destination using per-pixel alpha.
    TextureAlphaBlend,
    /// Like `TextureAlphaBlend`, with the source first multiplied by a tint.
    TextureAlphaColorBlend,
    /// Opaque solid fill.
    Color,
    /// Solid fill blended by the color's alpha.
    ColorAlpha,
}

/// A format column of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMatch {
    /// Matches any format, including "no image".
    Any,
    /// Destination column only: matches when source and destination formats
    /// are equal.
    SameAsDest,
    Exact(ColorFormat),
}

#[derive(Debug, Clone, Copy)]
pub struct BlitEntry {
    pub op: BlitOp,
    pub dest: FormatMatch,
    pub source: FormatMatch,
    pub routine: BlitRoutine,
}

const fn entry(
    op: BlitOp,
    dest: FormatMatch,
    source: FormatMatch,
    routine: BlitRoutine,
) -> BlitEntry {
    BlitEntry {
        op,
        dest,
        source,
        routine,
    }
}

use BlitOp::*;
use ColorFormat::*;
use FormatMatch::{Any, Exact, SameAsDest};

pub static BLIT_TABLE: [BlitEntry; 15] = [
    entry(Texture, SameAsDest, SameAsDest, routines::texture_copy_x_to_x),
    entry(Texture, Exact(A1R5G5B5), Exact(A8R8G8B8), routines::texture_copy_32_to_16),
    entry(Texture, Exact(A1R5G5B5), Exact(R8G8B8), routines::texture_copy_24_to_16),
    entry(Texture, Exact(A8R8G8B8), Exact(A1R5G5B5), routines::texture_copy_16_to_32),
    entry(Texture, Exact(A8R8G8B8), Exact(R8G8B8), routines::texture_copy_24_to_32),
    entry(Texture, Exact(R8G8B8), Exact(A1R5G5B5), routines::texture_copy_16_to_24),
    entry(Texture, Exact(R8G8B8), Exact(A8R8G8B8), routines::texture_copy_32_to_24),
    entry(TextureAlphaBlend, Exact(A1R5G5B5), Exact(A1R5G5B5), routines::texture_blend_16_to_16),
    entry(TextureAlphaBlend, Exact(A8R8G8B8), Exact(A8R8G8B8), routines::texture_blend_32_to_32),
    entry(
        TextureAlphaColorBlend,
        Exact(A1R5G5B5),
        Exact(A1R5G5B5),
        routines::texture_blend_color_16_to_16,
    ),
    entry(
        TextureAlphaColorBlend,
        Exact(A8R8G8B8),
        Exact(A8R8G8B8),
        routines::texture_blend_color_32_to_32,
    ),
    entry(Color, Exact(A1R5G5B5), Any, routines::color_16_to_16),
    entry(Color, Exact(A8R8G8B8), Any, routines::color_32_to_32),
    entry(ColorAlpha, Exact(A1R5G5B5), Any, routines::color_alpha_16_to_16),
    entry(ColorAlpha, Exact(A8R8G8B8), Any, routines::color_alpha_32_to_32),
];

impl FormatMatch {
    fn accepts(self, format: Option<ColorFormat>) -> bool {
        match self {
            Any => true,
            Exact(f) => format == Some(f),
            SameAsDest => false,
        }
    }
}

impl BlitEntry {
    pub fn matches(
        &self,
        op: BlitOp,
        dest: Option<ColorFormat>,
        source: Option<ColorFormat>,
    ) -> bool {
        if self.op != op {
            return false;
        }
        if self.dest.accepts(dest) && self.source.accepts(source) {
            return true;
        }
        self.dest == SameAsDest && source == dest
    }
}

/// Returns the first routine whose row accepts the request, or `None`.
pub fn find_routine(
    op: BlitOp,
    dest: Option<ColorFormat>,
    source: Option<ColorFormat>,
) -> Option<BlitRoutine> {
    BLIT_TABLE
        .iter()
        .find(|e| e.matches(op, dest, source))
        .map(|e| e.routine)
}
