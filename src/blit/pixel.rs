// src/blit/pixel.rs

//! Integer pixel arithmetic shared by the blit routines and line renderer.
//!
//! All blending works on packed integers. Alpha used as a weight lives in
//! `[0, 256]` so that scaling is a multiply followed by a right shift; see
//! [`extract_alpha`]. The formulas are reproduced bit-for-bit, including
//! their wrapping subtraction, and must not be "simplified".

use byteorder::{ByteOrder, LittleEndian};

/// Top byte of `argb` as a weight in `[0, 256]`: values above 127 gain one.
#[inline]
pub const fn extract_alpha(argb: u32) -> u32 {
    (argb >> 24) + (argb >> 31)
}

/// Inverse of [`extract_alpha`], returning the value already shifted into
/// the top byte.
#[inline]
pub const fn pack_alpha(alpha: u32) -> u32 {
    (if alpha > 127 { alpha - 1 } else { alpha }) << 24
}

/// Scales all four channels of `source` by `value / 256`.
///
/// Red/blue and alpha/green are handled as two masked groups so each needs
/// only one multiply.
#[inline]
pub const fn pixel_lerp32(source: u32, value: u32) -> u32 {
    let mut rb = source & 0x00FF_00FF;
    let mut xg = (source & 0xFF00_FF00) >> 8;

    rb = rb.wrapping_mul(value);
    xg = xg.wrapping_mul(value);

    rb >>= 8;

    (rb & 0x00FF_00FF) | (xg & 0xFF00_FF00)
}

/// Blends the color channels of `c1` over `c2` with a weight in `[0, 256]`.
/// The result carries no alpha.
#[inline]
pub const fn pixel_blend32_with(c2: u32, c1: u32, alpha: u32) -> u32 {
    let src_rb = c1 & 0x00FF_00FF;
    let src_xg = c1 & 0x0000_FF00;

    let dst_rb = c2 & 0x00FF_00FF;
    let dst_xg = c2 & 0x0000_FF00;

    let mut rb = src_rb.wrapping_sub(dst_rb);
    let mut xg = src_xg.wrapping_sub(dst_xg);

    rb = rb.wrapping_mul(alpha);
    xg = xg.wrapping_mul(alpha);
    rb >>= 8;
    xg >>= 8;

    rb = rb.wrapping_add(dst_rb);
    xg = xg.wrapping_add(dst_xg);

    (rb & 0x00FF_00FF) | (xg & 0x0000_FF00)
}

/// "Over" compositing of `c1` onto `c2` using the alpha stored in `c1`.
///
/// Fully transparent sources leave `c2` untouched and fully opaque ones
/// replace it. The result keeps the alpha byte of `c1`.
#[inline]
pub const fn pixel_blend32(c2: u32, c1: u32) -> u32 {
    let alpha = c1 & 0xFF00_0000;
    if alpha == 0 {
        return c2;
    }
    if alpha == 0xFF00_0000 {
        return c1;
    }

    let mut alpha = alpha >> 24;
    alpha += alpha >> 7;

    alpha_byte(c1) | pixel_blend32_with(c2, c1, alpha)
}

#[inline]
const fn alpha_byte(c: u32) -> u32 {
    c & 0xFF00_0000
}

/// Blends the 5-bit color channels of A1R5G5B5 `c1` over `c2` with a weight
/// in `[0, 32]`. The alpha bit of the result is clear.
#[inline]
pub const fn pixel_blend16_with(c2: u16, c1: u16, alpha: u16) -> u16 {
    let src_rb = (c1 & 0x7C1F) as u32;
    let src_xg = (c1 & 0x03E0) as u32;

    let dst_rb = (c2 & 0x7C1F) as u32;
    let dst_xg = (c2 & 0x03E0) as u32;

    let mut rb = src_rb.wrapping_sub(dst_rb);
    let mut xg = src_xg.wrapping_sub(dst_xg);

    rb = rb.wrapping_mul(alpha as u32);
    xg = xg.wrapping_mul(alpha as u32);
    rb >>= 5;
    xg >>= 5;

    rb = rb.wrapping_add(dst_rb);
    xg = xg.wrapping_add(dst_xg);

    ((rb & 0x7C1F) | (xg & 0x03E0)) as u16
}

/// A1R5G5B5 compositing: the 1-bit alpha of `c1` selects `c1` or `c2`.
#[inline]
pub const fn pixel_blend16(c2: u16, c1: u16) -> u16 {
    let mask = ((c1 & 0x8000) >> 15).wrapping_add(0x7FFF);
    (c2 & mask) | (c1 & !mask)
}

/// [`pixel_blend16`] applied to two A1R5G5B5 pixels packed in one word.
#[inline]
pub const fn pixel_blend16_simd(c2: u32, c1: u32) -> u32 {
    let mask = ((c1 & 0x8000_8000) >> 15).wrapping_add(0x7FFF_7FFF);
    (c2 & mask) | (c1 & !mask)
}

/// Per-channel product of two A1R5G5B5 pixels, each channel scaled back to
/// five bits. Alpha is the AND of both alpha bits.
#[inline]
pub const fn pixel_mul16_2(c0: u16, c1: u16) -> u16 {
    let (c0, c1) = (c0 as u32, c1 as u32);
    ((((c0 & 0x7C00) * (c1 & 0x7C00)) & 0x3E00_0000) >> 15
        | (((c0 & 0x03E0) * (c1 & 0x03E0)) & 0x000F_8000) >> 10
        | (((c0 & 0x001F) * (c1 & 0x001F)) >> 5) & 0x001F
        | (c0 & c1 & 0x8000)) as u16
}

/// Per-channel product of two ARGB pixels, each channel divided by 256.
#[inline]
pub const fn pixel_mul32_2(c0: u32, c1: u32) -> u32 {
    (((c0 & 0xFF00_0000) >> 16) * ((c1 & 0xFF00_0000) >> 16)) & 0xFF00_0000
        | (((c0 & 0x00FF_0000) >> 12) * ((c1 & 0x00FF_0000) >> 12)) & 0x00FF_0000
        | (((c0 & 0x0000_FF00) * ((c1 & 0x0000_FF00) >> 8)) >> 8) & 0x0000_FF00
        | (((c0 & 0x0000_00FF) * (c1 & 0x0000_00FF)) >> 8) & 0x0000_00FF
}

// --- Raw little-endian access ---

#[inline]
pub fn load_u16(buf: &[u8], index: usize) -> u16 {
    LittleEndian::read_u16(&buf[index * 2..])
}

#[inline]
pub fn store_u16(buf: &mut [u8], index: usize, value: u16) {
    LittleEndian::write_u16(&mut buf[index * 2..], value)
}

#[inline]
pub fn load_u32(buf: &[u8], index: usize) -> u32 {
    LittleEndian::read_u32(&buf[index * 4..])
}

#[inline]
pub fn store_u32(buf: &mut [u8], index: usize, value: u32) {
    LittleEndian::write_u32(&mut buf[index * 4..], value)
}

/// Fills `dst` with repetitions of the little-endian 16-bit `value`.
/// A trailing odd byte is left untouched.
pub fn fill_u16(dst: &mut [u8], value: u16) {
    let bytes = value.to_le_bytes();
    for chunk in dst.chunks_exact_mut(2) {
        chunk.copy_from_slice(&bytes);
    }
}

/// Fills `dst` with repetitions of the little-endian 32-bit `value`.
pub fn fill_u32(dst: &mut [u8], value: u32) {
    let bytes = value.to_le_bytes();
    for chunk in dst.chunks_exact_mut(4) {
        chunk.copy_from_slice(&bytes);
    }
}
