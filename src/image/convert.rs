// src/image/convert.rs

//! Run-length format conversion between raw pixel slices.
//!
//! Used by the scaling copies, which convert one pixel at a time, and by
//! callers that need to re-encode a span of pixels without building an
//! [`Image`](crate::image::buffer::Image).

use crate::blit::pixel::{load_u16, load_u32, store_u16, store_u32};
use crate::image::color::{
    a1r5g5b5_to_a8r8g8b8, a1r5g5b5_to_r5g6b5, a8r8g8b8_to_a1r5g5b5, a8r8g8b8_to_r5g6b5,
    r5g6b5_to_a1r5g5b5, r5g6b5_to_a8r8g8b8, ColorFormat, Rgb24,
};

/// Converts up to `count` pixels from `src` (in `src_format`) into `dst`
/// (in `dst_format`).
///
/// The count is silently reduced to what both slices can hold. Returns the
/// number of pixels written.
pub fn convert_via_format(
    src: &[u8],
    src_format: ColorFormat,
    count: usize,
    dst: &mut [u8],
    dst_format: ColorFormat,
) -> usize {
    let sbpp = src_format.bytes_per_pixel();
    let dbpp = dst_format.bytes_per_pixel();
    let count = count.min(src.len() / sbpp).min(dst.len() / dbpp);

    if src_format == dst_format {
        let n = count * sbpp;
        dst[..n].copy_from_slice(&src[..n]);
        return count;
    }

    for (s, d) in src
        .chunks_exact(sbpp)
        .zip(dst.chunks_exact_mut(dbpp))
        .take(count)
    {
        convert_pixel(s, src_format, d, dst_format);
    }
    count
}

/// Converts a single pixel. Both slices must hold exactly one pixel of
/// their format.
fn convert_pixel(s: &[u8], sf: ColorFormat, d: &mut [u8], df: ColorFormat) {
    use ColorFormat::*;

    match (sf, df) {
        (A1R5G5B5, R5G6B5) => store_u16(d, 0, a1r5g5b5_to_r5g6b5(load_u16(s, 0))),
        (A1R5G5B5, A8R8G8B8) => store_u32(d, 0, a1r5g5b5_to_a8r8g8b8(load_u16(s, 0))),
        (A1R5G5B5, R8G8B8) => {
            let c = load_u16(s, 0);
            d[0] = ((c & 0x7C00) >> 7) as u8;
            d[1] = ((c & 0x03E0) >> 2) as u8;
            d[2] = ((c & 0x001F) << 3) as u8;
        }
        (R5G6B5, A1R5G5B5) => store_u16(d, 0, r5g6b5_to_a1r5g5b5(load_u16(s, 0))),
        (R5G6B5, A8R8G8B8) => store_u32(d, 0, r5g6b5_to_a8r8g8b8(load_u16(s, 0))),
        (R5G6B5, R8G8B8) => {
            let c = load_u16(s, 0);
            d[0] = ((c & 0xF800) >> 8) as u8;
            d[1] = ((c & 0x07E0) >> 3) as u8;
            d[2] = ((c & 0x001F) << 3) as u8;
        }
        (R8G8B8, A1R5G5B5) => {
            let (r, g, b) = (s[0] as u16 >> 3, s[1] as u16 >> 3, s[2] as u16 >> 3);
            store_u16(d, 0, 0x8000 | r << 10 | g << 5 | b);
        }
        (R8G8B8, R5G6B5) => {
            let (r, g, b) = (s[0] as u16 >> 3, s[1] as u16 >> 2, s[2] as u16 >> 3);
            store_u16(d, 0, r << 11 | g << 5 | b);
        }
        (R8G8B8, A8R8G8B8) => store_u32(d, 0, Rgb24::new(s[0], s[1], s[2]).to_argb()),
        (A8R8G8B8, A1R5G5B5) => store_u16(d, 0, a8r8g8b8_to_a1r5g5b5(load_u32(s, 0))),
        (A8R8G8B8, R5G6B5) => store_u16(d, 0, a8r8g8b8_to_r5g6b5(load_u32(s, 0))),
        (A8R8G8B8, R8G8B8) => {
            let p = Rgb24::from_argb(load_u32(s, 0));
            d.copy_from_slice(bytemuck::bytes_of(&p));
        }
        _ => d.copy_from_slice(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert_one(src: &[u8], sf: ColorFormat, df: ColorFormat) -> Vec<u8> {
        let mut out = vec![0u8; df.bytes_per_pixel()];
        assert_eq!(convert_via_format(src, sf, 1, &mut out, df), 1);
        out
    }

    #[test]
    fn test_rgb24_through_16bit_rounds_down() {
        let src = [0xABu8, 0x57, 0x0F];
        let packed = convert_one(&src, ColorFormat::R8G8B8, ColorFormat::A1R5G5B5);
        let back = convert_one(&packed, ColorFormat::A1R5G5B5, ColorFormat::R8G8B8);
        assert_eq!(back, vec![0xA8, 0x50, 0x08]);

        let packed = convert_one(&src, ColorFormat::R8G8B8, ColorFormat::R5G6B5);
        let back = convert_one(&packed, ColorFormat::R5G6B5, ColorFormat::R8G8B8);
        assert_eq!(back, vec![0xA8, 0x54, 0x08]);
    }

    #[test]
    fn test_argb_to_rgb24_byte_order() {
        let src = 0x80C0_FFEEu32.to_le_bytes();
        let out = convert_one(&src, ColorFormat::A8R8G8B8, ColorFormat::R8G8B8);
        assert_eq!(out, vec![0xC0, 0xFF, 0xEE]);
    }

    #[test]
    fn test_same_format_is_copy() {
        let src = [1u8, 2, 3, 4, 5, 6];
        let mut dst = [0u8; 6];
        assert_eq!(
            convert_via_format(&src, ColorFormat::R8G8B8, 2, &mut dst, ColorFormat::R8G8B8),
            2
        );
        assert_eq!(dst, src);
    }

    #[test]
    fn test_count_clamped_to_slices() {
        let src = [0xFFu8; 8];
        let mut dst = [0u8; 4];
        let n = convert_via_format(
            &src,
            ColorFormat::A8R8G8B8,
            10,
            &mut dst,
            ColorFormat::A1R5G5B5,
        );
        assert_eq!(n, 2);
        assert_eq!(dst, [0xFF, 0xFF, 0xFF, 0xFF]);
    }
}
