// src/blit/routines.rs

//! Specialized pixel pushers, one per (operation, destination, source)
//! combination listed in the dispatch table.
//!
//! Every routine walks the job row by row through
//! [`BlitJob::for_each_row`], so none of them index outside the rows it was
//! handed.

use super::job::BlitJob;
use super::pixel::{
    extract_alpha, fill_u16, fill_u32, load_u16, load_u32, pixel_blend16, pixel_blend16_simd,
    pixel_blend16_with, pixel_blend32, pixel_blend32_with, pixel_lerp32, pixel_mul16_2,
    pixel_mul32_2, store_u16, store_u32,
};
use crate::image::color::{a1r5g5b5_to_a8r8g8b8, a8r8g8b8_to_a1r5g5b5, rgba16, Rgb24};

/// Signature shared by all routines.
pub type BlitRoutine = fn(&mut BlitJob<'_>);

// --- Texture copies ---

/// Same format on both sides: plain row copy.
pub fn texture_copy_x_to_x(job: &mut BlitJob<'_>) {
    job.for_each_row(|src, dst| dst.copy_from_slice(src));
}

/// The 16-bit target has a single alpha bit, so color is premultiplied by
/// the source alpha first.
pub fn texture_copy_32_to_16(job: &mut BlitJob<'_>) {
    job.for_each_row(|src, dst| {
        for x in 0..dst.len() / 2 {
            let s = load_u32(src, x);
            let s = pixel_lerp32(s | 0xFF00_0000, extract_alpha(s));
            store_u16(dst, x, a8r8g8b8_to_a1r5g5b5(s));
        }
    });
}

pub fn texture_copy_24_to_16(job: &mut BlitJob<'_>) {
    job.for_each_row(|src, dst| {
        let src: &[Rgb24] = bytemuck::cast_slice(src);
        for (x, p) in src.iter().enumerate() {
            store_u16(dst, x, rgba16(p.r as u32, p.g as u32, p.b as u32, 0xFF));
        }
    });
}

pub fn texture_copy_16_to_32(job: &mut BlitJob<'_>) {
    job.for_each_row(|src, dst| {
        for x in 0..src.len() / 2 {
            store_u32(dst, x, a1r5g5b5_to_a8r8g8b8(load_u16(src, x)));
        }
    });
}

pub fn texture_copy_24_to_32(job: &mut BlitJob<'_>) {
    job.for_each_row(|src, dst| {
        let src: &[Rgb24] = bytemuck::cast_slice(src);
        for (x, p) in src.iter().enumerate() {
            store_u32(dst, x, p.to_argb());
        }
    });
}

pub fn texture_copy_16_to_24(job: &mut BlitJob<'_>) {
    job.for_each_row(|src, dst| {
        let dst: &mut [Rgb24] = bytemuck::cast_slice_mut(dst);
        for (x, d) in dst.iter_mut().enumerate() {
            *d = Rgb24::from_argb(a1r5g5b5_to_a8r8g8b8(load_u16(src, x)));
        }
    });
}

pub fn texture_copy_32_to_24(job: &mut BlitJob<'_>) {
    job.for_each_row(|src, dst| {
        let dst: &mut [Rgb24] = bytemuck::cast_slice_mut(dst);
        for (x, d) in dst.iter_mut().enumerate() {
            *d = Rgb24::from_argb(load_u32(src, x));
        }
    });
}

// --- Alpha-blended textures ---

/// Pairs of pixels are blended as one 32-bit word; an odd trailing pixel is
/// blended on its own.
pub fn texture_blend_16_to_16(job: &mut BlitJob<'_>) {
    let width = job.width as usize;
    let pairs = width / 2;

    job.for_each_row(|src, dst| {
        for x in 0..pairs {
            let out = pixel_blend16_simd(load_u32(dst, x), load_u32(src, x));
            store_u32(dst, x, out);
        }
        if width % 2 == 1 {
            let last = width - 1;
            let out = pixel_blend16(load_u16(dst, last), load_u16(src, last));
            store_u16(dst, last, out);
        }
    });
}

pub fn texture_blend_32_to_32(job: &mut BlitJob<'_>) {
    job.for_each_row(|src, dst| {
        for x in 0..src.len() / 4 {
            store_u32(dst, x, pixel_blend32(load_u32(dst, x), load_u32(src, x)));
        }
    });
}

/// Opaque source pixels are tinted and written; transparent ones are skipped.
pub fn texture_blend_color_16_to_16(job: &mut BlitJob<'_>) {
    let blend = a8r8g8b8_to_a1r5g5b5(job.argb);

    job.for_each_row(|src, dst| {
        for x in 0..src.len() / 2 {
            let s = load_u16(src, x);
            if s & 0x8000 == 0 {
                continue;
            }
            store_u16(dst, x, pixel_mul16_2(s, blend));
        }
    });
}

pub fn texture_blend_color_32_to_32(job: &mut BlitJob<'_>) {
    let tint = job.argb;

    job.for_each_row(|src, dst| {
        for x in 0..src.len() / 4 {
            let s = pixel_mul32_2(load_u32(src, x), tint);
            store_u32(dst, x, pixel_blend32(load_u32(dst, x), s));
        }
    });
}

// --- Solid fills ---

pub fn color_16_to_16(job: &mut BlitJob<'_>) {
    let c = a8r8g8b8_to_a1r5g5b5(job.argb);
    let span = job.fill_span;

    job.for_each_row(|_, dst| {
        let n = span.min(dst.len());
        fill_u16(&mut dst[..n], c);
    });
}

pub fn color_32_to_32(job: &mut BlitJob<'_>) {
    let c = job.argb;
    let span = job.fill_span;

    job.for_each_row(|_, dst| {
        let n = span.min(dst.len());
        fill_u32(&mut dst[..n], c);
    });
}

/// Nothing is written when the color is fully transparent.
pub fn color_alpha_16_to_16(job: &mut BlitJob<'_>) {
    let alpha = (extract_alpha(job.argb) >> 3) as u16;
    if alpha == 0 {
        return;
    }
    let src = a8r8g8b8_to_a1r5g5b5(job.argb);

    job.for_each_row(|_, dst| {
        for x in 0..dst.len() / 2 {
            let out = 0x8000 | pixel_blend16_with(load_u16(dst, x), src, alpha);
            store_u16(dst, x, out);
        }
    });
}

pub fn color_alpha_32_to_32(job: &mut BlitJob<'_>) {
    let argb = job.argb;
    let alpha = extract_alpha(argb);

    job.for_each_row(|_, dst| {
        for x in 0..dst.len() / 4 {
            let out = (argb & 0xFF00_0000) | pixel_blend32_with(load_u32(dst, x), argb, alpha);
            store_u32(dst, x, out);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blit::clip::AbsRect;

    fn job<'a>(
        src: &'a [u8],
        dst: &'a mut [u8],
        width: u32,
        height: u32,
        sbpp: usize,
        dbpp: usize,
    ) -> BlitJob<'a> {
        BlitJob {
            src,
            dst,
            width,
            height,
            src_pitch: width as usize * sbpp,
            dst_pitch: width as usize * dbpp,
            src_bytes_per_pixel: sbpp,
            dst_bytes_per_pixel: dbpp,
            fill_span: width as usize * dbpp,
            argb: 0,
            source_rect: AbsRect::new(0, 0, width as i32, height as i32),
            dest_rect: AbsRect::new(0, 0, width as i32, height as i32),
        }
    }

    #[test]
    fn test_copy_32_to_16_premultiplies() {
        let src: Vec<u8> = [0xFFFF_0000u32, 0x00FF_FFFF, 0x80FF_FFFF]
            .iter()
            .flat_map(|c| c.to_le_bytes())
            .collect();
        let mut dst = vec![0u8; 6];
        texture_copy_32_to_16(&mut job(&src, &mut dst, 3, 1, 4, 2));
        assert_eq!(load_u16(&dst, 0), 0xFC00);
        // transparent pixels collapse to black, alpha bit cleared
        assert_eq!(load_u16(&dst, 1), 0x0000);
        // weight 129 halves the color; alpha bit survives
        assert_eq!(load_u16(&dst, 2), 0x8000 | (16 << 10) | (16 << 5) | 16);
    }

    #[test]
    fn test_texture_blend_16_odd_width_tail() {
        let src: Vec<u8> = [0xFC00u16, 0x7C00, 0x83E0]
            .iter()
            .flat_map(|c| c.to_le_bytes())
            .collect();
        let mut dst: Vec<u8> = [0x801Fu16; 3].iter().flat_map(|c| c.to_le_bytes()).collect();
        texture_blend_16_to_16(&mut job(&src, &mut dst, 3, 1, 2, 2));
        assert_eq!(load_u16(&dst, 0), 0xFC00);
        assert_eq!(load_u16(&dst, 1), 0x001F);
        assert_eq!(load_u16(&dst, 2), 0x83E0);
    }

    #[test]
    fn test_texture_blend_16_single_pixel() {
        let src = 0xFC00u16.to_le_bytes();
        let mut dst = 0x001Fu16.to_le_bytes();
        texture_blend_16_to_16(&mut job(&src, &mut dst, 1, 1, 2, 2));
        assert_eq!(u16::from_le_bytes(dst), 0x7C00);
    }

    #[test]
    fn test_blend_color_16_tints_opaque_and_skips_transparent() {
        let src: Vec<u8> = [0xFFFFu16, 0x7FFF, 0x83E0]
            .iter()
            .flat_map(|c| c.to_le_bytes())
            .collect();
        let mut dst: Vec<u8> = [0x1234u16; 3].iter().flat_map(|c| c.to_le_bytes()).collect();

        let mut j = job(&src, &mut dst, 3, 1, 2, 2);
        j.argb = 0xFFFF_FFFF;
        texture_blend_color_16_to_16(&mut j);
        assert_eq!(load_u16(&dst, 0), 0xFBDE);
        assert_eq!(load_u16(&dst, 1), 0x1234);
        assert_eq!(load_u16(&dst, 2), 0x8000 | (30 << 5));

        let mut j = job(&src, &mut dst, 1, 1, 2, 2);
        j.argb = 0xFFFF_0000;
        texture_blend_color_16_to_16(&mut j);
        assert_eq!(load_u16(&dst, 0), 0xF800);
    }

    #[test]
    fn test_color_fill_respects_pitch_padding() {
        let mut dst = vec![0xAAu8; 2 * 12];
        let mut j = job(&[], &mut dst, 2, 2, 0, 4);
        j.dst_pitch = 12;
        j.argb = 0x1122_3344;
        color_32_to_32(&mut j);
        assert_eq!(load_u32(&dst, 0), 0x1122_3344);
        assert_eq!(load_u32(&dst, 1), 0x1122_3344);
        assert_eq!(load_u32(&dst, 2), 0xAAAA_AAAA);
        assert_eq!(load_u32(&dst, 3), 0x1122_3344);
    }

    #[test]
    fn test_color_alpha_zero_is_noop() {
        let mut dst = vec![0x55u8; 8];
        let mut j = job(&[], &mut dst, 4, 1, 0, 2);
        j.argb = 0x00FF_FFFF;
        color_alpha_16_to_16(&mut j);
        assert!(dst.iter().all(|&b| b == 0x55));
    }

    #[test]
    fn test_blend_color_32_tints_source() {
        let src = 0xFFFF_FFFFu32.to_le_bytes();
        let mut dst = 0xFF00_0000u32.to_le_bytes();
        let mut j = job(&src, &mut dst, 1, 1, 4, 4);
        j.argb = 0xFFFF_0000;
        texture_blend_color_32_to_32(&mut j);
        // tinted source alpha is 0xFE, so it blends rather than replaces
        assert_eq!(u32::from_le_bytes(dst), 0xFEFD_0000);
    }
}
