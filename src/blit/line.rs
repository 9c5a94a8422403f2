// src/blit/line.rs

//! Clipped Bresenham line rendering into 16 and 32-bit images.

use super::clip::{clip_line, AbsRect};
use super::pixel::{
    extract_alpha, load_u16, load_u32, pixel_blend16_with, pixel_blend32_with, store_u16,
    store_u32,
};
use crate::image::buffer::Image;
use crate::image::color::{a8r8g8b8_to_a1r5g5b5, ColorFormat};
use crate::image::geom::Point;
use log::trace;

/// Draws a line from `p0` to `p1` inclusive.
///
/// The segment is clipped to the image first. Opaque colors overwrite, other
/// colors are blended. Only A1R5G5B5 and A8R8G8B8 images are drawn into; the
/// call returns `false` for other formats and for segments that miss the
/// image entirely.
pub fn draw_line(image: &mut Image<'_>, p0: Point, p1: Point, argb: u32) -> bool {
    let (w, h) = (image.width(), image.height());
    if w == 0 || h == 0 {
        return false;
    }
    let clip = AbsRect::new(0, 0, w as i32 - 1, h as i32 - 1);

    let Some((a, b)) = clip_line(&clip, p0, p1) else {
        trace!("line {:?}-{:?} outside {}x{} image", p0, p1, w, h);
        return false;
    };

    let alpha = extract_alpha(argb);
    let format = image.format();
    let pitch = image.pitch() as isize;
    let data = image.as_raw_mut();

    match format {
        ColorFormat::A1R5G5B5 => {
            let color = a8r8g8b8_to_a1r5g5b5(argb);
            if alpha == 256 {
                render_line(data, pitch, 2, a, b, |px| store_u16(px, 0, color));
            } else {
                let alpha = (alpha >> 3) as u16;
                render_line(data, pitch, 2, a, b, |px| {
                    let out = 0x8000 | pixel_blend16_with(load_u16(px, 0), color, alpha);
                    store_u16(px, 0, out);
                });
            }
            true
        }
        ColorFormat::A8R8G8B8 => {
            if alpha == 256 {
                render_line(data, pitch, 4, a, b, |px| store_u32(px, 0, argb));
            } else {
                render_line(data, pitch, 4, a, b, |px| {
                    let out =
                        (argb & 0xFF00_0000) | pixel_blend32_with(load_u32(px, 0), argb, alpha);
                    store_u32(px, 0, out);
                });
            }
            true
        }
        _ => {
            trace!("line drawing not supported for {:?}", format);
            false
        }
    }
}

/// Walks `dx + 1` pixels along the major axis, stepping the byte offset by
/// the x and y increments. `plot` receives the slice starting at each pixel.
fn render_line<F>(data: &mut [u8], pitch: isize, bpp: isize, p0: Point, p1: Point, mut plot: F)
where
    F: FnMut(&mut [u8]),
{
    let mut dx = (p1.x - p0.x) as isize;
    let mut dy = (p1.y - p0.y) as isize;

    let mut x_inc = bpp;
    let mut y_inc = pitch;

    if dx < 0 {
        x_inc = -x_inc;
        dx = -dx;
    }
    if dy < 0 {
        y_inc = -y_inc;
        dy = -dy;
    }

    if dy > dx {
        std::mem::swap(&mut dx, &mut dy);
        std::mem::swap(&mut x_inc, &mut y_inc);
    }

    let c = dx << 1;
    let m = dy << 1;
    let mut d = 0;

    let mut offset = p0.y as isize * pitch + p0.x as isize * bpp;
    for _ in 0..=dx {
        let px = usize::try_from(offset)
            .ok()
            .and_then(|o| data.get_mut(o..o + bpp as usize));
        match px {
            Some(px) => plot(px),
            None => {
                debug_assert!(false, "line pixel at offset {offset} out of range");
                return;
            }
        }

        offset += x_inc;
        d += m;
        if d > dx {
            offset += y_inc;
            d -= c;
        }
    }
}
