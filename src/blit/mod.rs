//! Rectangle blitting between images.
//!
//! [`blit`] is the single entry point: it looks up a routine for the
//! requested operation and format pair, clips the transfer against both
//! images and the optional clip rectangles, and runs the routine over the
//! surviving rectangle. Every failure is a silent no-op reported as `false`.

pub mod clip;
pub mod job;
pub mod line;
pub mod pixel;
pub mod routines;
pub mod table;

use crate::image::buffer::Image;
use crate::image::geom::{Point, Rect};
use clip::{intersect, set_clip, AbsRect};
use job::BlitJob;
use log::trace;

pub use line::draw_line;
pub use table::{find_routine, BlitOp};

/// The clipped rectangles of one transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlitPlan {
    /// Area read from the source image (or the pass-through fill rect).
    pub source: AbsRect,
    /// Area written in the destination image.
    pub dest: AbsRect,
}

impl BlitPlan {
    pub fn width(&self) -> u32 {
        self.dest.width() as u32
    }

    pub fn height(&self) -> u32 {
        self.dest.height() as u32
    }
}

/// Computes where a blit lands without touching any pixels.
///
/// `source_size` is `None` for fills; the source clip is then taken verbatim
/// as the area to fill. Returns `None` when nothing would be written.
pub fn plan_blit(
    dest_size: (u32, u32),
    dest_clip: Option<&Rect>,
    dest_pos: Option<Point>,
    source_size: Option<(u32, u32)>,
    source_clip: Option<&Rect>,
) -> Option<BlitPlan> {
    let source_clip = set_clip(source_clip, source_size, true);
    let dest_clip = set_clip(dest_clip, Some(dest_size), false);

    let pos = dest_pos.unwrap_or_default();
    let placed = AbsRect {
        x0: pos.x,
        y0: pos.y,
        x1: pos.x.saturating_add(source_clip.width()),
        y1: pos.y.saturating_add(source_clip.height()),
    };

    let dest = intersect(&dest_clip, &placed)?;

    // Shift the source by however much clipping trimmed the placement.
    let x0 = source_clip.x0 + (dest.x0 - placed.x0);
    let y0 = source_clip.y0 + (dest.y0 - placed.y0);
    let source = AbsRect {
        x0,
        y0,
        x1: x0 + dest.width(),
        y1: y0 + dest.height(),
    };

    Some(BlitPlan { source, dest })
}

/// Transfers a rectangle of pixels into `dest`.
///
/// * `dest_clip` limits the written area (clamped to the image).
/// * `dest_pos` is where the source rectangle's top-left lands; defaults to
///   the origin.
/// * `source_clip` selects the source rectangle. Without a source image it is
///   the fill area itself.
/// * `argb` is the fill or tint color.
///
/// Returns `true` if a routine ran.
pub fn blit(
    op: BlitOp,
    dest: &mut Image<'_>,
    dest_clip: Option<&Rect>,
    dest_pos: Option<Point>,
    source: Option<&Image<'_>>,
    source_clip: Option<&Rect>,
    argb: u32,
) -> bool {
    let Some(routine) = find_routine(op, Some(dest.format()), source.map(Image::format)) else {
        trace!(
            "no blit routine for {:?} {:?} <- {:?}",
            op,
            dest.format(),
            source.map(Image::format)
        );
        return false;
    };

    let Some(plan) = plan_blit(
        dest.dimensions(),
        dest_clip,
        dest_pos,
        source.map(Image::dimensions),
        source_clip,
    ) else {
        trace!("blit {:?} clipped away", op);
        return false;
    };

    let width = plan.width();
    let height = plan.height();
    let dst_bpp = dest.bytes_per_pixel();
    let dst_pitch = dest.pitch();

    let (src, src_pitch, src_bpp) = match source {
        Some(s) => {
            let offset = row_offset(&plan.source, s.pitch(), s.bytes_per_pixel());
            match s.as_raw().get(offset..) {
                Some(bytes) => (bytes, s.pitch(), s.bytes_per_pixel()),
                None => return false,
            }
        }
        None => (&[][..], 0, 0),
    };

    let dst_offset = row_offset(&plan.dest, dst_pitch, dst_bpp);
    let Some(dst) = dest.as_raw_mut().get_mut(dst_offset..) else {
        return false;
    };

    let mut job = BlitJob {
        src,
        dst,
        width,
        height,
        src_pitch,
        dst_pitch,
        src_bytes_per_pixel: src_bpp,
        dst_bytes_per_pixel: dst_bpp,
        fill_span: width as usize * dst_bpp,
        argb,
        source_rect: plan.source,
        dest_rect: plan.dest,
    };

    trace!(
        "blit {:?} {} pixels {:?} -> {:?}",
        op,
        job.pixel_count(),
        job.source_rect,
        job.dest_rect
    );
    routine(&mut job);
    true
}

fn row_offset(r: &AbsRect, pitch: usize, bpp: usize) -> usize {
    r.y0 as usize * pitch + r.x0 as usize * bpp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::color::{Color, ColorFormat};

    #[test]
    fn test_plan_shifts_source_with_clipped_dest() {
        let plan = plan_blit((10, 10), None, Some(Point::new(-3, -2)), Some((8, 8)), None).unwrap();
        assert_eq!(plan.dest, AbsRect::new(0, 0, 5, 6));
        assert_eq!(plan.source, AbsRect::new(3, 2, 8, 8));
    }

    #[test]
    fn test_plan_respects_dest_clip() {
        let clip = Rect::new(2, 2, 3, 3);
        let plan = plan_blit(
            (10, 10),
            Some(&clip),
            Some(Point::new(0, 0)),
            Some((8, 8)),
            None,
        )
        .unwrap();
        assert_eq!(plan.dest, AbsRect::new(2, 2, 5, 5));
        assert_eq!(plan.source, AbsRect::new(2, 2, 5, 5));
    }

    #[test]
    fn test_plan_fill_uses_native_rect() {
        let r = Rect::new(-2, 1, 4, 2);
        let plan = plan_blit((4, 4), None, Some(r.origin()), None, Some(&r)).unwrap();
        assert_eq!(plan.dest, AbsRect::new(0, 1, 2, 3));
    }

    #[test]
    fn test_plan_empty() {
        assert!(plan_blit((4, 4), None, Some(Point::new(4, 0)), Some((2, 2)), None).is_none());
        assert!(plan_blit((4, 4), None, None, None, None).is_none());
    }

    #[test]
    fn test_blit_sub_rect_copy() {
        let mut src = Image::new(ColorFormat::A8R8G8B8, 4, 4);
        for y in 0..4 {
            for x in 0..4 {
                src.set_pixel(x, y, Color(0xFF00_0000 | (y << 8) | x), false);
            }
        }
        let mut dst = Image::new(ColorFormat::A8R8G8B8, 3, 3);
        let sub = Rect::new(1, 2, 2, 2);
        assert!(blit(
            BlitOp::Texture,
            &mut dst,
            None,
            Some(Point::new(1, 0)),
            Some(&src),
            Some(&sub),
            0
        ));
        assert_eq!(dst.get_pixel(0, 0), Color(0));
        assert_eq!(dst.get_pixel(1, 0), Color(0xFF00_0201));
        assert_eq!(dst.get_pixel(2, 1), Color(0xFF00_0302));
        assert_eq!(dst.get_pixel(1, 2), Color(0));
    }

    #[test]
    fn test_blit_fill_without_rect_is_noop() {
        let mut dst = Image::new(ColorFormat::A8R8G8B8, 2, 2);
        assert!(!blit(BlitOp::Color, &mut dst, None, None, None, None, 0xFFFF_FFFF));
        assert!(dst.as_raw().iter().all(|&b| b == 0));
    }
}
