// src/blit/clip.rs

//! Rectangle clamping, intersection and Cohen–Sutherland line clipping.

use crate::image::geom::{Point, Rect};

/// Corner-form rectangle `[x0, x1) x [y0, y1)` in buffer coordinates.
///
/// Produced by [`set_clip`] (which never inverts the corners) and consumed by
/// the blitter. A rectangle with `x0 >= x1` or `y0 >= y1` covers nothing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AbsRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl AbsRect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        AbsRect { x0, y0, x1, y1 }
    }

    /// Saturates at `i32::MAX` for rectangles wider than `i32` can span.
    pub fn width(&self) -> i32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> i32 {
        self.y1.saturating_sub(self.y0)
    }

    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }

    /// Converts back to a caller-facing rectangle; inverted corners collapse
    /// to zero size.
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            self.x0,
            self.y0,
            self.width().max(0) as u32,
            self.height().max(0) as u32,
        )
    }
}

impl From<Rect> for AbsRect {
    fn from(r: Rect) -> Self {
        AbsRect::new(r.x, r.y, r.x_max(), r.y_max())
    }
}

/// Computes a clip rectangle for a surface of size `bounds`.
///
/// * No `clip`: the full surface, or an empty rectangle when there is no
///   surface.
/// * `clip` with no surface and `pass_native`: the caller's rectangle,
///   unclamped. Fills use this to carry their target area.
/// * Otherwise the clip edges are clamped into `[0, w] x [0, h]`, the right
///   and bottom edges never moving left of / above the clamped left and top.
pub fn set_clip(clip: Option<&Rect>, bounds: Option<(u32, u32)>, pass_native: bool) -> AbsRect {
    if let Some(c) = clip {
        if bounds.is_none() && pass_native {
            return AbsRect::from(*c);
        }
    }

    let (w, h) = bounds
        .map(|(w, h)| (clamp_dim(w), clamp_dim(h)))
        .unwrap_or((0, 0));

    match clip {
        Some(c) => {
            let c = AbsRect::from(*c);
            let x0 = c.x0.clamp(0, w);
            let y0 = c.y0.clamp(0, h);
            AbsRect {
                x0,
                x1: c.x1.clamp(x0, w),
                y0,
                y1: c.y1.clamp(y0, h),
            }
        }
        None => AbsRect::new(0, 0, w, h),
    }
}

fn clamp_dim(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

/// Intersects `a` and `b`. Returns `None` when the overlap has no area.
pub fn intersect(a: &AbsRect, b: &AbsRect) -> Option<AbsRect> {
    let out = AbsRect {
        x0: a.x0.max(b.x0),
        y0: a.y0.max(b.y0),
        x1: a.x1.min(b.x1),
        y1: a.y1.min(b.y1),
    };
    if out.x0 < out.x1 && out.y0 < out.y1 {
        Some(out)
    } else {
        None
    }
}

/// Outcode bits. `y < y0` and `y > y1` are separate bits so both can never
/// be set at once; the clip loop resolves the y bits before the x bits.
pub mod outcode {
    pub const INSIDE: u32 = 0;
    pub const BELOW_MIN_Y: u32 = 1;
    pub const ABOVE_MAX_Y: u32 = 2;
    pub const LEFT: u32 = 4;
    pub const RIGHT: u32 = 8;
}

/// Classifies `p` against an inclusive clip rectangle.
pub fn clip_code(r: &AbsRect, p: Point) -> u32 {
    let mut code = outcode::INSIDE;

    if p.x < r.x0 {
        code = outcode::LEFT;
    } else if p.x > r.x1 {
        code = outcode::RIGHT;
    }

    if p.y < r.y0 {
        code |= outcode::BELOW_MIN_Y;
    } else if p.y > r.y1 {
        code |= outcode::ABOVE_MAX_Y;
    }

    code
}

/// Clips the segment `p0`–`p1` to the *inclusive* rectangle `clip`.
///
/// Returns the visible segment, or `None` if the segment lies entirely
/// outside. Endpoints that are already inside are returned unchanged.
pub fn clip_line(clip: &AbsRect, p0: Point, p1: Point) -> Option<(Point, Point)> {
    let (mut p0, mut p1) = (p0, p1);
    let mut code0 = clip_code(clip, p0);
    let mut code1 = clip_code(clip, p1);

    while code0 | code1 != 0 {
        if code0 & code1 != 0 {
            return None;
        }

        let code = if code0 != 0 { code0 } else { code1 };

        // Interpolate in i64; the quotient always lands between the endpoints.
        let (x0, y0, x1, y1) = (p0.x as i64, p0.y as i64, p1.x as i64, p1.y as i64);
        let (x, y) = if code & outcode::BELOW_MIN_Y != 0 {
            let y = clip.y0 as i64;
            (x0 + (x1 - x0) * (y - y0) / (y1 - y0), y)
        } else if code & outcode::ABOVE_MAX_Y != 0 {
            let y = clip.y1 as i64;
            (x0 + (x1 - x0) * (y - y0) / (y1 - y0), y)
        } else if code & outcode::RIGHT != 0 {
            let x = clip.x1 as i64;
            (x, y0 + (y1 - y0) * (x - x0) / (x1 - x0))
        } else {
            let x = clip.x0 as i64;
            (x, y0 + (y1 - y0) * (x - x0) / (x1 - x0))
        };
        let moved = Point::new(x as i32, y as i32);

        if code == code0 {
            p0 = moved;
            code0 = clip_code(clip, p0);
        } else {
            p1 = moved;
            code1 = clip_code(clip, p1);
        }
    }

    Some((p0, p1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_saturates_for_huge_rects() {
        let r = AbsRect::from(Rect::new(-10, -3, u32::MAX, u32::MAX));
        assert_eq!(r.width(), i32::MAX);
        assert_eq!(r.height(), i32::MAX);
        assert_eq!(r.to_rect().width, i32::MAX as u32);
    }

    #[test]
    fn test_set_clip_without_rect_is_bounds() {
        assert_eq!(set_clip(None, Some((8, 6)), false), AbsRect::new(0, 0, 8, 6));
        assert!(set_clip(None, None, true).is_empty());
    }

    #[test]
    fn test_set_clip_pass_native() {
        let r = Rect::new(-3, -2, 5, 4);
        assert_eq!(set_clip(Some(&r), None, true), AbsRect::new(-3, -2, 2, 2));
        // with a surface the same rect is clamped
        assert_eq!(set_clip(Some(&r), Some((10, 10)), true), AbsRect::new(0, 0, 2, 2));
    }

    #[test]
    fn test_set_clip_never_inverts() {
        let r = Rect::new(12, 3, 4, 2);
        let c = set_clip(Some(&r), Some((10, 10)), false);
        assert_eq!(c, AbsRect::new(10, 3, 10, 5));
        assert!(c.is_empty());
    }

    #[test]
    fn test_intersect() {
        let a = AbsRect::new(0, 0, 10, 10);
        assert_eq!(
            intersect(&a, &AbsRect::new(-5, 2, 3, 20)),
            Some(AbsRect::new(0, 2, 3, 10))
        );
        assert_eq!(intersect(&a, &AbsRect::new(10, 0, 12, 5)), None);
    }

    #[test]
    fn test_clip_line_inside_untouched() {
        let clip = AbsRect::new(0, 0, 9, 9);
        let (a, b) = (Point::new(1, 2), Point::new(8, 7));
        assert_eq!(clip_line(&clip, a, b), Some((a, b)));
    }

    #[test]
    fn test_clip_line_rejects_outside() {
        let clip = AbsRect::new(0, 0, 9, 9);
        assert_eq!(clip_line(&clip, Point::new(-5, 1), Point::new(-1, 8)), None);
        assert_eq!(clip_line(&clip, Point::new(1, 10), Point::new(8, 20)), None);
    }

    #[test]
    fn test_clip_line_one_edge() {
        let clip = AbsRect::new(0, 0, 9, 9);
        let (a, b) = clip_line(&clip, Point::new(-4, 2), Point::new(4, 6)).unwrap();
        assert_eq!(a, Point::new(0, 4));
        assert_eq!(b, Point::new(4, 6));

        let (a, b) = clip_line(&clip, Point::new(2, 3), Point::new(20, 3)).unwrap();
        assert_eq!(a, Point::new(2, 3));
        assert_eq!(b, Point::new(9, 3));
    }

    #[test]
    fn test_clip_line_corner_resolves_y_first() {
        let clip = AbsRect::new(0, 0, 9, 9);
        let (a, b) = clip_line(&clip, Point::new(-5, -5), Point::new(5, 5)).unwrap();
        assert_eq!(a, Point::new(0, 0));
        assert_eq!(b, Point::new(5, 5));
    }
}
