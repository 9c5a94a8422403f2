// src/image/geom.rs

//! Geometric primitives: points, dimensions and integer rectangles.
//!
//! `Rect` is the caller-facing rectangle used for clip regions and source
//! sub-rectangles. The blitter converts it to the corner form
//! [`AbsRect`](crate::blit::clip::AbsRect) before clamping.

/// An integer position in pixel space.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point { x, y }
    }
}

/// The size of an image or region in pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimension {
    pub width: u32,
    pub height: u32,
}

impl Dimension {
    pub const fn new(width: u32, height: u32) -> Self {
        Dimension { width, height }
    }

    /// Number of pixels covered, widened so large images cannot overflow.
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u32, u32)> for Dimension {
    fn from((width, height): (u32, u32)) -> Self {
        Dimension { width, height }
    }
}

/// Represents a 2D rectangle with integer coordinates.
///
/// The rectangle is defined by its top-left corner (`x`, `y`) and its `width` and `height`.
/// This struct is `Copy`, so it can be passed around cheaply by value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle anchored at `pos` with the given size.
    pub fn from_pos_size(pos: Point, size: Dimension) -> Self {
        Rect::new(pos.x, pos.y, size.width, size.height)
    }

    /// Creates an empty rectangle.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the x-coordinate of the right edge (`x + width`).
    pub fn x_max(&self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    /// Returns the y-coordinate of the bottom edge (`y + height`).
    pub fn y_max(&self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }

    /// Checks if the rectangle has zero width or height.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Checks if a point is contained within the rectangle's bounds.
    /// The right and bottom edges are exclusive.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        !self.is_empty() && px >= self.x && px < self.x_max() && py >= self.y && py < self.y_max()
    }

    /// Checks whether `other` lies completely inside `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.is_empty()
            || (other.x >= self.x
                && other.y >= self.y
                && other.x_max() <= self.x_max()
                && other.y_max() <= self.y_max())
    }

    /// Returns a new rectangle that is the intersection of `self` and `other`.
    pub fn intersection(&self, other: &Rect) -> Rect {
        if self.is_empty() || other.is_empty() {
            return Rect::empty();
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);

        let x_max = self.x_max().min(other.x_max());
        let y_max = self.y_max().min(other.y_max());

        if x >= x_max || y >= y_max {
            Rect::empty()
        } else {
            Rect::new(x, y, x.abs_diff(x_max), y.abs_diff(y_max))
        }
    }

    /// Smallest rectangle covering both. Empty inputs are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }

        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let x_max = self.x_max().max(other.x_max());
        let y_max = self.y_max().max(other.y_max());

        Rect::new(x, y, x.abs_diff(x_max), y.abs_diff(y_max))
    }

    /// Returns a new rectangle translated by `(dx, dy)`.
    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        if self.is_empty() {
            Rect::empty()
        } else {
            Rect::new(
                self.x.saturating_add(dx),
                self.y.saturating_add(dy),
                self.width,
                self.height,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_overlap() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, -3, 10, 6);
        assert_eq!(a.intersection(&b), Rect::new(5, 0, 5, 3));
    }

    #[test]
    fn test_union_covers_both() {
        let a = Rect::new(0, 0, 2, 2);
        let b = Rect::new(5, -1, 1, 1);
        assert_eq!(a.union(&b), Rect::new(0, -1, 6, 3));
        assert_eq!(a.union(&Rect::empty()), a);
    }

    #[test]
    fn test_intersection_disjoint_is_empty() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(4, 0, 4, 4);
        assert!(a.intersection(&b).is_empty());
    }

    #[test]
    fn test_contains_edges_exclusive() {
        let r = Rect::new(2, 2, 3, 3);
        assert!(r.contains(2, 2));
        assert!(r.contains(4, 4));
        assert!(!r.contains(5, 4));
        assert!(r.contains_rect(&Rect::new(3, 3, 2, 2)));
        assert!(!r.contains_rect(&Rect::new(3, 3, 3, 2)));
    }

    #[test]
    fn test_translate_keeps_size() {
        let r = Rect::new(1, 1, 2, 3).translate(-4, 5);
        assert_eq!(r, Rect::new(-3, 6, 2, 3));
    }
}
