//! A software 2D blitter for small pixel buffers.
//!
//! This crate provides an [`Image`] type over four packed color formats and
//! the rectangle transfer engine behind it: clipped copies with format
//! conversion, alpha compositing, tinted compositing, solid and translucent
//! fills, clipped line drawing and two scaling copies.
//!
//! # Quick Start
//!
//! ```
//! use soft_blit::{Color, ColorFormat, Image, Point, Rect};
//!
//! let mut target = Image::new(ColorFormat::A8R8G8B8, 64, 64);
//! target.fill(Color::BLACK);
//!
//! // Translucent rectangle, partly off the top-left edge
//! target.draw_rectangle(&Rect::new(-8, -8, 24, 24), Color(0x80FF_0000));
//!
//! // Sprite with a 1-bit alpha channel composited on top
//! let mut sprite = Image::new(ColorFormat::A1R5G5B5, 16, 16);
//! sprite.fill(Color::WHITE);
//! let converted = sprite.converted(ColorFormat::A8R8G8B8);
//! converted.copy_to_with_alpha(
//!     &mut target,
//!     Point::new(40, 40),
//!     &Rect::new(0, 0, 16, 16),
//!     Color::WHITE,
//!     None,
//! );
//!
//! target.draw_line(Point::new(0, 63), Point::new(63, 0), Color::WHITE);
//! assert_eq!(target.get_pixel(63, 0), Color::WHITE);
//! ```
//!
//! # Formats
//!
//! - **A1R5G5B5 / A8R8G8B8**: every operation
//! - **R8G8B8**: converting copies, pixel access and scaling
//! - **R5G6B5**: same-format copies, pixel access and scaling
//!
//! Unsupported combinations are silent no-ops that report `false`.

// Core modules
pub mod blit;
pub mod image;
pub mod utils;

// Image types
pub use crate::image::buffer::{Image, ImageBuilder, PixelStorage};
pub use crate::image::color::{Color, ColorFormat, Rgb24};
pub use crate::image::geom::{Dimension, Point, Rect};

// Blitting
pub use crate::blit::{blit, draw_line, BlitOp};

// Error types
pub use crate::utils::error::{BlitError, Result};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_roundtrip() {
        let mut img = ImageBuilder::new(ColorFormat::A8R8G8B8, 2, 2)
            .with_fill(Color::BLACK)
            .build()
            .unwrap();
        img.set_pixel(1, 0, Color::WHITE, false);
        assert_eq!(img.get_pixel(1, 0), Color::WHITE);
        assert_eq!(img.get_pixel(0, 1), Color::BLACK);
    }

    #[test]
    fn test_blit_fill_reports_work() {
        let mut img = Image::new(ColorFormat::A1R5G5B5, 4, 4);
        let r = Rect::new(1, 1, 2, 2);
        assert!(blit(BlitOp::Color, &mut img, None, Some(r.origin()), None, Some(&r), 0xFFFF_FFFF));
        assert_eq!(img.get_pixel(1, 1), Color::WHITE);
        assert_eq!(img.get_pixel(3, 3), Color::TRANSPARENT_BLACK);
    }
}
