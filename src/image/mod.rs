//! Pixel buffers, colors and geometry.

pub mod buffer;
pub mod color;
pub mod convert;
pub mod geom;

// Re-export commonly used items
pub use buffer::{Image, ImageBuilder, PixelStorage};
pub use color::{Color, ColorFormat, Rgb24};
pub use geom::{Dimension, Point, Rect};
