// src/image/buffer.rs

//! The pixel buffer every blit reads from and writes into.
//!
//! An [`Image`] either owns its bytes or borrows a caller's buffer for its
//! lifetime `'a`; see [`PixelStorage`]. Rows are `pitch` bytes apart and the
//! first `width * bytes_per_pixel` bytes of each row hold pixels.
//!
//! Pixel operations follow a permissive contract: out-of-range reads return
//! transparent black, out-of-range writes and unsupported combinations are
//! dropped, and operations that may do nothing report it with a `bool`.

use std::fmt;

use log::debug;

use crate::blit::pixel::{
    fill_u16, fill_u32, load_u16, load_u32, pixel_blend32, store_u16, store_u32,
};
use crate::blit::{self, BlitOp};
use crate::image::color::{
    a1r5g5b5_to_a8r8g8b8, a8r8g8b8_to_a1r5g5b5, a8r8g8b8_to_r5g6b5, r5g6b5_to_a8r8g8b8, Color,
    ColorFormat, Rgb24,
};
use crate::image::convert::convert_via_format;
use crate::image::geom::{Dimension, Point, Rect};
use crate::utils::error::{BlitError, Result};

/// Who is responsible for the pixel bytes.
pub enum PixelStorage<'a> {
    /// Allocated by the image and freed with it.
    Owned(Vec<u8>),
    /// A caller's buffer; the image never frees it.
    Borrowed(&'a mut [u8]),
}

impl PixelStorage<'_> {
    fn bytes(&self) -> &[u8] {
        match self {
            PixelStorage::Owned(v) => v,
            PixelStorage::Borrowed(b) => b,
        }
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        match self {
            PixelStorage::Owned(v) => v,
            PixelStorage::Borrowed(b) => b,
        }
    }
}

/// A 2D pixel buffer in one of the [`ColorFormat`]s.
pub struct Image<'a> {
    format: ColorFormat,
    width: u32,
    height: u32,
    pitch: usize,
    storage: PixelStorage<'a>,
}

/// Checks that `len` bytes can back a `width x height` image with `pitch`.
fn validate_layout(
    format: ColorFormat,
    width: u32,
    height: u32,
    pitch: usize,
    len: usize,
) -> Result<()> {
    let row_bytes = (width as usize)
        .checked_mul(format.bytes_per_pixel())
        .ok_or(BlitError::DimensionOverflow(width, height))?;
    if pitch < row_bytes {
        return Err(BlitError::PitchTooSmall { pitch, row_bytes });
    }
    let needed = pitch
        .checked_mul(height as usize)
        .ok_or(BlitError::DimensionOverflow(width, height))?;
    if len < needed {
        return Err(BlitError::BufferTooSmall {
            format,
            width,
            height,
            needed,
            actual: len,
        });
    }
    Ok(())
}

impl Image<'static> {
    /// Allocates a zeroed image with a tightly packed pitch.
    pub fn new(format: ColorFormat, width: u32, height: u32) -> Self {
        let pitch = width as usize * format.bytes_per_pixel();
        debug!("allocating {:?} image {}x{}", format, width, height);
        Image {
            format,
            width,
            height,
            pitch,
            storage: PixelStorage::Owned(vec![0; pitch * height as usize]),
        }
    }

    /// Takes ownership of `data`, which must hold at least
    /// `width * bpp * height` bytes.
    pub fn from_vec(format: ColorFormat, width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let pitch = width as usize * format.bytes_per_pixel();
        validate_layout(format, width, height, pitch, data.len())?;
        Ok(Image {
            format,
            width,
            height,
            pitch,
            storage: PixelStorage::Owned(data),
        })
    }

    /// Copies `data` into a newly allocated image.
    pub fn from_slice(format: ColorFormat, width: u32, height: u32, data: &[u8]) -> Result<Self> {
        let pitch = width as usize * format.bytes_per_pixel();
        validate_layout(format, width, height, pitch, data.len())?;
        Ok(Image {
            format,
            width,
            height,
            pitch,
            storage: PixelStorage::Owned(data[..pitch * height as usize].to_vec()),
        })
    }

    /// Builds an A8R8G8B8 image from row-major colors.
    pub fn from_colors(width: u32, height: u32, colors: &[Color]) -> Result<Self> {
        let data: Vec<u8> = colors.iter().flat_map(|c| c.argb().to_le_bytes()).collect();
        Self::from_vec(ColorFormat::A8R8G8B8, width, height, data)
    }
}

impl<'a> Image<'a> {
    /// Wraps a caller-owned buffer without copying. The buffer outlives the
    /// image and is never freed by it.
    pub fn wrap(
        format: ColorFormat,
        width: u32,
        height: u32,
        pitch: usize,
        data: &'a mut [u8],
    ) -> Result<Self> {
        validate_layout(format, width, height, pitch, data.len())?;
        debug!("wrapping {} byte buffer as {:?} {}x{}", data.len(), format, width, height);
        Ok(Image {
            format,
            width,
            height,
            pitch,
            storage: PixelStorage::Borrowed(data),
        })
    }
}

impl Image<'_> {
    // --- Layout ---

    pub fn format(&self) -> ColorFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the dimensions as a tuple (width, height).
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn size(&self) -> Dimension {
        Dimension::new(self.width, self.height)
    }

    /// Bytes from the start of one row to the start of the next.
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    pub fn bits_per_pixel(&self) -> u32 {
        self.format.bits_per_pixel()
    }

    pub fn red_mask(&self) -> u32 {
        self.format.red_mask()
    }

    pub fn green_mask(&self) -> u32 {
        self.format.green_mask()
    }

    pub fn blue_mask(&self) -> u32 {
        self.format.blue_mask()
    }

    pub fn alpha_mask(&self) -> u32 {
        self.format.alpha_mask()
    }

    pub fn data_size_in_bytes(&self) -> usize {
        self.pitch * self.height as usize
    }

    pub fn data_size_in_pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_owned(&self) -> bool {
        matches!(self.storage, PixelStorage::Owned(_))
    }

    /// Raw pixel bytes, `pitch * height` long.
    pub fn as_raw(&self) -> &[u8] {
        let len = self.data_size_in_bytes();
        &self.storage.bytes()[..len]
    }

    /// Mutable raw pixel bytes. The borrow lasts as long as the caller
    /// holds the slice.
    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        let len = self.data_size_in_bytes();
        &mut self.storage.bytes_mut()[..len]
    }

    fn pixel_offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.pitch + x as usize * self.bytes_per_pixel())
    }

    // --- Pixel access ---

    /// Reads one pixel as `0xAARRGGBB`. Out-of-range coordinates yield
    /// transparent black.
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        let Some(offset) = self.pixel_offset(x, y) else {
            return Color::TRANSPARENT_BLACK;
        };
        let p = &self.as_raw()[offset..];
        match self.format {
            ColorFormat::A1R5G5B5 => Color(a1r5g5b5_to_a8r8g8b8(load_u16(p, 0))),
            ColorFormat::R5G6B5 => Color(r5g6b5_to_a8r8g8b8(load_u16(p, 0))),
            ColorFormat::A8R8G8B8 => Color(load_u32(p, 0)),
            ColorFormat::R8G8B8 => Color(Rgb24::new(p[0], p[1], p[2]).to_argb()),
        }
    }

    /// Writes one pixel. With `blend` set, A8R8G8B8 images composite
    /// `color` over the existing pixel; the other formats always overwrite.
    /// Out-of-range writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color, blend: bool) {
        let Some(offset) = self.pixel_offset(x, y) else {
            return;
        };
        let format = self.format;
        let p = &mut self.as_raw_mut()[offset..];
        match format {
            ColorFormat::A1R5G5B5 => store_u16(p, 0, a8r8g8b8_to_a1r5g5b5(color.argb())),
            ColorFormat::R5G6B5 => store_u16(p, 0, a8r8g8b8_to_r5g6b5(color.argb())),
            ColorFormat::R8G8B8 => {
                let rgb = Rgb24::from_argb(color.argb());
                p[..3].copy_from_slice(bytemuck::bytes_of(&rgb));
            }
            ColorFormat::A8R8G8B8 => {
                let out = if blend {
                    pixel_blend32(load_u32(p, 0), color.argb())
                } else {
                    color.argb()
                };
                store_u32(p, 0, out);
            }
        }
    }

    /// Sets every pixel to `color` in the image's native encoding.
    pub fn fill(&mut self, color: Color) {
        let format = self.format;
        let row_bytes = self.width as usize * self.bytes_per_pixel();
        let pitch = self.pitch;
        if row_bytes == 0 {
            return;
        }

        let rgb = Rgb24::from_argb(color.argb());
        for row in self.as_raw_mut().chunks_mut(pitch) {
            let n = row_bytes.min(row.len());
            let row = &mut row[..n];
            match format {
                ColorFormat::A1R5G5B5 => fill_u16(row, color.to_a1r5g5b5()),
                ColorFormat::R5G6B5 => fill_u16(row, a8r8g8b8_to_r5g6b5(color.argb())),
                ColorFormat::A8R8G8B8 => fill_u32(row, color.argb()),
                ColorFormat::R8G8B8 => {
                    let px: &mut [Rgb24] = bytemuck::cast_slice_mut(row);
                    px.fill(rgb);
                }
            }
        }
    }

    // --- Blit wrappers ---

    /// Fills `rect`, blending when the color is not fully opaque.
    pub fn draw_rectangle(&mut self, rect: &Rect, color: Color) -> bool {
        let op = if color.alpha() == 0xFF {
            BlitOp::Color
        } else {
            BlitOp::ColorAlpha
        };
        blit::blit(op, self, None, Some(rect.origin()), None, Some(rect), color.argb())
    }

    /// Draws a clipped line between two points, inclusive.
    pub fn draw_line(&mut self, from: Point, to: Point, color: Color) -> bool {
        blit::draw_line(self, from, to, color.argb())
    }

    /// Copies the whole image into `target` at `pos`, converting formats.
    pub fn copy_to(&self, target: &mut Image<'_>, pos: Point) -> bool {
        blit::blit(BlitOp::Texture, target, None, Some(pos), Some(self), None, 0)
    }

    /// Copies `source_rect` of this image into `target` at `pos`, limited to
    /// `clip` when given.
    pub fn copy_to_rect(
        &self,
        target: &mut Image<'_>,
        pos: Point,
        source_rect: &Rect,
        clip: Option<&Rect>,
    ) -> bool {
        blit::blit(BlitOp::Texture, target, clip, Some(pos), Some(self), Some(source_rect), 0)
    }

    /// Composites `source_rect` over `target`. A color other than opaque
    /// white additionally tints the source.
    pub fn copy_to_with_alpha(
        &self,
        target: &mut Image<'_>,
        pos: Point,
        source_rect: &Rect,
        color: Color,
        clip: Option<&Rect>,
    ) -> bool {
        let op = if color == Color::WHITE {
            BlitOp::TextureAlphaBlend
        } else {
            BlitOp::TextureAlphaColorBlend
        };
        blit::blit(op, target, clip, Some(pos), Some(self), Some(source_rect), color.argb())
    }

    /// Returns a copy converted to `format`. Pairs without a copy routine
    /// leave the result zeroed.
    pub fn converted(&self, format: ColorFormat) -> Image<'static> {
        let mut out = Image::new(format, self.width, self.height);
        blit::blit(BlitOp::Texture, &mut out, None, None, Some(self), None, 0);
        out
    }

    /// Returns the `size` region starting at `pos` as a new image.
    ///
    /// The region is clamped to this image first and the clamped part is
    /// copied to the origin of the result, so a negative `pos` shifts the
    /// content up and left rather than leaving a zeroed border. Any area of
    /// the result not covered by the clamped region stays zeroed.
    pub fn cropped(&self, pos: Point, size: Dimension) -> Image<'static> {
        let mut out = Image::new(self.format, size.width, size.height);
        let clip = Rect::from_pos_size(pos, size);
        blit::blit(BlitOp::Texture, &mut out, None, None, Some(self), Some(&clip), 0);
        out
    }

    // --- Scaling ---

    /// Nearest-neighbour copy into `target`, converting formats per pixel.
    /// Same-size targets go through [`copy_to`](Self::copy_to) instead.
    pub fn copy_to_scaling(&self, target: &mut Image<'_>) -> bool {
        if target.dimensions() == self.dimensions() {
            return self.copy_to(target, Point::default());
        }
        let (width, height) = target.dimensions();
        let (format, pitch) = (target.format(), target.pitch());
        self.copy_to_scaling_raw(target.as_raw_mut(), width, height, format, pitch)
    }

    /// Nearest-neighbour copy into a raw buffer of `width x height` pixels
    /// in `format`. A `pitch` of 0 means tightly packed rows.
    ///
    /// When format and size match, rows are copied verbatim and any row
    /// padding in the target is zeroed. Returns `false` if nothing was
    /// written.
    pub fn copy_to_scaling_raw(
        &self,
        target: &mut [u8],
        width: u32,
        height: u32,
        format: ColorFormat,
        pitch: usize,
    ) -> bool {
        if width == 0 || height == 0 || self.width == 0 || self.height == 0 {
            return false;
        }
        let bpp = format.bytes_per_pixel();
        let row_bytes = width as usize * bpp;
        let pitch = if pitch == 0 { row_bytes } else { pitch };
        if pitch < row_bytes || target.len() < (height as usize - 1) * pitch + row_bytes {
            return false;
        }

        let src = self.as_raw();

        if self.format == format && self.dimensions() == (width, height) {
            if pitch == self.pitch {
                let n = src.len().min(target.len());
                target[..n].copy_from_slice(&src[..n]);
            } else {
                for (y, src_row) in src.chunks(self.pitch).enumerate().take(height as usize) {
                    let t = &mut target[y * pitch..];
                    t[..row_bytes].copy_from_slice(&src_row[..row_bytes]);
                    let pad_end = pitch.min(t.len());
                    t[row_bytes..pad_end].fill(0);
                }
            }
            return true;
        }

        let src_bpp = self.bytes_per_pixel();
        let x_step = self.width as f32 / width as f32;
        let y_step = self.height as f32 / height as f32;
        let max_x = self.width as usize - 1;
        let max_y = self.height as usize - 1;

        let mut sy = 0.0f32;
        for y in 0..height as usize {
            let src_row = &src[(sy as usize).min(max_y) * self.pitch..];
            let dst_row = &mut target[y * pitch..];
            let mut sx = 0.0f32;
            for x in 0..width as usize {
                let s = (sx as usize).min(max_x) * src_bpp;
                convert_via_format(&src_row[s..], self.format, 1, &mut dst_row[x * bpp..], format);
                sx += x_step;
            }
            sy += y_step;
        }
        true
    }

    /// Area-averaging downscale into `target`.
    ///
    /// Each target pixel averages a `ceil(sw/tw) x ceil(sh/th)` box of source
    /// pixels, clamped at the source edges, then adds `bias` to every
    /// channel and clamps to `[0, 255]`. The average divides by shifting with
    /// `floor(log2(box area))`, which is exact only for power-of-two box
    /// areas; other areas come out brighter than a true mean.
    pub fn copy_to_scaling_box_filter(&self, target: &mut Image<'_>, bias: i32, blend: bool) {
        let (tw, th) = target.dimensions();
        if tw == 0 || th == 0 || self.width == 0 || self.height == 0 {
            return;
        }

        let x_step = self.width as f32 / tw as f32;
        let y_step = self.height as f32 / th as f32;
        let fx = x_step.ceil() as i32;
        let fy = y_step.ceil() as i32;

        let mut sy = 0.0f32;
        for y in 0..th {
            let mut sx = 0.0f32;
            for x in 0..tw {
                let c = self.pixel_box(sx.floor() as i32, sy.floor() as i32, fx, fy, bias);
                target.set_pixel(x, y, c, blend);
                sx += x_step;
            }
            sy += y_step;
        }
    }

    fn pixel_box(&self, x: i32, y: i32, fx: i32, fy: i32, bias: i32) -> Color {
        let (max_x, max_y) = (self.width as i32 - 1, self.height as i32 - 1);
        let (mut a, mut r, mut g, mut b) = (0i32, 0i32, 0i32, 0i32);

        for dx in 0..fx {
            for dy in 0..fy {
                let c = self.get_pixel((x + dx).min(max_x) as u32, (y + dy).min(max_y) as u32);
                a += c.alpha() as i32;
                r += c.red() as i32;
                g += c.green() as i32;
                b += c.blue() as i32;
            }
        }

        let sdiv = floor_log2((fx * fy) as u32);
        let channel = |v: i32| ((v >> sdiv) + bias).clamp(0, 255) as u32;
        Color::new(channel(a), channel(r), channel(g), channel(b))
    }
}

fn floor_log2(mut v: u32) -> u32 {
    let mut ret = 0;
    while v > 1 {
        v >>= 1;
        ret += 1;
    }
    ret
}

impl fmt::Debug for Image<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("format", &self.format)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pitch", &self.pitch)
            .field("owned", &self.is_owned())
            .finish()
    }
}

/// Configures a new owned image.
///
/// ```
/// use soft_blit::{Color, ColorFormat, ImageBuilder};
///
/// let img = ImageBuilder::new(ColorFormat::A8R8G8B8, 4, 2)
///     .with_pitch(32)
///     .with_fill(Color(0xFF00_FF00))
///     .build()
///     .unwrap();
/// assert_eq!(img.pitch(), 32);
/// assert_eq!(img.get_pixel(3, 1), Color(0xFF00_FF00));
/// ```
#[derive(Debug, Clone)]
pub struct ImageBuilder {
    format: ColorFormat,
    width: u32,
    height: u32,
    pitch: Option<usize>,
    fill: Option<Color>,
}

impl ImageBuilder {
    pub fn new(format: ColorFormat, width: u32, height: u32) -> Self {
        Self {
            format,
            width,
            height,
            pitch: None,
            fill: None,
        }
    }

    /// Row stride in bytes; defaults to `width * bytes_per_pixel`.
    pub fn with_pitch(mut self, pitch: usize) -> Self {
        self.pitch = Some(pitch);
        self
    }

    /// Initial color of every pixel; defaults to all-zero bytes.
    pub fn with_fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    fn pitch(&self) -> usize {
        self.pitch
            .unwrap_or(self.width as usize * self.format.bytes_per_pixel())
    }

    /// Allocates the image.
    pub fn build(self) -> Result<Image<'static>> {
        let pitch = self.pitch();
        let len = pitch
            .checked_mul(self.height as usize)
            .ok_or(BlitError::DimensionOverflow(self.width, self.height))?;
        self.build_from(vec![0; len])
    }

    /// Uses `data` as the pixel storage, taking ownership of it.
    pub fn build_from(self, data: Vec<u8>) -> Result<Image<'static>> {
        let pitch = self.pitch();
        validate_layout(self.format, self.width, self.height, pitch, data.len())?;
        debug!("building {:?} image {}x{} pitch {}", self.format, self.width, self.height, pitch);
        let mut img = Image {
            format: self.format,
            width: self.width,
            height: self.height,
            pitch,
            storage: PixelStorage::Owned(data),
        };
        if let Some(color) = self.fill {
            img.fill(color);
        }
        Ok(img)
    }
}
