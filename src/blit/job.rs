// src/blit/job.rs

use super::clip::AbsRect;

/// Everything one routine needs to push pixels for a single blit call.
///
/// The job borrows both buffers for the duration of the call. `src` and
/// `dst` start at the first pixel of the clipped rectangle and run to the end
/// of their buffers; rows are `src_pitch` / `dst_pitch` bytes apart.
#[derive(Debug)]
pub struct BlitJob<'a> {
    /// Empty for fills.
    pub src: &'a [u8],
    pub dst: &'a mut [u8],
    pub width: u32,
    pub height: u32,
    pub src_pitch: usize,
    pub dst_pitch: usize,
    pub src_bytes_per_pixel: usize,
    pub dst_bytes_per_pixel: usize,
    /// Bytes written per destination row by fill routines (`width * dst bpp`).
    pub fill_span: usize,
    /// Fill or tint color, `0xAARRGGBB`.
    pub argb: u32,
    /// Source rectangle in source buffer coordinates.
    pub source_rect: AbsRect,
    /// Destination rectangle in destination buffer coordinates.
    pub dest_rect: AbsRect,
}

impl BlitJob<'_> {
    /// Calls `f` with each (source row, destination row) pair. Rows are
    /// trimmed to exactly `width` pixels; the source row is empty for fills.
    ///
    /// Stops early instead of panicking if a row would run past its buffer.
    pub fn for_each_row<F>(&mut self, mut f: F)
    where
        F: FnMut(&[u8], &mut [u8]),
    {
        let width = self.width as usize;
        let src_span = width * self.src_bytes_per_pixel;
        let dst_span = width * self.dst_bytes_per_pixel;

        for y in 0..self.height as usize {
            let d = y * self.dst_pitch;
            let Some(dst_row) = self.dst.get_mut(d..d + dst_span) else {
                debug_assert!(false, "destination row {y} out of range");
                return;
            };

            let src_row: &[u8] = if self.src.is_empty() {
                &[]
            } else {
                let s = y * self.src_pitch;
                match self.src.get(s..s + src_span) {
                    Some(row) => row,
                    None => {
                        debug_assert!(false, "source row {y} out of range");
                        return;
                    }
                }
            };

            f(src_row, dst_row);
        }
    }

    /// Number of pixels the job covers.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}
