//! Packed 4-bit framebuffer and the pixel-level drawing primitives
//!
//! Each byte holds two horizontally adjacent pixels: the even column in the
//! high nibble and the odd column in the low nibble. Pixel (x, y) lives at
//! byte `y * cols / 2 + x / 2`, which is also the order the controller
//! expects after a write-RAM command over the full window.
//!
//! Every primitive clips to the panel. Coordinates or runs that fall outside
//! it are dropped without error.

use crate::color::Color;
use crate::config::Dimensions;
use crate::error::BufferTooSmall;

/// Off-screen copy of the panel contents
///
/// ## Example
///
/// ```
/// use ssd1322::{Color, Dimensions, Framebuffer};
///
/// let dims = Dimensions::new(64, 256).unwrap();
/// let mut fb = Framebuffer::new([0u8; 8192], dims).unwrap();
///
/// fb.set_pixel(3, 0, Color::On);
/// assert_eq!(fb.as_bytes()[1], 0x0F);
/// assert_eq!(fb.pixel(3, 0), Some(0xF));
/// ```
pub struct Framebuffer<B> {
    buffer: B,
    dimensions: Dimensions,
}

impl<B> Framebuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wrap `buffer` as a framebuffer for a panel of `dimensions`
    ///
    /// Contents are kept as-is; call [`clear`](Self::clear) for a blank frame.
    ///
    /// # Errors
    ///
    /// Returns [`BufferTooSmall`] if `buffer` is shorter than
    /// `dimensions.buffer_size()`.
    pub fn new(buffer: B, dimensions: Dimensions) -> Result<Self, BufferTooSmall> {
        let required = dimensions.buffer_size();
        let provided = buffer.as_ref().len();
        if provided < required {
            return Err(BufferTooSmall { required, provided });
        }
        Ok(Self { buffer, dimensions })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Width in pixels
    pub fn width(&self) -> i32 {
        self.dimensions.cols as i32
    }

    /// Height in pixels
    pub fn height(&self) -> i32 {
        self.dimensions.rows as i32
    }

    /// Packed frame, exactly `buffer_size()` bytes
    pub fn as_bytes(&self) -> &[u8] {
        let size = self.dimensions.buffer_size();
        &self.buffer.as_ref()[..size]
    }

    /// Mutable packed frame, exactly `buffer_size()` bytes
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        let size = self.dimensions.buffer_size();
        &mut self.buffer.as_mut()[..size]
    }

    /// Give the buffer back
    pub fn into_inner(self) -> B {
        self.buffer
    }

    /// Byte index and nibble (true = high) for an on-panel pixel
    fn location(&self, x: i32, y: i32) -> Option<(usize, bool)> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return None;
        }
        let index = y as usize * self.dimensions.row_stride() + x as usize / 2;
        Some((index, x % 2 == 0))
    }

    /// Read back the intensity of a pixel, `None` when off-panel
    pub fn pixel(&self, x: i32, y: i32) -> Option<u8> {
        let (index, high) = self.location(x, y)?;
        let byte = *self.buffer.as_ref().get(index)?;
        Some(if high { byte >> 4 } else { byte & 0x0F })
    }

    /// Set a single pixel, leaving its byte neighbour untouched
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        let Some((index, high)) = self.location(x, y) else {
            return;
        };
        let Some(byte) = self.buffer.as_mut().get_mut(index) else {
            return;
        };

        if high {
            let next = color.apply(*byte >> 4);
            *byte = (*byte & 0x0F) | (next << 4);
        } else {
            let next = color.apply(*byte & 0x0F);
            *byte = (*byte & 0xF0) | next;
        }
    }

    /// Draw a horizontal run of `w` pixels starting at (x, y)
    ///
    /// The byte-aligned middle of the run is written a byte at a time.
    pub fn draw_fast_hline(&mut self, x: i32, y: i32, w: i32, color: Color) {
        if y < 0 || y >= self.height() {
            return;
        }
        let Some((start, end)) = clip_run(x, w, self.width()) else {
            return;
        };

        let mut x = start;
        if x % 2 == 1 {
            self.set_pixel(x, y, color);
            x += 1;
        }

        let pairs = (end - x) / 2;
        if pairs > 0 {
            let first = y as usize * self.dimensions.row_stride() + x as usize / 2;
            if let Some(bytes) = self
                .buffer
                .as_mut()
                .get_mut(first..first + pairs as usize)
            {
                match color.level() {
                    Some(level) => bytes.fill((level << 4) | level),
                    None => bytes.iter_mut().for_each(|byte| *byte ^= 0xFF),
                }
            }
            x += pairs * 2;
        }

        if x < end {
            self.set_pixel(x, y, color);
        }
    }

    /// Draw a vertical run of `h` pixels starting at (x, y)
    pub fn draw_fast_vline(&mut self, x: i32, y: i32, h: i32, color: Color) {
        if x < 0 || x >= self.width() {
            return;
        }
        let Some((start, end)) = clip_run(y, h, self.height()) else {
            return;
        };
        for y in start..end {
            self.set_pixel(x, y, color);
        }
    }

    /// Blit a 1 bpp bitmap with its top-left corner at (x, y)
    ///
    /// `bitmap` is row-major, MSB first, each row padded to a whole byte.
    /// Set bits are drawn in `color`; clear bits leave the frame as it was,
    /// so icons can be stamped over existing content. Only the part of the
    /// bitmap that lands on the panel is read.
    pub fn fast_draw_bitmap(&mut self, x: i32, y: i32, bitmap: &[u8], w: i32, h: i32, color: Color) {
        let Some((col_start, col_end)) = visible_span(x, w, self.width()) else {
            return;
        };
        let Some((row_start, row_end)) = visible_span(y, h, self.height()) else {
            return;
        };
        let stride = (w as usize).div_ceil(8);

        for row in row_start..row_end {
            let line = (row as usize).checked_mul(stride);
            for col in col_start..col_end {
                let bits = line
                    .and_then(|line| line.checked_add(col as usize / 8))
                    .and_then(|index| bitmap.get(index))
                    .copied()
                    .unwrap_or(0);
                if bits & (0x80 >> (col % 8)) != 0 {
                    self.set_pixel(x + col, y + row, color);
                }
            }
        }
    }

    /// Set every pixel to `intensity` (low nibble)
    pub fn fill(&mut self, intensity: u8) {
        let level = intensity & 0x0F;
        self.as_bytes_mut().fill((level << 4) | level);
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.fill(0);
    }
}

#[cfg(feature = "alloc")]
impl Framebuffer<alloc::vec::Vec<u8>> {
    /// Allocate a blank framebuffer of exactly `dimensions.buffer_size()` bytes
    pub fn allocate(dimensions: Dimensions) -> Self {
        Self {
            buffer: alloc::vec![0; dimensions.buffer_size()],
            dimensions,
        }
    }
}

/// Offsets into a run of `len` pixels at `origin` that land in `0..limit`
fn visible_span(origin: i32, len: i32, limit: i32) -> Option<(i32, i32)> {
    if len <= 0 {
        return None;
    }
    let start = (-(origin as i64)).max(0);
    let end = (len as i64).min(limit as i64 - origin as i64);
    (start < end).then_some((start as i32, end as i32))
}

/// Clip a run of `len` pixels from `start` to `0..limit`, as a half-open range
fn clip_run(start: i32, len: i32, limit: i32) -> Option<(i32, i32)> {
    if len <= 0 {
        return None;
    }
    let end = start.saturating_add(len).min(limit);
    let start = start.max(0);
    (start < end).then_some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Framebuffer<[u8; 16]> {
        // 8 wide, 4 tall
        Framebuffer::new([0u8; 16], Dimensions::new(4, 8).unwrap()).unwrap()
    }

    fn wide() -> Framebuffer<[u8; 8192]> {
        Framebuffer::new([0u8; 8192], Dimensions::new(64, 256).unwrap()).unwrap()
    }

    #[test]
    fn test_buffer_too_small_rejected() {
        let result = Framebuffer::new([0u8; 100], Dimensions::new(64, 256).unwrap());
        assert!(matches!(
            result,
            Err(BufferTooSmall {
                required: 8192,
                provided: 100
            })
        ));
    }

    #[test]
    fn test_set_pixel_selects_nibble_by_parity() {
        let mut fb = small();
        fb.set_pixel(0, 0, Color::On);
        assert_eq!(fb.as_bytes()[0], 0xF0);
        fb.set_pixel(1, 0, Color::Gray(0x7));
        assert_eq!(fb.as_bytes()[0], 0xF7);
        fb.set_pixel(5, 2, Color::On);
        assert_eq!(fb.as_bytes()[2 * 4 + 2], 0x0F);
    }

    #[test]
    fn test_set_pixel_keeps_paired_nibble() {
        let mut fb = small();
        fb.fill(0x9);
        fb.set_pixel(2, 1, Color::Off);
        assert_eq!(fb.pixel(2, 1), Some(0x0));
        assert_eq!(fb.pixel(3, 1), Some(0x9));
    }

    #[test]
    fn test_pixel_round_trip_both_nibbles() {
        let mut fb = small();
        for level in 0..16u8 {
            fb.set_pixel(6, 3, Color::Gray(level));
            fb.set_pixel(7, 3, Color::Gray(15 - level));
            assert_eq!(fb.pixel(6, 3), Some(level));
            assert_eq!(fb.pixel(7, 3), Some(15 - level));
        }
    }

    #[test]
    fn test_out_of_bounds_pixel_is_noop() {
        let mut fb = small();
        fb.fill(0x3);
        for (x, y) in [(-1, 0), (0, -1), (8, 0), (0, 4), (i32::MIN, i32::MAX)] {
            fb.set_pixel(x, y, Color::On);
            assert_eq!(fb.pixel(x, y), None);
        }
        assert!(fb.as_bytes().iter().all(|&b| b == 0x33));
    }

    #[test]
    fn test_invert_twice_restores() {
        let mut fb = small();
        fb.set_pixel(4, 0, Color::Gray(0x6));
        fb.set_pixel(4, 0, Color::Invert);
        assert_eq!(fb.pixel(4, 0), Some(0x9));
        fb.set_pixel(4, 0, Color::Invert);
        assert_eq!(fb.pixel(4, 0), Some(0x6));
    }

    #[test]
    fn test_hline_clips_at_right_edge() {
        let mut fb = wide();
        fb.draw_fast_hline(254, 0, 10, Color::On);
        assert_eq!(fb.as_bytes()[127], 0xFF);
        assert_eq!(fb.as_bytes().iter().filter(|&&b| b != 0).count(), 1);
        assert_eq!(fb.as_bytes()[128], 0x00);
    }

    #[test]
    fn test_hline_negative_start_truncates() {
        let mut fb = small();
        fb.draw_fast_hline(-3, 1, 5, Color::On);
        assert_eq!(fb.pixel(0, 1), Some(0xF));
        assert_eq!(fb.pixel(1, 1), Some(0xF));
        assert_eq!(fb.pixel(2, 1), Some(0x0));
    }

    #[test]
    fn test_hline_matches_per_pixel_writes() {
        for color in [Color::On, Color::Gray(0x5), Color::Invert, Color::Off] {
            for start in -2..9 {
                for len in 0..11 {
                    let mut fast = small();
                    let mut slow = small();
                    fast.as_bytes_mut().copy_from_slice(&[0x5A; 16]);
                    slow.as_bytes_mut().copy_from_slice(&[0x5A; 16]);

                    fast.draw_fast_hline(start, 2, len, color);
                    for x in start..start + len {
                        slow.set_pixel(x, 2, color);
                    }
                    assert_eq!(fast.as_bytes(), slow.as_bytes(), "start {start} len {len}");
                }
            }
        }
    }

    #[test]
    fn test_hline_outside_rows_is_noop() {
        let mut fb = small();
        fb.draw_fast_hline(0, 4, 8, Color::On);
        fb.draw_fast_hline(0, -1, 8, Color::On);
        fb.draw_fast_hline(8, 0, 4, Color::On);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_vline_clips_both_ends() {
        let mut fb = small();
        fb.draw_fast_vline(3, -2, 10, Color::On);
        for y in 0..4 {
            assert_eq!(fb.pixel(3, y), Some(0xF));
            assert_eq!(fb.pixel(2, y), Some(0x0));
        }
        let mut untouched = small();
        untouched.draw_fast_vline(-1, 0, 4, Color::On);
        untouched.draw_fast_vline(0, 0, 0, Color::On);
        assert!(untouched.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_bitmap_clear_bits_leave_frame() {
        let mut fb = small();
        fb.fill(0x4);
        fb.fast_draw_bitmap(0, 0, &[0x00; 4], 8, 4, Color::On);
        assert!(fb.as_bytes().iter().all(|&b| b == 0x44));
    }

    #[test]
    fn test_bitmap_set_bits_overwrite() {
        let mut fb = small();
        fb.fill(0x4);
        fb.fast_draw_bitmap(2, 1, &[0xFF, 0xFF], 3, 2, Color::On);
        for y in 0..4 {
            for x in 0..8 {
                let covered = (2..5).contains(&x) && (1..3).contains(&y);
                let expected = if covered { 0xF } else { 0x4 };
                assert_eq!(fb.pixel(x, y), Some(expected), "({x}, {y})");
            }
        }
    }

    #[test]
    fn test_bitmap_msb_first_with_row_padding() {
        let mut fb = small();
        // 10 pixels wide: two bytes per row
        let bitmap = [0b1000_0000, 0b0100_0000, 0b0000_0001, 0b0000_0000];
        fb.fast_draw_bitmap(-1, 0, &bitmap, 10, 2, Color::On);
        // (0,0) in source is off-panel; source col 9 lands at x=8, also off
        assert_eq!(fb.pixel(0, 0), Some(0x0));
        // source (7, 1) -> (6, 1)
        assert_eq!(fb.pixel(6, 1), Some(0xF));
        assert_eq!(fb.as_bytes().iter().filter(|&&b| b != 0).count(), 1);
    }

    #[test]
    fn test_bitmap_short_source_treated_as_clear() {
        let mut fb = small();
        fb.fast_draw_bitmap(0, 0, &[0xFF], 8, 4, Color::On);
        assert_eq!(fb.pixel(7, 0), Some(0xF));
        assert_eq!(fb.pixel(0, 1), Some(0x0));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_allocate_sizes_buffer_to_panel() {
        let fb = Framebuffer::allocate(Dimensions::new(64, 256).unwrap());
        assert_eq!(fb.as_bytes().len(), 8192);
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(fb.into_inner().len(), 8192);
    }

    #[test]
    fn test_bitmap_only_visible_span_is_walked() {
        let mut fb = small();
        // 200M columns wide, but only the first eight land on the panel
        fb.fast_draw_bitmap(0, 0, &[0xFF], 200_000_000, 4, Color::On);
        for x in 0..8 {
            assert_eq!(fb.pixel(x, 0), Some(0xF));
        }
        assert_eq!(fb.as_bytes().iter().filter(|&&b| b != 0).count(), 4);
    }

    #[test]
    fn test_bitmap_far_off_panel_origin() {
        let mut fb = small();
        let bitmap = [0xFF; 16];
        fb.fast_draw_bitmap(-1_000_000_000, -2_000_000_000, &bitmap, i32::MAX, i32::MAX, Color::On);
        fb.fast_draw_bitmap(i32::MIN, 0, &bitmap, i32::MAX, 4, Color::On);
        fb.fast_draw_bitmap(-8, 0, &bitmap, 16, 1, Color::On);
        // source byte 1 covers the visible columns of the last blit
        assert_eq!(fb.as_bytes().iter().filter(|&&b| b == 0xFF).count(), 4);
        assert!(fb.as_bytes()[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_fill_replicates_nibble() {
        let mut fb = small();
        fb.fill(0x3);
        assert!(fb.as_bytes().iter().all(|&b| b == 0x33));
        fb.fill(0xA7);
        assert!(fb.as_bytes().iter().all(|&b| b == 0x77));
        fb.clear();
        assert!(fb.as_bytes().iter().all(|&b| b == 0));
    }
}
