//! Buffered display and embedded-graphics support
//!
//! This module provides [`GraphicDisplay`], which pairs a
//! [`Display`] with a [`Framebuffer`]. Drawing only touches the framebuffer;
//! [`GraphicDisplay::flush`] sends it to the panel.
//!
//! With the `graphics` feature, [`GraphicDisplay`] implements
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) with
//! [`Gray4`](embedded_graphics_core::pixelcolor::Gray4) colors, so shapes and
//! text from the embedded-graphics ecosystem draw through the same
//! primitives.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ssd1322::{GraphicDisplay, Color};
//! use embedded_graphics::{
//!     mono_font::{ascii::FONT_6X10, MonoTextStyle},
//!     pixelcolor::Gray4,
//!     prelude::*,
//!     text::Text,
//! };
//!
//! let mut display = GraphicDisplay::new(display_driver, [0u8; 8192])?;
//! display.begin(&mut delay)?;
//!
//! display.draw_fast_hline(0, 12, 256, Color::Gray(0x4));
//! Text::new("Hello, OLED!", Point::new(4, 10),
//!     MonoTextStyle::new(&FONT_6X10, Gray4::WHITE))
//!     .draw(&mut display)?;
//!
//! display.flush(false)?;
//! ```

use embedded_hal::delay::DelayNs;

use crate::color::Color;
use crate::display::Display;
use crate::error::Error;
use crate::framebuffer::Framebuffer;
use crate::interface::DisplayInterface;

/// Display with an owned framebuffer
///
/// ## Type Parameters
///
/// * `I` - Interface type implementing [`DisplayInterface`]
/// * `B` - Buffer type, e.g. `[u8; 8192]` or `Vec<u8>`
pub struct GraphicDisplay<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// The underlying display driver
    display: Display<I>,
    /// Pending pixel state
    framebuffer: Framebuffer<B>,
}

impl<I, B> GraphicDisplay<I, B>
where
    I: DisplayInterface,
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Create a new GraphicDisplay
    ///
    /// The buffer is cleared so the first frame starts blank.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferTooSmall`] if `buffer` holds fewer than
    /// `dimensions.buffer_size()` bytes.
    pub fn new(display: Display<I>, buffer: B) -> Result<Self, Error<I>> {
        let mut framebuffer = Framebuffer::new(buffer, *display.dimensions())?;
        framebuffer.clear();
        Ok(Self {
            display,
            framebuffer,
        })
    }

    /// Reset and initialize the controller
    pub fn begin<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I>> {
        self.display.begin(delay)
    }

    /// Send the framebuffer to the panel
    ///
    /// With `clear_after`, the framebuffer is blanked once the frame has been
    /// handed to the interface; the frame already sent is unaffected.
    pub fn flush(&mut self, clear_after: bool) -> Result<(), Error<I>> {
        self.display.write_frame(self.framebuffer.as_bytes())?;
        log::debug!("ssd1322: frame flushed (clear_after: {})", clear_after);
        if clear_after {
            self.framebuffer.clear();
        }
        Ok(())
    }

    /// Blank the framebuffer (nothing is sent)
    pub fn clear_display(&mut self) {
        self.framebuffer.clear();
    }

    /// Set every pixel in the framebuffer to `intensity`
    pub fn fill(&mut self, intensity: u8) {
        self.framebuffer.fill(intensity);
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.framebuffer.set_pixel(x, y, color);
    }

    pub fn draw_fast_hline(&mut self, x: i32, y: i32, w: i32, color: Color) {
        self.framebuffer.draw_fast_hline(x, y, w, color);
    }

    pub fn draw_fast_vline(&mut self, x: i32, y: i32, h: i32, color: Color) {
        self.framebuffer.draw_fast_vline(x, y, h, color);
    }

    /// OR-style 1 bpp blit, see [`Framebuffer::fast_draw_bitmap`]
    pub fn fast_draw_bitmap(&mut self, x: i32, y: i32, bitmap: &[u8], w: i32, h: i32, color: Color) {
        self.framebuffer.fast_draw_bitmap(x, y, bitmap, w, h, color);
    }

    pub fn framebuffer(&self) -> &Framebuffer<B> {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer<B> {
        &mut self.framebuffer
    }

    /// Access the underlying Display
    pub fn display(&self) -> &Display<I> {
        &self.display
    }

    /// Access the underlying Display mutably
    ///
    /// Scrolling, contrast and display modes live here and do not touch the
    /// framebuffer.
    pub fn display_mut(&mut self) -> &mut Display<I> {
        &mut self.display
    }

    /// Split back into the driver and the buffer
    pub fn release(self) -> (Display<I>, B) {
        (self.display, self.framebuffer.into_inner())
    }
}

#[cfg(feature = "graphics")]
mod draw_target {
    use core::convert::Infallible;
    use embedded_graphics_core::{
        Pixel,
        draw_target::DrawTarget,
        geometry::{Dimensions, OriginDimensions, Size},
        pixelcolor::Gray4,
        primitives::Rectangle,
    };

    use super::GraphicDisplay;
    use crate::color::Color;
    use crate::interface::DisplayInterface;

    impl<I, B> DrawTarget for GraphicDisplay<I, B>
    where
        I: DisplayInterface,
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        type Color = Gray4;
        type Error = Infallible;

        fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
        where
            Iter: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                self.framebuffer
                    .set_pixel(point.x, point.y, Color::from(color));
            }
            Ok(())
        }

        fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
            let area = area.intersection(&self.bounding_box());
            let width = area.size.width as i32;
            let color = Color::from(color);
            for row in 0..area.size.height as i32 {
                self.framebuffer
                    .draw_fast_hline(area.top_left.x, area.top_left.y + row, width, color);
            }
            Ok(())
        }

        fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
            use embedded_graphics_core::pixelcolor::GrayColor;
            self.framebuffer.fill(color.luma());
            Ok(())
        }
    }

    impl<I, B> OriginDimensions for GraphicDisplay<I, B>
    where
        I: DisplayInterface,
        B: AsRef<[u8]> + AsMut<[u8]>,
    {
        fn size(&self) -> Size {
            let dims = self.framebuffer.dimensions();
            Size::new(dims.cols as u32, dims.rows as u32)
        }
    }
}
