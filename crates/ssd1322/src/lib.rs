//! SSD1322 OLED Display Driver
//!
//! A driver for the SSD1322 4-bit grayscale OLED controller supporting
//! panels up to 480x128 pixels, such as the common 256x64 modules.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - Hardware SPI, bit-banged 4-wire SPI and I2C interfaces
//! - `embedded-graphics` integration (with `graphics` feature)
//! - In-memory 4 bpp framebuffer with clipped drawing primitives
//! - Controller-driven horizontal and diagonal scrolling
//! - Custom grayscale tables
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use ssd1322::{Builder, Color, Dimensions, Display, GraphicDisplay, SpiInterface};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let mut delay = MockDelay;
//! let interface = SpiInterface::new(spi, dc, rst);
//! let config = Builder::new().dimensions(Dimensions::new(64, 256)?).build()?;
//!
//! let display = Display::new(interface, config);
//! let mut display = GraphicDisplay::new(display, [0u8; 8192])?;
//! display.begin(&mut delay)?;
//!
//! display.draw_fast_hline(0, 32, 256, Color::Gray(0x8));
//! display.flush(false)?;
//! # Ok(())
//! # }
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Pixel colors for the grayscale framebuffer
pub mod color;
/// SSD1322 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Packed 4 bpp pixel buffer
pub mod framebuffer;
/// Buffered display and embedded-graphics support
pub mod graphics;
/// Hardware interface abstraction
pub mod interface;

pub use color::Color;
pub use config::{Builder, Config, Dimensions, GrayscaleTable};
pub use display::{Display, DisplayMode, ScrollConfig, ScrollDirection};
pub use error::{BufferTooSmall, BuilderError, Error, MAX_COLUMNS, MAX_ROWS};
pub use framebuffer::Framebuffer;
pub use graphics::GraphicDisplay;
pub use interface::{
    BitBangInterface, BusMode, DEFAULT_I2C_ADDRESS, DisplayInterface, I2cInterface,
    InterfaceError, SpiInterface,
};
