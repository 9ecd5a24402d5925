//! SSD1322 command definitions
//!
//! Every command is a single opcode byte sent with D/C low, followed by a
//! fixed number of parameter bytes sent with D/C high.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ssd1322::{command, DisplayInterface, SpiInterface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
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
//! # let mut interface = SpiInterface::new(MockSpi, MockPin, MockPin);
//! // Raise the contrast current to maximum
//! let _ = interface.send_command(command::SET_CONTRAST_CURRENT);
//! let _ = interface.send_data(&[0xFF]);
//! ```

// Fundamental commands

/// Command lock (0xFD). 1 byte: 0x12 unlocks, 0x16 locks.
pub const SET_COMMAND_LOCK: u8 = 0xFD;
/// Sleep mode on (0xAE)
pub const DISPLAY_OFF: u8 = 0xAE;
/// Sleep mode off (0xAF)
pub const DISPLAY_ON: u8 = 0xAF;
/// Front clock divider / oscillator frequency (0xB3). 1 byte.
pub const SET_CLOCK_DIVIDER: u8 = 0xB3;
/// Multiplex ratio (0xCA). 1 byte: rows - 1.
pub const SET_MUX_RATIO: u8 = 0xCA;
/// Vertical display offset (0xA2). 1 byte.
pub const SET_DISPLAY_OFFSET: u8 = 0xA2;
/// Display start line (0xA1). 1 byte.
pub const SET_START_LINE: u8 = 0xA1;
/// Re-map and dual COM line mode (0xA0). 2 bytes.
///
/// First byte bit 0: address increment, bit 1: column re-map,
/// bit 2: nibble re-map, bit 4: COM scan direction, bit 5: odd/even split.
pub const SET_REMAP: u8 = 0xA0;
/// GPIO0/GPIO1 mode (0xB5). 1 byte.
pub const SET_GPIO: u8 = 0xB5;
/// Function selection, internal/external VDD (0xAB). 1 byte.
pub const FUNCTION_SELECT: u8 = 0xAB;
/// Display enhancement A (0xB4). 2 bytes: VSL selection, low-gray quality.
pub const DISPLAY_ENHANCEMENT_A: u8 = 0xB4;
/// Segment output current (0xC1). 1 byte.
pub const SET_CONTRAST_CURRENT: u8 = 0xC1;
/// Master contrast current scale (0xC7). 1 byte, low nibble.
pub const MASTER_CURRENT_CONTROL: u8 = 0xC7;
/// Phase 1 and phase 2 period lengths (0xB1). 1 byte.
pub const SET_PHASE_LENGTH: u8 = 0xB1;
/// Display enhancement B (0xD1). 2 bytes.
pub const DISPLAY_ENHANCEMENT_B: u8 = 0xD1;
/// Pre-charge voltage (0xBB). 1 byte.
pub const SET_PRECHARGE_VOLTAGE: u8 = 0xBB;
/// Second pre-charge period (0xB6). 1 byte.
pub const SET_SECOND_PRECHARGE_PERIOD: u8 = 0xB6;
/// COM deselect voltage level (0xBE). 1 byte.
pub const SET_VCOMH: u8 = 0xBE;
pub const EXIT_PARTIAL_DISPLAY: u8 = 0xA9;

// Display modes

pub const ENTIRE_DISPLAY_OFF: u8 = 0xA4; // all pixels at GS0
pub const ENTIRE_DISPLAY_ON: u8 = 0xA5; // all pixels at GS15
pub const NORMAL_DISPLAY: u8 = 0xA6;
pub const INVERSE_DISPLAY: u8 = 0xA7;

// Grayscale

/// Custom grayscale table (0xB8). 15 bytes for GS1..GS15.
pub const SET_GRAYSCALE_TABLE: u8 = 0xB8;
/// Linear default grayscale table (0xB9). No data.
pub const SELECT_DEFAULT_GRAYSCALE: u8 = 0xB9;
/// Latches a table written with [`SET_GRAYSCALE_TABLE`] (0x00). No data.
pub const ENABLE_GRAYSCALE_TABLE: u8 = 0x00;

// Addressing

/// Column window (0x15). 2 bytes: start, end. One column is four pixels.
pub const SET_COLUMN_ADDR: u8 = 0x15;
/// Row window (0x75). 2 bytes: start, end.
pub const SET_ROW_ADDR: u8 = 0x75;
/// Write RAM (0x5C). Pixel data follows until the next command.
pub const WRITE_RAM: u8 = 0x5C;

// Scrolling

pub const RIGHT_HORIZONTAL_SCROLL: u8 = 0x26;
pub const LEFT_HORIZONTAL_SCROLL: u8 = 0x27;
pub const VERTICAL_AND_RIGHT_HORIZONTAL_SCROLL: u8 = 0x29;
pub const VERTICAL_AND_LEFT_HORIZONTAL_SCROLL: u8 = 0x2A;
pub const DEACTIVATE_SCROLL: u8 = 0x2E;
pub const ACTIVATE_SCROLL: u8 = 0x2F;
/// Vertical scroll area (0xA3). 2 bytes: fixed rows, scrolled rows.
pub const SET_VERTICAL_SCROLL_AREA: u8 = 0xA3;

/// Unlock value for [`SET_COMMAND_LOCK`]
pub const COMMAND_UNLOCK: u8 = 0x12;

/// First column address of a 256 pixel wide panel on the 480 segment die
pub const DEFAULT_COLUMN_OFFSET: u8 = 0x1C;

/// Highest column address the controller accepts (480 / 4 - 1)
pub const MAX_COLUMN_ADDR: u8 = 0x77;
