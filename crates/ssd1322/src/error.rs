//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration or interface construction
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level bus and pin errors
//!
//! Out-of-bounds drawing is never an error: primitives clip silently.
//!
//! ## Example
//!
//! ```
//! use ssd1322::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Width must be a multiple of four pixels
//! let result = Dimensions::new(64, 250);
//! assert!(result.is_err());
//! ```

use crate::interface::DisplayInterface;

/// Maximum COM outputs (rows) supported by the SSD1322
pub const MAX_ROWS: u16 = 128;

/// Maximum SEG outputs (columns) supported by the SSD1322
pub const MAX_COLUMNS: u16 = 480;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/I2C/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
    /// Buffer is too small for the display
    ///
    /// A frame must be at least `dimensions.buffer_size()` bytes.
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
}

impl<I: DisplayInterface> core::fmt::Debug for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Interface(e) => f.debug_tuple("Interface").field(e).finish(),
            Error::BufferTooSmall { required, provided } => f
                .debug_struct("BufferTooSmall")
                .field("required", required)
                .field("provided", provided)
                .finish(),
        }
    }
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Interface(e) => write!(f, "Interface error: {e:?}"),
            Error::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
        }
    }
}

impl<I: DisplayInterface> core::error::Error for Error<I> {}

/// A framebuffer was handed fewer bytes than the panel needs
#[derive(Debug, PartialEq)]
pub struct BufferTooSmall {
    /// Required buffer size in bytes
    pub required: usize,
    /// Provided buffer size in bytes
    pub provided: usize,
}

impl core::fmt::Display for BufferTooSmall {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Buffer too small: required {} bytes, provided {}",
            self.required, self.provided
        )
    }
}

impl core::error::Error for BufferTooSmall {}

impl<I: DisplayInterface> From<BufferTooSmall> for Error<I> {
    fn from(e: BufferTooSmall) -> Self {
        Error::BufferTooSmall {
            required: e.required,
            provided: e.provided,
        }
    }
}

/// Errors that can occur when building configuration
///
/// These errors occur before the display is created, so a bad setup is
/// reported at construction rather than on the first draw.
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Number of rows (height) requested
        rows: u16,
        /// Number of columns (width) requested
        cols: u16,
    },
    /// The column window would run past the last controller column
    InvalidColumnOffset {
        /// First column address requested
        offset: u8,
        /// Panel width in pixels
        cols: u16,
    },
    /// I2C address does not fit in 7 bits
    InvalidAddress(u8),
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuilderError::MissingDimensions => write!(f, "Dimensions must be specified"),
            BuilderError::InvalidDimensions { rows, cols } => write!(
                f,
                "Invalid dimensions {rows}x{cols} (max {MAX_ROWS}x{MAX_COLUMNS}, cols must be multiple of 4)"
            ),
            BuilderError::InvalidColumnOffset { offset, cols } => write!(
                f,
                "Column offset {offset:#04x} leaves no room for {cols} columns"
            ),
            BuilderError::InvalidAddress(address) => {
                write!(f, "Invalid I2C address {address:#04x}")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
