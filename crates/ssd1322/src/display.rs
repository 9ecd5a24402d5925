//! Core display operations
//!
//! [`Display`] owns the interface and the configuration and issues every
//! controller command. It keeps no pixel data; see
//! [`GraphicDisplay`](crate::graphics::GraphicDisplay) for the buffered driver.

use embedded_hal::delay::DelayNs;

use crate::command::*;
use crate::config::{Config, Dimensions, GrayscaleTable};
use crate::error::Error;
use crate::interface::DisplayInterface;

/// Bytes streamed per block by [`Display::clear_ram`]
const CLEAR_CHUNK: usize = 32;

/// Display mode selected with [`Display::set_display_mode`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Pixels shown from RAM
    #[default]
    Normal,
    /// Pixels shown from RAM with inverted intensity
    Inverse,
    /// Every pixel at full intensity, RAM ignored
    AllOn,
    /// Every pixel dark, RAM ignored
    AllOff,
}

impl DisplayMode {
    fn opcode(self) -> u8 {
        match self {
            DisplayMode::Normal => NORMAL_DISPLAY,
            DisplayMode::Inverse => INVERSE_DISPLAY,
            DisplayMode::AllOn => ENTIRE_DISPLAY_ON,
            DisplayMode::AllOff => ENTIRE_DISPLAY_OFF,
        }
    }
}

/// Direction of a controller-driven scroll
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Right,
    Left,
    /// Vertical plus rightward scroll
    DiagonalRight,
    /// Vertical plus leftward scroll
    DiagonalLeft,
}

/// Active scroll parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollConfig {
    pub direction: ScrollDirection,
    /// First row of the scrolled band
    pub start: u8,
    /// Last row of the scrolled band
    pub stop: u8,
}

/// Core display driver for SSD1322
///
/// This struct provides low-level operations for the SSD1322 controller.
/// For framebuffer and embedded-graphics support use
/// [`GraphicDisplay`](crate::graphics::GraphicDisplay).
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Scroll started by `start_scroll`, if any
    scroll: Option<ScrollConfig>,
    dimmed: bool,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// Nothing is sent until [`begin`](Self::begin).
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            scroll: None,
            dimmed: false,
        }
    }

    /// Reset (if configured) and run the power-up sequence
    ///
    /// The command order follows the controller's power sequencing and must
    /// not be rearranged.
    pub fn begin<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<I>> {
        let dims = self.config.dimensions;
        log::debug!(
            "ssd1322: begin {}x{} over {}",
            dims.cols,
            dims.rows,
            self.interface.bus_mode()
        );

        if self.config.reset_on_begin {
            self.interface.reset(delay).map_err(Error::Interface)?;
        }

        let config = self.config.clone();

        self.command(SET_COMMAND_LOCK, &[COMMAND_UNLOCK])?;
        self.command(DISPLAY_OFF, &[])?;
        self.command(SET_CLOCK_DIVIDER, &[config.clock_divider])?;
        self.command(SET_MUX_RATIO, &[config.row_end()])?;
        self.command(SET_DISPLAY_OFFSET, &[config.display_offset])?;
        self.command(SET_START_LINE, &[config.start_line])?;
        self.command(SET_REMAP, &config.remap)?;
        self.command(SET_GPIO, &[config.gpio])?;
        self.command(FUNCTION_SELECT, &[config.function_select])?;
        self.command(DISPLAY_ENHANCEMENT_A, &config.display_enhancement_a)?;
        self.command(SET_CONTRAST_CURRENT, &[config.contrast])?;
        self.command(MASTER_CURRENT_CONTROL, &[config.master_current])?;
        self.set_grayscale_table(&config.grayscale_table)?;
        self.command(SET_PHASE_LENGTH, &[config.phase_length])?;
        self.command(DISPLAY_ENHANCEMENT_B, &config.display_enhancement_b)?;
        self.command(SET_PRECHARGE_VOLTAGE, &[config.precharge_voltage])?;
        self.command(SET_SECOND_PRECHARGE_PERIOD, &[config.second_precharge_period])?;
        self.command(SET_VCOMH, &[config.vcomh])?;
        self.command(NORMAL_DISPLAY, &[])?;
        self.command(EXIT_PARTIAL_DISPLAY, &[])?;
        self.command(DISPLAY_ON, &[])?;

        self.scroll = None;
        self.dimmed = false;
        Ok(())
    }

    /// Leave sleep mode
    pub fn display_on(&mut self) -> Result<(), Error<I>> {
        self.command(DISPLAY_ON, &[])
    }

    /// Enter sleep mode; RAM contents are kept
    pub fn display_off(&mut self) -> Result<(), Error<I>> {
        self.command(DISPLAY_OFF, &[])
    }

    /// Set the RAM window targeted by following writes
    ///
    /// Column addresses are controller units of four pixels and include the
    /// column offset. Values are sent unchecked.
    pub fn set_window(
        &mut self,
        column_start: u8,
        column_end: u8,
        row_start: u8,
        row_end: u8,
    ) -> Result<(), Error<I>> {
        self.command(SET_COLUMN_ADDR, &[column_start, column_end])?;
        self.command(SET_ROW_ADDR, &[row_start, row_end])
    }

    /// Set the RAM window to the whole panel
    pub fn set_full_window(&mut self) -> Result<(), Error<I>> {
        let (column_start, column_end) = (self.config.column_offset, self.config.column_end());
        let row_end = self.config.row_end();
        self.set_window(column_start, column_end, 0, row_end)
    }

    /// Set segment output current
    ///
    /// Does not change the value `dim(false)` restores.
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error<I>> {
        self.command(SET_CONTRAST_CURRENT, &[contrast])
    }

    /// Set master current scale (low nibble)
    pub fn set_master_current(&mut self, value: u8) -> Result<(), Error<I>> {
        self.command(MASTER_CURRENT_CONTROL, &[value])
    }

    /// Set re-map / dual COM bytes (orientation and nibble order)
    pub fn set_remap(&mut self, remap: [u8; 2]) -> Result<(), Error<I>> {
        self.command(SET_REMAP, &remap)
    }

    /// Select the built-in linear table or load a custom one
    pub fn set_grayscale_table(&mut self, table: &GrayscaleTable) -> Result<(), Error<I>> {
        match table {
            GrayscaleTable::Default => self.command(SELECT_DEFAULT_GRAYSCALE, &[]),
            GrayscaleTable::Custom(levels) => {
                self.command(SET_GRAYSCALE_TABLE, levels)?;
                self.command(ENABLE_GRAYSCALE_TABLE, &[])
            }
        }
    }

    /// Set the RAM row shown on the first COM line
    pub fn set_start_line(&mut self, line: u8) -> Result<(), Error<I>> {
        self.command(SET_START_LINE, &[line])
    }

    /// Set the vertical offset between RAM rows and COM lines
    pub fn set_display_offset(&mut self, offset: u8) -> Result<(), Error<I>> {
        self.command(SET_DISPLAY_OFFSET, &[offset])
    }

    /// Select normal, inverse or forced all-on / all-off output
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Result<(), Error<I>> {
        self.command(mode.opcode(), &[])
    }

    /// Switch between inverse and normal display mode
    pub fn invert_display(&mut self, invert: bool) -> Result<(), Error<I>> {
        let mode = if invert {
            DisplayMode::Inverse
        } else {
            DisplayMode::Normal
        };
        self.set_display_mode(mode)
    }

    /// Drop contrast to zero, or restore the configured contrast
    pub fn dim(&mut self, dim: bool) -> Result<(), Error<I>> {
        let contrast = if dim { 0x00 } else { self.config.contrast };
        self.set_contrast(contrast)?;
        self.dimmed = dim;
        Ok(())
    }

    /// Whether `dim(true)` is in effect
    pub fn is_dimmed(&self) -> bool {
        self.dimmed
    }

    /// Configure and activate a controller-driven scroll
    ///
    /// Rows are passed through to the controller as given. The framebuffer is
    /// not involved: the controller shifts what is already in its RAM.
    pub fn start_scroll(&mut self, scroll: ScrollConfig) -> Result<(), Error<I>> {
        let rows = self.config.dimensions.rows;
        if scroll.start as u16 >= rows || scroll.stop as u16 >= rows {
            log::warn!(
                "ssd1322: scroll rows {}..={} outside {} row panel",
                scroll.start,
                scroll.stop,
                rows
            );
        }

        let ScrollConfig {
            direction,
            start,
            stop,
        } = scroll;
        match direction {
            ScrollDirection::Right | ScrollDirection::Left => {
                let opcode = if direction == ScrollDirection::Right {
                    RIGHT_HORIZONTAL_SCROLL
                } else {
                    LEFT_HORIZONTAL_SCROLL
                };
                self.command(opcode, &[0x00, start, 0x00, stop, 0x00, 0xFF])?;
            }
            ScrollDirection::DiagonalRight | ScrollDirection::DiagonalLeft => {
                let opcode = if direction == ScrollDirection::DiagonalRight {
                    VERTICAL_AND_RIGHT_HORIZONTAL_SCROLL
                } else {
                    VERTICAL_AND_LEFT_HORIZONTAL_SCROLL
                };
                self.command(SET_VERTICAL_SCROLL_AREA, &[0x00, rows as u8])?;
                self.command(opcode, &[0x00, start, 0x00, stop, 0x01])?;
            }
        }
        self.command(ACTIVATE_SCROLL, &[])?;

        log::debug!("ssd1322: scroll {:?} rows {}..={}", direction, start, stop);
        self.scroll = Some(scroll);
        Ok(())
    }

    /// Scroll rows `start..=stop` to the right
    pub fn start_scroll_right(&mut self, start: u8, stop: u8) -> Result<(), Error<I>> {
        self.start_scroll(ScrollConfig {
            direction: ScrollDirection::Right,
            start,
            stop,
        })
    }

    /// Scroll rows `start..=stop` to the left
    pub fn start_scroll_left(&mut self, start: u8, stop: u8) -> Result<(), Error<I>> {
        self.start_scroll(ScrollConfig {
            direction: ScrollDirection::Left,
            start,
            stop,
        })
    }

    /// Scroll the whole panel vertically, rows `start..=stop` also to the right
    pub fn start_scroll_diag_right(&mut self, start: u8, stop: u8) -> Result<(), Error<I>> {
        self.start_scroll(ScrollConfig {
            direction: ScrollDirection::DiagonalRight,
            start,
            stop,
        })
    }

    /// Scroll the whole panel vertically, rows `start..=stop` also to the left
    pub fn start_scroll_diag_left(&mut self, start: u8, stop: u8) -> Result<(), Error<I>> {
        self.start_scroll(ScrollConfig {
            direction: ScrollDirection::DiagonalLeft,
            start,
            stop,
        })
    }

    /// Deactivate scrolling
    pub fn stop_scroll(&mut self) -> Result<(), Error<I>> {
        self.command(DEACTIVATE_SCROLL, &[])?;
        if self.scroll.take().is_some() {
            log::debug!("ssd1322: scroll stopped");
        }
        Ok(())
    }

    /// Scroll currently active, if any
    pub fn scroll(&self) -> Option<ScrollConfig> {
        self.scroll
    }

    /// Issue write-RAM and stream `data` into the current window
    pub fn write_ram(&mut self, data: &[u8]) -> Result<(), Error<I>> {
        self.send_command(WRITE_RAM)?;
        self.send_data(data)
    }

    /// Write a whole packed frame to the panel
    ///
    /// Only the first `buffer_size()` bytes of `frame` are sent, as one block.
    pub fn write_frame(&mut self, frame: &[u8]) -> Result<(), Error<I>> {
        let expected_size = self.config.dimensions.buffer_size();
        if frame.len() < expected_size {
            return Err(Error::BufferTooSmall {
                required: expected_size,
                provided: frame.len(),
            });
        }

        self.set_full_window()?;
        log::trace!("ssd1322: writing {} byte frame", expected_size);
        self.write_ram(&frame[..expected_size])
    }

    /// Fill controller RAM with `intensity` directly, without a framebuffer
    pub fn clear_ram(&mut self, intensity: u8) -> Result<(), Error<I>> {
        let level = intensity & 0x0F;
        let chunk = [(level << 4) | level; CLEAR_CHUNK];

        self.set_full_window()?;
        self.send_command(WRITE_RAM)?;
        let mut remaining = self.config.dimensions.buffer_size();
        while remaining > 0 {
            let len = remaining.min(CLEAR_CHUNK);
            self.send_data(&chunk[..len])?;
            remaining -= len;
        }
        Ok(())
    }

    /// Send an opcode followed by its parameter bytes
    fn command(&mut self, cmd: u8, params: &[u8]) -> Result<(), Error<I>> {
        log::trace!("ssd1322: cmd {:#04x} {:02x?}", cmd, params);
        self.send_command(cmd)?;
        if !params.is_empty() {
            self.send_data(params)?;
        }
        Ok(())
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8) -> Result<(), Error<I>> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    /// Send data to the display controller
    fn send_data(&mut self, data: &[u8]) -> Result<(), Error<I>> {
        self.interface.send_data(data).map_err(Error::Interface)
    }

    /// Get display dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn interface(&self) -> &I {
        &self.interface
    }

    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Give back the interface
    pub fn release(self) -> I {
        self.interface
    }
}
