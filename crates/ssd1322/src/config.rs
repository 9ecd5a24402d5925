//! Display configuration types and builder

use crate::command::{DEFAULT_COLUMN_OFFSET, MAX_COLUMN_ADDR};
pub use crate::error::{BuilderError, MAX_COLUMNS, MAX_ROWS};

/// Display dimensions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Number of rows (height in pixels, corresponds to COM outputs)
    pub rows: u16,
    /// Number of columns (width in pixels, corresponds to SEG outputs)
    pub cols: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - rows is 0 or > MAX_ROWS
    /// - cols is 0 or > MAX_COLUMNS
    /// - cols % 4 != 0 (the controller addresses columns four pixels at a time)
    pub fn new(rows: u16, cols: u16) -> Result<Self, BuilderError> {
        if rows == 0 || rows > MAX_ROWS {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        if cols == 0 || cols > MAX_COLUMNS || cols % 4 != 0 {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Calculate required buffer size in bytes (two pixels per byte)
    pub fn buffer_size(&self) -> usize {
        (self.rows as usize * self.cols as usize) / 2
    }

    /// Bytes per framebuffer row
    pub fn row_stride(&self) -> usize {
        self.cols as usize / 2
    }

    /// Number of controller column addresses the panel spans
    pub fn column_units(&self) -> u8 {
        (self.cols / 4) as u8
    }
}

/// Grayscale table used to map the 16 pixel levels to drive pulse widths
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GrayscaleTable {
    /// Linear table built into the controller
    #[default]
    Default,
    /// Custom pulse widths for GS1..=GS15 (GS0 is fixed)
    Custom([u8; 15]),
}

/// Display configuration
///
/// This struct holds all configurable parameters for the SSD1322 controller.
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Display dimensions
    pub dimensions: Dimensions,
    /// First controller column address used by the panel
    pub column_offset: u8,
    /// Pulse the reset line before the init sequence
    pub reset_on_begin: bool,
    /// Front clock divider / oscillator frequency
    pub clock_divider: u8,
    /// Vertical display offset
    pub display_offset: u8,
    /// Display start line
    pub start_line: u8,
    /// Re-map and dual COM line mode bytes
    pub remap: [u8; 2],
    /// GPIO pin mode
    pub gpio: u8,
    /// Function selection (0x01 selects the internal VDD regulator)
    pub function_select: u8,
    /// Display enhancement A bytes
    pub display_enhancement_a: [u8; 2],
    /// Segment output current
    pub contrast: u8,
    /// Master contrast current scale
    pub master_current: u8,
    /// Grayscale table selection
    pub grayscale_table: GrayscaleTable,
    /// Phase 1 / phase 2 period lengths
    pub phase_length: u8,
    /// Display enhancement B bytes
    pub display_enhancement_b: [u8; 2],
    /// Pre-charge voltage
    pub precharge_voltage: u8,
    /// Second pre-charge period
    pub second_precharge_period: u8,
    /// COM deselect voltage
    pub vcomh: u8,
}

impl Config {
    /// Last controller column address used by the panel
    pub fn column_end(&self) -> u8 {
        self.column_offset
            .saturating_add(self.dimensions.column_units())
            .saturating_sub(1)
    }

    /// Last row address used by the panel
    pub fn row_end(&self) -> u8 {
        self.dimensions.rows.saturating_sub(1) as u8
    }
}

/// Builder for constructing display configuration
///
/// Defaults match a 256x64 panel wired for dual COM mode, the most common
/// SSD1322 module.
///
/// # Example
///
/// ```
/// use ssd1322::{Builder, Dimensions};
///
/// let config = Builder::new()
///     .dimensions(Dimensions::new(64, 256).unwrap())
///     .contrast(0x9F)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.column_end(), 0x5B);
/// ```
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    column_offset: u8,
    reset_on_begin: bool,
    clock_divider: u8,
    display_offset: u8,
    start_line: u8,
    remap: [u8; 2],
    gpio: u8,
    function_select: u8,
    display_enhancement_a: [u8; 2],
    contrast: u8,
    master_current: u8,
    grayscale_table: GrayscaleTable,
    phase_length: u8,
    display_enhancement_b: [u8; 2],
    precharge_voltage: u8,
    second_precharge_period: u8,
    vcomh: u8,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            dimensions: None,
            column_offset: DEFAULT_COLUMN_OFFSET,
            reset_on_begin: true,
            clock_divider: 0x91,
            display_offset: 0x00,
            start_line: 0x00,
            // Horizontal increment, nibble re-map, scan COM[N-1] to COM0, dual COM
            remap: [0x14, 0x11],
            gpio: 0x00,
            function_select: 0x01,
            // External VSL, enhanced low grayscale quality
            display_enhancement_a: [0xA0, 0xFD],
            contrast: 0xFF,
            master_current: 0x0F,
            grayscale_table: GrayscaleTable::Default,
            phase_length: 0xE2,
            display_enhancement_b: [0x82, 0x20],
            // 0.6 x VCC
            precharge_voltage: 0x1F,
            second_precharge_period: 0x08,
            // 0.86 x VCC
            vcomh: 0x07,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set the first controller column address used by the panel
    pub fn column_offset(mut self, offset: u8) -> Self {
        self.column_offset = offset;
        self
    }

    /// Pulse the reset line in [`Display::begin`](crate::display::Display::begin)
    pub fn reset_on_begin(mut self, reset: bool) -> Self {
        self.reset_on_begin = reset;
        self
    }

    pub fn clock_divider(mut self, value: u8) -> Self {
        self.clock_divider = value;
        self
    }

    pub fn display_offset(mut self, value: u8) -> Self {
        self.display_offset = value;
        self
    }

    pub fn start_line(mut self, value: u8) -> Self {
        self.start_line = value;
        self
    }

    /// Set re-map / dual COM bytes
    pub fn remap(mut self, values: [u8; 2]) -> Self {
        self.remap = values;
        self
    }

    pub fn gpio(mut self, value: u8) -> Self {
        self.gpio = value;
        self
    }

    pub fn function_select(mut self, value: u8) -> Self {
        self.function_select = value;
        self
    }

    pub fn display_enhancement_a(mut self, values: [u8; 2]) -> Self {
        self.display_enhancement_a = values;
        self
    }

    /// Set segment output current (also restored by `dim(false)`)
    pub fn contrast(mut self, value: u8) -> Self {
        self.contrast = value;
        self
    }

    pub fn master_current(mut self, value: u8) -> Self {
        self.master_current = value;
        self
    }

    /// Set the grayscale table loaded during init
    pub fn grayscale_table(mut self, table: GrayscaleTable) -> Self {
        self.grayscale_table = table;
        self
    }

    pub fn phase_length(mut self, value: u8) -> Self {
        self.phase_length = value;
        self
    }

    pub fn display_enhancement_b(mut self, values: [u8; 2]) -> Self {
        self.display_enhancement_b = values;
        self
    }

    pub fn precharge_voltage(mut self, value: u8) -> Self {
        self.precharge_voltage = value;
        self
    }

    pub fn second_precharge_period(mut self, value: u8) -> Self {
        self.second_precharge_period = value;
        self
    }

    pub fn vcomh(mut self, value: u8) -> Self {
        self.vcomh = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set, or
    /// `BuilderError::InvalidColumnOffset` if the panel does not fit between
    /// the column offset and the last controller column.
    pub fn build(self) -> Result<Config, BuilderError> {
        let dimensions = self.dimensions.ok_or(BuilderError::MissingDimensions)?;
        let last_column = self.column_offset as u16 + dimensions.column_units() as u16 - 1;
        if last_column > MAX_COLUMN_ADDR as u16 {
            return Err(BuilderError::InvalidColumnOffset {
                offset: self.column_offset,
                cols: dimensions.cols,
            });
        }

        Ok(Config {
            dimensions,
            column_offset: self.column_offset,
            reset_on_begin: self.reset_on_begin,
            clock_divider: self.clock_divider,
            display_offset: self.display_offset,
            start_line: self.start_line,
            remap: self.remap,
            gpio: self.gpio,
            function_select: self.function_select,
            display_enhancement_a: self.display_enhancement_a,
            contrast: self.contrast,
            master_current: self.master_current,
            grayscale_table: self.grayscale_table,
            phase_length: self.phase_length,
            display_enhancement_b: self.display_enhancement_b,
            precharge_voltage: self.precharge_voltage,
            second_precharge_period: self.second_precharge_period,
            vcomh: self.vcomh,
        })
    }
}
