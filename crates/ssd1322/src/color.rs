//! Pixel colors for the 4-bit grayscale framebuffer

/// Intensity written for [`Color::Off`]
pub const OFF_LEVEL: u8 = 0x0;
/// Intensity written for [`Color::On`]
pub const ON_LEVEL: u8 = 0xF;

/// Pixel value accepted by the drawing primitives
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    /// Pixel dark (GS0)
    Off,
    /// Pixel at full intensity (GS15)
    On,
    /// Flip the pixel's current intensity
    Invert,
    /// Raw intensity; only the low nibble is used
    Gray(u8),
}

impl Color {
    /// Intensity this color writes, or `None` for [`Color::Invert`]
    pub fn level(self) -> Option<u8> {
        match self {
            Color::Off => Some(OFF_LEVEL),
            Color::On => Some(ON_LEVEL),
            Color::Invert => None,
            Color::Gray(level) => Some(level & 0x0F),
        }
    }

    /// New nibble value given the current one
    pub(crate) fn apply(self, current: u8) -> u8 {
        match self.level() {
            Some(level) => level,
            None => (current ^ ON_LEVEL) & 0x0F,
        }
    }
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::Gray4> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::Gray4) -> Self {
        use embedded_graphics_core::pixelcolor::GrayColor;
        Color::Gray(color.luma())
    }
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::BinaryColor> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::BinaryColor) -> Self {
        match color {
            embedded_graphics_core::pixelcolor::BinaryColor::On => Color::On,
            embedded_graphics_core::pixelcolor::BinaryColor::Off => Color::Off,
        }
    }
}
