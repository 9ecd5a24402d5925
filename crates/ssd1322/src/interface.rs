//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and three
//! implementations of it:
//!
//! - [`SpiInterface`]: 4-wire SPI through a hardware [`SpiDevice`]
//! - [`BitBangInterface`]: 4-wire SPI clocked out by toggling GPIO pins
//! - [`I2cInterface`]: I2C at a fixed 7-bit address
//!
//! The interface is chosen once, when the [`Display`](crate::display::Display)
//! is constructed, and every command and data byte goes through it.
//!
//! ## Hardware Requirements
//!
//! The SSD1322 in 4-wire SPI mode requires:
//! - SDIN (data) and SCLK (clock), either from an SPI peripheral or two GPIOs
//! - **CS**: Chip select (output, active low)
//! - **DC**: Data/Command select (output, low=command, high=data)
//! - **RST**: Reset (output, active low)
//!
//! ## Example
//!
//! ```rust,ignore
//! use ssd1322::{DisplayInterface, SpiInterface};
//!
//! // CS is handled by the SpiDevice
//! let mut interface = SpiInterface::new(spi_device, dc_pin, rst_pin);
//!
//! interface.reset(&mut delay)?;
//! interface.send_command(0xAF)?; // Display on
//! interface.send_data(&[0xFF, 0x00, 0xFF])?;
//! ```

use core::convert::Infallible;
use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::i2c::{I2c, Operation};
use embedded_hal::spi::SpiDevice;

use crate::error::BuilderError;

/// Default 7-bit I2C address (SA0 low)
pub const DEFAULT_I2C_ADDRESS: u8 = 0x3C;

/// I2C control byte announcing a command
const I2C_CONTROL_COMMAND: u8 = 0x00;
/// I2C control byte announcing a data stream
const I2C_CONTROL_DATA: u8 = 0x40;

/// Which physical transfer path an interface drives
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusMode {
    /// Dedicated SPI peripheral
    HardwareSpi,
    /// SPI clocked out in software on GPIO pins
    BitBang,
    /// I2C bus with a device address
    I2c,
}

impl core::fmt::Display for BusMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BusMode::HardwareSpi => write!(f, "hardware SPI"),
            BusMode::BitBang => write!(f, "bit-banged SPI"),
            BusMode::I2c => write!(f, "I2C"),
        }
    }
}

/// Trait for hardware interface to SSD1322 controller
///
/// This trait abstracts over different bus implementations,
/// allowing the [`Display`](crate::display::Display) to work with any
/// transfer path that satisfies embedded-hal traits.
///
/// ## Implementing
///
/// For most cases, use one of the provided interfaces. If you need
/// custom behavior (e.g. a parallel bus), implement this trait on your own type.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a command byte to the controller
    ///
    /// The byte must reach the controller with D/C low (or the I2C command
    /// control byte).
    ///
    /// # Errors
    ///
    /// Returns an error if the bus or a GPIO fails.
    fn send_command(&mut self, command: u8) -> Result<(), Self::Error>;

    /// Send data bytes to the controller
    ///
    /// The bytes must reach the controller with D/C high (or the I2C data
    /// control byte), as a single block.
    ///
    /// # Errors
    ///
    /// Returns an error if the bus or a GPIO fails.
    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Perform hardware reset
    ///
    /// RST high for 1ms, low for 10ms, then high again.
    ///
    /// # Errors
    ///
    /// Returns an error if the reset pin cannot be driven.
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error>;

    /// Transfer path used by this interface
    fn bus_mode(&self) -> BusMode;
}

/// Errors that can occur at the interface level
///
/// Generic over bus and GPIO error types.
#[derive(Debug, PartialEq)]
pub enum InterfaceError<BusErr, PinErr> {
    /// SPI or I2C communication error
    Bus(BusErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<BusErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<BusErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InterfaceError::Bus(e) => write!(f, "Bus error: {e:?}"),
            InterfaceError::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<BusErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<BusErr, PinErr> {}

fn pulse_reset<RST, D>(rst: &mut RST, delay: &mut D) -> Result<(), RST::Error>
where
    RST: OutputPin,
    D: DelayNs,
{
    rst.set_high()?;
    delay.delay_ms(1);
    rst.set_low()?;
    delay.delay_ms(10);
    rst.set_high()
}

/// Hardware SPI interface for SSD1322
///
/// Chip select belongs to the [`SpiDevice`], which asserts it for the length
/// of each write and releases it on every exit path.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
pub struct SpiInterface<SPI, DC, RST> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
}

impl<SPI, DC, RST> SpiInterface<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Create a new SpiInterface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`], owns CS)
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low)
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        Self { spi, dc, rst }
    }

    /// Release the bus and pins
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }
}

impl<SPI, DC, RST, PinErr> DisplayInterface for SpiInterface<SPI, DC, RST>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Bus)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Bus)
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        pulse_reset(&mut self.rst, delay).map_err(InterfaceError::Pin)
    }

    fn bus_mode(&self) -> BusMode {
        BusMode::HardwareSpi
    }
}

/// Software SPI interface for SSD1322
///
/// Clocks every byte out MSB first: data line set, clock raised, clock
/// lowered. The controller samples SDIN on the rising edge of SCLK, so the
/// clock must idle low and the data line must settle before the rising edge.
///
/// ## Type Parameters
///
/// All pins implement [`OutputPin`] with a shared error type.
///
/// * `SDIN` - Serial data pin
/// * `SCLK` - Serial clock pin
/// * `DC` - Data/Command pin
/// * `CS` - Chip select pin (active low)
/// * `RST` - Reset pin (active low)
pub struct BitBangInterface<SDIN, SCLK, DC, CS, RST> {
    sdin: SDIN,
    sclk: SCLK,
    dc: DC,
    cs: CS,
    rst: RST,
}

impl<SDIN, SCLK, DC, CS, RST, PinErr> BitBangInterface<SDIN, SCLK, DC, CS, RST>
where
    SDIN: OutputPin<Error = PinErr>,
    SCLK: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
{
    /// Create a new BitBangInterface
    ///
    /// The clock pin is expected to idle low.
    pub fn new(sdin: SDIN, sclk: SCLK, dc: DC, cs: CS, rst: RST) -> Self {
        Self {
            sdin,
            sclk,
            dc,
            cs,
            rst,
        }
    }

    /// Release the pins
    pub fn release(self) -> (SDIN, SCLK, DC, CS, RST) {
        (self.sdin, self.sclk, self.dc, self.cs, self.rst)
    }

    /// Select the chip for one block, then release it even if clocking failed
    fn transfer(&mut self, dc: PinState, bytes: &[u8]) -> Result<(), PinErr> {
        self.cs.set_high()?;
        self.dc.set_state(dc)?;
        self.cs.set_low()?;
        let written = self.clock_out(bytes);
        let released = self.cs.set_high();
        written.and(released)
    }

    fn clock_out(&mut self, bytes: &[u8]) -> Result<(), PinErr> {
        for &byte in bytes {
            for bit in (0..8).rev() {
                self.sdin.set_state(PinState::from(byte & (1 << bit) != 0))?;
                self.sclk.set_high()?;
                self.sclk.set_low()?;
            }
        }
        Ok(())
    }
}

impl<SDIN, SCLK, DC, CS, RST, PinErr> DisplayInterface for BitBangInterface<SDIN, SCLK, DC, CS, RST>
where
    SDIN: OutputPin<Error = PinErr>,
    SCLK: OutputPin<Error = PinErr>,
    DC: OutputPin<Error = PinErr>,
    CS: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<Infallible, PinErr>;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.transfer(PinState::Low, &[command])
            .map_err(InterfaceError::Pin)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.transfer(PinState::High, data)
            .map_err(InterfaceError::Pin)
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        pulse_reset(&mut self.rst, delay).map_err(InterfaceError::Pin)
    }

    fn bus_mode(&self) -> BusMode {
        BusMode::BitBang
    }
}

/// I2C interface for SSD1322 modules strapped for I2C
///
/// Every write starts with a control byte: 0x00 before a command,
/// 0x40 before a data block.
pub struct I2cInterface<I2C, RST> {
    i2c: I2C,
    rst: RST,
    address: u8,
}

impl<I2C, RST> I2cInterface<I2C, RST>
where
    I2C: I2c,
    RST: OutputPin,
{
    /// Create a new I2cInterface
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidAddress` if `address` is not a 7-bit address.
    pub fn new(i2c: I2C, rst: RST, address: u8) -> Result<Self, BuilderError> {
        if address > 0x7F {
            return Err(BuilderError::InvalidAddress(address));
        }
        Ok(Self { i2c, rst, address })
    }

    /// Device address in use
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the bus and reset pin
    pub fn release(self) -> (I2C, RST) {
        (self.i2c, self.rst)
    }
}

impl<I2C, RST> DisplayInterface for I2cInterface<I2C, RST>
where
    I2C: I2c,
    RST: OutputPin,
{
    type Error = InterfaceError<I2C::Error, RST::Error>;

    fn send_command(&mut self, command: u8) -> Result<(), Self::Error> {
        self.i2c
            .write(self.address, &[I2C_CONTROL_COMMAND, command])
            .map_err(InterfaceError::Bus)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        // Adjacent writes in one transaction go out without a repeated start
        self.i2c
            .transaction(
                self.address,
                &mut [
                    Operation::Write(&[I2C_CONTROL_DATA]),
                    Operation::Write(data),
                ],
            )
            .map_err(InterfaceError::Bus)
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        pulse_reset(&mut self.rst, delay).map_err(InterfaceError::Pin)
    }

    fn bus_mode(&self) -> BusMode {
        BusMode::I2c
    }
}
