//! Interface abstraction for register I/O.
//!
//! The sensor speaks a single-byte-address SPI protocol with mandatory gaps
//! between the address and data phases. Two adapters implement it:
//! [`SpiInterface`] for a managed `SpiDevice` (chip-select and gaps expressed
//! as transaction operations) and [`SpiBusInterface`] for a raw `SpiBus` with
//! a GPIO chip-select and a MOSI hold pin.

pub(crate) mod bus;
pub(crate) mod spi;

pub use bus::SpiBusInterface;
pub use spi::SpiInterface;

use embedded_hal::spi::{MODE_3, Mode};
use embedded_hal_async::delay::DelayNs;

use crate::error::Error;
use crate::register::spi as spi_addr;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Number of bytes returned by a motion burst read.
pub const BURST_LEN: usize = 12;

/// Highest SPI clock the sensor accepts.
pub const MAX_SPI_FREQUENCY_HZ: u32 = 2_000_000;

/// SPI mode required by the sensor (clock idles high, MSB first).
pub const SPI_MODE: Mode = MODE_3;

pub(crate) const CS_SETUP_NS: u32 = 1_000;
pub(crate) const CS_HOLD_NS: u32 = 1_000;
pub(crate) const WRITE_ADDR_HOLD_NS: u32 = 10_000;
pub(crate) const READ_ADDR_HOLD_NS: u32 = 2_000;
pub(crate) const BURST_PREPARE_NS: u32 = 2_000;

/// Byte clocked out on MOSI while burst data is read.
pub(crate) const BURST_FILL: u8 = 0xFF;

pub(crate) const fn addr_write(reg: u8) -> u8 {
    (reg & spi_addr::ADDR_MASK) | spi_addr::WRITE
}

pub(crate) const fn addr_read(reg: u8) -> u8 {
    reg & spi_addr::ADDR_MASK
}

/// Minimal async register I/O for the device core.
///
/// Every method selects the chip, runs the transfer with the sensor's timing
/// gaps, and releases chip-select again, including on error.
#[allow(async_fn_in_trait)]
pub trait Interface: sealed::Sealed {
    /// Reads a single register.
    async fn read_reg(&mut self, reg: u8) -> Result<u8, Error>;
    /// Writes a single register.
    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error>;
    /// Runs a motion burst read into `buffer`.
    ///
    /// On error `buffer` holds whatever was received before the failure.
    async fn read_burst(&mut self, buffer: &mut [u8; BURST_LEN]) -> Result<(), Error>;
    /// Drives chip-select high, low, high again, holding each level for
    /// `hold_ns`. Used as the power-on reset pulse.
    async fn pulse_chip_select<D: DelayNs>(
        &mut self,
        delay: &mut D,
        hold_ns: u32,
    ) -> Result<(), Error>;
}
