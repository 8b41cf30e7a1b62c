//! PAW3902 register definitions.
//!
//! Only the documented user registers are named here. The mode banks in
//! [`crate::config`] additionally touch undocumented tuning registers across
//! several pages, and those stay as raw addresses.

#![allow(dead_code)] // Burst-only registers are listed for reference.

/// PAW3902 register addresses (page 0).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    /// Product identifier.
    ProductId = 0x00,
    /// Silicon revision.
    RevisionId = 0x01,
    /// Motion status. Reading it latches the delta registers.
    Motion = 0x02,
    /// Delta X low byte.
    DeltaXL = 0x03,
    /// Delta X high byte.
    DeltaXH = 0x04,
    /// Delta Y low byte.
    DeltaYL = 0x05,
    /// Delta Y high byte.
    DeltaYH = 0x06,
    /// Surface quality.
    Squal = 0x07,
    /// Sum of raw pixel data.
    RawDataSum = 0x08,
    /// Maximum raw pixel value.
    MaximumRawData = 0x09,
    /// Minimum raw pixel value.
    MinimumRawData = 0x0A,
    /// Shutter low byte.
    ShutterLower = 0x0B,
    /// Shutter high byte.
    ShutterUpper = 0x0C,
    /// Observation (operating state).
    Observation = 0x15,
    /// Motion burst opcode.
    MotionBurst = 0x16,
    /// Power-up reset.
    PowerUpReset = 0x3A,
    /// Shutdown.
    Shutdown = 0x3B,
    /// Raw pixel grab.
    RawDataGrab = 0x58,
    /// Inverted product identifier.
    InverseProductId = 0x5F,
    /// Register page select.
    PageSelect = 0x7F,
}

impl Register {
    /// Returns the register address.
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Expected PRODUCT_ID values.
pub mod product_id {
    /// Expected PRODUCT_ID register value.
    pub const EXPECTED: u8 = 0x49;
}

/// Expected INVERSE_PRODUCT_ID values.
pub mod inverse_product_id {
    /// Expected INVERSE_PRODUCT_ID register value.
    pub const EXPECTED: u8 = 0xB6;
}

/// POWER_UP_RESET register values.
pub mod power_up_reset {
    /// Reset command value.
    pub const RESET: u8 = 0x5A;
}

/// SHUTDOWN register values.
pub mod shutdown {
    /// Shutdown command value.
    pub const SHUTDOWN: u8 = 0xB6;
}

/// MOTION register bits.
pub mod motion {
    /// Motion occurred since the last read.
    pub const MOT: u8 = 0b1000_0000;
}

/// Shutter register layout.
pub mod shutter {
    /// Valid shutter bits.
    pub const MASK: u16 = 0x1FFF;
}

/// RAW_DATA_GRAB register bits.
pub mod raw_data_grab {
    /// Write to start a frame grab.
    pub const START: u8 = 0xFF;
    /// Validity marker bits.
    pub const MARKER_MASK: u8 = 0b1100_0000;
    /// Marker for a valid upper six bits.
    pub const UPPER_VALID: u8 = 0b0100_0000;
    /// Marker for valid lower two bits.
    pub const LOWER_VALID: u8 = 0b1000_0000;
    /// Pixel bits carried by the upper read.
    pub const UPPER_DATA: u8 = 0b0011_1111;
    /// Pixel bits carried by the lower read.
    pub const LOWER_DATA: u8 = 0b0000_1100;
}

/// PAGE_SELECT register values.
pub mod page {
    /// User register page.
    pub const USER: u8 = 0x00;
}

/// SPI address byte layout.
pub mod spi {
    /// Write flag set in the address byte.
    pub const WRITE: u8 = 0b1000_0000;
    /// Address bits.
    pub const ADDR_MASK: u8 = 0b0111_1111;
}
