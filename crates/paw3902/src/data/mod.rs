//! Decoded sensor data.

pub(crate) mod frame;

pub use frame::{FRAME_HEIGHT, FRAME_PIXELS, FRAME_WIDTH, Frame};

use crate::interface::BURST_LEN;
use crate::register::{inverse_product_id, motion, product_id, shutter};

/// One motion sample.
///
/// Deltas are signed counts since the previous read. `quality` is the
/// surface quality (SQUAL) and `shutter` the 13-bit exposure time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// X displacement.
    pub delta_x: i16,
    /// Y displacement.
    pub delta_y: i16,
    /// Surface quality.
    pub quality: u8,
    /// Shutter (exposure), 13 bits.
    pub shutter: u16,
}

impl Sample {
    /// Returns the sample with both deltas cleared.
    #[must_use]
    pub const fn without_motion(self) -> Self {
        Self {
            delta_x: 0,
            delta_y: 0,
            ..self
        }
    }
}

/// Full decode of a motion burst.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionReport {
    /// Raw MOTION register.
    pub motion: u8,
    /// Raw OBSERVATION register.
    pub observation: u8,
    /// Motion, quality and shutter.
    pub sample: Sample,
    /// Sum of raw pixel data.
    pub raw_data_sum: u8,
    /// Maximum raw pixel value.
    pub raw_data_max: u8,
    /// Minimum raw pixel value.
    pub raw_data_min: u8,
}

impl MotionReport {
    /// Decodes a 12-byte motion burst.
    ///
    /// Layout: motion, observation, delta X (LE), delta Y (LE), SQUAL,
    /// raw-data sum, raw max, raw min, shutter (BE).
    pub const fn from_burst(buf: &[u8; BURST_LEN]) -> Self {
        Self {
            motion: buf[0],
            observation: buf[1],
            sample: Sample {
                delta_x: i16::from_le_bytes([buf[2], buf[3]]),
                delta_y: i16::from_le_bytes([buf[4], buf[5]]),
                quality: buf[6],
                shutter: u16::from_be_bytes([buf[10], buf[11]]) & shutter::MASK,
            },
            raw_data_sum: buf[7],
            raw_data_max: buf[8],
            raw_data_min: buf[9],
        }
    }

    /// Returns `true` when the sensor flagged new motion.
    pub const fn has_motion(&self) -> bool {
        self.motion & motion::MOT != 0
    }
}

/// Identification registers read back from the sensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Identity {
    /// PRODUCT_ID (expected `0x49`).
    pub product_id: u8,
    /// REVISION_ID (informational).
    pub revision_id: u8,
    /// INVERSE_PRODUCT_ID (expected `0xB6`).
    pub inverse_product_id: u8,
}

impl Identity {
    /// Returns `true` when either ID register matches (not both).
    pub const fn matches(&self) -> bool {
        self.product_id == product_id::EXPECTED
            || self.inverse_product_id == inverse_product_id::EXPECTED
    }
}
