//! Raw frame capture state and register sequences.
//!
//! Capture runs as a strict sequence: enter (forces LowLight and reconfigures
//! the analog front end), any number of captures, exit. While it is active
//! motion sampling and mode changes return [`Error::Busy`](crate::Error::Busy).

use crate::register::{Register, page, raw_data_grab};

/// Frame capture lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameCaptureState {
    /// Normal motion tracking.
    #[default]
    Normal,
    /// Entry sequence in progress.
    Configuring,
    /// Ready for `capture_frame`.
    Capturing,
    /// Exit sequence in progress.
    Restoring,
}

impl FrameCaptureState {
    /// Returns `true` outside of normal tracking.
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

const PAGE: u8 = Register::PageSelect.addr();

pub(crate) const ENTER_SEQUENCE: &[(u8, u8)] = &[
    (PAGE, 0x07),
    (0x41, 0x1D),
    (0x4C, 0x00),
    (PAGE, 0x08),
    (0x6A, 0x38),
    (PAGE, page::USER),
    (0x55, 0x04),
    (0x40, 0x80),
    (0x4D, 0x11),
];

pub(crate) const START_SEQUENCE: &[(u8, u8)] = &[
    (PAGE, page::USER),
    (Register::RawDataGrab.addr(), raw_data_grab::START),
];

pub(crate) const EXIT_SEQUENCE: &[(u8, u8)] = &[
    (PAGE, page::USER),
    (0x4D, 0x11),
    (0x40, 0x80),
    (0x55, 0x80),
    (PAGE, 0x08),
    (0x6A, 0x18),
    (PAGE, 0x07),
    (0x41, 0x0D),
    (0x4C, 0x80),
    (PAGE, page::USER),
];
