//! Light modes.

use super::bank::{self, BankStep};

/// Sensor light mode.
///
/// Each mode programs a distinct register bank tuned for a lighting range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Bright surfaces.
    Bright,
    /// Low light (power-on default).
    #[default]
    LowLight,
    /// Super low light.
    SuperLowLight,
}

impl Mode {
    /// Returns the register bank for this mode.
    pub(crate) const fn bank(self) -> &'static [BankStep] {
        match self {
            Self::Bright => bank::BRIGHT,
            Self::LowLight => bank::LOW_LIGHT,
            Self::SuperLowLight => bank::SUPER_LOW_LIGHT,
        }
    }
}
