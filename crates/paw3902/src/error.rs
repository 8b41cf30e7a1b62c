//! Error type for the PAW3902 driver.

/// Error type for PAW3902 operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Bus communication error (SPI transfer failed).
    Bus,
    /// Chip-select or data-line GPIO could not be driven.
    Pin,
    /// Neither the product ID nor the inverse product ID matched.
    WrongDevice,
    /// A raw-data validity marker did not show up within the poll limit.
    PollTimeout,
    /// The operation is not available while frame capture is active.
    Busy,
    /// Frame capture mode has not been entered.
    NotCapturing,
}
