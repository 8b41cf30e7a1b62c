//! Configuration helpers for the PAW3902.

pub(crate) mod bank;
pub(crate) mod mode;

pub(crate) use bank::BankStep;
pub use mode::Mode;

use crate::policy::PolicyConfig;

/// PAW3902 driver configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Mode programmed by `initialize`.
    pub initial_mode: Mode,
    /// Let `update` switch modes automatically.
    pub auto_mode: bool,
    /// Skip reprogramming when the requested mode is already active.
    pub skip_redundant_mode: bool,
    /// Reads of RAW_DATA_GRAB per pixel half before a frame capture aborts.
    pub pixel_poll_limit: u32,
    /// Gating and transition thresholds.
    pub policy: PolicyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Default pixel poll limit.
    pub const DEFAULT_PIXEL_POLL_LIMIT: u32 = 512;

    /// Creates a default configuration.
    pub const fn new() -> Self {
        Self {
            initial_mode: Mode::LowLight,
            auto_mode: true,
            skip_redundant_mode: true,
            pixel_poll_limit: Self::DEFAULT_PIXEL_POLL_LIMIT,
            policy: PolicyConfig::DEFAULT,
        }
    }

    /// Sets the mode programmed at initialization.
    #[must_use]
    pub const fn with_initial_mode(mut self, mode: Mode) -> Self {
        self.initial_mode = mode;
        self
    }

    /// Enables or disables automatic mode switching in `update`.
    #[must_use]
    pub const fn with_auto_mode(mut self, enable: bool) -> Self {
        self.auto_mode = enable;
        self
    }

    /// Enables or disables the no-op check in `set_mode`.
    #[must_use]
    pub const fn with_skip_redundant_mode(mut self, enable: bool) -> Self {
        self.skip_redundant_mode = enable;
        self
    }

    /// Sets the per-half pixel poll limit. Zero is treated as one.
    #[must_use]
    pub const fn with_pixel_poll_limit(mut self, limit: u32) -> Self {
        self.pixel_poll_limit = if limit == 0 { 1 } else { limit };
        self
    }

    /// Sets the policy thresholds.
    #[must_use]
    pub const fn with_policy(mut self, policy: PolicyConfig) -> Self {
        self.policy = policy;
        self
    }
}
