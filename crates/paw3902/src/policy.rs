//! Adaptive light-mode policy.
//!
//! A [`ModeController`] owns the current [`Mode`] and four hysteresis
//! counters. Each sample is gated (motion suppressed when the image is too
//! poor to trust) and then checked against debounced transition rules.
//! Evaluation is pure; the device core applies the returned transition by
//! reprogramming the sensor and committing the new mode.

use crate::config::Mode;
use crate::data::{MotionReport, Sample};

/// Quality gate for one mode.
///
/// A sample is suppressed when quality is below `quality_floor` *and* the
/// shutter has reached `shutter_ceiling`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GateThreshold {
    /// SQUAL below this value is considered untrustworthy.
    pub quality_floor: u8,
    /// Shutter at or above this value is considered saturated.
    pub shutter_ceiling: u16,
}

impl GateThreshold {
    /// Creates a new gate.
    pub const fn new(quality_floor: u8, shutter_ceiling: u16) -> Self {
        Self {
            quality_floor,
            shutter_ceiling,
        }
    }

    /// Returns `true` when `sample` should have its motion suppressed.
    pub const fn suppresses(self, sample: &Sample) -> bool {
        sample.quality < self.quality_floor && sample.shutter >= self.shutter_ceiling
    }
}

/// Thresholds for gating and mode transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PolicyConfig {
    /// Consecutive qualifying samples required before a debounced switch.
    pub debounce_samples: u8,
    /// Gate applied in [`Mode::Bright`].
    pub bright_gate: GateThreshold,
    /// Gate applied in [`Mode::LowLight`].
    pub low_light_gate: GateThreshold,
    /// Gate applied in [`Mode::SuperLowLight`].
    pub super_low_light_gate: GateThreshold,
    /// LowLight to Bright when shutter is below this.
    pub brighten_from_low_light_shutter: u16,
    /// SuperLowLight to LowLight when shutter is below this.
    pub brighten_from_super_low_light_shutter: u16,
    /// Bright/LowLight dim when shutter is at or above this.
    pub dim_shutter: u16,
    /// Bright to LowLight when raw-data sum is below this.
    pub dim_from_bright_raw_sum: u8,
    /// LowLight to SuperLowLight when raw-data sum is below this.
    pub dim_from_low_light_raw_sum: u8,
    /// SuperLowLight to LowLight immediately when shutter is below this.
    pub shutter_floor: u16,
}

impl PolicyConfig {
    /// Default thresholds.
    pub const DEFAULT: Self = Self {
        debounce_samples: 10,
        bright_gate: GateThreshold::new(25, 0x1FF0),
        low_light_gate: GateThreshold::new(70, 0x1FF0),
        super_low_light_gate: GateThreshold::new(85, 0x0BC0),
        brighten_from_low_light_shutter: 0x0BB8,
        brighten_from_super_low_light_shutter: 0x03E8,
        dim_shutter: 0x1E1F,
        dim_from_bright_raw_sum: 0x3C,
        dim_from_low_light_raw_sum: 0x5A,
        shutter_floor: 0x01F4,
    };

    /// Creates the default policy.
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets the debounce length. Zero is treated as one.
    #[must_use]
    pub const fn with_debounce_samples(mut self, samples: u8) -> Self {
        self.debounce_samples = if samples == 0 { 1 } else { samples };
        self
    }

    /// Sets the gate for `mode`.
    #[must_use]
    pub const fn with_gate(mut self, mode: Mode, gate: GateThreshold) -> Self {
        match mode {
            Mode::Bright => self.bright_gate = gate,
            Mode::LowLight => self.low_light_gate = gate,
            Mode::SuperLowLight => self.super_low_light_gate = gate,
        }
        self
    }

    /// Sets the emergency exit threshold out of SuperLowLight.
    #[must_use]
    pub const fn with_shutter_floor(mut self, shutter: u16) -> Self {
        self.shutter_floor = shutter;
        self
    }

    /// Returns the gate applied in `mode`.
    pub const fn gate(&self, mode: Mode) -> GateThreshold {
        match mode {
            Mode::Bright => self.bright_gate,
            Mode::LowLight => self.low_light_gate,
            Mode::SuperLowLight => self.super_low_light_gate,
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Consecutive-sample counters, one per debounced transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HysteresisCounters {
    /// LowLight to Bright.
    pub low_to_bright: u8,
    /// SuperLowLight to LowLight.
    pub super_to_low: u8,
    /// Bright to LowLight.
    pub bright_to_low: u8,
    /// LowLight to SuperLowLight.
    pub low_to_super: u8,
}

const fn advance(count: u8, qualifies: bool) -> u8 {
    if qualifies { count.saturating_add(1) } else { 0 }
}

/// Why a transition fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransitionReason {
    /// Debounced move to a brighter mode.
    Brighter,
    /// Debounced move to a dimmer mode.
    Dimmer,
    /// Immediate exit from SuperLowLight on a very short shutter.
    ShutterFloor,
}

/// A mode change requested by the policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeTransition {
    /// Mode the sample was evaluated in.
    pub from: Mode,
    /// Mode to switch to.
    pub to: Mode,
    /// Rule that fired.
    pub reason: TransitionReason,
}

/// Result of one sampling step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Update {
    /// Motion sample after gating.
    pub sample: Sample,
    /// Motion was suppressed by the quality gate.
    pub gated: bool,
    /// Full burst decode.
    pub report: MotionReport,
    /// Mode active after this step.
    pub mode: Mode,
    /// Transition applied during this step.
    pub transition: Option<ModeTransition>,
}

/// Outcome of evaluating one sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Evaluation {
    pub(crate) sample: Sample,
    pub(crate) gated: bool,
    pub(crate) transition: Option<ModeTransition>,
}

/// Mode state and hysteresis for the adaptive policy.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ModeController {
    mode: Mode,
    counters: HysteresisCounters,
    config: PolicyConfig,
}

impl ModeController {
    pub(crate) const fn new(mode: Mode, config: PolicyConfig) -> Self {
        Self {
            mode,
            counters: HysteresisCounters {
                low_to_bright: 0,
                super_to_low: 0,
                bright_to_low: 0,
                low_to_super: 0,
            },
            config,
        }
    }

    pub(crate) const fn mode(&self) -> Mode {
        self.mode
    }

    pub(crate) const fn counters(&self) -> HysteresisCounters {
        self.counters
    }

    pub(crate) fn set_config(&mut self, config: PolicyConfig) {
        self.config = config;
    }

    /// Records that the sensor now runs `mode` and clears all counters.
    pub(crate) fn commit(&mut self, mode: Mode) {
        self.mode = mode;
        self.counters = HysteresisCounters::default();
    }

    /// Applies the gate for the current mode without touching the counters.
    pub(crate) fn gate(&self, sample: Sample) -> Evaluation {
        let gated = self.config.gate(self.mode).suppresses(&sample);
        let sample = if gated { sample.without_motion() } else { sample };
        Evaluation {
            sample,
            gated,
            transition: None,
        }
    }

    /// Gates the sample and advances the hysteresis counters.
    ///
    /// All rules see the mode as it was when the sample arrived. The
    /// shutter-floor rule overrides any debounced result.
    pub(crate) fn evaluate(&mut self, report: &MotionReport) -> Evaluation {
        let mut evaluation = self.gate(report.sample);
        let config = self.config;
        let mode = self.mode;
        let shutter = report.sample.shutter;
        let raw_sum = report.raw_data_sum;
        let counters = &mut self.counters;

        counters.low_to_bright = advance(
            counters.low_to_bright,
            mode == Mode::LowLight && shutter < config.brighten_from_low_light_shutter,
        );
        counters.super_to_low = advance(
            counters.super_to_low,
            mode == Mode::SuperLowLight && shutter < config.brighten_from_super_low_light_shutter,
        );
        counters.bright_to_low = advance(
            counters.bright_to_low,
            mode == Mode::Bright
                && shutter >= config.dim_shutter
                && raw_sum < config.dim_from_bright_raw_sum,
        );
        counters.low_to_super = advance(
            counters.low_to_super,
            mode == Mode::LowLight
                && shutter >= config.dim_shutter
                && raw_sum < config.dim_from_low_light_raw_sum,
        );

        let debounce = config.debounce_samples.max(1);
        let mut target = None;
        if counters.low_to_bright >= debounce {
            target = Some((Mode::Bright, TransitionReason::Brighter));
        }
        if counters.super_to_low >= debounce {
            target = Some((Mode::LowLight, TransitionReason::Brighter));
        }
        if counters.bright_to_low >= debounce {
            target = Some((Mode::LowLight, TransitionReason::Dimmer));
        }
        if counters.low_to_super >= debounce {
            target = Some((Mode::SuperLowLight, TransitionReason::Dimmer));
        }
        if mode == Mode::SuperLowLight && shutter < config.shutter_floor {
            target = Some((Mode::LowLight, TransitionReason::ShutterFloor));
        }

        evaluation.transition = target.map(|(to, reason)| ModeTransition {
            from: mode,
            to,
            reason,
        });
        evaluation
    }
}
