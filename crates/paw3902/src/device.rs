//! Device core operations for the PAW3902.

use embedded_hal_async::delay::DelayNs;

use crate::config::{BankStep, Config, Mode};
use crate::data::frame::pixel_from_halves;
use crate::data::{Frame, Identity, MotionReport, Sample};
use crate::error::Error;
use crate::frame_capture::{ENTER_SEQUENCE, EXIT_SEQUENCE, FrameCaptureState, START_SEQUENCE};
use crate::interface::{BURST_LEN, Interface};
use crate::policy::{HysteresisCounters, ModeController, Update};
use crate::register::{Register, power_up_reset, raw_data_grab, shutdown, shutter};

const POWER_ON_PULSE_NS: u32 = 1_000_000;
const RESET_SETTLE_NS: u32 = 1_000_000;
const WRITE_SETTLE_NS: u32 = 11_000;
const DISCARD_READ_GAP_NS: u32 = 2_000;
const FRAME_ENTER_SETTLE_NS: u32 = 1_000_000;

/// Read once after reset to clear stale motion data.
const DISCARD_REGS: [Register; 5] = [
    Register::Motion,
    Register::DeltaXL,
    Register::DeltaXH,
    Register::DeltaYL,
    Register::DeltaYH,
];

pub(crate) struct DeviceCore<I> {
    interface: I,
    config: Config,
    controller: ModeController,
    capture: FrameCaptureState,
    bank_loaded: bool,
    bus_errors: u32,
}

impl<I> DeviceCore<I>
where
    I: Interface,
{
    pub(crate) fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            controller: ModeController::new(config.initial_mode, config.policy),
            capture: FrameCaptureState::Normal,
            bank_loaded: false,
            bus_errors: 0,
        }
    }

    pub(crate) const fn config(&self) -> Config {
        self.config
    }

    pub(crate) fn set_config(&mut self, config: Config) {
        self.config = config;
        self.controller.set_config(config.policy);
    }

    pub(crate) const fn mode(&self) -> Mode {
        self.controller.mode()
    }

    pub(crate) const fn counters(&self) -> HysteresisCounters {
        self.controller.counters()
    }

    pub(crate) const fn frame_capture_state(&self) -> FrameCaptureState {
        self.capture
    }

    pub(crate) const fn bus_errors(&self) -> u32 {
        self.bus_errors
    }

    pub(crate) fn release(self) -> I {
        self.interface
    }

    /// Power-on pulse, reset, stale-data flush, then the initial bank.
    ///
    /// The initial bank is always written, even when it matches the mode the
    /// controller already holds.
    pub(crate) async fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        if let Err(err) = self
            .interface
            .pulse_chip_select(delay, POWER_ON_PULSE_NS)
            .await
        {
            self.record_bus_error();
            warn!("power-on pulse failed: {:?}", err);
        }
        self.capture = FrameCaptureState::Normal;
        self.power_up_reset(delay).await;
        for reg in DISCARD_REGS {
            self.read_register(reg.addr()).await;
            delay.delay_ns(DISCARD_READ_GAP_NS).await;
        }
        let mode = self.config.initial_mode;
        self.program_mode(delay, mode).await;
        info!("initialized in {:?}", mode);
        Ok(())
    }

    pub(crate) async fn check_identity(&mut self) -> Result<Identity, Error> {
        self.ensure_tracking()?;
        let identity = Identity {
            product_id: self.read_register(Register::ProductId.addr()).await,
            revision_id: self.read_register(Register::RevisionId.addr()).await,
            inverse_product_id: self.read_register(Register::InverseProductId.addr()).await,
        };
        debug!(
            "product id {:#x}, revision {:#x}, inverse product id {:#x}",
            identity.product_id,
            identity.revision_id,
            identity.inverse_product_id
        );
        if !identity.matches() {
            warn!("unexpected product id {:#x}", identity.product_id);
            return Err(Error::WrongDevice);
        }
        Ok(identity)
    }

    /// Resets the sensor to its power-on registers. The mode bank must be
    /// programmed again afterwards.
    pub(crate) async fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.ensure_tracking()?;
        self.power_up_reset(delay).await;
        Ok(())
    }

    pub(crate) async fn shutdown(&mut self) -> Result<(), Error> {
        self.ensure_tracking()?;
        self.write_register(Register::Shutdown.addr(), shutdown::SHUTDOWN)
            .await;
        self.bank_loaded = false;
        info!("shutdown");
        Ok(())
    }

    /// Returns `true` when the bank was written, `false` when skipped.
    pub(crate) async fn set_mode<D: DelayNs>(
        &mut self,
        delay: &mut D,
        mode: Mode,
    ) -> Result<bool, Error> {
        self.ensure_tracking()?;
        Ok(self.switch_mode(delay, mode).await)
    }

    pub(crate) async fn motion_status(&mut self) -> Result<u8, Error> {
        self.ensure_tracking()?;
        Ok(self.read_register(Register::Motion.addr()).await)
    }

    /// Reads motion through individual registers instead of a burst.
    pub(crate) async fn read_motion_count(&mut self) -> Result<Sample, Error> {
        self.ensure_tracking()?;
        let dx_l = self.read_register(Register::DeltaXL.addr()).await;
        let dx_h = self.read_register(Register::DeltaXH.addr()).await;
        let dy_l = self.read_register(Register::DeltaYL.addr()).await;
        let dy_h = self.read_register(Register::DeltaYH.addr()).await;
        let quality = self.read_register(Register::Squal.addr()).await;
        let shutter_l = self.read_register(Register::ShutterLower.addr()).await;
        let shutter_h = self.read_register(Register::ShutterUpper.addr()).await;
        Ok(Sample {
            delta_x: i16::from_le_bytes([dx_l, dx_h]),
            delta_y: i16::from_le_bytes([dy_l, dy_h]),
            quality,
            shutter: u16::from_le_bytes([shutter_l, shutter_h]) & shutter::MASK,
        })
    }

    pub(crate) async fn read_report(&mut self) -> Result<MotionReport, Error> {
        self.ensure_tracking()?;
        let burst = self.read_burst().await;
        Ok(MotionReport::from_burst(&burst))
    }

    /// Burst read gated by the current mode. Does not advance the policy.
    pub(crate) async fn read_sample(&mut self) -> Result<Sample, Error> {
        let report = self.read_report().await?;
        Ok(self.controller.gate(report.sample).sample)
    }

    /// Burst read, gating, and (with `auto_mode`) one policy step.
    pub(crate) async fn update<D: DelayNs>(&mut self, delay: &mut D) -> Result<Update, Error> {
        let report = self.read_report().await?;
        let evaluation = if self.config.auto_mode {
            self.controller.evaluate(&report)
        } else {
            self.controller.gate(report.sample)
        };
        if let Some(transition) = evaluation.transition {
            info!(
                "mode {:?} -> {:?} ({:?})",
                transition.from,
                transition.to,
                transition.reason
            );
            self.program_mode(delay, transition.to).await;
        }
        Ok(Update {
            sample: evaluation.sample,
            gated: evaluation.gated,
            report,
            mode: self.controller.mode(),
            transition: evaluation.transition,
        })
    }

    pub(crate) async fn enter_frame_capture<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<(), Error> {
        self.ensure_tracking()?;
        self.capture = FrameCaptureState::Configuring;
        debug!("entering frame capture from {:?}", self.controller.mode());
        self.switch_mode(delay, Mode::LowLight).await;
        self.write_sequence(delay, ENTER_SEQUENCE).await;
        delay.delay_ns(FRAME_ENTER_SETTLE_NS).await;
        self.capture = FrameCaptureState::Capturing;
        Ok(())
    }

    /// Grabs one 35x35 frame. On a poll timeout the exit sequence runs before
    /// the error is returned.
    pub(crate) async fn capture_frame<D: DelayNs>(
        &mut self,
        delay: &mut D,
        frame: &mut Frame,
    ) -> Result<(), Error> {
        if self.capture != FrameCaptureState::Capturing {
            return Err(Error::NotCapturing);
        }
        self.write_sequence(delay, START_SEQUENCE).await;
        for (index, slot) in frame.pixels_mut().iter_mut().enumerate() {
            match self.read_pixel().await {
                Ok(pixel) => *slot = pixel,
                Err(err) => {
                    warn!("frame capture aborted at pixel {}", index);
                    self.exit_frame_capture(delay).await;
                    return Err(err);
                }
            }
        }
        trace!("frame captured");
        Ok(())
    }

    /// Restores tracking registers. A no-op outside frame capture.
    pub(crate) async fn exit_frame_capture<D: DelayNs>(&mut self, delay: &mut D) {
        if !self.capture.is_active() {
            return;
        }
        self.capture = FrameCaptureState::Restoring;
        self.write_sequence(delay, EXIT_SEQUENCE).await;
        self.capture = FrameCaptureState::Normal;
        debug!("left frame capture");
    }

    fn ensure_tracking(&self) -> Result<(), Error> {
        if self.capture.is_active() {
            return Err(Error::Busy);
        }
        Ok(())
    }

    async fn switch_mode<D: DelayNs>(&mut self, delay: &mut D, mode: Mode) -> bool {
        if self.config.skip_redundant_mode && self.bank_loaded && self.controller.mode() == mode {
            trace!("{:?} already active", mode);
            return false;
        }
        self.program_mode(delay, mode).await;
        true
    }

    async fn program_mode<D: DelayNs>(&mut self, delay: &mut D, mode: Mode) {
        debug!("programming {:?} bank", mode);
        self.controller.commit(mode);
        self.power_up_reset(delay).await;
        for step in mode.bank() {
            match *step {
                BankStep::Write(reg, value) => {
                    self.write_register_settled(delay, reg, value).await;
                }
                BankStep::PauseMs(ms) => delay.delay_ms(ms).await,
            }
        }
        self.bank_loaded = true;
    }

    async fn power_up_reset<D: DelayNs>(&mut self, delay: &mut D) {
        self.write_register(Register::PowerUpReset.addr(), power_up_reset::RESET)
            .await;
        delay.delay_ns(RESET_SETTLE_NS).await;
        self.bank_loaded = false;
    }

    async fn read_pixel(&mut self) -> Result<u8, Error> {
        let upper = self.poll_raw_data(raw_data_grab::UPPER_VALID).await?;
        let lower = self.poll_raw_data(raw_data_grab::LOWER_VALID).await?;
        Ok(pixel_from_halves(upper, lower))
    }

    async fn poll_raw_data(&mut self, marker: u8) -> Result<u8, Error> {
        for _ in 0..self.config.pixel_poll_limit {
            let value = self.read_register(Register::RawDataGrab.addr()).await;
            if value & raw_data_grab::MARKER_MASK == marker {
                return Ok(value);
            }
        }
        Err(Error::PollTimeout)
    }

    async fn write_sequence<D: DelayNs>(&mut self, delay: &mut D, sequence: &[(u8, u8)]) {
        for &(reg, value) in sequence {
            self.write_register_settled(delay, reg, value).await;
        }
    }

    async fn write_register_settled<D: DelayNs>(&mut self, delay: &mut D, reg: u8, value: u8) {
        self.write_register(reg, value).await;
        delay.delay_ns(WRITE_SETTLE_NS).await;
    }

    async fn write_register(&mut self, reg: u8, value: u8) {
        if let Err(err) = self.interface.write_reg(reg, value).await {
            self.record_bus_error();
            warn!("write {:#x} <- {:#x} failed: {:?}", reg, value, err);
        }
    }

    async fn read_register(&mut self, reg: u8) -> u8 {
        match self.interface.read_reg(reg).await {
            Ok(value) => value,
            Err(err) => {
                self.record_bus_error();
                warn!("read {:#x} failed: {:?}", reg, err);
                0
            }
        }
    }

    async fn read_burst(&mut self) -> [u8; BURST_LEN] {
        let mut buffer = [0u8; BURST_LEN];
        if let Err(err) = self.interface.read_burst(&mut buffer).await {
            self.record_bus_error();
            warn!("motion burst failed: {:?}", err);
        }
        buffer
    }

    fn record_bus_error(&mut self) {
        self.bus_errors = self.bus_errors.saturating_add(1);
    }
}
