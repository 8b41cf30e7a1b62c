//! PAW3902 driver implementation.
//!
//! [`Paw3902`] wraps the device core with a transport and an optional MOT
//! (motion ready) pin.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use embedded_hal_async::spi::{SpiBus, SpiDevice};

use crate::config::{Config, Mode};
use crate::data::{Frame, Identity, MotionReport, Sample};
use crate::device::DeviceCore;
use crate::error::Error;
use crate::frame_capture::FrameCaptureState;
use crate::interface::{Interface, SpiBusInterface, SpiInterface};
use crate::interrupt::InterruptWaitError;
use crate::policy::{HysteresisCounters, Update};

/// PAW3902 optical flow driver.
pub struct Paw3902<I, MOT = ()> {
    core: DeviceCore<I>,
    motion: Option<MOT>,
}

/// `SpiDevice` type alias for the PAW3902 driver.
pub type Paw3902Spi<SPI, MOT = ()> = Paw3902<SpiInterface<SPI>, MOT>;
/// Raw `SpiBus` type alias for the PAW3902 driver.
pub type Paw3902SpiBus<BUS, CS, HOLD, D, MOT = ()> =
    Paw3902<SpiBusInterface<BUS, CS, HOLD, D>, MOT>;

impl<SPI, MOT> Paw3902<SpiInterface<SPI>, MOT>
where
    SPI: SpiDevice,
{
    /// Creates a new SPI-based driver with default settings.
    pub fn new_spi(spi: SPI, motion: Option<MOT>) -> Self {
        Self::with_spi_config(spi, motion, Config::default())
    }

    /// Creates a new SPI-based driver with a custom configuration.
    pub fn with_spi_config(spi: SPI, motion: Option<MOT>, config: Config) -> Self {
        let core = DeviceCore::new(SpiInterface::new(spi), config);
        Self { core, motion }
    }

    /// Releases the SPI device, consuming the driver.
    pub fn release(self) -> SPI {
        self.core.release().release()
    }

    /// Releases the SPI device and motion pin, consuming the driver.
    pub fn release_with_motion(self) -> (SPI, Option<MOT>) {
        let interface = self.core.release();
        (interface.release(), self.motion)
    }
}

impl<BUS, CS, HOLD, D, MOT> Paw3902<SpiBusInterface<BUS, CS, HOLD, D>, MOT>
where
    BUS: SpiBus,
    CS: OutputPin,
    HOLD: OutputPin,
    D: DelayNs,
{
    /// Creates a driver on a raw SPI bus with manual chip-select.
    ///
    /// `delay` times the gaps inside each transfer; the per-call delay
    /// arguments still time the longer pauses.
    pub fn new_spi_bus(bus: BUS, cs: CS, hold: HOLD, delay: D, motion: Option<MOT>) -> Self {
        Self::with_spi_bus_config(bus, cs, hold, delay, motion, Config::default())
    }

    /// Creates a raw-bus driver with a custom configuration.
    pub fn with_spi_bus_config(
        bus: BUS,
        cs: CS,
        hold: HOLD,
        delay: D,
        motion: Option<MOT>,
        config: Config,
    ) -> Self {
        let interface = SpiBusInterface::new(bus, cs, hold, delay);
        let core = DeviceCore::new(interface, config);
        Self { core, motion }
    }

    /// Releases the bus, pins, and delay, consuming the driver.
    pub fn release(self) -> (BUS, CS, HOLD, D) {
        self.core.release().release()
    }

    /// Releases everything including the motion pin.
    pub fn release_with_motion(self) -> ((BUS, CS, HOLD, D), Option<MOT>) {
        let interface = self.core.release();
        (interface.release(), self.motion)
    }
}

impl<I, MOT> Paw3902<I, MOT>
where
    I: Interface,
{
    /// Returns the current driver configuration.
    pub const fn config(&self) -> Config {
        self.core.config()
    }

    /// Updates the driver configuration.
    ///
    /// Policy thresholds apply from the next sample. `initial_mode` only
    /// takes effect on the next [`initialize`](Self::initialize).
    pub fn set_config(&mut self, config: Config) {
        self.core.set_config(config);
    }

    /// Returns the active light mode.
    pub const fn mode(&self) -> Mode {
        self.core.mode()
    }

    /// Returns the hysteresis counters.
    pub const fn counters(&self) -> HysteresisCounters {
        self.core.counters()
    }

    /// Returns the frame capture state.
    pub const fn frame_capture_state(&self) -> FrameCaptureState {
        self.core.frame_capture_state()
    }

    /// Number of transport errors seen since construction.
    ///
    /// Transfers that fail are logged and skipped; register sequences carry
    /// on. A growing count usually means wiring or clock problems.
    pub const fn bus_errors(&self) -> u32 {
        self.core.bus_errors()
    }

    /// Runs the power-on sequence and programs the configured initial mode.
    ///
    /// Pulses chip-select, resets the sensor, flushes stale motion data, and
    /// writes the full register bank. Call [`check_identity`](Self::check_identity)
    /// afterwards to confirm the part.
    pub async fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.core.initialize(delay).await
    }

    /// Reads the ID registers.
    ///
    /// Succeeds when either PRODUCT_ID or INVERSE_PRODUCT_ID matches.
    pub async fn check_identity(&mut self) -> Result<Identity, Error> {
        self.core.check_identity().await
    }

    /// Issues a power-up reset.
    ///
    /// The sensor returns to its power-on registers; the next
    /// [`set_mode`](Self::set_mode) always reprograms.
    pub async fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error> {
        self.core.reset(delay).await
    }

    /// Puts the sensor into shutdown. Wake it with [`initialize`](Self::initialize).
    pub async fn shutdown(&mut self) -> Result<(), Error> {
        self.core.shutdown().await
    }

    /// Programs `mode`, resetting the hysteresis counters.
    ///
    /// Returns `Ok(false)` without bus traffic when `mode` is already active
    /// and [`Config::skip_redundant_mode`] is set.
    pub async fn set_mode<D: DelayNs>(&mut self, delay: &mut D, mode: Mode) -> Result<bool, Error> {
        self.core.set_mode(delay, mode).await
    }

    /// Reads the MOTION register.
    pub async fn motion_status(&mut self) -> Result<u8, Error> {
        self.core.motion_status().await
    }

    /// Reads motion, quality and shutter through individual registers.
    pub async fn read_motion_count(&mut self) -> Result<Sample, Error> {
        self.core.read_motion_count().await
    }

    /// Reads and decodes a motion burst without gating.
    pub async fn read_report(&mut self) -> Result<MotionReport, Error> {
        self.core.read_report().await
    }

    /// Reads a motion burst and applies the quality gate for the active mode.
    ///
    /// Does not advance the mode policy; use [`update`](Self::update) for that.
    pub async fn read_sample(&mut self) -> Result<Sample, Error> {
        self.core.read_sample().await
    }

    /// Reads one sample, gates it, and runs one step of the mode policy.
    ///
    /// When a transition fires the new bank is programmed before returning.
    pub async fn update<D: DelayNs>(&mut self, delay: &mut D) -> Result<Update, Error> {
        self.core.update(delay).await
    }

    /// Enters raw frame capture, forcing LowLight first.
    pub async fn enter_frame_capture_mode<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<(), Error> {
        self.core.enter_frame_capture(delay).await
    }

    /// Captures one 35x35 frame into `frame`.
    ///
    /// Returns [`Error::PollTimeout`] if a pixel never becomes valid; the
    /// driver has then already left frame capture.
    pub async fn capture_frame<D: DelayNs>(
        &mut self,
        delay: &mut D,
        frame: &mut Frame,
    ) -> Result<(), Error> {
        self.core.capture_frame(delay, frame).await
    }

    /// Leaves frame capture and restores tracking registers.
    pub async fn exit_frame_capture_mode<D: DelayNs>(&mut self, delay: &mut D) {
        self.core.exit_frame_capture(delay).await;
    }

    /// Returns a reference to the motion pin.
    pub fn motion_pin(&self) -> Option<&MOT> {
        self.motion.as_ref()
    }

    /// Returns a mutable reference to the motion pin.
    pub fn motion_pin_mut(&mut self) -> Option<&mut MOT> {
        self.motion.as_mut()
    }

    /// Waits for a rising edge on MOT, signalling new motion data.
    pub async fn wait_data_ready(&mut self) -> Result<(), InterruptWaitError<MOT::Error>>
    where
        MOT: Wait,
    {
        match self.motion.as_mut() {
            Some(pin) => pin
                .wait_for_rising_edge()
                .await
                .map_err(InterruptWaitError::Pin),
            None => Err(InterruptWaitError::Missing),
        }
    }
}
