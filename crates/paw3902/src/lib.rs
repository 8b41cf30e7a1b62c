//! Async `#![no_std]` driver for the PixArt
//! [PAW3902](https://www.pixart.com/products-detail/40/PAW3902JF-TXQT) optical
//! flow sensor, with adaptive light-mode switching.
//!
//! The PAW3902 reports X/Y displacement, surface quality (SQUAL), and shutter
//! (exposure) over SPI. It runs in one of three light modes, each programmed
//! by a vendor register bank. This crate reads motion, gates samples the
//! sensor cannot trust, and moves between modes with debounced hysteresis as
//! lighting changes. A raw 35x35 frame capture mode is also supported.
//!
//! # Quick start (SpiDevice)
//!
//! ```rust,no_run
//! use ph_paw3902::{Config, Paw3902Spi};
//! # use embedded_hal_async::delay::DelayNs;
//! # use embedded_hal_async::spi::SpiDevice;
//! #
//! # async fn example<SPI: SpiDevice, D: DelayNs>(spi: SPI, delay: &mut D) -> Result<(), ph_paw3902::Error> {
//! let mut flow: Paw3902Spi<SPI> = Paw3902Spi::with_spi_config(spi, None, Config::new());
//! flow.initialize(delay).await?;
//! flow.check_identity().await?;
//! loop {
//!     let update = flow.update(delay).await?;
//!     let _ = (update.sample.delta_x, update.sample.delta_y);
//! }
//! # }
//! ```
//!
//! Configure the SPI device for [`SPI_MODE`] at up to [`MAX_SPI_FREQUENCY_HZ`].
//! When the HAL cannot honour `Operation::DelayNs` inside a transaction, use
//! [`Paw3902SpiBus`] with a GPIO chip-select instead.
//!
//! # Light modes
//!
//! [`Mode::Bright`], [`Mode::LowLight`] (power-on default) and
//! [`Mode::SuperLowLight`]. [`Paw3902::update`] runs one policy step per
//! sample:
//!
//! - Motion is zeroed when SQUAL is below the mode's floor while the shutter
//!   is saturated.
//! - Brighter/dimmer transitions need ten consecutive qualifying samples.
//! - A very short shutter in SuperLowLight drops to LowLight immediately.
//!
//! Thresholds live in [`PolicyConfig`].
//!
//! # Frame capture
//!
//! [`Paw3902::enter_frame_capture_mode`], any number of
//! [`Paw3902::capture_frame`] calls, then [`Paw3902::exit_frame_capture_mode`].
//! Motion reads and mode changes return [`Error::Busy`] in between.
//!
//! # Logging
//!
//! Enable the `defmt` or `log` feature to route driver diagnostics to that
//! framework. Transport errors are logged and counted
//! ([`Paw3902::bus_errors`]) rather than aborting register sequences.

#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_code)]
// Clippy lint levels live here.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements,
    clippy::let_underscore_future
)]

#[cfg(test)]
extern crate std;

mod fmt;

mod config;
mod data;
mod device;
mod driver;
mod error;
mod frame_capture;
mod interface;
mod interrupt;
mod macros;
mod policy;
mod register;

#[cfg(test)]
mod testing;

// Interface layer
pub use interface::{BURST_LEN, MAX_SPI_FREQUENCY_HZ, SPI_MODE};
pub use interface::{SpiBusInterface, SpiInterface};

// Configuration
pub use config::{Config, Mode};
pub use policy::{GateThreshold, PolicyConfig};

// Driver
pub use driver::{Paw3902, Paw3902Spi, Paw3902SpiBus};

// Data types
pub use data::{FRAME_HEIGHT, FRAME_PIXELS, FRAME_WIDTH, Frame};
pub use data::{Identity, MotionReport, Sample};
pub use policy::{HysteresisCounters, ModeTransition, TransitionReason, Update};

// Features
pub use error::Error;
pub use frame_capture::FrameCaptureState;
pub use interrupt::{DataReadyFlag, InterruptWaitError};
