//! Convenience macros for common driver sequences.

/// Initialize a PAW3902 and confirm its identity.
///
/// This macro runs the typical bring-up flow:
/// 1. `initialize` (power-on pulse, reset, initial bank)
/// 2. `check_identity`
/// 3. Optional `set_mode`
///
/// The macro expands to a `Result<Identity, Error>` expression. It must be
/// invoked from an async context.
///
/// ```rust,no_run
/// # use ph_paw3902::{Mode, paw3902_init_sequence};
/// # async fn example(
/// #     flow: &mut ph_paw3902::Paw3902Spi<impl embedded_hal_async::spi::SpiDevice>,
/// #     delay: &mut impl embedded_hal_async::delay::DelayNs,
/// # ) -> Result<(), ph_paw3902::Error> {
/// let identity = paw3902_init_sequence!(
///     sensor: flow,
///     delay: delay,
///     mode: Mode::Bright,
/// )?;
/// # let _ = identity;
/// # Ok(())
/// # }
/// ```
#[macro_export]
macro_rules! paw3902_init_sequence {
    (
        sensor: $sensor:expr,
        delay: $delay:expr,
        mode: $mode:expr $(,)?
    ) => {{
        $sensor.initialize($delay).await?;
        let identity = $sensor.check_identity().await?;
        $sensor.set_mode($delay, $mode).await?;
        Ok::<$crate::Identity, $crate::Error>(identity)
    }};
    (
        sensor: $sensor:expr,
        delay: $delay:expr $(,)?
    ) => {{
        $sensor.initialize($delay).await?;
        let identity = $sensor.check_identity().await?;
        Ok::<$crate::Identity, $crate::Error>(identity)
    }};
}
