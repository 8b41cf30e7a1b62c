//! Raw `SpiBus` adapter with manual chip-select.
//!
//! Use this when the HAL cannot express per-transaction delays, or when the
//! board routes MOSI through a GPIO that must be held high during motion
//! bursts.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiBus;

use super::{
    BURST_FILL, BURST_LEN, BURST_PREPARE_NS, CS_HOLD_NS, CS_SETUP_NS, Interface,
    READ_ADDR_HOLD_NS, WRITE_ADDR_HOLD_NS, addr_read, addr_write, sealed,
};
use crate::error::Error;
use crate::register::Register;

/// SPI register interface over a raw bus with GPIO chip-select.
///
/// `HOLD` is driven high between the burst opcode and the burst data, then
/// low again before chip-select is released. Pass a dummy pin when MOSI does
/// not need holding.
pub struct SpiBusInterface<BUS, CS, HOLD, D> {
    bus: BUS,
    cs: CS,
    hold: HOLD,
    delay: D,
}

impl<BUS, CS, HOLD, D> SpiBusInterface<BUS, CS, HOLD, D>
where
    CS: OutputPin,
    HOLD: OutputPin,
{
    /// Creates a new bus interface and parks chip-select high.
    pub fn new(bus: BUS, mut cs: CS, mut hold: HOLD, delay: D) -> Self {
        // Pin errors surface on the first transfer.
        let _ = cs.set_high();
        let _ = hold.set_low();
        Self {
            bus,
            cs,
            hold,
            delay,
        }
    }
}

impl<BUS, CS, HOLD, D> SpiBusInterface<BUS, CS, HOLD, D> {
    /// Releases the bus, pins, and delay provider.
    pub fn release(self) -> (BUS, CS, HOLD, D) {
        (self.bus, self.cs, self.hold, self.delay)
    }
}

impl<BUS, CS, HOLD, D> SpiBusInterface<BUS, CS, HOLD, D>
where
    BUS: SpiBus,
    CS: OutputPin,
    HOLD: OutputPin,
    D: DelayNs,
{
    async fn select(&mut self) -> Result<(), Error> {
        self.cs.set_low().map_err(|_| Error::Pin)?;
        self.delay.delay_ns(CS_SETUP_NS).await;
        Ok(())
    }

    async fn deselect(&mut self) -> Result<(), Error> {
        let flushed = self.bus.flush().await.map_err(|_| Error::Bus);
        let released = self.cs.set_high().map_err(|_| Error::Pin);
        flushed.and(released)
    }
}

impl<BUS, CS, HOLD, D> Interface for SpiBusInterface<BUS, CS, HOLD, D>
where
    BUS: SpiBus,
    CS: OutputPin,
    HOLD: OutputPin,
    D: DelayNs,
{
    async fn read_reg(&mut self, reg: u8) -> Result<u8, Error> {
        self.select().await?;
        let mut value = [0u8];
        let mut status = self.bus.write(&[addr_read(reg)]).await;
        if status.is_ok() {
            self.delay.delay_ns(READ_ADDR_HOLD_NS).await;
            status = self.bus.read(&mut value).await;
        }
        self.delay.delay_ns(CS_HOLD_NS).await;
        let released = self.deselect().await;
        status.map_err(|_| Error::Bus)?;
        released?;
        Ok(value[0])
    }

    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error> {
        self.select().await?;
        let mut status = self.bus.write(&[addr_write(reg)]).await;
        if status.is_ok() {
            self.delay.delay_ns(WRITE_ADDR_HOLD_NS).await;
            status = self.bus.write(&[value]).await;
        }
        self.delay.delay_ns(CS_HOLD_NS).await;
        let released = self.deselect().await;
        status.map_err(|_| Error::Bus)?;
        released
    }

    async fn read_burst(&mut self, buffer: &mut [u8; BURST_LEN]) -> Result<(), Error> {
        self.select().await?;
        let mut status = self
            .bus
            .write(&[Register::MotionBurst.addr()])
            .await
            .map_err(|_| Error::Bus);
        let held = self.hold.set_high().map_err(|_| Error::Pin);
        self.delay.delay_ns(BURST_PREPARE_NS).await;
        if status.is_ok() {
            for slot in buffer.iter_mut() {
                let mut byte = [BURST_FILL];
                if self.bus.transfer_in_place(&mut byte).await.is_err() {
                    status = Err(Error::Bus);
                    break;
                }
                *slot = byte[0];
            }
        }
        let dropped = self.hold.set_low().map_err(|_| Error::Pin);
        let released = self.deselect().await;
        self.delay.delay_ns(CS_HOLD_NS).await;
        status.and(held).and(dropped).and(released)
    }

    async fn pulse_chip_select<P: DelayNs>(
        &mut self,
        delay: &mut P,
        hold_ns: u32,
    ) -> Result<(), Error> {
        self.cs.set_high().map_err(|_| Error::Pin)?;
        delay.delay_ns(hold_ns).await;
        self.cs.set_low().map_err(|_| Error::Pin)?;
        delay.delay_ns(hold_ns).await;
        self.cs.set_high().map_err(|_| Error::Pin)?;
        delay.delay_ns(hold_ns).await;
        Ok(())
    }
}

impl<BUS, CS, HOLD, D> sealed::Sealed for SpiBusInterface<BUS, CS, HOLD, D> {}
