//! `SpiDevice` adapter for the PAW3902.
//!
//! The HAL owns chip-select. Timing gaps are expressed as
//! [`Operation::DelayNs`] entries so each register access is one transaction.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::{Operation, SpiDevice};

use super::{
    BURST_FILL, BURST_LEN, BURST_PREPARE_NS, CS_HOLD_NS, CS_SETUP_NS, Interface,
    READ_ADDR_HOLD_NS, WRITE_ADDR_HOLD_NS, addr_read, addr_write, sealed,
};
use crate::error::Error;
use crate::register::Register;

/// SPI register interface over a managed `SpiDevice`.
///
/// Configure the device for [`SPI_MODE`](super::SPI_MODE) at no more than
/// [`MAX_SPI_FREQUENCY_HZ`](super::MAX_SPI_FREQUENCY_HZ).
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Creates a new SPI interface with the given device.
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Releases the underlying SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> Interface for SpiInterface<SPI>
where
    SPI: SpiDevice,
{
    async fn read_reg(&mut self, reg: u8) -> Result<u8, Error> {
        let addr_buf = [addr_read(reg)];
        let mut value = [0u8];
        let mut ops = [
            Operation::DelayNs(CS_SETUP_NS),
            Operation::Write(&addr_buf),
            Operation::DelayNs(READ_ADDR_HOLD_NS),
            Operation::Read(&mut value),
            Operation::DelayNs(CS_HOLD_NS),
        ];
        self.spi.transaction(&mut ops).await.map_err(|_| Error::Bus)?;
        Ok(value[0])
    }

    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error> {
        let addr_buf = [addr_write(reg)];
        let data = [value];
        let mut ops = [
            Operation::DelayNs(CS_SETUP_NS),
            Operation::Write(&addr_buf),
            Operation::DelayNs(WRITE_ADDR_HOLD_NS),
            Operation::Write(&data),
            Operation::DelayNs(CS_HOLD_NS),
        ];
        self.spi.transaction(&mut ops).await.map_err(|_| Error::Bus)
    }

    async fn read_burst(&mut self, buffer: &mut [u8; BURST_LEN]) -> Result<(), Error> {
        // MOSI is held high for the data phase by clocking out 0xFF.
        let fill = [BURST_FILL; BURST_LEN];
        let opcode = [Register::MotionBurst.addr()];
        let mut ops = [
            Operation::DelayNs(CS_SETUP_NS),
            Operation::Write(&opcode),
            Operation::DelayNs(BURST_PREPARE_NS),
            Operation::Transfer(buffer.as_mut_slice(), &fill),
        ];
        self.spi.transaction(&mut ops).await.map_err(|_| Error::Bus)
    }

    async fn pulse_chip_select<D: DelayNs>(
        &mut self,
        delay: &mut D,
        hold_ns: u32,
    ) -> Result<(), Error> {
        delay.delay_ns(hold_ns).await;
        let mut ops = [Operation::DelayNs(hold_ns)];
        self.spi.transaction(&mut ops).await.map_err(|_| Error::Bus)?;
        delay.delay_ns(hold_ns).await;
        Ok(())
    }
}

impl<SPI> sealed::Sealed for SpiInterface<SPI> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{BusEvent, MockDelay, MockSpiDevice};
    use futures::executor::block_on;
    use std::vec;

    #[test]
    fn write_reg_sets_write_flag_and_gaps() {
        let mut interface = SpiInterface::new(MockSpiDevice::default());

        block_on(interface.write_reg(0x3A, 0x5A)).expect("write");

        let spi = interface.release();
        assert_eq!(
            spi.events(),
            [
                BusEvent::Delay(1_000),
                BusEvent::Write(vec![0xBA]),
                BusEvent::Delay(10_000),
                BusEvent::Write(vec![0x5A]),
                BusEvent::Delay(1_000),
            ]
        );
        assert_eq!(spi.transactions(), 1);
    }

    #[test]
    fn read_reg_clears_write_flag() {
        let mut interface = SpiInterface::new(MockSpiDevice::default().with_rx(&[0x49]));

        let value = block_on(interface.read_reg(0x00)).expect("read");

        assert_eq!(value, 0x49);
        let spi = interface.release();
        assert_eq!(
            spi.events(),
            [
                BusEvent::Delay(1_000),
                BusEvent::Write(vec![0x00]),
                BusEvent::Delay(2_000),
                BusEvent::Read(1),
                BusEvent::Delay(1_000),
            ]
        );
    }

    #[test]
    fn read_burst_clocks_twelve_bytes_with_mosi_high() {
        let payload = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let mut interface = SpiInterface::new(MockSpiDevice::default().with_rx(&payload));
        let mut buffer = [0u8; BURST_LEN];

        block_on(interface.read_burst(&mut buffer)).expect("burst");

        assert_eq!(buffer, payload);
        let spi = interface.release();
        assert_eq!(
            spi.events(),
            [
                BusEvent::Delay(1_000),
                BusEvent::Write(vec![0x16]),
                BusEvent::Delay(2_000),
                BusEvent::Transfer(vec![0xFF; BURST_LEN]),
            ]
        );
    }

    #[test]
    fn bus_failure_maps_to_bus_error() {
        let mut interface = SpiInterface::new(MockSpiDevice::default().failing());

        assert_eq!(block_on(interface.read_reg(0x02)), Err(Error::Bus));
        assert_eq!(block_on(interface.write_reg(0x02, 0x00)), Err(Error::Bus));
    }

    #[test]
    fn chip_select_pulse_wraps_an_empty_transaction() {
        let mut interface = SpiInterface::new(MockSpiDevice::default());
        let mut delay = MockDelay::default();

        block_on(interface.pulse_chip_select(&mut delay, 1_000_000)).expect("pulse");

        assert_eq!(delay.history(), [1_000_000, 1_000_000]);
        let spi = interface.release();
        assert_eq!(spi.events(), [BusEvent::Delay(1_000_000)]);
    }
}
