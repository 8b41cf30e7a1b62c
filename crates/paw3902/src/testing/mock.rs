use core::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::digital;
use embedded_hal::spi::{self, ErrorKind};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use embedded_hal_async::spi::{Operation, SpiBus, SpiDevice};

use crate::error::Error;
use crate::interface::{BURST_LEN, Interface, sealed};

/// Register-level mock used by the device core tests.
///
/// Reads come from a per-register queue first and fall back to the register
/// file once the queue is drained. Writes update the register file.
#[derive(Clone, Debug)]
pub(crate) struct MockInterface {
    regs: [u8; 256],
    queued: Vec<VecDeque<u8>>,
    reads: Vec<u8>,
    writes: Vec<(u8, u8)>,
    burst: [u8; BURST_LEN],
    bursts: u32,
    pulses: Vec<u32>,
    failing_writes: u32,
    failing_reads: u32,
}

impl Default for MockInterface {
    fn default() -> Self {
        Self {
            regs: [0u8; 256],
            queued: (0..256).map(|_| VecDeque::new()).collect(),
            reads: Vec::new(),
            writes: Vec::new(),
            burst: [0u8; BURST_LEN],
            bursts: 0,
            pulses: Vec::new(),
            failing_writes: 0,
            failing_reads: 0,
        }
    }
}

impl MockInterface {
    pub(crate) fn with_reg(mut self, reg: u8, value: u8) -> Self {
        self.set_reg(reg, value);
        self
    }

    pub(crate) fn with_burst(mut self, burst: [u8; BURST_LEN]) -> Self {
        self.burst = burst;
        self
    }

    pub(crate) fn set_reg(&mut self, reg: u8, value: u8) {
        self.regs[reg as usize] = value;
    }

    pub(crate) fn set_burst(&mut self, burst: [u8; BURST_LEN]) {
        self.burst = burst;
    }

    pub(crate) fn queue_reads(&mut self, reg: u8, values: impl IntoIterator<Item = u8>) {
        self.queued[reg as usize].extend(values);
    }

    pub(crate) fn fail_next_writes(&mut self, count: u32) {
        self.failing_writes = count;
    }

    pub(crate) fn fail_next_reads(&mut self, count: u32) {
        self.failing_reads = count;
    }

    pub(crate) fn writes(&self) -> &[(u8, u8)] {
        &self.writes
    }

    pub(crate) fn reads(&self) -> &[u8] {
        &self.reads
    }

    pub(crate) fn bursts(&self) -> u32 {
        self.bursts
    }

    pub(crate) fn pulses(&self) -> &[u32] {
        &self.pulses
    }

    pub(crate) fn clear_log(&mut self) {
        self.writes.clear();
        self.reads.clear();
        self.bursts = 0;
    }
}

impl Interface for MockInterface {
    async fn read_reg(&mut self, reg: u8) -> Result<u8, Error> {
        self.reads.push(reg);
        if self.failing_reads > 0 {
            self.failing_reads -= 1;
            return Err(Error::Bus);
        }
        let value = self.queued[reg as usize]
            .pop_front()
            .unwrap_or(self.regs[reg as usize]);
        Ok(value)
    }

    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error> {
        self.writes.push((reg, value));
        if self.failing_writes > 0 {
            self.failing_writes -= 1;
            return Err(Error::Bus);
        }
        self.regs[reg as usize] = value;
        Ok(())
    }

    async fn read_burst(&mut self, buffer: &mut [u8; BURST_LEN]) -> Result<(), Error> {
        self.bursts += 1;
        *buffer = self.burst;
        Ok(())
    }

    async fn pulse_chip_select<D: DelayNs>(
        &mut self,
        delay: &mut D,
        hold_ns: u32,
    ) -> Result<(), Error> {
        for _ in 0..3 {
            delay.delay_ns(hold_ns).await;
        }
        self.pulses.push(hold_ns);
        Ok(())
    }
}

impl sealed::Sealed for MockInterface {}

#[derive(Default, Debug)]
pub(crate) struct MockDelay {
    pub(crate) calls: u32,
    pub(crate) last_ns: Option<u32>,
    history: Vec<u32>,
}

impl MockDelay {
    pub(crate) fn history(&self) -> &[u32] {
        &self.history
    }

    pub(crate) fn total_ns(&self) -> u64 {
        self.history.iter().map(|&ns| u64::from(ns)).sum()
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.last_ns = Some(ns);
        self.history.push(ns);
    }
}

/// Wire-level event recorded by the bus mocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum BusEvent {
    CsLow,
    CsHigh,
    HoldHigh,
    HoldLow,
    Delay(u32),
    Write(Vec<u8>),
    Read(usize),
    Transfer(Vec<u8>),
}

/// Shared, ordered event log for mocks that must interleave.
#[derive(Clone, Debug, Default)]
pub(crate) struct EventLog(Rc<RefCell<Vec<BusEvent>>>);

impl EventLog {
    pub(crate) fn push(&self, event: BusEvent) {
        self.0.borrow_mut().push(event);
    }

    pub(crate) fn events(&self) -> Vec<BusEvent> {
        self.0.borrow().clone()
    }

    pub(crate) fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MockBusError;

impl spi::Error for MockBusError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl digital::Error for MockBusError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

fn fill_from(rx: &mut VecDeque<u8>, words: &mut [u8]) {
    for word in words.iter_mut() {
        *word = rx.pop_front().unwrap_or(0);
    }
}

/// Managed SPI device that records each transaction's operations.
#[derive(Debug, Default)]
pub(crate) struct MockSpiDevice {
    log: EventLog,
    rx: VecDeque<u8>,
    transactions: u32,
    failing: bool,
}

impl MockSpiDevice {
    pub(crate) fn with_rx(mut self, bytes: &[u8]) -> Self {
        self.rx.extend(bytes.iter().copied());
        self
    }

    pub(crate) fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub(crate) fn events(&self) -> Vec<BusEvent> {
        self.log.events()
    }

    pub(crate) fn transactions(&self) -> u32 {
        self.transactions
    }
}

impl spi::ErrorType for MockSpiDevice {
    type Error = MockBusError;
}

impl SpiDevice for MockSpiDevice {
    async fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), MockBusError> {
        self.transactions += 1;
        if self.failing {
            return Err(MockBusError);
        }
        for op in operations.iter_mut() {
            match op {
                Operation::Read(words) => {
                    fill_from(&mut self.rx, words);
                    self.log.push(BusEvent::Read(words.len()));
                }
                Operation::Write(words) => self.log.push(BusEvent::Write(words.to_vec())),
                Operation::Transfer(read, write) => {
                    self.log.push(BusEvent::Transfer(write.to_vec()));
                    fill_from(&mut self.rx, read);
                }
                Operation::TransferInPlace(words) => {
                    self.log.push(BusEvent::Transfer(words.to_vec()));
                    fill_from(&mut self.rx, words);
                }
                Operation::DelayNs(ns) => self.log.push(BusEvent::Delay(*ns)),
            }
        }
        Ok(())
    }
}

/// Raw SPI bus sharing an event log with its pins.
#[derive(Debug)]
pub(crate) struct MockSpiBus {
    log: EventLog,
    rx: VecDeque<u8>,
    calls: usize,
    fail_from: Option<usize>,
}

impl MockSpiBus {
    pub(crate) fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            rx: VecDeque::new(),
            calls: 0,
            fail_from: None,
        }
    }

    pub(crate) fn with_rx(mut self, bytes: &[u8]) -> Self {
        self.rx.extend(bytes.iter().copied());
        self
    }

    /// Every bus call from index `calls` onward fails.
    pub(crate) fn failing_after(mut self, calls: usize) -> Self {
        self.fail_from = Some(calls);
        self
    }

    fn next_call(&mut self) -> Result<(), MockBusError> {
        let index = self.calls;
        self.calls += 1;
        match self.fail_from {
            Some(limit) if index >= limit => Err(MockBusError),
            _ => Ok(()),
        }
    }
}

impl spi::ErrorType for MockSpiBus {
    type Error = MockBusError;
}

impl SpiBus for MockSpiBus {
    async fn read(&mut self, words: &mut [u8]) -> Result<(), MockBusError> {
        self.next_call()?;
        fill_from(&mut self.rx, words);
        self.log.push(BusEvent::Read(words.len()));
        Ok(())
    }

    async fn write(&mut self, words: &[u8]) -> Result<(), MockBusError> {
        self.next_call()?;
        self.log.push(BusEvent::Write(words.to_vec()));
        Ok(())
    }

    async fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), MockBusError> {
        self.next_call()?;
        self.log.push(BusEvent::Transfer(write.to_vec()));
        fill_from(&mut self.rx, read);
        Ok(())
    }

    async fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), MockBusError> {
        self.next_call()?;
        self.log.push(BusEvent::Transfer(words.to_vec()));
        fill_from(&mut self.rx, words);
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), MockBusError> {
        Ok(())
    }
}

/// Output pin that logs its transitions.
#[derive(Debug)]
pub(crate) struct MockPin {
    log: EventLog,
    high: BusEvent,
    low: BusEvent,
}

impl MockPin {
    pub(crate) fn chip_select(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            high: BusEvent::CsHigh,
            low: BusEvent::CsLow,
        }
    }

    pub(crate) fn hold(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            high: BusEvent::HoldHigh,
            low: BusEvent::HoldLow,
        }
    }
}

impl digital::ErrorType for MockPin {
    type Error = MockBusError;
}

impl digital::OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), MockBusError> {
        self.log.push(self.low.clone());
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), MockBusError> {
        self.log.push(self.high.clone());
        Ok(())
    }
}

/// Delay provider that records into a shared event log.
#[derive(Debug)]
pub(crate) struct LoggingDelay {
    log: EventLog,
}

impl LoggingDelay {
    pub(crate) fn new(log: &EventLog) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for LoggingDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.log.push(BusEvent::Delay(ns));
    }
}

/// MOT input that resolves every wait immediately.
#[derive(Debug, Default)]
pub(crate) struct MockMotionPin {
    rising_edges: u32,
}

impl MockMotionPin {
    pub(crate) fn rising_edges(&self) -> u32 {
        self.rising_edges
    }
}

impl digital::ErrorType for MockMotionPin {
    type Error = MockBusError;
}

impl Wait for MockMotionPin {
    async fn wait_for_high(&mut self) -> Result<(), MockBusError> {
        Ok(())
    }

    async fn wait_for_low(&mut self) -> Result<(), MockBusError> {
        Ok(())
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), MockBusError> {
        self.rising_edges += 1;
        Ok(())
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), MockBusError> {
        Ok(())
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), MockBusError> {
        Ok(())
    }
}
