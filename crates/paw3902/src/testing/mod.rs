//! Testing infrastructure (mock interfaces, buses, pins, delays).

pub(crate) mod mock;

pub(crate) use mock::{BusEvent, EventLog, LoggingDelay, MockPin, MockSpiBus, MockSpiDevice};
pub(crate) use mock::{MockDelay, MockInterface, MockMotionPin};
