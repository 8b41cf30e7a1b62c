//! Per-mode register banks.
//!
//! Vendor-supplied write sequences. Each write is followed by a settle delay
//! in the device core; pauses are mode-specific and part of the table.

/// One step of a register bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BankStep {
    /// Write `value` to register `reg` on the currently selected page.
    Write(u8, u8),
    /// Wait for the given number of milliseconds.
    PauseMs(u32),
}

use BankStep::{PauseMs as P, Write as W};

/// Register bank for bright surfaces.
pub(crate) const BRIGHT: &[BankStep] = &[
    W(0x7F, 0x00),
    W(0x55, 0x01),
    W(0x50, 0x07),
    W(0x7F, 0x0E),
    W(0x43, 0x10),
    W(0x48, 0x02),
    W(0x7F, 0x00),
    W(0x51, 0x7B),
    W(0x50, 0x00),
    W(0x55, 0x00),
    W(0x7F, 0x00),
    W(0x61, 0xAD),
    W(0x7F, 0x03),
    W(0x40, 0x00),
    W(0x7F, 0x05),
    W(0x41, 0xB3),
    W(0x43, 0xF1),
    W(0x45, 0x14),
    W(0x5F, 0x34),
    W(0x7B, 0x08),
    W(0x5E, 0x34),
    W(0x5B, 0x32),
    W(0x45, 0x17),
    W(0x70, 0xE5),
    W(0x71, 0xE5),
    W(0x7F, 0x06),
    W(0x44, 0x1B),
    W(0x40, 0xBF),
    W(0x4E, 0x3F),
    W(0x7F, 0x08),
    W(0x66, 0x44),
    W(0x65, 0x20),
    W(0x6A, 0x3A),
    W(0x61, 0x05),
    W(0x62, 0x05),
    W(0x7F, 0x09),
    W(0x4F, 0xAF),
    W(0x48, 0x80),
    W(0x49, 0x80),
    W(0x57, 0x77),
    W(0x5F, 0x40),
    W(0x60, 0x78),
    W(0x61, 0x78),
    W(0x62, 0x08),
    W(0x63, 0x50),
    W(0x7F, 0x0A),
    W(0x45, 0x60),
    W(0x7F, 0x00),
    W(0x4D, 0x11),
    W(0x55, 0x80),
    W(0x74, 0x21),
    W(0x75, 0x1F),
    W(0x4A, 0x78),
    W(0x4B, 0x78),
    W(0x44, 0x08),
    W(0x45, 0x50),
    W(0x64, 0xFE),
    W(0x65, 0x1F),
    W(0x72, 0x0A),
    W(0x73, 0x00),
    W(0x7F, 0x14),
    W(0x44, 0x84),
    W(0x65, 0x47),
    W(0x66, 0x18),
    W(0x63, 0x70),
    W(0x6F, 0x2C),
    W(0x7F, 0x15),
    W(0x48, 0x48),
    W(0x7F, 0x07),
    W(0x41, 0x0D),
    W(0x43, 0x14),
    W(0x4B, 0x0E),
    W(0x45, 0x0F),
    W(0x44, 0x42),
    W(0x4C, 0x80),
    W(0x7F, 0x10),
    W(0x5B, 0x03),
    W(0x7F, 0x07),
    W(0x40, 0x41),
    P(10),
    W(0x7F, 0x00),
    W(0x32, 0x00),
    W(0x7F, 0x07),
    W(0x40, 0x40),
    W(0x7F, 0x06),
    W(0x68, 0x70),
    W(0x69, 0x01),
    W(0x7F, 0x0D),
    W(0x48, 0xC0),
    W(0x6F, 0xD5),
    W(0x7F, 0x00),
    W(0x5B, 0xA0),
    W(0x4E, 0xA8),
    W(0x5A, 0x50),
    W(0x40, 0x80),
    W(0x73, 0x1F),
    P(10),
    W(0x73, 0x00),
];

/// Register bank for low light (power-on default).
pub(crate) const LOW_LIGHT: &[BankStep] = &[
    W(0x7F, 0x00),
    W(0x55, 0x01),
    W(0x50, 0x07),
    W(0x7F, 0x0E),
    W(0x43, 0x10),
    W(0x48, 0x02),
    W(0x7F, 0x00),
    W(0x51, 0x7B),
    W(0x50, 0x00),
    W(0x55, 0x00),
    W(0x7F, 0x00),
    W(0x61, 0xAD),
    W(0x7F, 0x03),
    W(0x40, 0x00),
    W(0x7F, 0x05),
    W(0x41, 0xB3),
    W(0x43, 0xF1),
    W(0x45, 0x14),
    W(0x5F, 0x34),
    W(0x7B, 0x08),
    W(0x5E, 0x34),
    W(0x5B, 0x65),
    W(0x6D, 0x65),
    W(0x45, 0x17),
    W(0x70, 0xE5),
    W(0x71, 0xE5),
    W(0x7F, 0x06),
    W(0x44, 0x1B),
    W(0x40, 0xBF),
    W(0x4E, 0x3F),
    W(0x7F, 0x08),
    W(0x66, 0x44),
    W(0x65, 0x20),
    W(0x6A, 0x3A),
    W(0x61, 0x05),
    W(0x62, 0x05),
    W(0x7F, 0x09),
    W(0x4F, 0xAF),
    W(0x48, 0x80),
    W(0x49, 0x80),
    W(0x57, 0x77),
    W(0x5F, 0x40),
    W(0x60, 0x78),
    W(0x61, 0x78),
    W(0x62, 0x08),
    W(0x63, 0x50),
    W(0x7F, 0x0A),
    W(0x45, 0x60),
    W(0x7F, 0x00),
    W(0x4D, 0x11),
    W(0x55, 0x80),
    W(0x74, 0x21),
    W(0x75, 0x1F),
    W(0x4A, 0x78),
    W(0x4B, 0x78),
    W(0x44, 0x08),
    W(0x45, 0x50),
    W(0x64, 0xFE),
    W(0x65, 0x1F),
    W(0x72, 0x0A),
    W(0x73, 0x00),
    W(0x7F, 0x14),
    W(0x44, 0x84),
    W(0x65, 0x67),
    W(0x66, 0x18),
    W(0x63, 0x70),
    W(0x6F, 0x2C),
    W(0x7F, 0x15),
    W(0x48, 0x48),
    W(0x7F, 0x07),
    W(0x41, 0x0D),
    W(0x43, 0x14),
    W(0x4B, 0x0E),
    W(0x45, 0x0F),
    W(0x44, 0x42),
    W(0x4C, 0x80),
    W(0x7F, 0x10),
    W(0x5B, 0x03),
    W(0x7F, 0x07),
    W(0x40, 0x41),
    P(10),
    W(0x7F, 0x00),
    W(0x32, 0x00),
    W(0x7F, 0x07),
    W(0x40, 0x40),
    W(0x7F, 0x06),
    W(0x68, 0x70),
    W(0x69, 0x01),
    W(0x7F, 0x0D),
    W(0x48, 0xC0),
    W(0x6F, 0xD5),
    W(0x7F, 0x00),
    W(0x5B, 0xA0),
    W(0x4E, 0xA8),
    W(0x5A, 0x50),
    W(0x40, 0x80),
    W(0x73, 0x1F),
    P(10),
    W(0x73, 0x00),
];

/// Register bank for super low light.
pub(crate) const SUPER_LOW_LIGHT: &[BankStep] = &[
    W(0x7F, 0x00),
    W(0x55, 0x01),
    W(0x50, 0x07),
    W(0x7F, 0x0E),
    W(0x43, 0x10),
    W(0x48, 0x04),
    W(0x7F, 0x00),
    W(0x51, 0x7B),
    W(0x50, 0x00),
    W(0x55, 0x00),
    W(0x7F, 0x00),
    W(0x61, 0xAD),
    W(0x7F, 0x03),
    W(0x40, 0x00),
    W(0x7F, 0x05),
    W(0x41, 0xB3),
    W(0x43, 0xF1),
    W(0x45, 0x14),
    W(0x5F, 0x34),
    W(0x7B, 0x08),
    W(0x5E, 0x34),
    W(0x5B, 0x32),
    W(0x6D, 0x32),
    W(0x45, 0x17),
    W(0x70, 0xE5),
    W(0x71, 0xE5),
    W(0x7F, 0x06),
    W(0x44, 0x1B),
    W(0x40, 0xBF),
    W(0x4E, 0x3F),
    W(0x7F, 0x08),
    W(0x66, 0x44),
    W(0x65, 0x20),
    W(0x6A, 0x3A),
    W(0x61, 0x05),
    W(0x62, 0x05),
    W(0x7F, 0x09),
    W(0x4F, 0xAF),
    W(0x48, 0x80),
    W(0x49, 0x80),
    W(0x57, 0x77),
    W(0x5F, 0x40),
    W(0x60, 0x78),
    W(0x61, 0x78),
    W(0x62, 0x08),
    W(0x63, 0x50),
    W(0x7F, 0x0A),
    W(0x45, 0x60),
    W(0x7F, 0x00),
    W(0x4D, 0x11),
    W(0x55, 0x80),
    W(0x74, 0x21),
    W(0x75, 0x1F),
    W(0x4A, 0x78),
    W(0x4B, 0x78),
    W(0x44, 0x08),
    W(0x45, 0x50),
    W(0x64, 0xCE),
    W(0x65, 0x0B),
    W(0x72, 0x0A),
    W(0x73, 0x00),
    W(0x7F, 0x14),
    W(0x44, 0x84),
    W(0x65, 0x67),
    W(0x66, 0x18),
    W(0x63, 0x70),
    W(0x6F, 0x2C),
    W(0x7F, 0x15),
    W(0x48, 0x48),
    W(0x7F, 0x07),
    W(0x41, 0x0D),
    W(0x43, 0x14),
    W(0x4B, 0x0E),
    W(0x45, 0x0F),
    W(0x44, 0x42),
    W(0x4C, 0x80),
    W(0x7F, 0x10),
    W(0x5B, 0x02),
    W(0x7F, 0x07),
    W(0x40, 0x41),
    P(25),
    W(0x7F, 0x00),
    W(0x32, 0x44),
    W(0x7F, 0x07),
    W(0x40, 0x40),
    W(0x7F, 0x06),
    W(0x68, 0x40),
    W(0x69, 0x02),
    W(0x7F, 0x0D),
    W(0x48, 0xC0),
    W(0x6F, 0xD5),
    W(0x7F, 0x00),
    W(0x5B, 0xA0),
    W(0x4E, 0xA8),
    W(0x5A, 0x50),
    W(0x40, 0x80),
    W(0x73, 0x0B),
    P(25),
    W(0x73, 0x00),
];
#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::Register;

    fn writes(bank: &[BankStep]) -> impl Iterator<Item = (u8, u8)> + '_ {
        bank.iter().filter_map(|step| match *step {
            BankStep::Write(reg, value) => Some((reg, value)),
            BankStep::PauseMs(_) => None,
        })
    }

    fn pauses(bank: &[BankStep]) -> impl Iterator<Item = u32> + '_ {
        bank.iter().filter_map(|step| match *step {
            BankStep::PauseMs(ms) => Some(ms),
            BankStep::Write(..) => None,
        })
    }

    #[test]
    fn banks_have_expected_lengths() {
        assert_eq!(writes(BRIGHT).count(), 96);
        assert_eq!(writes(LOW_LIGHT).count(), 97);
        assert_eq!(writes(SUPER_LOW_LIGHT).count(), 97);
    }

    #[test]
    fn pauses_are_mode_specific() {
        assert!(pauses(BRIGHT).eq([10, 10]));
        assert!(pauses(LOW_LIGHT).eq([10, 10]));
        assert!(pauses(SUPER_LOW_LIGHT).eq([25, 25]));
    }

    #[test]
    fn banks_start_on_user_page_and_end_clearing_0x73() {
        let page = Register::PageSelect.addr();
        for bank in [BRIGHT, LOW_LIGHT, SUPER_LOW_LIGHT] {
            assert_eq!(bank.first(), Some(&BankStep::Write(page, 0x00)));
            assert_eq!(bank.last(), Some(&BankStep::Write(0x73, 0x00)));
        }
    }

    #[test]
    fn banks_differ_only_in_tuned_registers() {
        assert!(!writes(BRIGHT).any(|(reg, _)| reg == 0x6D));
        assert!(writes(BRIGHT).any(|write| write == (0x5B, 0x32)));
        assert!(writes(LOW_LIGHT).any(|write| write == (0x6D, 0x65)));
        assert!(writes(LOW_LIGHT).any(|write| write == (0x65, 0x67)));
        assert!(writes(SUPER_LOW_LIGHT).any(|write| write == (0x48, 0x04)));
        assert!(writes(SUPER_LOW_LIGHT).any(|write| write == (0x32, 0x44)));
        assert!(writes(SUPER_LOW_LIGHT).any(|write| write == (0x73, 0x0B)));
        assert!(writes(LOW_LIGHT).any(|write| write == (0x73, 0x1F)));
    }
}
