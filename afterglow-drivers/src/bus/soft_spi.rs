//! Bit-banged latched SPI transfer
//!
//! Shift registers want mode 0: clock idles low, data sampled on the
//! rising edge, MSB first. The latch frames each transfer so the
//! register outputs change once per word, not per bit. No inter-bit
//! delay: 74HC595-class parts shift at tens of MHz, far above anything
//! a bit-banged loop produces.

use afterglow_hal::{FlexPin, OutputPin, ShiftTransport};

/// Software-timed latched SPI master
pub struct SoftSpi<SCK, MOSI, LATCH> {
    sck: SCK,
    mosi: MOSI,
    latch: LATCH,
}

impl<SCK: FlexPin, MOSI: FlexPin, LATCH: FlexPin> SoftSpi<SCK, MOSI, LATCH> {
    pub fn new(sck: SCK, mosi: MOSI, latch: LATCH) -> Self {
        Self { sck, mosi, latch }
    }

    fn shift_out(&mut self, data: u16, bits: u8) {
        let mut mask = 1u16 << (bits - 1);
        while mask != 0 {
            self.mosi.set_state(data & mask != 0);
            self.sck.set_high();
            self.sck.set_low();
            mask >>= 1;
        }
    }
}

impl<SCK: FlexPin, MOSI: FlexPin, LATCH: FlexPin> ShiftTransport for SoftSpi<SCK, MOSI, LATCH> {
    fn begin(&mut self) {
        self.sck.set_low();
        self.sck.set_output();
        self.mosi.set_low();
        self.mosi.set_output();
        self.latch.set_high();
        self.latch.set_output();
    }

    fn end(&mut self) {
        self.sck.set_input();
        self.mosi.set_input();
        self.latch.set_input();
    }

    fn write_u8(&mut self, byte: u8) {
        self.latch.set_low();
        self.shift_out(byte as u16, 8);
        self.latch.set_high();
    }

    fn write_u16(&mut self, word: u16) {
        self.latch.set_low();
        self.shift_out(word, 16);
        self.latch.set_high();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{PinAction, PinEvent, PinLog, RecordingPin};

    const SCK: u8 = 0;
    const MOSI: u8 = 1;
    const LATCH: u8 = 2;

    fn spi(log: &PinLog) -> SoftSpi<RecordingPin<'_>, RecordingPin<'_>, RecordingPin<'_>> {
        SoftSpi::new(log.pin(SCK), log.pin(MOSI), log.pin(LATCH))
    }

    /// MOSI level at each rising clock edge, MSB first on the wire
    fn clocked_bits(events: &[PinEvent]) -> u32 {
        let mut value = 0;
        let mut mosi_high = false;
        for event in events {
            match (event.pin, event.action) {
                (MOSI, PinAction::High) => mosi_high = true,
                (MOSI, PinAction::Low) => mosi_high = false,
                (SCK, PinAction::High) => value = (value << 1) | u32::from(mosi_high),
                _ => {}
            }
        }
        value
    }

    #[test]
    fn test_begin_drives_idle_levels() {
        let log = PinLog::new();
        spi(&log).begin();

        // Clock idles low, latch idles high, everything driven.
        assert!(!log.is_driven_high(SCK));
        assert!(log.is_driven_high(LATCH));
        assert!(log.is_output(SCK));
        assert!(log.is_output(MOSI));
        assert!(log.is_output(LATCH));
    }

    #[test]
    fn test_write_u8_msb_first() {
        let log = PinLog::new();
        let mut spi = spi(&log);
        spi.begin();
        log.clear();

        spi.write_u8(0xA5);

        assert_eq!(clocked_bits(&log.events()), 0xA5);

        // Latch frames the transfer: low before the first clock, high
        // after the last.
        let latch = log.actions_for(LATCH);
        assert_eq!(latch.as_slice(), &[PinAction::Low, PinAction::High]);
    }

    #[test]
    fn test_write_u16_is_one_transfer() {
        let log = PinLog::new();
        let mut spi = spi(&log);
        spi.begin();
        log.clear();

        spi.write_u16(0xBEEF);

        assert_eq!(clocked_bits(&log.events()), 0xBEEF);

        // One latch pulse, 16 clocks.
        let latch = log.actions_for(LATCH);
        assert_eq!(latch.as_slice(), &[PinAction::Low, PinAction::High]);
        let clocks = log
            .actions_for(SCK)
            .iter()
            .filter(|action| matches!(action, PinAction::High))
            .count();
        assert_eq!(clocks, 16);
    }

    #[test]
    fn test_end_floats_all_lines() {
        let log = PinLog::new();
        let mut spi = spi(&log);
        spi.begin();
        spi.end();

        assert!(!log.is_output(SCK));
        assert!(!log.is_output(MOSI));
        assert!(!log.is_output(LATCH));
    }
}
