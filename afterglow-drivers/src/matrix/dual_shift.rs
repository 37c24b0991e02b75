//! Dual shift register matrix
//!
//! Both the group and element lines sit behind two daisy-chained shift
//! registers, written as a single latched 16-bit transfer with the
//! group byte in the high byte and the element byte in the low byte.
//! Three wires drive the whole display.

use afterglow_core::traits::LedMatrix;
use afterglow_hal::ShiftTransport;

use super::ActiveLevel;

/// Matrix with groups and elements behind one 16-bit transfer
///
/// At most 8 groups (one register of group bits).
pub struct DualShiftMatrix<S> {
    spi: S,
    group_xor: u8,
    element_xor: u8,
    /// Last raw element byte, replayed by `enable_group`. The one piece
    /// of state this otherwise stateless wiring keeps.
    prev_element: u8,
}

impl<S: ShiftTransport> DualShiftMatrix<S> {
    pub fn new(spi: S, group_on: ActiveLevel, element_on: ActiveLevel) -> Self {
        Self {
            spi,
            group_xor: group_on.xor_mask8(),
            element_xor: element_on.xor_mask8(),
            prev_element: 0,
        }
    }

    fn write_word(&mut self, group_pattern: u8, element_pattern: u8) {
        let group = group_pattern ^ self.group_xor;
        let element = element_pattern ^ self.element_xor;
        self.spi.write_u16(u16::from(group) << 8 | u16::from(element));
    }
}

impl<S: ShiftTransport> LedMatrix for DualShiftMatrix<S> {
    fn begin(&mut self) {
        self.spi.begin();
        self.clear();
    }

    fn end(&mut self) {
        self.spi.end();
    }

    fn draw(&mut self, group: u8, pattern: u16) {
        if group >= 8 {
            return;
        }
        let element = pattern as u8;
        self.write_word(1 << group, element);
        self.prev_element = element;
    }

    fn enable_group(&mut self, group: u8) {
        let element = self.prev_element;
        if group >= 8 {
            return;
        }
        self.write_word(1 << group, element);
    }

    fn disable_group(&mut self, _group: u8) {
        // All groups off; the remembered element byte survives so a
        // following enable_group restores the last drawn output.
        let element = self.prev_element;
        self.write_word(0, element);
    }

    fn clear(&mut self) {
        self.write_word(0, 0);
        self.prev_element = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingSpi, SpiEvent, SpiLog};

    fn matrix<'a>(
        log: &'a SpiLog,
        group_on: ActiveLevel,
        element_on: ActiveLevel,
    ) -> DualShiftMatrix<RecordingSpi<'a>> {
        DualShiftMatrix::new(log.transport(), group_on, element_on)
    }

    #[test]
    fn test_draw_packs_group_high_element_low() {
        let log = SpiLog::new();
        let mut matrix = matrix(&log, ActiveLevel::High, ActiveLevel::High);
        matrix.begin();
        log.clear();

        matrix.draw(2, 0b0000_0011);
        assert_eq!(log.words().as_slice(), &[0b0000_0100_0000_0011]);
    }

    #[test]
    fn test_enable_group_replays_last_element_byte() {
        let log = SpiLog::new();
        let mut matrix = matrix(&log, ActiveLevel::High, ActiveLevel::High);
        matrix.begin();
        log.clear();

        matrix.draw(2, 0b0000_0011);
        matrix.enable_group(2);

        let words = log.words();
        assert_eq!(words.len(), 2);
        // Identical low byte (element replay), group bit 2 in the high
        // byte of both transfers.
        assert_eq!(words[0] & 0x00FF, words[1] & 0x00FF);
        assert_eq!(words[1] >> 8, 1 << 2);
    }

    #[test]
    fn test_disable_then_enable_restores_output() {
        let log = SpiLog::new();
        let mut matrix = matrix(&log, ActiveLevel::High, ActiveLevel::High);
        matrix.begin();

        matrix.draw(1, 0x5B);
        log.clear();

        matrix.disable_group(1);
        matrix.enable_group(1);

        let words = log.words();
        assert_eq!(words.as_slice(), &[0x005B, 0x025B]);
    }

    #[test]
    fn test_active_low_sends_complement() {
        let log = SpiLog::new();
        let mut matrix = matrix(&log, ActiveLevel::Low, ActiveLevel::Low);

        matrix.draw(0, 0b0000_0110);
        let word = log.words()[0];
        assert_eq!(word >> 8, u16::from(!0b0000_0001u8));
        assert_eq!(word & 0xFF, u16::from(!0b0000_0110u8));
    }

    #[test]
    fn test_clear_sends_all_off_word_and_forgets() {
        let log = SpiLog::new();
        let mut matrix = matrix(&log, ActiveLevel::Low, ActiveLevel::High);
        matrix.draw(3, 0xFF);
        log.clear();

        matrix.clear();
        matrix.enable_group(3);

        // Off word: groups active-low idle 0xFF, elements active-high
        // idle 0x00; the enable after clear replays a blank byte.
        assert_eq!(log.words().as_slice(), &[0xFF00, 0xF700]);
    }

    #[test]
    fn test_out_of_range_group_ignored() {
        let log = SpiLog::new();
        let mut matrix = matrix(&log, ActiveLevel::High, ActiveLevel::High);
        matrix.begin();
        log.clear();

        matrix.draw(8, 0xFF);
        matrix.enable_group(200);

        assert!(log.events().is_empty());
    }

    #[test]
    fn test_begin_blanks_the_chain() {
        let log = SpiLog::new();
        matrix(&log, ActiveLevel::High, ActiveLevel::High).begin();

        assert_eq!(log.events().as_slice(), &[SpiEvent::Begin, SpiEvent::Word(0x0000)]);
    }
}
