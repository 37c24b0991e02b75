//! Single shift register matrix
//!
//! The element lines sit behind one shift register fed by a latched
//! serial transfer; the group lines stay on GPIO. Eight element lines,
//! however many segments the register drives.

use afterglow_core::traits::LedMatrix;
use afterglow_hal::{FlexPin, OutputPin, ShiftTransport};

use super::ActiveLevel;

/// Matrix with serialized elements and `NG` direct group pins
pub struct SingleShiftMatrix<P, S, const NG: usize> {
    group_pins: [P; NG],
    spi: S,
    group_on: ActiveLevel,
    element_xor: u8,
}

impl<P: FlexPin, S: ShiftTransport, const NG: usize> SingleShiftMatrix<P, S, NG> {
    pub fn new(group_pins: [P; NG], spi: S, group_on: ActiveLevel, element_on: ActiveLevel) -> Self {
        Self {
            group_pins,
            spi,
            group_on,
            element_xor: element_on.xor_mask8(),
        }
    }

    fn write_group(&mut self, group: u8, on: bool) {
        let level = on == self.group_on.on_level();
        if let Some(pin) = self.group_pins.get_mut(group as usize) {
            pin.set_state(level);
        }
    }
}

impl<P: FlexPin, S: ShiftTransport, const NG: usize> LedMatrix for SingleShiftMatrix<P, S, NG> {
    fn begin(&mut self) {
        let group_off = !self.group_on.on_level();
        for pin in &mut self.group_pins {
            pin.set_state(group_off);
            pin.set_output();
        }

        self.spi.begin();
        self.spi.write_u8(self.element_xor); // blank the register
    }

    fn end(&mut self) {
        self.spi.end();
        for pin in &mut self.group_pins {
            pin.set_input();
        }
    }

    fn draw(&mut self, group: u8, pattern: u16) {
        if group as usize >= NG {
            return;
        }
        self.spi.write_u8(pattern as u8 ^ self.element_xor);
    }

    // The register keeps its element byte across group toggles, so
    // enabling and disabling never re-serializes.

    fn enable_group(&mut self, group: u8) {
        self.write_group(group, true);
    }

    fn disable_group(&mut self, group: u8) {
        self.write_group(group, false);
    }

    fn clear(&mut self) {
        for group in 0..NG as u8 {
            self.write_group(group, false);
        }
        self.spi.write_u8(self.element_xor);
    }
}
