//! Direct-wired matrix
//!
//! Every group and element line is attached to its own GPIO pin. The
//! cheapest wiring to drive (no serialization at all) and the most
//! expensive in pins: a 4-digit 7-segment module takes 12 of them.

use afterglow_core::traits::LedMatrix;
use afterglow_hal::{FlexPin, OutputPin};

use super::ActiveLevel;

/// Matrix with `NG` group pins and `NE` element pins on GPIO
///
/// Supports up to 16 element lines (14/16-segment modules).
pub struct DirectMatrix<P, const NG: usize, const NE: usize> {
    group_pins: [P; NG],
    element_pins: [P; NE],
    group_on: ActiveLevel,
    element_xor: u16,
}

impl<P: FlexPin, const NG: usize, const NE: usize> DirectMatrix<P, NG, NE> {
    pub fn new(
        group_pins: [P; NG],
        element_pins: [P; NE],
        group_on: ActiveLevel,
        element_on: ActiveLevel,
    ) -> Self {
        Self {
            group_pins,
            element_pins,
            group_on,
            element_xor: element_on.xor_mask16(),
        }
    }

    fn write_group(&mut self, group: u8, on: bool) {
        let level = on == self.group_on.on_level();
        if let Some(pin) = self.group_pins.get_mut(group as usize) {
            pin.set_state(level);
        }
    }

    fn write_elements(&mut self, pattern: u16) {
        let actual = pattern ^ self.element_xor;
        for (bit, pin) in self.element_pins.iter_mut().enumerate() {
            pin.set_state(actual >> bit & 1 != 0);
        }
    }
}

impl<P: FlexPin, const NG: usize, const NE: usize> LedMatrix for DirectMatrix<P, NG, NE> {
    fn begin(&mut self) {
        let group_off = !self.group_on.on_level();
        for pin in &mut self.group_pins {
            pin.set_state(group_off);
            pin.set_output();
        }

        let blank = self.element_xor;
        for (bit, pin) in self.element_pins.iter_mut().enumerate() {
            pin.set_state(blank >> bit & 1 != 0);
            pin.set_output();
        }
    }

    fn end(&mut self) {
        for pin in &mut self.group_pins {
            pin.set_input();
        }
        for pin in &mut self.element_pins {
            pin.set_input();
        }
    }

    fn draw(&mut self, group: u8, pattern: u16) {
        if group as usize >= NG {
            return;
        }
        self.write_elements(pattern);
    }

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
        self.write_elements(0);
    }
}
