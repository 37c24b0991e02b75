//! TM1637 display controller
//!
//! Drives up to six 7-segment digits over the open-drain two-wire bus.
//! Each frame is a command/address/payload sequence; the chip
//! acknowledges every byte and the combined result is surfaced to the
//! caller.

use crate::bus::{Ack, WireBus};

/// Digits a TM1637 can scan
pub const MAX_DIGITS: usize = 6;

/// Command bytes per the TM1637 datasheet
mod cmd {
    /// Write display data, auto-incrementing address
    pub const DATA_AUTO: u8 = 0b0100_0000;
    /// Write display data at a fixed address
    pub const DATA_FIXED: u8 = 0b0100_0100;
    /// Address command, low 3 bits select the digit register
    pub const ADDR_BASE: u8 = 0b1100_0000;
    /// Display control, display off
    pub const DISPLAY_OFF: u8 = 0b1000_0000;
    /// Display control, display on; low 3 bits select brightness
    pub const DISPLAY_ON: u8 = 0b1000_1000;
}

/// TM1637 driver over any [`WireBus`]
pub struct Tm1637<W> {
    wire: W,
    /// Hardware brightness, 0-7
    brightness: u8,
    display_on: bool,
}

impl<W: WireBus> Tm1637<W> {
    pub fn new(wire: W) -> Self {
        Self {
            wire,
            brightness: 7,
            display_on: true,
        }
    }

    /// Bring up the bus lines
    pub fn begin(&mut self) {
        self.wire.begin();
    }

    /// Release the bus lines
    pub fn end(&mut self) {
        self.wire.end();
    }

    /// Push a whole frame of digit patterns (1 = segment on)
    ///
    /// Writes all patterns in one auto-increment burst starting at
    /// digit 0, then re-asserts the display control. Extra patterns
    /// beyond [`MAX_DIGITS`] are ignored.
    pub fn write_patterns(&mut self, patterns: &[u8]) -> Ack {
        self.wire.start();
        let mut ack = self.wire.write(cmd::DATA_AUTO);
        self.wire.stop();

        self.wire.start();
        ack = ack.join(self.wire.write(cmd::ADDR_BASE));
        for &pattern in patterns.iter().take(MAX_DIGITS) {
            ack = ack.join(self.wire.write(pattern));
        }
        self.wire.stop();

        ack.join(self.write_display_control())
    }

    /// Update a single digit in place (fixed-address mode)
    ///
    /// No-op returning `Ack` if `pos` is out of range.
    pub fn write_digit(&mut self, pos: u8, pattern: u8) -> Ack {
        if pos as usize >= MAX_DIGITS {
            return Ack::Ack;
        }

        self.wire.start();
        let mut ack = self.wire.write(cmd::DATA_FIXED);
        self.wire.stop();

        self.wire.start();
        ack = ack.join(self.wire.write(cmd::ADDR_BASE | pos));
        ack = ack.join(self.wire.write(pattern));
        self.wire.stop();
        ack
    }

    /// Turn the display on or off and set hardware brightness
    ///
    /// Brightness is clamped to 0-7.
    pub fn set_display(&mut self, on: bool, brightness: u8) -> Ack {
        self.display_on = on;
        self.brightness = brightness.min(7);
        self.write_display_control()
    }

    /// Blank every digit
    pub fn clear(&mut self) -> Ack {
        self.write_patterns(&[0; MAX_DIGITS])
    }

    fn write_display_control(&mut self) -> Ack {
        let command = if self.display_on {
            cmd::DISPLAY_ON | self.brightness
        } else {
            cmd::DISPLAY_OFF
        };
        self.wire.start();
        let ack = self.wire.write(command);
        self.wire.stop();
        ack
    }
}
