//! Open-drain two-wire bus
//!
//! The lines carry a pull-up resistor and the target may pull them low,
//! so "high" is realized by releasing the pin to input mode and letting
//! the pull-up raise the line; "low" drives the latched-zero output
//! register. Actively driving high could fight the target's open-drain
//! transistor. Every transition is followed by a fixed settle delay to
//! satisfy the target's timing and the line's RC rise time.

use afterglow_hal::{FlexPin, InputPin, OutputPin};
use embedded_hal::delay::DelayNs;

use super::{Ack, WireBus};

/// Default bit delay in microseconds
///
/// TM1637-class chips clock far faster in theory, but common modules
/// pair a weak pull-up with enough line capacitance that the rise time
/// dominates; 100 us works on the slowest boards observed.
pub const DEFAULT_BIT_DELAY_US: u32 = 100;

/// Software-timed open-drain two-wire bus
pub struct SoftWire<CLK, DIO, D> {
    clk: CLK,
    dio: DIO,
    delay: D,
    bit_delay_us: u32,
}

impl<CLK: FlexPin, DIO: FlexPin, D: DelayNs> SoftWire<CLK, DIO, D> {
    pub fn new(clk: CLK, dio: DIO, delay: D, bit_delay_us: u32) -> Self {
        Self {
            clk,
            dio,
            delay,
            bit_delay_us,
        }
    }

    fn bit_delay(&mut self) {
        self.delay.delay_us(self.bit_delay_us);
    }

    // Direction change first, then the settle delay. The two steps stay
    // separate: "release to pull-up" is not a "write high".

    fn clock_high(&mut self) {
        self.clk.set_input();
        self.bit_delay();
    }

    fn clock_low(&mut self) {
        self.clk.set_output();
        self.bit_delay();
    }

    fn data_high(&mut self) {
        self.dio.set_input();
        self.bit_delay();
    }

    fn data_low(&mut self) {
        self.dio.set_output();
        self.bit_delay();
    }
}

impl<CLK: FlexPin, DIO: FlexPin, D: DelayNs> WireBus for SoftWire<CLK, DIO, D> {
    fn begin(&mut self) {
        // Latch both output registers low once; from here on only the
        // pin direction changes.
        self.clk.set_low();
        self.dio.set_low();

        // Idle with both lines released high.
        self.clock_high();
        self.data_high();
    }

    fn end(&mut self) {
        self.clock_high();
        self.data_high();
    }

    fn start(&mut self) {
        self.clock_high();
        self.data_high();

        self.data_low();
        self.clock_low();
    }

    fn stop(&mut self) {
        self.data_low();
        self.clock_high();
        self.data_high();
    }

    fn write(&mut self, byte: u8) -> Ack {
        let mut data = byte;
        for _ in 0..8 {
            if data & 0x01 != 0 {
                self.data_high();
            } else {
                self.data_low();
            }
            self.clock_high();
            self.clock_low();
            data >>= 1;
        }

        // The target places ACK/NACK on the falling edge of the 8th
        // clock; release DIO and sample after the settle delay.
        self.dio.set_input();
        self.bit_delay();
        let ack = if self.dio.is_high() {
            Ack::Nack
        } else {
            Ack::Ack
        };

        // The target releases DIO on the falling edge of the 9th clock.
        self.clock_high();
        self.clock_low();
        ack
    }
}
