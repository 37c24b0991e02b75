//! GPIO pin abstractions
//!
//! Provides traits for the digital pins that drive segment and digit
//! lines. Implementations live in chip-specific HALs.
//!
//! All operations are infallible: a GPIO register write cannot observe
//! failure, and the refresh path that calls these runs at field rate
//! with no room for error plumbing.

/// Digital output pin
///
/// Implementations should handle the actual hardware register
/// manipulation for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Pin whose direction can be switched at runtime
///
/// Two situations need this:
///
/// - Open-drain buses (TM1637-class two-wire) realize "high" by
///   releasing the line to an external pull-up. Actively driving high
///   could fight the device pulling the line low, so "high" must be
///   `set_input()` and "low" must be `set_output()` with the output
///   register latched low. The two steps stay distinct; there is no
///   single "write high" on such a line.
/// - Display teardown returns every line to high impedance so the pins
///   can be released or repurposed.
///
/// While in input mode the output register keeps its last written state;
/// switching back to output re-asserts it.
pub trait FlexPin: OutputPin + InputPin {
    /// Drive the line with the output register
    fn set_output(&mut self);

    /// Float the line (high impedance / read mode)
    fn set_input(&mut self);
}
