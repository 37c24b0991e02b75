//! Serialized transfer abstractions
//!
//! Shift-register chains (74HC595) and register-addressed display chips
//! (MAX7219) receive whole bytes or words framed by a latch pulse rather
//! than individual pin toggles. This module defines the transport trait
//! for those transfers plus the configuration types a hardware SPI
//! peripheral implementation needs.

/// Latched serial transfer, MSB first
///
/// A transfer clocks the bits out and then pulses the latch so the
/// outputs change once, atomically. Transfers are fire-and-forget: a
/// shift-register load has no failure the driver could observe, so the
/// API is infallible and the refresh path never branches on a result.
pub trait ShiftTransport {
    /// Bring up the bus lines (idempotent)
    fn begin(&mut self) {}

    /// Release the bus lines to high impedance
    fn end(&mut self) {}

    /// Send one byte as a single latched transfer
    fn write_u8(&mut self, byte: u8);

    /// Send a 16-bit word as a single latched transfer, high byte first
    fn write_u16(&mut self, word: u16);
}

/// SPI mode (clock polarity and phase)
///
/// Shift-register parts latch data on the rising clock edge with the
/// clock idling low, which is `Mode0`. The other modes exist for
/// hardware peripherals shared with less common parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiMode {
    /// CPOL=0, CPHA=0
    Mode0,
    /// CPOL=0, CPHA=1
    Mode1,
    /// CPOL=1, CPHA=0
    Mode2,
    /// CPOL=1, CPHA=1
    Mode3,
}

impl SpiMode {
    /// Clock idles high
    pub const fn clock_idles_high(self) -> bool {
        matches!(self, Self::Mode2 | Self::Mode3)
    }

    /// Data captured on the second clock transition
    pub const fn capture_on_second_edge(self) -> bool {
        matches!(self, Self::Mode1 | Self::Mode3)
    }
}

/// Configuration for a hardware SPI backed [`ShiftTransport`]
///
/// The bit-banged transport in `afterglow-drivers` ignores this; a
/// chip-HAL implementation wrapping a real SPI peripheral applies it at
/// construction.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity and phase
    pub mode: SpiMode,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            frequency: 8_000_000, // 74HC595 shifts comfortably at 8 MHz
            mode: SpiMode::Mode0,
        }
    }
}
