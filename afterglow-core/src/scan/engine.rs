//! Refresh state machine
//!
//! The engine renders one PWM subfield per tick. The host invokes
//! [`ScanEngine::tick`] from a periodic timer interrupt or a tight
//! polling loop at the rate [`ScanConfig::field_rate_hz`] demands; every
//! tick does a bounded, allocation-free amount of work and issues matrix
//! operations only when a pin-level change is needed. A missed tick is
//! not an error: the cycle continues where it left off and brightness
//! accuracy degrades gracefully with jitter.

use crate::config::ScanConfig;
use crate::digit::{DigitPattern, DigitStore};
use crate::traits::LedMatrix;

/// Transient scanning state, reset by [`ScanEngine::begin`]
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
struct ScanState {
    /// Digit group owning the current dwell window
    current_digit: u8,
    /// Digit group rendered by the previous tick
    prev_digit: u8,
    /// Subfield within the current dwell window
    current_subfield: u16,
    /// Subfields the current digit stays on, from its brightness
    subfield_max: u16,
    /// Whether the current group is enabled right now
    rendered: bool,
    /// Last element pattern handed to the matrix, None before any draw
    last_pattern: Option<u16>,
}

impl ScanState {
    const fn reset() -> Self {
        Self {
            current_digit: 0,
            prev_digit: 0,
            current_subfield: 0,
            subfield_max: 0,
            rendered: false,
            last_pattern: None,
        }
    }
}

/// Subfields a digit stays enabled per dwell window
///
/// Truncates rather than rounds; 255 is special-cased so full
/// brightness never loses a subfield to truncation.
const fn subfield_max(subfields: u16, brightness: u8) -> u16 {
    if brightness == u8::MAX {
        subfields
    } else {
        ((subfields as u32 * brightness as u32) / 256) as u16
    }
}

/// Time-division multiplexed scanning engine
///
/// Owns the wiring matrix and the per-digit state table. `DIGITS` is
/// the number of digit groups (1 to 255).
#[derive(Debug)]
pub struct ScanEngine<M, const DIGITS: usize> {
    matrix: M,
    digits: DigitStore<DIGITS>,
    config: ScanConfig,
    state: ScanState,
    sleeping: bool,
}

impl<M: LedMatrix, const DIGITS: usize> ScanEngine<M, DIGITS> {
    /// Create an engine over the given wiring matrix
    ///
    /// Call [`begin`] before ticking.
    ///
    /// [`begin`]: ScanEngine::begin
    pub fn new(matrix: M, config: ScanConfig) -> Self {
        const {
            assert!(DIGITS >= 1 && DIGITS <= u8::MAX as usize);
        }
        Self {
            matrix,
            digits: DigitStore::new(),
            config,
            state: ScanState::reset(),
            sleeping: false,
        }
    }

    /// Configure the matrix transport and reset the scan cycle
    pub fn begin(&mut self) {
        self.matrix.begin();
        self.state = ScanState::reset();
        self.sleeping = false;
    }

    /// Blank the display and release the matrix transport
    pub fn end(&mut self) {
        self.matrix.clear();
        self.matrix.end();
    }

    /// Set pattern and brightness for one digit; no-op out of range
    pub fn set_pattern(&mut self, digit: u8, pattern: u16, brightness: u8) {
        self.digits.set_pattern(digit, pattern, brightness);
    }

    /// Set brightness for one digit; no-op out of range
    pub fn set_brightness(&mut self, digit: u8, brightness: u8) {
        self.digits.set_brightness(digit, brightness);
    }

    /// The per-digit state table
    pub fn digits(&self) -> &DigitStore<DIGITS> {
        &self.digits
    }

    /// The wiring matrix
    pub fn matrix(&self) -> &M {
        &self.matrix
    }

    /// The wiring matrix, mutably (host-side reconfiguration)
    pub fn matrix_mut(&mut self) -> &mut M {
        &mut self.matrix
    }

    /// Minimum tick rate for a target frame rate
    pub const fn field_rate_hz(&self, frames_per_second: u32) -> u32 {
        self.config.field_rate_hz(DIGITS, frames_per_second)
    }

    /// Quiesce outputs so pins can be released or repurposed
    ///
    /// Disables the active group and makes subsequent ticks silent
    /// until [`wake`] is called.
    ///
    /// [`wake`]: ScanEngine::wake
    pub fn prepare_to_sleep(&mut self) {
        self.matrix.disable_group(self.state.prev_digit);
        self.state.rendered = false;
        self.sleeping = true;
    }

    /// Resume scanning after [`prepare_to_sleep`]
    ///
    /// [`prepare_to_sleep`]: ScanEngine::prepare_to_sleep
    pub fn wake(&mut self) {
        self.sleeping = false;
    }

    /// Whether ticks are currently silenced
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    /// Render one PWM subfield
    ///
    /// Call at a fixed rate of at least
    /// `DIGITS * subfields * frame rate` Hz. Each invocation advances
    /// the subfield counter and, when it wraps, moves to the next digit
    /// group round-robin, so every digit gets an equal dwell window.
    pub fn tick(&mut self) {
        if self.sleeping {
            return;
        }

        let digit = self.state.current_digit;
        let entry: DigitPattern = self.digits.get(digit);

        // Dwell window start: switch groups and latch this digit's duty.
        if digit != self.state.prev_digit || self.state.current_subfield == 0 {
            self.matrix.disable_group(self.state.prev_digit);
            self.state.rendered = false;
            self.state.subfield_max = subfield_max(self.config.subfields, entry.brightness);
        }

        if self.state.current_subfield >= self.state.subfield_max {
            // Off portion of the duty cycle.
            if self.state.rendered {
                self.matrix.disable_group(digit);
                self.state.rendered = false;
            }
        } else if !self.state.rendered {
            // Serialize the element pattern only when it changed since
            // the last draw; bus traffic dominates the tick budget on
            // shift-register wirings.
            if self.state.last_pattern != Some(entry.pattern) {
                self.matrix.draw(digit, entry.pattern);
                self.state.last_pattern = Some(entry.pattern);
            }
            self.matrix.enable_group(digit);
            self.state.rendered = true;
        }

        self.state.prev_digit = digit;
        self.state.current_subfield += 1;
        if self.state.current_subfield >= self.config.subfields {
            self.state.current_subfield = 0;
            self.state.current_digit = (digit + 1) % DIGITS as u8;
        }
    }
}
