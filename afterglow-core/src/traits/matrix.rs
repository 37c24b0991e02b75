//! Wiring abstraction for an LED group/element matrix
//!
//! A matrix knows how to turn a specific group of LEDs on or off with a
//! specific element pattern for one physical wiring topology: direct
//! GPIO, one or two cascaded shift registers, or a serial-protocol chip.
//! The scanning engine drives whichever implementation it is constructed
//! with; the choice is made once, at construction, with static dispatch.

/// One LED display wiring topology
///
/// Conceptually stateless: the interface does not expose what is
/// currently displayed. An implementation may cache a small amount of
/// state to honor the contract (the dual-shift-register wiring must
/// remember its last element byte so [`enable_group`] can replay it
/// without a fresh serialization).
///
/// Callers always pass patterns in "1 = on" semantics; polarity
/// correction for active-low wiring or inverting driver transistors is
/// the implementation's job.
///
/// Out-of-range `group` arguments are silent no-ops on every method.
///
/// [`enable_group`]: LedMatrix::enable_group
pub trait LedMatrix {
    /// Set up pins and buses for output (idempotent)
    fn begin(&mut self);

    /// Release pins and buses to high impedance, undoing [`begin`]
    ///
    /// [`begin`]: LedMatrix::begin
    fn end(&mut self);

    /// Output the element pattern for the given group and record it as
    /// the last-drawn pattern
    fn draw(&mut self, group: u8, pattern: u16);

    /// Re-assert the group's activation line using the last-drawn
    /// element pattern, avoiding a redundant element serialization
    fn enable_group(&mut self, group: u8);

    /// De-assert the group's activation output
    fn disable_group(&mut self, group: u8);

    /// Blank all outputs
    fn clear(&mut self);
}
