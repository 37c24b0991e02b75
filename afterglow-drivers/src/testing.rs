//! Recording test doubles
//!
//! Injectable transports that record every call into a caller-owned
//! log, so host tests can assert on the exact pin and bus activity a
//! driver produces. A log is a plain value the test owns; the doubles
//! borrow it and are passed in like any other transport. There is no
//! process-wide state.

use core::cell::{Cell, RefCell};

use afterglow_hal::{FlexPin, InputPin, OutputPin, ShiftTransport};
use heapless::Vec;

use crate::bus::{Ack, WireBus};

/// Pins one [`PinLog`] tracks; handles use ids `0..MAX_PINS`
pub const MAX_PINS: usize = 16;

/// Capacity of the event logs; older events are kept, overflow is
/// silently dropped
pub const LOG_CAPACITY: usize = 512;

/// One recorded pin operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinAction {
    /// Output register set high
    High,
    /// Output register set low
    Low,
    /// Direction switched to driven
    Output,
    /// Direction switched to floating
    Input,
}

/// A pin operation attributed to a pin id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinEvent {
    pub pin: u8,
    pub action: PinAction,
}

struct PinLogState {
    events: Vec<PinEvent, LOG_CAPACITY>,
    /// Output register per pin
    driven: [bool; MAX_PINS],
    /// External line level seen while a pin floats; defaults high, as
    /// with a pull-up and no device holding the line
    level: [bool; MAX_PINS],
    /// Direction per pin, true = driven
    output: [bool; MAX_PINS],
}

/// Caller-owned log shared by a set of [`RecordingPin`] handles
pub struct PinLog {
    state: RefCell<PinLogState>,
}

impl PinLog {
    pub fn new() -> Self {
        Self {
            state: RefCell::new(PinLogState {
                events: Vec::new(),
                driven: [false; MAX_PINS],
                level: [true; MAX_PINS],
                output: [false; MAX_PINS],
            }),
        }
    }

    /// Handle for one pin id; all records land in this log
    pub fn pin(&self, id: u8) -> RecordingPin<'_> {
        RecordingPin { id, log: self }
    }

    /// Set the level an input-mode read observes (simulates the device
    /// or pull-up on the line)
    pub fn set_level(&self, id: u8, high: bool) {
        self.state.borrow_mut().level[id as usize] = high;
    }

    /// Snapshot of every recorded event, in order
    pub fn events(&self) -> Vec<PinEvent, LOG_CAPACITY> {
        self.state.borrow().events.clone()
    }

    /// Actions recorded for one pin, in order
    pub fn actions_for(&self, id: u8) -> Vec<PinAction, LOG_CAPACITY> {
        self.state
            .borrow()
            .events
            .iter()
            .filter(|event| event.pin == id)
            .map(|event| event.action)
            .collect()
    }

    /// Whether the pin's output register currently holds a 1
    pub fn is_driven_high(&self, id: u8) -> bool {
        self.state.borrow().driven[id as usize]
    }

    /// Whether the pin is currently in output mode
    pub fn is_output(&self, id: u8) -> bool {
        self.state.borrow().output[id as usize]
    }

    /// Drop recorded events, keeping pin states
    pub fn clear(&self) {
        self.state.borrow_mut().events.clear();
    }

    fn record(&self, pin: u8, action: PinAction) {
        let mut state = self.state.borrow_mut();
        let id = pin as usize;
        match action {
            PinAction::High => state.driven[id] = true,
            PinAction::Low => state.driven[id] = false,
            PinAction::Output => state.output[id] = true,
            PinAction::Input => state.output[id] = false,
        }
        let _ = state.events.push(PinEvent { pin, action });
    }
}

impl Default for PinLog {
    fn default() -> Self {
        Self::new()
    }
}

/// GPIO double recording into a borrowed [`PinLog`]
pub struct RecordingPin<'a> {
    id: u8,
    log: &'a PinLog,
}

impl OutputPin for RecordingPin<'_> {
    fn set_high(&mut self) {
        self.log.record(self.id, PinAction::High);
    }

    fn set_low(&mut self) {
        self.log.record(self.id, PinAction::Low);
    }

    fn is_set_high(&self) -> bool {
        self.log.is_driven_high(self.id)
    }
}

impl InputPin for RecordingPin<'_> {
    fn is_high(&self) -> bool {
        let state = self.log.state.borrow();
        let id = self.id as usize;
        if state.output[id] {
            state.driven[id]
        } else {
            state.level[id]
        }
    }
}

impl FlexPin for RecordingPin<'_> {
    fn set_output(&mut self) {
        self.log.record(self.id, PinAction::Output);
    }

    fn set_input(&mut self) {
        self.log.record(self.id, PinAction::Input);
    }
}

/// One recorded shift-transport operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiEvent {
    Begin,
    End,
    Byte(u8),
    Word(u16),
}

/// Caller-owned log for a [`RecordingSpi`]
pub struct SpiLog {
    events: RefCell<Vec<SpiEvent, LOG_CAPACITY>>,
}

impl SpiLog {
    pub fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
        }
    }

    /// Transport double recording into this log
    pub fn transport(&self) -> RecordingSpi<'_> {
        RecordingSpi { log: self }
    }

    /// Snapshot of every recorded event, in order
    pub fn events(&self) -> Vec<SpiEvent, LOG_CAPACITY> {
        self.events.borrow().clone()
    }

    /// Only the 16-bit transfers, in order
    pub fn words(&self) -> Vec<u16, LOG_CAPACITY> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match *event {
                SpiEvent::Word(word) => Some(word),
                _ => None,
            })
            .collect()
    }

    /// Only the byte transfers, in order
    pub fn bytes(&self) -> Vec<u8, LOG_CAPACITY> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match *event {
                SpiEvent::Byte(byte) => Some(byte),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl Default for SpiLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Shift transport double recording into a borrowed [`SpiLog`]
pub struct RecordingSpi<'a> {
    log: &'a SpiLog,
}

impl RecordingSpi<'_> {
    fn record(&self, event: SpiEvent) {
        let _ = self.log.events.borrow_mut().push(event);
    }
}

impl ShiftTransport for RecordingSpi<'_> {
    fn begin(&mut self) {
        self.record(SpiEvent::Begin);
    }

    fn end(&mut self) {
        self.record(SpiEvent::End);
    }

    fn write_u8(&mut self, byte: u8) {
        self.record(SpiEvent::Byte(byte));
    }

    fn write_u16(&mut self, word: u16) {
        self.record(SpiEvent::Word(word));
    }
}

/// One recorded two-wire operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WireEvent {
    Begin,
    End,
    Start,
    Stop,
    Byte(u8),
}

/// Caller-owned log for a [`RecordingWire`]
pub struct WireLog {
    events: RefCell<Vec<WireEvent, LOG_CAPACITY>>,
    /// Acknowledge returned for every byte
    ack: Cell<Ack>,
}

impl WireLog {
    pub fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            ack: Cell::new(Ack::Ack),
        }
    }

    /// Bus double recording into this log
    pub fn bus(&self) -> RecordingWire<'_> {
        RecordingWire { log: self }
    }

    /// Acknowledge the double returns for subsequent bytes
    pub fn set_ack(&self, ack: Ack) {
        self.ack.set(ack);
    }

    /// Snapshot of every recorded event, in order
    pub fn events(&self) -> Vec<WireEvent, LOG_CAPACITY> {
        self.events.borrow().clone()
    }

    /// Only the transmitted bytes, in order
    pub fn bytes(&self) -> Vec<u8, LOG_CAPACITY> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match *event {
                WireEvent::Byte(byte) => Some(byte),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl Default for WireLog {
    fn default() -> Self {
        Self::new()
    }
}

/// Two-wire bus double recording into a borrowed [`WireLog`]
pub struct RecordingWire<'a> {
    log: &'a WireLog,
}

impl RecordingWire<'_> {
    fn record(&self, event: WireEvent) {
        let _ = self.log.events.borrow_mut().push(event);
    }
}

impl WireBus for RecordingWire<'_> {
    fn begin(&mut self) {
        self.record(WireEvent::Begin);
    }

    fn end(&mut self) {
        self.record(WireEvent::End);
    }

    fn start(&mut self) {
        self.record(WireEvent::Start);
    }

    fn stop(&mut self) {
        self.record(WireEvent::Stop);
    }

    fn write(&mut self, byte: u8) -> Ack {
        self.record(WireEvent::Byte(byte));
        self.log.ack.get()
    }
}

/// Zero-cost delay for host tests
pub struct NoDelay;

impl embedded_hal::delay::DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
