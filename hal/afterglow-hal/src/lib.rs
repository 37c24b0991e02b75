//! Afterglow Hardware Abstraction Layer
//!
//! This crate defines the transport traits that the display wiring layer
//! is written against. Chip-specific HALs (RP2040, STM32, AVR, a host
//! simulator) implement these traits; the wiring matrices and chip
//! drivers in `afterglow-drivers` stay hardware-agnostic.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Scanning engine (afterglow-core)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  Wiring matrices (afterglow-drivers)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  afterglow-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//!   chip-specific HAL       host test doubles
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`gpio::FlexPin`] - Pins that switch between driven and floating
//! - [`spi::ShiftTransport`] - Latched byte/word transfers

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::{FlexPin, InputPin, OutputPin};
pub use spi::{ShiftTransport, SpiConfig, SpiMode};
