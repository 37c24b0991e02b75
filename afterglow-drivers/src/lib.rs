//! Wiring implementations for the Afterglow refresh engine
//!
//! This crate provides the concrete transports and drivers behind the
//! traits defined in `afterglow-core` and `afterglow-hal`:
//!
//! - Wiring matrices (direct GPIO, single and dual shift register)
//! - Bit-banged buses (latched soft SPI, open-drain two-wire)
//! - Serial-protocol chip drivers (TM1637, MAX7219)
//! - Recording test doubles for host-side tests

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod chip;
pub mod matrix;
pub mod testing;
