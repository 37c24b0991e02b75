//! Board-agnostic refresh engine for multiplexed LED segment displays
//!
//! This crate contains the display logic that does not depend on any
//! specific wiring or hardware:
//!
//! - The per-digit pattern and brightness table ([`digit::DigitStore`])
//! - The time-division scanning state machine ([`scan::ScanEngine`])
//! - The wiring capability trait ([`traits::LedMatrix`])
//! - Scan timing configuration ([`config::ScanConfig`])
//!
//! Concrete wiring implementations (direct GPIO, shift registers,
//! serial-protocol chips) live in `afterglow-drivers`.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod digit;
pub mod scan;
pub mod traits;
