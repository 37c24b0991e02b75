//! Time-division multiplexed refresh
//!
//! One digit group at a time is driven for a dwell window of PWM
//! subfields; cycling fast enough, persistence of vision shows a steady
//! display with per-digit brightness.

pub mod engine;

pub use engine::ScanEngine;
