//! Serial-protocol display chip drivers
//!
//! These chips scan the LED matrix themselves; the host just pushes
//! whole-digit frames over a slow bus instead of ticking a subfield
//! scan. A dropped frame is corrected by the next refresh.

pub mod max7219;
pub mod tm1637;

pub use max7219::Max7219;
pub use tm1637::Tm1637;
