//! Scan timing configuration

/// Configuration for the scanning engine
///
/// `subfields` is the number of PWM slices in one digit's dwell window
/// and therefore the brightness resolution. With `subfields = 1` there
/// is no intermediate brightness: a digit is on only at brightness 255.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanConfig {
    /// PWM subfields per digit dwell window
    pub subfields: u16,
}

impl ScanConfig {
    /// Create a config with the given brightness resolution
    pub const fn new(subfields: u16) -> Self {
        Self { subfields }
    }

    /// Minimum tick rate for flicker-free output at a target frame rate
    ///
    /// The engine renders one subfield per tick, so a full frame takes
    /// `digits * subfields` ticks. 4 digits at 16 subfields and 60
    /// frames per second need 3840 ticks per second.
    pub const fn field_rate_hz(&self, digits: usize, frames_per_second: u32) -> u32 {
        digits as u32 * self.subfields as u32 * frames_per_second
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { subfields: 16 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolution() {
        assert_eq!(ScanConfig::default().subfields, 16);
    }

    #[test]
    fn test_field_rate() {
        let config = ScanConfig::default();
        assert_eq!(config.field_rate_hz(4, 60), 3840);

        let coarse = ScanConfig::new(1);
        assert_eq!(coarse.field_rate_hz(8, 60), 480);
    }
}
