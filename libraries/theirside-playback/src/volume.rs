//! Volume control with logarithmic scaling
//!
//! Provides human-perceptual volume control using dB scaling.
//! Volume range is 0-100%, mapped to -60 dB to 0 dB internally, and handed
//! to the media element as a linear gain in `[0.0, 1.0]`.

use serde::{Deserialize, Serialize};

/// Volume setting with logarithmic scaling
///
/// 0% = silence, 1% = -60 dB, 100% = 0 dB (unity gain).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume setting
    ///
    /// # Arguments
    /// * `level` - Initial volume (0-100, clamped)
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
            muted: false,
        }
    }

    /// Set volume level (0-100)
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
    }

    /// Get current volume level (0-100)
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Set mute state (preserves volume level)
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Linear gain for the media element
    ///
    /// Returns 0.0 if muted, otherwise logarithmic gain based on level
    pub fn gain(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            Self::calculate_linear_gain(self.level)
        }
    }

    /// Convert volume percentage to linear gain
    ///
    /// Formula: gain = 10^((level% - 100) * 0.6 / 20)
    /// - 0%   → silence
    /// - 50%  → -30 dB → 0.0316 gain
    /// - 80%  → -12 dB → 0.251 gain
    /// - 100% →   0 dB → 1.0 gain (unity)
    fn calculate_linear_gain(level: u8) -> f64 {
        if level == 0 {
            return 0.0;
        }

        let db = (f64::from(level) - 100.0) * 0.6;
        10.0_f64.powf(db / 20.0)
    }

    /// Current attenuation in dB
    pub fn to_db(&self) -> f64 {
        if self.level == 0 || self.muted {
            -60.0
        } else {
            20.0 * Self::calculate_linear_gain(self.level).log10()
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_volume_level_clamps() {
        let mut vol = Volume::new(50);
        assert_eq!(vol.level(), 50);

        vol.set_level(150);
        assert_eq!(vol.level(), 100);

        assert_eq!(Volume::new(200).level(), 100);
    }

    #[test]
    fn mute_preserves_level() {
        let mut vol = Volume::new(80);
        vol.set_muted(true);
        assert!(vol.is_muted());
        assert_eq!(vol.level(), 80);
        assert_eq!(vol.gain(), 0.0);

        vol.set_muted(false);
        assert!(vol.gain() > 0.0);
    }

    #[test]
    fn gain_calculation() {
        assert_eq!(Volume::new(0).gain(), 0.0);
        assert!((Volume::new(100).gain() - 1.0).abs() < 0.001);
        assert!((Volume::new(50).gain() - 0.0316).abs() < 0.001);
        assert!((Volume::new(80).gain() - 0.251).abs() < 0.01);
    }

    #[test]
    fn gain_stays_in_media_range() {
        for level in 0..=100 {
            let gain = Volume::new(level).gain();
            assert!((0.0..=1.0).contains(&gain), "level {level} gave {gain}");
        }
    }

    #[test]
    fn db_conversion() {
        assert!(Volume::new(100).to_db().abs() < 0.1);
        assert!((Volume::new(0).to_db() + 60.0).abs() < 0.1);

        let mut vol = Volume::new(80);
        vol.set_muted(true);
        assert!((vol.to_db() + 60.0).abs() < 0.1);
    }
}
