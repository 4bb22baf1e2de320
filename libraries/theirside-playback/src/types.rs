//! Core types for playback management

use serde::{Deserialize, Serialize};

/// What `load` should do once a new episode is in place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadIntent {
    /// Start playing immediately
    Play,

    /// Load and stay paused
    Pause,
}

/// Playback speed offered by the player bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackRate {
    /// 1x
    #[default]
    Normal,

    /// 1.5x
    OneAndHalf,

    /// 2x
    Double,
}

impl PlaybackRate {
    /// Next rate in the button's cycle: 1x → 1.5x → 2x → 1x
    pub fn next(self) -> Self {
        match self {
            Self::Normal => Self::OneAndHalf,
            Self::OneAndHalf => Self::Double,
            Self::Double => Self::Normal,
        }
    }

    /// Multiplier for the media element
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Normal => 1.0,
            Self::OneAndHalf => 1.5,
            Self::Double => 2.0,
        }
    }

    /// Button label
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "1x",
            Self::OneAndHalf => "1.5x",
            Self::Double => "2x",
        }
    }
}

/// Configuration for the playback store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaybackConfig {
    /// Initial volume (0-100, default: 100)
    pub volume: u8,

    /// Whether `load` of a new episode starts playing (default: true)
    pub autoplay: bool,

    /// Rewind / fast-forward step in seconds (default: 10)
    #[serde(alias = "skip_seconds")]
    pub skip_seconds: f64,
}

impl PlaybackConfig {
    /// Load intent implied by `autoplay`
    pub fn load_intent(&self) -> LoadIntent {
        if self.autoplay {
            LoadIntent::Play
        } else {
            LoadIntent::Pause
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 100,
            autoplay: true,
            skip_seconds: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.volume, 100);
        assert!(config.autoplay);
        assert_eq!(config.skip_seconds, 10.0);
        assert_eq!(config.load_intent(), LoadIntent::Play);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: PlaybackConfig = serde_json::from_str(r#"{ "autoplay": false }"#).unwrap();
        assert_eq!(config.volume, 100);
        assert_eq!(config.load_intent(), LoadIntent::Pause);
    }

    #[test]
    fn config_reads_camel_case_keys() {
        let config: PlaybackConfig =
            serde_json::from_str(r#"{ "autoplay": true, "skipSeconds": 30 }"#).unwrap();
        assert_eq!(config.skip_seconds, 30.0);

        let config: PlaybackConfig = serde_json::from_str(r#"{ "skip_seconds": 5 }"#).unwrap();
        assert_eq!(config.skip_seconds, 5.0);

        let json = serde_json::to_value(PlaybackConfig::default()).unwrap();
        assert_eq!(json["skipSeconds"], 10.0);
    }

    #[test]
    fn playback_rate_cycles() {
        let mut rate = PlaybackRate::default();
        let mut labels = Vec::new();
        for _ in 0..4 {
            labels.push(rate.label());
            rate = rate.next();
        }
        assert_eq!(labels, vec!["1x", "1.5x", "2x", "1x"]);
        assert_eq!(PlaybackRate::OneAndHalf.as_f64(), 1.5);
    }
}
