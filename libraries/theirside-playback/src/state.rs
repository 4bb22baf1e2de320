//! Playback state snapshot
//!
//! `PlaybackState` is what listeners receive and what surfaces render from.
//! Only `PlaybackStore` mutates it.

use crate::{types::PlaybackRate, volume::Volume};
use serde::{Deserialize, Serialize};
use theirside_core::{EpisodeDescriptor, EpisodeId};

/// Session-wide playback state
///
/// Invariants upheld by the store:
/// - `playing` implies `current_episode.is_some()`
/// - `current_time >= 0`, and `current_time <= duration` once duration is known
/// - switching episodes resets `current_time` to 0 and `duration` to `None`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    /// Loaded episode, if any
    pub current_episode: Option<EpisodeDescriptor>,

    /// Whether playback is (intended to be) running
    pub playing: bool,

    /// Position in seconds
    pub current_time: f64,

    /// Duration in seconds, `None` until the backend reports metadata
    pub duration: Option<f64>,

    /// Volume level and mute flag
    pub volume: Volume,

    /// Playback speed
    pub playback_rate: PlaybackRate,

    /// Last backend failure for the current episode
    pub error: Option<String>,
}

impl PlaybackState {
    /// Empty state: nothing loaded, paused, at the given volume
    pub fn new(volume: u8) -> Self {
        Self {
            current_episode: None,
            playing: false,
            current_time: 0.0,
            duration: None,
            volume: Volume::new(volume),
            playback_rate: PlaybackRate::Normal,
            error: None,
        }
    }

    /// Identifier of the loaded episode
    pub fn current_episode_id(&self) -> Option<EpisodeId> {
        self.current_episode.as_ref().map(|episode| episode.id)
    }

    /// Whether `id` is the loaded episode
    pub fn is_current(&self, id: EpisodeId) -> bool {
        self.current_episode_id() == Some(id)
    }

    /// Whether `id` is the loaded episode and it is playing
    pub fn is_playing_episode(&self, id: EpisodeId) -> bool {
        self.playing && self.is_current(id)
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    /// Fraction of the episode played, once duration is known
    pub fn progress(&self) -> Option<f64> {
        match self.duration {
            Some(duration) if duration > 0.0 => Some((self.current_time / duration).clamp(0.0, 1.0)),
            Some(_) => Some(0.0),
            None => None,
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(100)
    }
}

/// Clamp a requested position against the known duration
///
/// Returns `None` for NaN and for positive infinity while duration is
/// unknown; those requests are dropped rather than stored.
pub(crate) fn clamp_position(time: f64, duration: Option<f64>) -> Option<f64> {
    if time.is_nan() {
        return None;
    }

    match duration {
        Some(duration) => Some(time.clamp(0.0, duration)),
        None if time == f64::INFINITY => None,
        None => Some(time.max(0.0)),
    }
}

/// Normalize a duration reported by a media backend
///
/// Media elements report NaN before metadata and +inf for live streams;
/// both mean "unknown" here.
pub(crate) fn normalize_duration(value: f64) -> Option<f64> {
    (value.is_finite() && value >= 0.0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_with_known_duration() {
        assert_eq!(clamp_position(9999.0, Some(120.0)), Some(120.0));
        assert_eq!(clamp_position(-5.0, Some(120.0)), Some(0.0));
        assert_eq!(clamp_position(60.0, Some(120.0)), Some(60.0));
        assert_eq!(clamp_position(f64::INFINITY, Some(120.0)), Some(120.0));
    }

    #[test]
    fn clamp_with_unknown_duration() {
        assert_eq!(clamp_position(9999.0, None), Some(9999.0));
        assert_eq!(clamp_position(-1.0, None), Some(0.0));
        assert_eq!(clamp_position(f64::NEG_INFINITY, None), Some(0.0));
        assert_eq!(clamp_position(f64::INFINITY, None), None);
        assert_eq!(clamp_position(f64::NAN, None), None);
    }

    #[test]
    fn duration_normalization() {
        assert_eq!(normalize_duration(f64::NAN), None);
        assert_eq!(normalize_duration(f64::INFINITY), None);
        assert_eq!(normalize_duration(-1.0), None);
        assert_eq!(normalize_duration(0.0), Some(0.0));
        assert_eq!(normalize_duration(3600.5), Some(3600.5));
    }

    #[test]
    fn progress_requires_duration() {
        let mut state = PlaybackState::default();
        assert_eq!(state.progress(), None);

        state.duration = Some(200.0);
        state.current_time = 50.0;
        assert_eq!(state.progress(), Some(0.25));

        state.duration = Some(0.0);
        assert_eq!(state.progress(), Some(0.0));
    }

    #[test]
    fn playing_episode_requires_match() {
        let mut state = PlaybackState::default();
        state.current_episode = Some(EpisodeDescriptor::new(1u64, "1: Skeletor", "a.mp3", "audio/mpeg"));
        state.playing = true;

        assert!(state.is_playing_episode(EpisodeId::new(1)));
        assert!(!state.is_playing_episode(EpisodeId::new(2)));

        state.playing = false;
        assert!(state.is_current(EpisodeId::new(1)));
        assert!(!state.is_playing_episode(EpisodeId::new(1)));
    }
}
