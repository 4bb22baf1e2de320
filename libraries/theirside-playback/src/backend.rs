//! Platform-agnostic media backend trait
//!
//! Abstracts the one media element that actually fetches and decodes audio.

use crate::error::Result;
use theirside_core::EpisodeDescriptor;

/// Audio source handed to a backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    /// Audio URL
    pub src: String,

    /// MIME type hint
    pub mime_type: String,
}

impl From<&EpisodeDescriptor> for MediaSource {
    fn from(episode: &EpisodeDescriptor) -> Self {
        Self {
            src: episode.audio_src.clone(),
            mime_type: episode.audio_type.clone(),
        }
    }
}

/// Capability set the store needs from a media element
///
/// Implementors perform real playback (an HTML `<audio>` element in the
/// browser, a recording fake in tests). The store calls these methods to
/// carry out its intent; the backend reports what actually happened by
/// sending `MediaEvent`s to `PlaybackStore::handle_event`.
///
/// Backends must not call back into the store synchronously from inside
/// these methods.
pub trait MediaBackend {
    /// Replace the current source
    ///
    /// # Returns
    /// * `Ok(())` - Source accepted (loading may still fail later via an error event)
    /// * `Err(_)` - Source rejected outright
    fn load(&mut self, source: &MediaSource) -> Result<()>;

    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self);

    /// Move the playhead (seconds)
    fn set_current_time(&mut self, seconds: f64);

    /// Current playhead position (seconds)
    fn current_time(&self) -> f64;

    /// Total duration, if metadata has loaded
    fn duration(&self) -> Option<f64>;

    /// Mute or unmute output
    fn set_muted(&mut self, muted: bool);

    /// Output gain in `[0.0, 1.0]`
    fn set_volume(&mut self, _gain: f64) {}

    /// Playback speed multiplier
    fn set_playback_rate(&mut self, _rate: f64) {}
}
