//! Media Events
//!
//! Notifications a media backend feeds back into the store. They mirror the
//! HTML media element events the player listens to:
//! - `play` / `pause` (the element changed state on its own)
//! - `timeupdate` (periodic position reports)
//! - `durationchange` (metadata arrived)
//! - `ended` (reached the end of the file)
//! - `volumechange` (mute toggled outside the store)
//! - `error` (the source could not be fetched or decoded)

use serde::{Deserialize, Serialize};

/// Events emitted by the media backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MediaEvent {
    /// Playback started
    Play,

    /// Playback paused
    Pause,

    /// Position update
    TimeUpdate {
        /// Current position in seconds
        current_time: f64,
    },

    /// Duration became known (or changed)
    DurationChange {
        /// Duration in seconds; NaN or infinite means unknown
        duration: f64,
    },

    /// Reached the end of the episode
    Ended,

    /// Mute state changed on the element
    VolumeChange {
        /// Whether the element is muted
        muted: bool,
    },

    /// Loading or decoding failed
    Error {
        /// Description from the backend
        message: String,
    },
}

impl MediaEvent {
    /// DOM event name for this event
    pub fn name(&self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::TimeUpdate { .. } => "timeupdate",
            Self::DurationChange { .. } => "durationchange",
            Self::Ended => "ended",
            Self::VolumeChange { .. } => "volumechange",
            Self::Error { .. } => "error",
        }
    }
}
