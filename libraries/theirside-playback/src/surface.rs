//! Player surfaces
//!
//! A surface is any piece of UI that shows or controls playback: the
//! "Listen" button next to each episode, and the persistent player bar.
//! Surfaces keep no playback state of their own. Views are derived from a
//! `PlaybackState` snapshot, and controls go through the store.

use crate::{state::PlaybackState, store::PlaybackStore};
use serde::Serialize;
use theirside_core::{EpisodeDescriptor, EpisodeId};

/// Render data for one episode's play/pause button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeButtonView {
    /// Episode the button belongs to
    pub episode_id: EpisodeId,

    /// This episode is loaded
    pub current: bool,

    /// This episode is loaded and playing
    pub playing: bool,

    /// Accessible label, e.g. "Pause episode 5: Bill Lumbergh"
    pub aria_label: String,
}

impl EpisodeButtonView {
    /// Derive the button for `episode` from a state snapshot
    pub fn from_state(state: &PlaybackState, episode: &EpisodeDescriptor) -> Self {
        let playing = state.is_playing_episode(episode.id);
        let action = if playing { "Pause" } else { "Play" };
        Self {
            episode_id: episode.id,
            current: state.is_current(episode.id),
            playing,
            aria_label: format!("{action} episode {}", episode.title),
        }
    }
}

/// Per-episode control bound to the shared store
#[derive(Debug, Clone)]
pub struct EpisodePlayer {
    store: PlaybackStore,
    episode: EpisodeDescriptor,
}

impl EpisodePlayer {
    /// Bind `episode` to `store`
    pub fn new(store: PlaybackStore, episode: EpisodeDescriptor) -> Self {
        Self { store, episode }
    }

    /// Episode this control plays
    pub fn episode(&self) -> &EpisodeDescriptor {
        &self.episode
    }

    /// Whether this episode is loaded and playing
    pub fn playing(&self) -> bool {
        self.store.is_playing_episode(self.episode.id)
    }

    /// Current render data
    pub fn view(&self) -> EpisodeButtonView {
        EpisodeButtonView::from_state(&self.store.state(), &self.episode)
    }

    /// Button press: start this episode, or play/pause it if already loaded
    pub fn toggle(&self) {
        self.store.load(&self.episode);
    }
}

/// Render data for the persistent player bar
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBarView {
    /// Loaded episode
    pub episode_id: EpisodeId,

    /// Episode title
    pub title: String,

    /// Show-notes route
    pub link: String,

    /// Playing or paused
    pub playing: bool,

    /// Elapsed time label
    pub elapsed: String,

    /// Total time label, `None` until duration is known
    pub total: Option<String>,

    /// Fraction played, `0.0` until duration is known
    pub progress: f64,

    /// Muted
    pub muted: bool,

    /// Playback rate label, e.g. "1.5x"
    pub rate_label: &'static str,

    /// Failure message for the loaded episode
    pub error: Option<String>,
}

impl PlayerBarView {
    /// Derive the bar from a state snapshot; `None` when nothing is loaded
    pub fn from_state(state: &PlaybackState) -> Option<Self> {
        let episode = state.current_episode.as_ref()?;
        let total_seconds = state.duration.unwrap_or(state.current_time);

        Some(Self {
            episode_id: episode.id,
            title: episode.title.clone(),
            link: episode.link.clone(),
            playing: state.playing,
            elapsed: format_time(state.current_time, total_seconds),
            total: state.duration.map(|d| format_time(d, d)),
            progress: state.progress().unwrap_or(0.0),
            muted: state.is_muted(),
            rate_label: state.playback_rate.label(),
            error: state.error.clone(),
        })
    }
}

/// Persistent player bar controls
#[derive(Debug, Clone)]
pub struct PlayerBar {
    store: PlaybackStore,
}

impl PlayerBar {
    /// Bind the bar to `store`
    pub fn new(store: PlaybackStore) -> Self {
        Self { store }
    }

    /// Current render data
    pub fn view(&self) -> Option<PlayerBarView> {
        PlayerBarView::from_state(&self.store.state())
    }

    /// Play/pause button
    pub fn toggle(&self) {
        self.store.toggle();
    }

    /// Rewind button
    pub fn rewind(&self) {
        self.store.seek_by(-self.store.config().skip_seconds);
    }

    /// Fast-forward button
    pub fn fast_forward(&self) {
        self.store.seek_by(self.store.config().skip_seconds);
    }

    /// Slider drag to a fraction of the episode
    pub fn seek_to_fraction(&self, fraction: f64) {
        self.store.seek_to_fraction(fraction);
    }

    /// Mute button
    pub fn toggle_mute(&self) {
        self.store.toggle_mute();
    }

    /// Playback rate button
    pub fn cycle_playback_rate(&self) {
        self.store.cycle_playback_rate();
    }
}

/// Format a position as zero-padded `MM:SS`, or `HH:MM:SS` when `total`
/// reaches an hour
///
/// Passing the episode's total length keeps elapsed and total labels the
/// same width.
pub fn format_time(seconds: f64, total: f64) -> String {
    let whole = |value: f64| {
        if value.is_finite() && value > 0.0 {
            value.floor() as u64
        } else {
            0
        }
    };

    let seconds = whole(seconds);
    let (hours, minutes, secs) = (seconds / 3600, (seconds % 3600) / 60, seconds % 60);

    if whole(total) >= 3600 || hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}
