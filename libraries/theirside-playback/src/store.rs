//! Playback store - single source of truth for the player
//!
//! Owns the session's `PlaybackState`, drives the media backend, and
//! notifies subscribed surfaces after every change.

use crate::{
    backend::{MediaBackend, MediaSource},
    events::MediaEvent,
    state::{clamp_position, normalize_duration, PlaybackState},
    types::{LoadIntent, PlaybackConfig, PlaybackRate},
};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use theirside_core::{EpisodeDescriptor, EpisodeId};

/// Callback invoked with the new state after each change
pub type Listener = Rc<dyn Fn(&PlaybackState)>;

/// Callback forwarding backend events into a store
pub type EventSink = Rc<dyn Fn(MediaEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListenerId(u64);

struct ListenerEntry {
    id: ListenerId,
    callback: Listener,
}

/// Work for the backend produced by a state transition
#[derive(Debug, Clone, PartialEq)]
enum BackendCommand {
    Load(MediaSource),
    Play,
    Pause,
    Seek(f64),
    Mute(bool),
    Volume(f64),
    Rate(f64),
}

struct StoreInner {
    config: PlaybackConfig,
    state: RefCell<PlaybackState>,
    listeners: RefCell<Vec<ListenerEntry>>,
    next_listener_id: Cell<u64>,
    backend: RefCell<Option<Box<dyn MediaBackend>>>,
    /// A notification round is in progress
    notifying: Cell<bool>,
    /// State changed during the current round
    pending: Cell<bool>,
}

/// Central playback state for one client session
///
/// Created once at application start and handed to every player surface.
/// Cloning is cheap and yields another handle to the same store.
///
/// All operations are synchronous. Each one notifies every listener at most
/// once, in registration order, before returning; operations that leave the
/// state unchanged notify nobody. Error conditions degrade to a paused
/// state and are recorded in `PlaybackState::error`.
///
/// Listeners may issue commands. Changes made while a round is running are
/// delivered in a follow-up round once every listener has seen the current
/// one, so all listeners end on the store's final state.
#[derive(Clone)]
pub struct PlaybackStore {
    inner: Rc<StoreInner>,
}

impl PlaybackStore {
    /// Create a store with no backend attached
    pub fn new(config: PlaybackConfig) -> Self {
        let state = PlaybackState::new(config.volume);
        Self {
            inner: Rc::new(StoreInner {
                config,
                state: RefCell::new(state),
                listeners: RefCell::new(Vec::new()),
                next_listener_id: Cell::new(0),
                backend: RefCell::new(None),
                notifying: Cell::new(false),
                pending: Cell::new(false),
            }),
        }
    }

    /// Create a store driving `backend`
    pub fn with_backend(config: PlaybackConfig, backend: Box<dyn MediaBackend>) -> Self {
        let store = Self::new(config);
        store.attach_backend(backend);
        store
    }

    /// Attach (or replace) the media backend
    ///
    /// The backend is brought in line with the current state: source,
    /// rate, volume, position and play/pause are pushed into it.
    pub fn attach_backend(&self, backend: Box<dyn MediaBackend>) {
        *self.inner.backend.borrow_mut() = Some(backend);

        self.apply(|state| {
            let mut commands = vec![
                BackendCommand::Mute(state.volume.is_muted()),
                BackendCommand::Volume(state.volume.gain()),
            ];
            if let Some(episode) = &state.current_episode {
                commands.push(BackendCommand::Load(MediaSource::from(episode)));
                commands.push(BackendCommand::Rate(state.playback_rate.as_f64()));
                if state.current_time > 0.0 {
                    commands.push(BackendCommand::Seek(state.current_time));
                }
                if state.playing {
                    commands.push(BackendCommand::Play);
                }
            }
            commands
        });
    }

    /// Store configuration
    pub fn config(&self) -> &PlaybackConfig {
        &self.inner.config
    }

    /// Snapshot of the current state
    pub fn state(&self) -> PlaybackState {
        self.inner.state.borrow().clone()
    }

    /// Currently loaded episode
    pub fn current_episode(&self) -> Option<EpisodeDescriptor> {
        self.inner.state.borrow().current_episode.clone()
    }

    /// Whether `id` is loaded and playing
    pub fn is_playing_episode(&self, id: EpisodeId) -> bool {
        self.inner.state.borrow().is_playing_episode(id)
    }

    // ===== Commands =====

    /// Load an episode using the configured autoplay intent
    ///
    /// Loading the episode that is already current toggles it instead.
    pub fn load(&self, episode: &EpisodeDescriptor) {
        self.load_with(episode, self.inner.config.load_intent());
    }

    /// Load an episode with an explicit intent
    pub fn load_with(&self, episode: &EpisodeDescriptor, intent: LoadIntent) {
        if !episode.is_playable() {
            tracing::warn!("Ignoring load of episode {} without audio source", episode.id);
            return;
        }

        if self.inner.state.borrow().is_current(episode.id) {
            self.toggle();
            return;
        }

        tracing::debug!("Loading episode {} ({:?})", episode.id, intent);
        self.apply(|state| {
            state.current_episode = Some(episode.clone());
            state.current_time = 0.0;
            state.duration = None;
            state.error = None;
            state.playing = intent == LoadIntent::Play;

            let mut commands = vec![
                BackendCommand::Load(MediaSource::from(episode)),
                BackendCommand::Rate(state.playback_rate.as_f64()),
            ];
            commands.push(if state.playing {
                BackendCommand::Play
            } else {
                BackendCommand::Pause
            });
            commands
        });
    }

    /// Flip play/pause; no-op when nothing is loaded
    pub fn toggle(&self) {
        let playing = {
            let state = self.inner.state.borrow();
            if state.current_episode.is_none() {
                return;
            }
            state.playing
        };

        if playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Resume the current episode
    pub fn play(&self) {
        self.apply(|state| {
            if state.current_episode.is_none() || state.playing {
                return Vec::new();
            }
            state.playing = true;
            state.error = None;
            vec![BackendCommand::Play]
        });
    }

    /// Pause the current episode
    pub fn pause(&self) {
        self.apply(|state| {
            if !state.playing {
                return Vec::new();
            }
            state.playing = false;
            vec![BackendCommand::Pause]
        });
    }

    /// Move the playhead, clamped to `[0, duration]`
    ///
    /// Does not change `playing`. Ignored when nothing is loaded.
    pub fn seek(&self, time: f64) {
        self.apply(|state| {
            if state.current_episode.is_none() {
                return Vec::new();
            }
            let Some(time) = clamp_position(time, state.duration) else {
                return Vec::new();
            };
            state.current_time = time;
            vec![BackendCommand::Seek(time)]
        });
    }

    /// Move the playhead relative to the current position
    pub fn seek_by(&self, delta: f64) {
        let current = self.inner.state.borrow().current_time;
        self.seek(current + delta);
    }

    /// Move the playhead to a fraction of the duration
    ///
    /// Ignored until the duration is known.
    pub fn seek_to_fraction(&self, fraction: f64) {
        let Some(duration) = self.inner.state.borrow().duration else {
            return;
        };
        if fraction.is_nan() {
            return;
        }
        self.seek(duration * fraction.clamp(0.0, 1.0));
    }

    /// Mute or unmute
    pub fn set_muted(&self, muted: bool) {
        self.apply(|state| {
            state.volume.set_muted(muted);
            vec![
                BackendCommand::Mute(muted),
                BackendCommand::Volume(state.volume.gain()),
            ]
        });
    }

    /// Flip the mute flag
    pub fn toggle_mute(&self) {
        let muted = self.inner.state.borrow().is_muted();
        self.set_muted(!muted);
    }

    /// Set volume level (0-100)
    pub fn set_volume(&self, level: u8) {
        self.apply(|state| {
            state.volume.set_level(level);
            vec![BackendCommand::Volume(state.volume.gain())]
        });
    }

    /// Set playback speed
    pub fn set_playback_rate(&self, rate: PlaybackRate) {
        self.apply(|state| {
            state.playback_rate = rate;
            vec![BackendCommand::Rate(rate.as_f64())]
        });
    }

    /// Advance to the next playback speed
    pub fn cycle_playback_rate(&self) {
        let rate = self.inner.state.borrow().playback_rate;
        self.set_playback_rate(rate.next());
    }

    // ===== Setters driven by backend events =====

    /// Record that the backend started or stopped playing
    pub fn set_playing(&self, playing: bool) {
        self.apply(|state| {
            if playing && state.current_episode.is_none() {
                return Vec::new();
            }
            state.playing = playing;
            if playing {
                state.error = None;
            }
            Vec::new()
        });
    }

    /// Record the duration reported by the backend
    ///
    /// NaN, infinite or negative values mean "unknown". A known duration
    /// re-clamps the current position.
    pub fn set_duration(&self, value: f64) {
        self.apply(|state| {
            if state.current_episode.is_none() {
                return Vec::new();
            }
            state.duration = normalize_duration(value);
            if let Some(duration) = state.duration {
                state.current_time = state.current_time.min(duration);
            }
            Vec::new()
        });
    }

    /// Record the position reported by the backend
    pub fn set_current_time(&self, value: f64) {
        self.apply(|state| {
            if state.current_episode.is_none() {
                return Vec::new();
            }
            if let Some(time) = clamp_position(value, state.duration) {
                state.current_time = time;
            }
            Vec::new()
        });
    }

    /// Dispatch a backend event to the matching setter
    pub fn handle_event(&self, event: MediaEvent) {
        tracing::trace!("Media event: {}", event.name());
        match event {
            MediaEvent::Play => self.set_playing(true),
            MediaEvent::Pause => self.set_playing(false),
            MediaEvent::TimeUpdate { current_time } => self.set_current_time(current_time),
            MediaEvent::DurationChange { duration } => self.set_duration(duration),
            MediaEvent::Ended => self.finish(),
            MediaEvent::VolumeChange { muted } => self.apply(|state| {
                state.volume.set_muted(muted);
                Vec::new()
            }),
            MediaEvent::Error { message } => self.fail(message),
        }
    }

    /// Weak callback that forwards events into this store
    ///
    /// Holding the sink does not keep the store alive; once the store is
    /// gone, events are dropped.
    pub fn event_sink(&self) -> EventSink {
        let weak = Rc::downgrade(&self.inner);
        Rc::new(move |event| {
            if let Some(inner) = weak.upgrade() {
                PlaybackStore { inner }.handle_event(event);
            }
        })
    }

    fn finish(&self) {
        self.apply(|state| {
            if state.current_episode.is_none() {
                return Vec::new();
            }
            state.playing = false;
            state.current_time = 0.0;
            vec![BackendCommand::Seek(0.0)]
        });
    }

    fn fail(&self, message: String) {
        self.apply(|state| {
            if state.current_episode.is_none() {
                return Vec::new();
            }
            tracing::warn!(
                "Playback failed for episode {:?}: {}",
                state.current_episode_id(),
                message
            );
            state.playing = false;
            state.error = Some(message);
            Vec::new()
        });
    }

    // ===== Subscriptions =====

    /// Register a listener for state changes
    ///
    /// The listener stays registered until the returned `Subscription` is
    /// dropped or `unsubscribe`d.
    pub fn subscribe(&self, listener: impl Fn(&PlaybackState) + 'static) -> Subscription {
        let id = ListenerId(self.inner.next_listener_id.get());
        self.inner.next_listener_id.set(id.0 + 1);
        self.inner.listeners.borrow_mut().push(ListenerEntry {
            id,
            callback: Rc::new(listener),
        });

        Subscription {
            store: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    // ===== Internal =====

    /// Run one transition: mutate, drive the backend, then notify once
    fn apply(&self, transition: impl FnOnce(&mut PlaybackState) -> Vec<BackendCommand>) {
        let (before, commands) = {
            let mut state = self.inner.state.borrow_mut();
            let before = state.clone();
            let commands = transition(&mut state);
            (before, commands)
        };

        if let Some(message) = self.drive_backend(commands) {
            let mut state = self.inner.state.borrow_mut();
            state.playing = false;
            state.error = Some(message);
        }

        let after = self.state();
        if after == before {
            return;
        }

        if self.inner.notifying.get() {
            self.inner.pending.set(true);
            return;
        }
        self.notify_until_settled(after);
    }

    /// Deliver `state`, then follow-up rounds until listeners stop changing it
    fn notify_until_settled(&self, state: PlaybackState) {
        self.inner.notifying.set(true);
        let mut delivered = state;
        self.notify(&delivered);

        while self.inner.pending.replace(false) {
            let current = self.state();
            if current != delivered {
                self.notify(&current);
                delivered = current;
            }
        }
        self.inner.notifying.set(false);
    }

    /// Send commands to the backend, stopping at the first failure
    fn drive_backend(&self, commands: Vec<BackendCommand>) -> Option<String> {
        if commands.is_empty() {
            return None;
        }

        let Ok(mut slot) = self.inner.backend.try_borrow_mut() else {
            tracing::warn!("Media backend busy; dropping {} command(s)", commands.len());
            return None;
        };
        let backend = slot.as_mut()?;

        for command in commands {
            let result = match &command {
                BackendCommand::Load(source) => backend.load(source),
                BackendCommand::Play => backend.play(),
                BackendCommand::Pause => {
                    backend.pause();
                    Ok(())
                }
                BackendCommand::Seek(time) => {
                    backend.set_current_time(*time);
                    Ok(())
                }
                BackendCommand::Mute(muted) => {
                    backend.set_muted(*muted);
                    Ok(())
                }
                BackendCommand::Volume(gain) => {
                    backend.set_volume(*gain);
                    Ok(())
                }
                BackendCommand::Rate(rate) => {
                    backend.set_playback_rate(*rate);
                    Ok(())
                }
            };

            if let Err(err) = result {
                tracing::warn!("Media backend rejected {:?}: {}", command, err);
                return Some(err.to_string());
            }
        }

        None
    }

    fn notify(&self, state: &PlaybackState) {
        let listeners: Vec<(ListenerId, Listener)> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|entry| (entry.id, Rc::clone(&entry.callback)))
            .collect();

        for (id, callback) in listeners {
            // A listener earlier in this round may have unsubscribed this one
            if self.is_subscribed(id) {
                callback(state);
            }
        }
    }

    fn is_subscribed(&self, id: ListenerId) -> bool {
        self.inner.listeners.borrow().iter().any(|entry| entry.id == id)
    }
}

impl Default for PlaybackStore {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

impl fmt::Debug for PlaybackStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackStore")
            .field("state", &*self.inner.state.borrow())
            .field("listeners", &self.listener_count())
            .field("has_backend", &self.inner.backend.borrow().is_some())
            .finish()
    }
}

/// Handle returned by `PlaybackStore::subscribe`
///
/// Dropping the handle unsubscribes the listener.
#[must_use = "dropping a Subscription unsubscribes its listener"]
pub struct Subscription {
    store: Weak<StoreInner>,
    id: ListenerId,
}

impl Subscription {
    /// Remove the listener now
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner.listeners.borrow_mut().retain(|entry| entry.id != self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id.0).finish()
    }
}
