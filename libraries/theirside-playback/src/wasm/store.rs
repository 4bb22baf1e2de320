//! WASM-compatible PlaybackStore wrapper

use super::backend::{describe, HtmlAudioBackend};
use crate::{
    EpisodeButtonView, EpisodeDescriptor, MediaEvent, PlaybackConfig, PlaybackStore,
    PlayerBarView, Subscription,
};
use js_sys::Function;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlAudioElement};

/// Element events forwarded into the store
const MEDIA_EVENTS: [&str; 7] = [
    "play",
    "pause",
    "timeupdate",
    "durationchange",
    "ended",
    "volumechange",
    "error",
];

/// WASM-compatible playback store
///
/// Construct one per page load, around the layout's `<audio>` element, and
/// hand it to every player component.
#[wasm_bindgen]
pub struct WasmPlaybackStore {
    store: PlaybackStore,
    element: HtmlAudioElement,
    listeners: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
    // Listeners run inside `&self` calls, so these must not need `&mut self`
    subscriptions: RefCell<HashMap<u32, Subscription>>,
    next_subscription: Cell<u32>,
}

#[wasm_bindgen]
impl WasmPlaybackStore {
    /// Create a store driving `element`
    ///
    /// `config` is an optional `{ volume, autoplay, skipSeconds }` object.
    #[wasm_bindgen(constructor)]
    pub fn new(element: HtmlAudioElement, config: JsValue) -> Result<WasmPlaybackStore, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let config: PlaybackConfig = if config.is_undefined() || config.is_null() {
            PlaybackConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid playback config: {}", e)))?
        };

        let store = PlaybackStore::new(config);
        let sink = store.event_sink();
        store.attach_backend(Box::new(HtmlAudioBackend::new(element.clone(), Rc::clone(&sink))));

        let mut listeners = Vec::with_capacity(MEDIA_EVENTS.len());
        for name in MEDIA_EVENTS {
            let source = element.clone();
            let sink = Rc::clone(&sink);
            let closure = Closure::wrap(Box::new(move |_event: Event| {
                if let Some(event) = read_event(name, &source) {
                    sink(event);
                }
            }) as Box<dyn FnMut(Event)>);

            element.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            listeners.push((name, closure));
        }

        Ok(Self {
            store,
            element,
            listeners,
            subscriptions: RefCell::new(HashMap::new()),
            next_subscription: Cell::new(0),
        })
    }

    // ===== Playback Control =====

    /// Load an episode descriptor `{ id, title, audioSrc, audioType, link }`
    ///
    /// Loading the current episode toggles it. Malformed descriptors are
    /// ignored.
    pub fn load(&self, episode: JsValue) {
        match serde_wasm_bindgen::from_value::<EpisodeDescriptor>(episode) {
            Ok(episode) => self.store.load(&episode),
            Err(e) => tracing::warn!("Ignoring malformed episode descriptor: {}", e),
        }
    }

    /// Play/pause the current episode
    pub fn toggle(&self) {
        self.store.toggle();
    }

    /// Resume playback
    pub fn play(&self) {
        self.store.play();
    }

    /// Pause playback
    pub fn pause(&self) {
        self.store.pause();
    }

    // ===== Seeking =====

    /// Seek to position in seconds
    pub fn seek(&self, seconds: f64) {
        self.store.seek(seconds);
    }

    /// Seek relative to the current position
    #[wasm_bindgen(js_name = seekBy)]
    pub fn seek_by(&self, delta: f64) {
        self.store.seek_by(delta);
    }

    /// Seek to a fraction (0.0 - 1.0) of the episode
    #[wasm_bindgen(js_name = seekToFraction)]
    pub fn seek_to_fraction(&self, fraction: f64) {
        self.store.seek_to_fraction(fraction);
    }

    // ===== Volume & Rate =====

    /// Mute or unmute
    #[wasm_bindgen(js_name = setMuted)]
    pub fn set_muted(&self, muted: bool) {
        self.store.set_muted(muted);
    }

    /// Toggle mute
    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&self) {
        self.store.toggle_mute();
    }

    /// Set volume (0-100)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, level: u8) {
        self.store.set_volume(level);
    }

    /// Advance playback rate 1x → 1.5x → 2x
    #[wasm_bindgen(js_name = cyclePlaybackRate)]
    pub fn cycle_playback_rate(&self) {
        self.store.cycle_playback_rate();
    }

    // ===== State Queries =====

    /// Current state as a plain object
    pub fn state(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.store.state()).unwrap_or(JsValue::NULL)
    }

    /// Render data for one episode's button `{ episodeId, current, playing, ariaLabel }`
    ///
    /// Returns `null` for a malformed descriptor.
    #[wasm_bindgen(js_name = buttonView)]
    pub fn button_view(&self, episode: JsValue) -> JsValue {
        let episode = match serde_wasm_bindgen::from_value::<EpisodeDescriptor>(episode) {
            Ok(episode) => episode,
            Err(e) => {
                tracing::warn!("Ignoring malformed episode descriptor: {}", e);
                return JsValue::NULL;
            }
        };
        let view = EpisodeButtonView::from_state(&self.store.state(), &episode);
        serde_wasm_bindgen::to_value(&view).unwrap_or(JsValue::NULL)
    }

    /// Render data for the player bar, or `null` when nothing is loaded
    #[wasm_bindgen(js_name = playerBar)]
    pub fn player_bar(&self) -> JsValue {
        PlayerBarView::from_state(&self.store.state())
            .and_then(|view| serde_wasm_bindgen::to_value(&view).ok())
            .unwrap_or(JsValue::NULL)
    }

    /// Whether the given episode is loaded and playing
    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self, episode_id: u32) -> bool {
        self.store.is_playing_episode(u64::from(episode_id).into())
    }

    // ===== Subscriptions =====

    /// Register a state callback; returns an id for `unsubscribe`
    pub fn subscribe(&self, callback: Function) -> u32 {
        let subscription = self.store.subscribe(move |state| {
            match serde_wasm_bindgen::to_value(state) {
                Ok(value) => {
                    if let Err(err) = callback.call1(&JsValue::NULL, &value) {
                        tracing::warn!("Playback listener threw: {}", describe(&err));
                    }
                }
                Err(e) => tracing::warn!("Failed to serialize playback state: {}", e),
            }
        });

        let id = self.next_subscription.get();
        self.next_subscription.set(id.wrapping_add(1));
        self.subscriptions.borrow_mut().insert(id, subscription);
        id
    }

    /// Remove a callback registered with `subscribe`
    ///
    /// Safe to call from inside a callback, including the callback's own.
    pub fn unsubscribe(&self, id: u32) -> bool {
        // Drop the subscription after releasing the map
        let removed = self.subscriptions.borrow_mut().remove(&id);
        removed.is_some()
    }
}

impl Drop for WasmPlaybackStore {
    fn drop(&mut self) {
        for (name, closure) in &self.listeners {
            self.element
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .ok();
        }
    }
}

/// Translate a DOM media event into a store event
fn read_event(name: &str, element: &HtmlAudioElement) -> Option<MediaEvent> {
    let event = match name {
        "play" => MediaEvent::Play,
        "pause" => MediaEvent::Pause,
        "timeupdate" => MediaEvent::TimeUpdate {
            current_time: element.current_time(),
        },
        "durationchange" => MediaEvent::DurationChange {
            duration: element.duration(),
        },
        "ended" => MediaEvent::Ended,
        "volumechange" => MediaEvent::VolumeChange {
            muted: element.muted(),
        },
        "error" => MediaEvent::Error {
            message: element
                .error()
                .map(|err| format!("media error {}: {}", err.code(), err.message()))
                .unwrap_or_else(|| "media error".to_string()),
        },
        _ => return None,
    };
    Some(event)
}
