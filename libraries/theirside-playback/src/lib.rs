//! Their Side - Playback
//!
//! Shared playback state for the podcast site.
//!
//! This crate provides:
//! - `PlaybackStore`: the single source of truth for which episode is
//!   loaded, whether it plays, where the playhead is, and mute/volume/rate
//! - Subscriptions so every player surface re-renders from the same state
//! - `MediaBackend`: the small capability set the store needs from a real
//!   media element
//! - Player surfaces (per-episode button, persistent player bar)
//! - WASM bindings over an HTML `<audio>` element (feature `wasm`)
//!
//! # Architecture
//!
//! `theirside-playback` is platform-agnostic:
//! - No dependency on the DOM outside the `wasm` feature
//! - No dependency on the server or on how episodes were fetched
//!
//! The store is constructed once per session and passed to each surface.
//! Commands flow from surfaces into the store, the store drives the backend,
//! and the backend reports back through `MediaEvent`s.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use theirside_core::EpisodeDescriptor;
//! use theirside_playback::{PlaybackConfig, PlaybackStore};
//!
//! let store = PlaybackStore::new(PlaybackConfig::default());
//! let _subscription = store.subscribe(|state| {
//!     println!("playing: {}", state.playing);
//! });
//!
//! let episode = EpisodeDescriptor::new(1u64, "1: Skeletor", "a.mp3", "audio/mpeg");
//! store.load(&episode);
//! assert!(store.state().playing);
//!
//! store.set_duration(120.0);
//! store.seek(9999.0);
//! assert_eq!(store.state().current_time, 120.0);
//! ```
//!
//! # Example: Platform Integration
//!
//! ```rust,no_run
//! use theirside_playback::{MediaBackend, MediaEvent, MediaSource, PlaybackStore, Result};
//!
//! // Implement MediaBackend for your platform
//! struct MyPlayer {
//!     position: f64,
//! }
//!
//! impl MediaBackend for MyPlayer {
//!     fn load(&mut self, source: &MediaSource) -> Result<()> {
//!         // Open source.src
//!         Ok(())
//!     }
//!
//!     fn play(&mut self) -> Result<()> {
//!         Ok(())
//!     }
//!
//!     fn pause(&mut self) {}
//!
//!     fn set_current_time(&mut self, seconds: f64) {
//!         self.position = seconds;
//!     }
//!
//!     fn current_time(&self) -> f64 {
//!         self.position
//!     }
//!
//!     fn duration(&self) -> Option<f64> {
//!         Some(180.0)
//!     }
//!
//!     fn set_muted(&mut self, _muted: bool) {}
//! }
//!
//! let store = PlaybackStore::default();
//! store.attach_backend(Box::new(MyPlayer { position: 0.0 }));
//!
//! // Report progress from the platform's playback callbacks
//! let sink = store.event_sink();
//! sink(MediaEvent::TimeUpdate { current_time: 12.5 });
//! ```

mod backend;
mod error;
mod events;
mod state;
mod store;
pub mod surface;
pub mod testing;
pub mod types;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use backend::{MediaBackend, MediaSource};
pub use error::{PlaybackError, Result};
pub use events::MediaEvent;
pub use state::PlaybackState;
pub use store::{EventSink, Listener, PlaybackStore, Subscription};
pub use surface::{EpisodeButtonView, EpisodePlayer, PlayerBar, PlayerBarView};
pub use theirside_core::{EpisodeDescriptor, EpisodeId};
pub use types::{LoadIntent, PlaybackConfig, PlaybackRate};
pub use volume::Volume;
