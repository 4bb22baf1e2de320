//! WASM bindings for theirside-playback
//!
//! This module provides WebAssembly bindings for the PlaybackStore, backed
//! by the page's single `<audio>` element, so the same store runs in the
//! browser.

#[cfg(feature = "wasm")]
pub mod backend;

#[cfg(feature = "wasm")]
pub mod store;

#[cfg(feature = "wasm")]
pub use backend::HtmlAudioBackend;

#[cfg(feature = "wasm")]
pub use store::WasmPlaybackStore;
