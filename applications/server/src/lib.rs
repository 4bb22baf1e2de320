//! Their Side Server Library
//!
//! Serves the podcast site: the homepage, show-notes pages, a JSON API over
//! the episode catalog, and the player bundle.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod pages;
pub mod router;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use router::create_router;
pub use state::AppState;
