//! Their Side Core
//!
//! Domain types shared by the playback library and the site server.
//!
//! The core crate defines:
//! - **Domain Types**: `Episode`, `EpisodeDescriptor`, `Podcast`
//! - **Identifiers**: `EpisodeId`
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! Episodes are supplied as a pre-built record list; this crate loads that
//! list and never talks to a feed.
//!
//! # Example
//!
//! ```rust
//! use theirside_core::Podcast;
//!
//! let json = r#"{
//!     "title": "Their Side",
//!     "description": "Conversations with the most tragically misunderstood people of our time.",
//!     "episodes": [{
//!         "id": 1,
//!         "title": "Skeletor",
//!         "description": "Just doing his best.",
//!         "published": 1643241600000,
//!         "audio": { "src": "https://example.com/episode-001.mp3", "type": "audio/mpeg" }
//!     }]
//! }"#;
//!
//! let podcast = Podcast::from_json_str(json).unwrap();
//! let descriptor = podcast.episodes[0].descriptor();
//! assert_eq!(descriptor.link, "/1");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod types;

pub use error::{CoreError, Result};
pub use types::{AudioEnclosure, Episode, EpisodeDescriptor, EpisodeId, Podcast};
