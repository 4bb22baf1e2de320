/// ID types for Their Side entities
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Episode identifier
///
/// Episode numbers are assigned by the show and are stable across feed
/// revisions, so they double as the episode's route segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeId(u64);

impl EpisodeId {
    /// Create a new episode ID
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner number
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for EpisodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EpisodeId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| CoreError::invalid_input(format!("not an episode id: {s:?}")))
    }
}
