/// Podcast catalog
use crate::error::{CoreError, Result};
use crate::types::{Episode, EpisodeDescriptor, EpisodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Show metadata plus the full episode list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Podcast {
    /// Show title
    pub title: String,

    /// Tagline
    #[serde(default)]
    pub description: String,

    /// Host names, in display order
    #[serde(default)]
    pub hosts: Vec<String>,

    /// Paragraphs of the about panel
    #[serde(default)]
    pub about: Vec<String>,

    /// Episodes, newest first once loaded
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

impl Podcast {
    /// Parse a record list and normalize it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let podcast: Podcast = serde_json::from_str(json)?;
        podcast.normalized()
    }

    /// Load a record list from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let podcast = Self::from_json_str(&json)?;
        tracing::debug!(
            "Loaded {} episodes from {}",
            podcast.episodes.len(),
            path.display()
        );
        Ok(podcast)
    }

    /// Sort newest first and reject duplicate ids
    fn normalized(mut self) -> Result<Self> {
        let mut seen = HashSet::with_capacity(self.episodes.len());
        for episode in &self.episodes {
            if !seen.insert(episode.id) {
                return Err(CoreError::Duplicate(format!("episode {}", episode.id)));
            }
        }

        self.episodes
            .sort_by(|a, b| b.published.cmp(&a.published).then(b.id.cmp(&a.id)));
        Ok(self)
    }

    /// Look up an episode by id
    pub fn episode(&self, id: EpisodeId) -> Option<&Episode> {
        self.episodes.iter().find(|episode| episode.id == id)
    }

    /// Look up an episode by id, failing with `NotFound`
    pub fn require_episode(&self, id: EpisodeId) -> Result<&Episode> {
        self.episode(id)
            .ok_or_else(|| CoreError::not_found("Episode", id.to_string()))
    }

    /// Player descriptors in display order
    pub fn descriptors(&self) -> Vec<EpisodeDescriptor> {
        self.episodes.iter().map(Episode::descriptor).collect()
    }
}
