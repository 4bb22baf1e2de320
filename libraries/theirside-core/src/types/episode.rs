/// Episode domain types
use crate::types::EpisodeId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audio file attached to an episode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioEnclosure {
    /// URL of the audio file
    pub src: String,

    /// MIME type, e.g. `audio/mpeg`
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// A published episode with its show notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Episode number
    pub id: EpisodeId,

    /// Guest or topic title, without the episode number
    pub title: String,

    /// One-paragraph summary shown in the episode list
    #[serde(default)]
    pub description: String,

    /// Publication time (milliseconds since the epoch in the record list)
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub published: DateTime<Utc>,

    /// Show notes as trusted HTML
    #[serde(default)]
    pub content: String,

    /// Audio enclosure
    pub audio: AudioEnclosure,
}

impl Episode {
    /// Title as displayed on the site: `"5: Bill Lumbergh"`
    pub fn display_title(&self) -> String {
        format!("{}: {}", self.id, self.title)
    }

    /// Route of the episode's show-notes page
    pub fn link(&self) -> String {
        format!("/{}", self.id)
    }

    /// Publication date in long form, e.g. `"February 24, 2022"` (UTC)
    pub fn formatted_date(&self) -> String {
        self.published.format("%B %-d, %Y").to_string()
    }

    /// Build the immutable descriptor handed to the player
    pub fn descriptor(&self) -> EpisodeDescriptor {
        EpisodeDescriptor {
            id: self.id,
            title: self.display_title(),
            audio_src: self.audio.src.clone(),
            audio_type: self.audio.mime_type.clone(),
            link: self.link(),
        }
    }
}

/// Everything the player needs to know about one playable episode
///
/// Descriptors are built once per episode and never mutated; the playback
/// store keeps a copy of the one that is currently loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeDescriptor {
    /// Episode identifier
    pub id: EpisodeId,

    /// Display title
    pub title: String,

    /// Audio URL
    pub audio_src: String,

    /// Audio MIME type
    pub audio_type: String,

    /// Show-notes route
    pub link: String,
}

impl EpisodeDescriptor {
    /// Create a descriptor directly (for callers without a full `Episode`)
    pub fn new(
        id: impl Into<EpisodeId>,
        title: impl Into<String>,
        audio_src: impl Into<String>,
        audio_type: impl Into<String>,
    ) -> Self {
        let id = id.into();
        Self {
            id,
            title: title.into(),
            audio_src: audio_src.into(),
            audio_type: audio_type.into(),
            link: format!("/{id}"),
        }
    }

    /// Whether the descriptor carries an audio source at all
    pub fn is_playable(&self) -> bool {
        !self.audio_src.trim().is_empty()
    }
}
