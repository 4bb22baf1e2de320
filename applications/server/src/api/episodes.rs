/// Episodes API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use theirside_core::{Episode, EpisodeDescriptor, EpisodeId};

#[derive(Debug, Deserialize)]
pub struct EpisodeQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

/// One episode as returned by the API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeResponse {
    #[serde(flatten)]
    pub episode: Episode,
    pub display_title: String,
    pub formatted_date: String,
    /// Ready to hand to the player's `load`
    pub descriptor: EpisodeDescriptor,
}

impl From<&Episode> for EpisodeResponse {
    fn from(episode: &Episode) -> Self {
        Self {
            episode: episode.clone(),
            display_title: episode.display_title(),
            formatted_date: episode.formatted_date(),
            descriptor: episode.descriptor(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EpisodesResponse {
    pub episodes: Vec<EpisodeResponse>,
    pub total: usize,
}

/// GET /api/episodes
pub async fn list_episodes(
    State(app_state): State<AppState>,
    Query(query): Query<EpisodeQuery>,
) -> Json<EpisodesResponse> {
    let episodes = &app_state.podcast.episodes;

    // Newest first, as stored
    let total = episodes.len();
    let page = episodes
        .iter()
        .skip(query.offset)
        .take(query.limit)
        .map(EpisodeResponse::from)
        .collect();

    Json(EpisodesResponse {
        episodes: page,
        total,
    })
}

/// GET /api/episodes/:id
pub async fn get_episode(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EpisodeResponse>> {
    let id: EpisodeId = id
        .parse()
        .map_err(|_| ServerError::BadRequest(format!("Invalid episode id: {id}")))?;

    let episode = app_state.podcast.require_episode(id)?;
    Ok(Json(EpisodeResponse::from(episode)))
}
