/// Podcast API routes
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastResponse {
    pub title: String,
    pub description: String,
    pub hosts: Vec<String>,
    pub about: Vec<String>,
    pub episode_count: usize,
}

/// GET /api/podcast
pub async fn get_podcast(State(app_state): State<AppState>) -> Json<PodcastResponse> {
    let podcast = &app_state.podcast;
    Json(PodcastResponse {
        title: podcast.title.clone(),
        description: podcast.description.clone(),
        hosts: podcast.hosts.clone(),
        about: podcast.about.clone(),
        episode_count: podcast.episodes.len(),
    })
}
