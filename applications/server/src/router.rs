/// HTTP routing
use crate::{api, pages, state::AppState};
use axum::{routing::get, Router};
use std::path::Path;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the site router
///
/// `assets_dir` is served under `/assets`.
pub fn create_router(app_state: AppState, assets_dir: &Path) -> Router {
    let api_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/podcast", get(api::podcast::get_podcast))
        .route("/episodes", get(api::episodes::list_episodes))
        .route("/episodes/:id", get(api::episodes::get_episode));

    Router::new()
        .route("/", get(pages::home))
        .route("/:id", get(pages::episode_page))
        .nest("/api", api_routes)
        .nest_service("/assets", ServeDir::new(assets_dir))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
