/// Common test utilities and fixtures
use axum::Router;
use std::path::Path;
use theirside_core::Podcast;
use theirside_server::{create_router, AppState};

pub const CATALOG: &str = r#"{
    "title": "Their Side",
    "description": "Conversations with the most tragically misunderstood people of our time.",
    "hosts": ["Bri Gawkoski"],
    "about": ["Their Side is a podcast.", "Every villain has a story."],
    "episodes": [
        {
            "id": 1,
            "title": "Skeletor",
            "description": "Skeletor explains castle ownership.",
            "published": 1643241600000,
            "content": "<p>Castle Grayskull notes.</p>",
            "audio": { "src": "https://cdn.example.com/1.mp3", "type": "audio/mpeg" }
        },
        {
            "id": 5,
            "title": "Bill Lumbergh",
            "description": "Bill talks <b>TPS</b> reports & more.",
            "published": 1645660800000,
            "content": "<p>Yeah, if you could go ahead and listen.</p>",
            "audio": { "src": "https://cdn.example.com/5.mp3", "type": "audio/mpeg" }
        },
        {
            "id": 2,
            "title": "Hank Scorpio",
            "description": "Hank on employee retention.",
            "published": 1643846400000,
            "audio": { "src": "https://cdn.example.com/2.mp3", "type": "audio/mpeg" }
        }
    ]
}"#;

pub fn test_podcast() -> Podcast {
    Podcast::from_json_str(CATALOG).unwrap()
}

/// Router over the fixture catalog, serving assets from `assets_dir`
pub fn create_test_app(assets_dir: &Path) -> Router {
    create_router(AppState::new(test_podcast()), assets_dir)
}
