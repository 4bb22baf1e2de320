/// Server-rendered pages
///
/// Pages are rendered with the player in its idle state; the browser
/// bundle under `/assets` takes over the buttons once it has loaded.
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::fmt::Write;
use theirside_core::{Episode, EpisodeId, Podcast};
use theirside_playback::{EpisodeButtonView, PlaybackState};

/// GET /
pub async fn home(State(app_state): State<AppState>) -> Html<String> {
    let podcast = &app_state.podcast;
    let state = PlaybackState::default();

    let mut body = String::new();
    let _ = write!(
        body,
        "<header><h1><a href=\"/\">{}</a></h1><p>{}</p></header>",
        escape(&podcast.title),
        escape(&podcast.description)
    );

    body.push_str("<main><h2>Episodes</h2><ul class=\"episodes\">");
    for episode in &podcast.episodes {
        let _ = write!(
            body,
            "<li><article><time datetime=\"{}\">{}</time><h3><a href=\"{}\">{}</a></h3><p>{}</p><div>{}<a href=\"{}\">Show notes</a></div></article></li>",
            episode.published.to_rfc3339(),
            escape(&episode.formatted_date()),
            episode.link(),
            escape(&episode.title),
            escape(&episode.description),
            listen_button(&state, episode),
            episode.link(),
        );
    }
    body.push_str("</ul></main>");
    body.push_str(&about_panel(podcast));

    Html(layout(&podcast.title, &body))
}

/// GET /:id
pub async fn episode_page(State(app_state): State<AppState>, Path(id): Path<String>) -> Response {
    let podcast = &app_state.podcast;

    let Some(episode) = id
        .parse::<EpisodeId>()
        .ok()
        .and_then(|id| podcast.episode(id))
    else {
        tracing::debug!("No episode page for {:?}", id);
        return not_found(podcast);
    };

    let state = PlaybackState::default();
    let body = format!(
        "<header><a href=\"/\">{}</a></header><main><article><time datetime=\"{}\">{}</time><h1>{}</h1><p>{}</p>{}<section class=\"show-notes\">{}</section></article></main>{}",
        escape(&podcast.title),
        episode.published.to_rfc3339(),
        escape(&episode.formatted_date()),
        escape(&episode.display_title()),
        escape(&episode.description),
        listen_button(&state, episode),
        episode.content,
        about_panel(podcast),
    );

    let title = format!("{} - {}", episode.display_title(), podcast.title);
    Html(layout(&title, &body)).into_response()
}

fn not_found(podcast: &Podcast) -> Response {
    let body = "<main><h1>Episode not found</h1><p><a href=\"/\">All episodes</a></p></main>";
    (
        StatusCode::NOT_FOUND,
        Html(layout(&podcast.title, body)),
    )
        .into_response()
}

/// Play/pause button for one episode, carrying the descriptor the player loads
fn listen_button(state: &PlaybackState, episode: &Episode) -> String {
    let descriptor = episode.descriptor();
    let view = EpisodeButtonView::from_state(state, &descriptor);
    let payload = serde_json::to_string(&descriptor).unwrap_or_default();

    format!(
        "<button type=\"button\" class=\"listen\" aria-label=\"{}\" data-episode=\"{}\" data-playing=\"{}\">Listen</button>",
        escape(&view.aria_label),
        escape(&payload),
        view.playing,
    )
}

fn about_panel(podcast: &Podcast) -> String {
    let mut panel = String::from("<aside class=\"about\"><h2>About</h2>");
    for paragraph in &podcast.about {
        let _ = write!(panel, "<p>{}</p>", escape(paragraph));
    }
    if !podcast.hosts.is_empty() {
        let _ = write!(
            panel,
            "<h3>Hosted by</h3><p>{}</p>",
            escape(&podcast.hosts.join(", "))
        );
    }
    panel.push_str("</aside>");
    panel
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\"><meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"><title>{}</title><link rel=\"stylesheet\" href=\"/assets/site.css\"></head><body>{}<div id=\"player\" hidden></div><audio id=\"audio\" preload=\"none\"></audio><script type=\"module\" src=\"/assets/player.js\"></script></body></html>",
        escape(title),
        body
    )
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
