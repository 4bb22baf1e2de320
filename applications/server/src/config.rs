/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_content")]
    pub content: ContentSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentSettings {
    /// Podcast catalog (JSON)
    #[serde(default = "default_podcast_file")]
    pub podcast_file: PathBuf,

    /// Directory served under `/assets` (player bundle, styles)
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from `config.toml` and environment
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file (or `config.toml`) and
    /// environment
    ///
    /// Environment variables use the `THEIRSIDE_` prefix with `__` between
    /// sections, e.g. `THEIRSIDE_SERVER__PORT=3000`.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("THEIRSIDE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.content.podcast_file.is_file() {
            return Err(ServerError::Config(format!(
                "Podcast catalog not found at {:?} (set THEIRSIDE_CONTENT__PODCAST_FILE)",
                self.content.podcast_file
            )));
        }

        if !self.content.assets_dir.is_dir() {
            tracing::warn!(
                "Assets directory {:?} does not exist; the player bundle will not be served",
                self.content.assets_dir
            );
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_content() -> ContentSettings {
    ContentSettings {
        podcast_file: default_podcast_file(),
        assets_dir: default_assets_dir(),
    }
}

fn default_podcast_file() -> PathBuf {
    PathBuf::from("content/podcast.json")
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("./web")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            content: default_content(),
        }
    }
}
