/// Their Side - podcast site server
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf};
use theirside_core::Podcast;
use theirside_server::{config::ServerConfig, create_router, state::AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "theirside-server")]
#[command(about = "Their Side podcast site server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long, env = "THEIRSIDE_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Print the episode catalog
    Episodes {
        /// Configuration file path
        #[arg(short, long, env = "THEIRSIDE_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "theirside_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config).await?;
        }
        Commands::Episodes { config } => {
            list_episodes(config)?;
        }
    }

    Ok(())
}

async fn serve(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load_from(config_path.as_deref())?;
    config.validate()?;

    tracing::info!("Starting Their Side server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let podcast = Podcast::load(&config.content.podcast_file)?;
    tracing::info!(
        "Loaded {} episodes from {:?}",
        podcast.episodes.len(),
        config.content.podcast_file
    );

    let app_state = AppState::new(podcast);
    let app = create_router(app_state, &config.content.assets_dir);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn list_episodes(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = ServerConfig::load_from(config_path.as_deref())?;
    let podcast = Podcast::load(&config.content.podcast_file)?;

    println!("{}:", podcast.title);
    for episode in &podcast.episodes {
        println!(
            "  {} ({}) - {}",
            episode.display_title(),
            episode.formatted_date(),
            episode.audio.src
        );
    }

    Ok(())
}
