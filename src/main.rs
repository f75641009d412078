use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use blogsite::config::{Cli, Config};
use blogsite::state::AppState;
use blogsite::{db, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    let data_dir = Config::data_dir(&cli)?;
    std::fs::create_dir_all(&data_dir)?;
    tracing::info!("Data directory: {}", data_dir.display());

    let config = Config::load(&cli)?;

    // Ensure media directory exists
    if let Some(media_path) = config.media_path() {
        std::fs::create_dir_all(media_path)?;
    }

    // Initialize database
    let db_path = config
        .db_path()
        .ok_or_else(|| anyhow::anyhow!("database path is not configured"))?;
    let pool = db::create_pool(db_path)?;
    db::run_migrations(&pool)?;

    if cli.seed_demo {
        db::seed::seed_demo(&pool)?;
    }

    let state = AppState::new(pool, config.clone());
    let app = routes::router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
