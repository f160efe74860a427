mod config_manager;
mod error;
mod handlers;
mod llm;
mod page;
mod routes;
mod session;
mod state;
mod translate;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config_manager::Config;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("translation_assistant=debug,tower_http=debug")),
        )
        .init();

    // A missing or empty OPENAI_API_KEY stops us here, before anything is served.
    let (config, loaded_path) = Config::discover(&Config::default_candidates())
        .context("Refusing to start without a valid configuration")?;
    info!("Loaded configuration from: {}", loaded_path);

    let addr = config.system_config.socket_addr()?;
    let app_state = AppState::new(config).context("Failed to initialize the translation backend")?;
    app_state.spawn_session_sweeper();
    let app = routes::build_app(app_state);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
