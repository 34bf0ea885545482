use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use knowme_server::{app, config::Config, session::hosted::HostedStore, state::AppState};

fn mask_secret(s: &str) -> String {
    if s.is_empty() {
        return "<empty>".into();
    }
    let prefix = s.chars().take(4).collect::<String>();
    format!("{}*** (len={})", prefix, s.len())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "knowme_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    tracing::info!(
        bind_addr = %config.bind_addr,
        environment = %config.environment,
        session_store_url = %config.session_store_url,
        session_store_key = %mask_secret(&config.session_store_key),
        session_jwt_key = %mask_secret(&config.session_jwt_key),
        api_base_url = %config.api_base_url,
        public_api_base_url = %config.public_api_base_url,
        frontend_dir = %config.frontend_dir,
        "Loaded configuration from environment/.env"
    );

    let store = HostedStore::new(&config)?;
    let state = AppState::new(Arc::new(store), config.clone());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);
    axum::serve(listener, app(state)).await?;

    Ok(())
}
