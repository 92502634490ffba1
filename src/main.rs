use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prepdeck_backend::db::mask_connection_string;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prepdeck_backend=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = prepdeck_backend::app_config::config();
    let bind_address = config.server.bind_address.clone();

    info!("Starting PrepDeck Backend API on {}", bind_address);
    info!(
        "Database URL: {}",
        mask_connection_string(&config.database.url)
    );

    // Pools, migrations and services
    let state = prepdeck_backend::initialize_app_state()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize application state: {}", e))?;

    let app = prepdeck_backend::build_router(state);

    info!("Starting HTTP server on {}...", bind_address);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
