// Library exports for the PrepDeck backend
// This file exposes modules and functions for library consumers

pub mod app;
pub mod app_config;
pub mod client;
pub mod db;
pub mod handlers;
pub mod middleware;
pub mod migrations;
pub mod models;
pub mod schema;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use app::AppState;
pub use app_config::{AppConfig, CONFIG};
pub use db::{DieselDatabaseConfig, DieselPool};
pub use middleware::auth_middleware;
pub use middleware::AuthenticatedUser;
pub use models::auth::TokenClaims;
pub use models::user::{SubscriptionStatus, User, UserInfo};
pub use services::{
    PurchaseOutcome, SubscriptionError, SubscriptionService, TokenConfig, TokenError, TokenService,
};
pub use utils::AuthError;

// Re-export individual handlers for direct use
pub use handlers::auth::{login, logout, refresh, signup};
pub use handlers::subscription::{create_subscription, list_plans};
pub use handlers::user::{delete_account, get_profile};

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tracing::info;

// Library initialization function for external consumers
pub async fn initialize_app_state() -> Result<AppState, Box<dyn std::error::Error>> {
    // Load environment
    dotenv::dotenv().ok();

    // Initialize config
    let config = app_config::config();

    // Initialize database pool
    info!("Initializing database pool...");
    let db_config = db::DieselDatabaseConfig::default();
    let max_connections = db_config.max_connections;
    let diesel_pool = db::create_diesel_pool(db_config).await?;

    // Run migrations if enabled
    if migrations::should_run_migrations() {
        info!("Running embedded migrations...");
        migrations::run_migrations(&diesel_pool)
            .await
            .map_err(|e| format!("Migration failed: {}", e))?;
    }

    // Initialize services
    let token_service = Arc::new(TokenService::from_env());
    let subscription_service = Arc::new(SubscriptionService::new());

    Ok(AppState {
        config: Arc::new(config.clone()),
        diesel_pool,
        token_service,
        subscription_service,
        max_connections,
    })
}

/// Build the full application router
pub fn build_router(state: AppState) -> Router {
    let mut api = Router::new()
        .nest("/auth", handlers::auth_routes())
        .merge(handlers::plan_routes())
        .merge(handlers::form_routes())
        .merge(handlers::protected_routes(state.clone()))
        .route("/health", get(health_check));

    if state.config.features.enable_swagger_ui {
        api = api
            .route("/docs", get(handlers::docs::redirect_to_docs))
            .route("/docs/", get(handlers::docs::serve_swagger_ui))
            .route("/docs/openapi.json", get(handlers::docs::serve_openapi_spec));
    }

    Router::new()
        .nest("/api", api)
        .layer(axum::middleware::from_fn(
            middleware::dynamic_cors_middleware,
        ))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

// Health check handler
pub async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    use axum::http::StatusCode;
    use axum::Json;

    let mut overall_healthy = true;
    let timestamp = chrono::Utc::now().to_rfc3339();

    // Check PostgreSQL
    let postgres_health = match db::check_diesel_health(&state.diesel_pool).await {
        Ok(_) => serde_json::json!({
            "status": "healthy",
            "max_connections": state.max_connections,
            "error": null
        }),
        Err(e) => {
            overall_healthy = false;
            serde_json::json!({
                "status": "unhealthy",
                "error": format!("Database connection failed: {}", e)
            })
        },
    };

    let response = serde_json::json!({
        "status": if overall_healthy { "healthy" } else { "degraded" },
        "service": "prepdeck-backend",
        "timestamp": timestamp,
        "components": {
            "postgresql": postgres_health
        }
    });

    if overall_healthy {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}
