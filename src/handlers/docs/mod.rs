// API Documentation handlers - modular structure
pub mod auth;
pub mod forms;
pub mod health;
pub mod schemas;
pub mod subscription;
pub mod swagger_ui;
pub mod user;

use crate::app::AppState;
use crate::app_config::AppConfig;
use axum::{
    extract::{OriginalUri, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Serve OpenAPI JSON specification at /api/docs/openapi.json
pub async fn serve_openapi_spec(State(app_state): State<AppState>) -> Response {
    let spec = build_openapi_spec(app_state.config.as_ref());

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        serde_json::to_string(&spec).unwrap_or_default(),
    )
        .into_response()
}

/// Redirect /docs to /docs/ for proper relative path resolution
pub async fn redirect_to_docs(original_uri: OriginalUri) -> impl IntoResponse {
    let mut path = original_uri.0.path().to_string();
    if !path.ends_with('/') {
        path.push('/');
    }
    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, path)]).into_response()
}

/// Re-export swagger UI handler
pub use swagger_ui::serve_swagger_ui;

/// Build the complete OpenAPI specification
pub fn build_openapi_spec(config: &AppConfig) -> serde_json::Value {
    let api_url = format!("http://localhost:{}/api", config.server.port);

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "PrepDeck Backend API",
            "description": "Exam-prep platform API: authentication, subscription lifecycle and marketing-site form intake",
            "version": "1.0.0"
        },
        "servers": [
            {
                "url": api_url,
                "description": format!("Current server ({})", config.server.environment)
            }
        ],
        "tags": [
            {
                "name": "Authentication",
                "description": "Signup, login, logout and token refresh"
            },
            {
                "name": "User",
                "description": "Profile and account management"
            },
            {
                "name": "Subscription",
                "description": "Plan catalog and subscription purchase"
            },
            {
                "name": "Forms",
                "description": "Contact and demo form intake"
            },
            {
                "name": "Health",
                "description": "Service health checks"
            }
        ],
        "paths": {
            "/auth/signup": auth::signup_endpoint(),
            "/auth/login": auth::login_endpoint(),
            "/auth/logout": auth::logout_endpoint(),
            "/auth/refresh": auth::refresh_endpoint(),
            "/user/profile": user::profile_endpoint(),
            "/user/account": user::account_endpoint(),
            "/subscription/plans": subscription::plans_endpoint(),
            "/subscription/create": subscription::create_endpoint(),
            "/contact": forms::contact_endpoint(),
            "/demo": forms::demo_endpoint(),
            "/health": health::health_endpoint(),
        },
        "components": {
            "schemas": schemas::all_schemas(),
            "securitySchemes": {
                "bearerAuth": {
                    "type": "http",
                    "scheme": "bearer",
                    "bearerFormat": "JWT",
                    "description": "Token obtained from signup, login or refresh; web clients receive the same token as an httpOnly cookie"
                },
                "cookieAuth": {
                    "type": "apiKey",
                    "in": "cookie",
                    "name": "token"
                }
            }
        }
    })
}
