// HTTP route handlers for the PrepDeck backend

pub mod auth;
pub mod docs;
pub mod forms;
pub mod subscription;
pub mod user;

use crate::app::AppState;
use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use serde::Serialize;

/// Standard response envelope for JSON endpoints
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
}

// Authentication routes (public)
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/refresh", post(auth::refresh))
}

// Marketing-site form routes (public)
pub fn form_routes() -> Router<AppState> {
    Router::new()
        .route("/contact", post(forms::submit_contact))
        .route("/demo", post(forms::submit_demo))
}

// Subscription catalog route (public)
pub fn plan_routes() -> Router<AppState> {
    Router::new().route("/subscription/plans", get(subscription::list_plans))
}

// Routes requiring a verified token
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/user/profile", get(user::get_profile))
        .route("/user/account", delete(user::delete_account))
        .route("/subscription/create", post(subscription::create_subscription))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth_middleware,
        ))
}
