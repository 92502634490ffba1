// Authentication middleware for protected routes
// Validates tokens and injects AuthenticatedUser into request extensions

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{app::AppState, middleware::auth::AuthenticatedUser, utils::AuthError};

/// Name of the httpOnly cookie carrying the auth token for web clients
pub const TOKEN_COOKIE: &str = "token";

/// Pull the auth token from the `token` cookie (web) or the
/// `Authorization: Bearer` header (API clients). Cookie wins, matching the
/// web client which always sends it.
pub fn extract_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = jar.get(TOKEN_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

/// Middleware that validates tokens and adds AuthenticatedUser to extensions
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    jar: CookieJar,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = match extract_token(&jar, request.headers()) {
        Some(token) => token,
        None => return AuthError::MissingToken.into_response(),
    };

    match app_state.token_service.verify_token(&token) {
        Ok(claims) => {
            let auth_user = AuthenticatedUser {
                user_id: claims.user_id,
                email: claims.email,
                first_name: claims.first_name,
                last_name: claims.last_name,
                exp: claims.exp,
            };

            request.extensions_mut().insert(auth_user);
            next.run(request).await
        },
        Err(e) => {
            tracing::warn!("Token validation failed: {}", e);
            AuthError::InvalidToken.into_response()
        },
    }
}

/// Extractor for AuthenticatedUser from request extensions
/// This allows handlers to take AuthenticatedUser directly as a parameter
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}
