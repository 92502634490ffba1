// User profile and account handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use uuid::Uuid;

use crate::{
    app::AppState,
    handlers::ApiResponse,
    middleware::AuthenticatedUser,
    models::user::{User, UserError, UserInfo},
    utils::AuthError,
};

/// GET /api/user/profile - Current user's profile, sans credential material
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> Response {
    let user_id = match Uuid::parse_str(&auth_user.user_id) {
        Ok(id) => id,
        Err(_) => return AuthError::InvalidToken.into_response(),
    };

    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to get database connection: {}", e);
            return AuthError::DatabaseError(e.to_string()).into_response();
        },
    };

    let user = match User::find_by_id(&mut conn, user_id).await {
        Ok(user) => user,
        // Token can outlive the row it points at (account deleted elsewhere)
        Err(UserError::NotFound) => return AuthError::UserNotFound.into_response(),
        Err(e) => {
            tracing::error!("Database error during profile fetch: {}", e);
            return AuthError::DatabaseError(e.to_string()).into_response();
        },
    };

    let response = ApiResponse {
        success: true,
        data: Some(UserInfo::from(user)),
        message: "Profile fetched successfully".to_string(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// DELETE /api/user/account - Remove the user and their payment history
///
/// Both deletes run in one transaction; a failure in either leaves the
/// account untouched.
pub async fn delete_account(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> Response {
    let user_id = match Uuid::parse_str(&auth_user.user_id) {
        Ok(id) => id,
        Err(_) => return AuthError::InvalidToken.into_response(),
    };

    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to get database connection: {}", e);
            return AuthError::DatabaseError(e.to_string()).into_response();
        },
    };

    match User::delete_with_history(&mut conn, user_id).await {
        Ok(payments_removed) => {
            tracing::info!(
                user_id = %user_id,
                payments_removed,
                "Account deleted"
            );

            let response = ApiResponse::<()> {
                success: true,
                data: None,
                message: "Account deleted successfully".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        },
        Err(UserError::NotFound) => AuthError::UserNotFound.into_response(),
        Err(e) => {
            tracing::error!("Account deletion failed: {}", e);
            AuthError::DatabaseError(e.to_string()).into_response()
        },
    }
}
