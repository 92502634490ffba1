// Authentication handlers: signup, login, logout, token refresh
// Tokens travel as an httpOnly cookie for web clients and as a bearer token
// in the JSON body for anything else

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::AppState,
    app_config::AppConfig,
    handlers::ApiResponse,
    middleware::{extract_token, TOKEN_COOKIE},
    models::user::{NewUser, User, UserError, UserInfo},
    utils::{hash_password, log_auth_failure, trim_and_validate_field, verify_password, AuthError},
};

// =============================================================================
// REQUEST/RESPONSE TYPES
// =============================================================================

#[derive(Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100, message = "First name must be between 1 and 100 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Last name must be between 1 and 100 characters"))]
    pub last_name: String,

    #[validate(email(message = "Please enter a valid email address"))]
    #[validate(length(max = 320, message = "Email must be less than 320 characters"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,

    #[validate(length(min = 1, max = 255, message = "School must be between 1 and 255 characters"))]
    pub school: String,

    #[validate(length(min = 1, max = 50, message = "Year must be between 1 and 50 characters"))]
    pub year: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires_in: u64,
    pub user: UserInfo,
}

// =============================================================================
// COOKIE HELPERS
// =============================================================================

/// Build the httpOnly auth cookie carrying the token
fn create_token_cookie(token: String, config: &AppConfig) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(config.is_production())
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(config.token.expiry as i64))
        .build()
}

/// Build a cookie that deletes the auth token
fn create_delete_token_cookie(config: &AppConfig) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, ""))
        .path("/")
        .http_only(true)
        .secure(config.is_production())
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(-1)) // Negative max_age deletes the cookie
        .build()
}

/// Flatten validator errors into one human-readable message
fn validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// AUTHENTICATION HANDLERS
// =============================================================================

/// POST /api/auth/signup - Create an account and return a signed token
pub async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(signup_req): Json<SignupRequest>,
) -> Response {
    // Step 1: Validate request shape and constraints
    if let Err(validation_errors) = signup_req.validate() {
        return AuthError::ValidationError(validation_message(&validation_errors)).into_response();
    }

    let first_name = match trim_and_validate_field(&signup_req.first_name, true) {
        Ok(v) => v,
        Err(_) => {
            return AuthError::ValidationError("First name cannot be empty".to_string())
                .into_response()
        },
    };
    let last_name = match trim_and_validate_field(&signup_req.last_name, true) {
        Ok(v) => v,
        Err(_) => {
            return AuthError::ValidationError("Last name cannot be empty".to_string())
                .into_response()
        },
    };
    let school = match trim_and_validate_field(&signup_req.school, true) {
        Ok(v) => v,
        Err(_) => {
            return AuthError::ValidationError("School cannot be empty".to_string()).into_response()
        },
    };
    let year = match trim_and_validate_field(&signup_req.year, true) {
        Ok(v) => v,
        Err(_) => {
            return AuthError::ValidationError("Year cannot be empty".to_string()).into_response()
        },
    };

    let email = signup_req.email.trim().to_lowercase();

    // Step 2: Check email uniqueness
    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to get database connection: {}", e);
            return AuthError::DatabaseError(e.to_string()).into_response();
        },
    };

    match User::find_by_email(&mut conn, &email).await {
        Ok(_existing) => {
            log_auth_failure(&email, &AuthError::EmailTaken);
            return AuthError::EmailTaken.into_response();
        },
        Err(UserError::NotFound) => {
            // Email is available
        },
        Err(e) => {
            tracing::error!("Error checking email uniqueness: {}", e);
            return AuthError::DatabaseError(e.to_string()).into_response();
        },
    }

    // Step 3: Hash the password
    let password_hash = match hash_password(&signup_req.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash password: {}", e);
            return AuthError::InternalError.into_response();
        },
    };

    // Step 4: Create the user; trial window comes from column defaults
    let new_user = NewUser {
        first_name,
        last_name,
        email,
        password_hash,
        school,
        graduation_year: year,
    };

    let created_user = match User::create(&mut conn, new_user).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Failed to create user: {}", e);
            return AuthError::DatabaseError(e.to_string()).into_response();
        },
    };

    // Step 5: Issue a token
    let token = match state.token_service.generate_token(
        &created_user.id.to_string(),
        &created_user.email,
        &created_user.first_name,
        &created_user.last_name,
    ) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to generate token: {}", e);
            return AuthError::TokenError(e.to_string()).into_response();
        },
    };

    tracing::info!("New user signed up: {}", created_user.email);

    let response = ApiResponse {
        success: true,
        data: Some(TokenResponse {
            token: token.clone(),
            expires_in: state.token_service.expiry_seconds(),
            user: UserInfo::from(created_user),
        }),
        message: "User created successfully".to_string(),
    };

    let updated_jar = jar.add(create_token_cookie(token, &state.config));
    (StatusCode::CREATED, updated_jar, Json(response)).into_response()
}

/// POST /api/auth/login - Authenticate and return a signed token
///
/// The 401 reply is identical whether the email or the password was wrong.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(login_req): Json<LoginRequest>,
) -> Response {
    // Step 1: Both fields are required
    let (email, password) = match (login_req.email, login_req.password) {
        (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
            (email.trim().to_lowercase(), password)
        },
        _ => {
            return AuthError::ValidationError("Email and password are required".to_string())
                .into_response()
        },
    };

    // Step 2: Look up the user
    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to get database connection: {}", e);
            return AuthError::DatabaseError(e.to_string()).into_response();
        },
    };

    let user = match User::find_by_email(&mut conn, &email).await {
        Ok(user) => user,
        Err(UserError::NotFound) => {
            log_auth_failure(&email, &AuthError::InvalidCredentials);
            return AuthError::InvalidCredentials.into_response();
        },
        Err(e) => {
            tracing::error!("Database error during login: {}", e);
            return AuthError::DatabaseError(e.to_string()).into_response();
        },
    };

    // Step 3: Verify the password
    match verify_password(&password, &user.password_hash) {
        Ok(true) => {},
        Ok(false) => {
            log_auth_failure(&email, &AuthError::InvalidCredentials);
            return AuthError::InvalidCredentials.into_response();
        },
        Err(e) => {
            tracing::error!("Password verification error: {}", e);
            return AuthError::InternalError.into_response();
        },
    }

    // Step 4: Issue a token
    let token = match state.token_service.generate_token(
        &user.id.to_string(),
        &user.email,
        &user.first_name,
        &user.last_name,
    ) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to generate token: {}", e);
            return AuthError::TokenError(e.to_string()).into_response();
        },
    };

    tracing::info!("Login successful: {}", user.email);

    let response = ApiResponse {
        success: true,
        data: Some(TokenResponse {
            token: token.clone(),
            expires_in: state.token_service.expiry_seconds(),
            user: UserInfo::from(user),
        }),
        message: "Login successful".to_string(),
    };

    let updated_jar = jar.add(create_token_cookie(token, &state.config));
    (StatusCode::OK, updated_jar, Json(response)).into_response()
}

/// POST /api/auth/logout - Clear the auth cookie
///
/// Tokens are stateless; logout just removes the cookie and the client drops
/// its stored copy.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let response = ApiResponse::<()> {
        success: true,
        data: None,
        message: "Logged out successfully".to_string(),
    };

    let updated_jar = jar.add(create_delete_token_cookie(&state.config));
    (StatusCode::OK, updated_jar, Json(response)).into_response()
}

/// POST /api/auth/refresh - Reissue a token for a still-valid credential
///
/// Verifies the presented token, reloads the user so the new claims reflect
/// current profile data, and sets a fresh cookie.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> Response {
    // Step 1: Token from cookie (web) or Authorization header (other clients)
    let token = match extract_token(&jar, &headers) {
        Some(token) => token,
        None => return AuthError::MissingToken.into_response(),
    };

    // Step 2: Verify the current token
    let claims = match state.token_service.verify_token(&token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!("Token refresh rejected: {}", e);
            return AuthError::InvalidToken.into_response();
        },
    };

    let user_id = match Uuid::parse_str(&claims.user_id) {
        Ok(id) => id,
        Err(_) => return AuthError::InvalidToken.into_response(),
    };

    // Step 3: Reload the user so fresh claims reflect current data
    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to get database connection: {}", e);
            return AuthError::DatabaseError(e.to_string()).into_response();
        },
    };

    let user = match User::find_by_id(&mut conn, user_id).await {
        Ok(user) => user,
        Err(UserError::NotFound) => return AuthError::UserNotFound.into_response(),
        Err(e) => {
            tracing::error!("Database error during token refresh: {}", e);
            return AuthError::DatabaseError(e.to_string()).into_response();
        },
    };

    // Step 4: Issue the replacement token
    let new_token = match state.token_service.generate_token(
        &user.id.to_string(),
        &user.email,
        &user.first_name,
        &user.last_name,
    ) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to generate token: {}", e);
            return AuthError::TokenError(e.to_string()).into_response();
        },
    };

    let response = ApiResponse {
        success: true,
        data: Some(TokenResponse {
            token: new_token.clone(),
            expires_in: state.token_service.expiry_seconds(),
            user: UserInfo::from(user),
        }),
        message: "Token refreshed successfully".to_string(),
    };

    let updated_jar = jar.add(create_token_cookie(new_token, &state.config));
    (StatusCode::OK, updated_jar, Json(response)).into_response()
}
