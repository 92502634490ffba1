// Subscription plan listing and purchase handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    app::AppState,
    handlers::ApiResponse,
    middleware::AuthenticatedUser,
    models::plan::PlanInfo,
    models::user::UserError,
    services::subscription::SubscriptionError,
    utils::AuthError,
};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub plan_id: Option<Uuid>,
    pub payment_data: Option<PaymentData>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentData {
    pub amount_cents: Option<i32>,
    pub payment_method: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    pub transaction_id: String,
    pub plan: String,
    pub amount_cents: i32,
    pub subscription_ends_at: chrono::DateTime<chrono::Utc>,
}

/// GET /api/subscription/plans - Active plan catalog, cheapest first
pub async fn list_plans(State(state): State<AppState>) -> Response {
    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to get database connection: {}", e);
            return AuthError::DatabaseError(e.to_string()).into_response();
        },
    };

    match state.subscription_service.list_plans(&mut conn).await {
        Ok(plans) => {
            let response = ApiResponse {
                success: true,
                data: Some(plans.into_iter().map(PlanInfo::from).collect::<Vec<_>>()),
                message: "Plans fetched successfully".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        },
        Err(e) => {
            tracing::error!("Plans fetch error: {}", e);
            AuthError::DatabaseError(e.to_string()).into_response()
        },
    }
}

/// POST /api/subscription/create - Purchase a plan for the current user
///
/// The payment insert and the subscription update commit together or not at
/// all; the handler only maps outcomes onto status codes.
pub async fn create_subscription(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(purchase_req): Json<PurchaseRequest>,
) -> Response {
    let (plan_id, payment_data) = match (purchase_req.plan_id, purchase_req.payment_data) {
        (Some(plan_id), Some(payment_data)) => (plan_id, payment_data),
        _ => {
            return AuthError::ValidationError(
                "Plan ID and payment data are required".to_string(),
            )
            .into_response()
        },
    };

    let amount_cents = match payment_data.amount_cents {
        Some(amount) => amount,
        None => {
            return AuthError::ValidationError("Payment amount is required".to_string())
                .into_response()
        },
    };

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

    match state
        .subscription_service
        .purchase(
            &mut conn,
            user_id,
            plan_id,
            amount_cents,
            payment_data.payment_method,
        )
        .await
    {
        Ok(outcome) => {
            let response = ApiResponse {
                success: true,
                data: Some(PurchaseResponse {
                    transaction_id: outcome.transaction_id,
                    plan: outcome.plan_name,
                    amount_cents: outcome.amount_cents,
                    subscription_ends_at: outcome.subscription_ends_at,
                }),
                message: "Subscription created successfully".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        },
        Err(SubscriptionError::PlanNotFound) => {
            AuthError::ValidationError("Invalid subscription plan".to_string()).into_response()
        },
        Err(SubscriptionError::AmountMismatch { .. }) => AuthError::ValidationError(
            "Payment amount does not match plan price".to_string(),
        )
        .into_response(),
        Err(SubscriptionError::User(UserError::NotFound)) => {
            AuthError::UserNotFound.into_response()
        },
        Err(e) => {
            tracing::error!("Subscription creation error: {}", e);
            AuthError::DatabaseError(e.to_string()).into_response()
        },
    }
}
