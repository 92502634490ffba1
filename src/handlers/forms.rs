// Marketing-site form handlers: contact messages and demo requests
// These mirror the public site's field-by-field validation and reply with a
// bare `{success, error}` shape the landing pages expect

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    app::AppState,
    models::forms::{NewContactMessage, NewDemoRequest},
    utils::{is_valid_email, is_valid_phone, trim_and_validate_field, trim_optional_field},
};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoRequestBody {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub school: Option<String>,
    pub phone: Option<String>,
}

fn form_error(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "error": message })),
    )
        .into_response()
}

fn form_server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false, "error": "Internal server error" })),
    )
        .into_response()
}

/// POST /api/contact - Store a contact-form submission
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(req): Json<ContactRequest>,
) -> Response {
    // Required fields
    let (first_name, last_name, email, subject, message) = match (
        req.first_name.as_deref().and_then(|v| trim_and_validate_field(v, true).ok()),
        req.last_name.as_deref().and_then(|v| trim_and_validate_field(v, true).ok()),
        req.email.as_deref().and_then(|v| trim_and_validate_field(v, true).ok()),
        req.subject.as_deref().and_then(|v| trim_and_validate_field(v, true).ok()),
        req.message.as_deref().and_then(|v| trim_and_validate_field(v, true).ok()),
    ) {
        (Some(f), Some(l), Some(e), Some(s), Some(m)) => (f, l, e, s, m),
        _ => return form_error("All required fields must be provided"),
    };

    if first_name.len() > 50 {
        return form_error("First name must be 50 characters or less");
    }
    if last_name.len() > 50 {
        return form_error("Last name must be 50 characters or less");
    }
    if !is_valid_email(&email) {
        return form_error("Please enter a valid email address");
    }

    let phone = trim_optional_field(req.phone.as_ref());
    if let Some(ref phone) = phone {
        if phone.len() > 20 {
            return form_error("Phone number must be 20 characters or less");
        }
        if !is_valid_phone(phone) {
            return form_error("Phone number must contain only digits");
        }
    }

    if subject.len() > 100 {
        return form_error("Subject must be 100 characters or less");
    }
    if message.len() > 1000 {
        return form_error("Message must be 1000 characters or less");
    }

    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to get database connection: {}", e);
            return form_server_error();
        },
    };

    let new_message = NewContactMessage {
        first_name,
        last_name,
        email,
        phone,
        subject,
        message,
    };

    match new_message.insert(&mut conn).await {
        Ok(id) => {
            tracing::info!(message_id = %id, "Contact message saved");
            (StatusCode::CREATED, Json(json!({ "success": true }))).into_response()
        },
        Err(e) => {
            tracing::error!("Contact form submission error: {}", e);
            form_server_error()
        },
    }
}

/// POST /api/demo - Store a demo-request submission
pub async fn submit_demo(
    State(state): State<AppState>,
    Json(req): Json<DemoRequestBody>,
) -> Response {
    // All fields including phone are required on the demo form
    let (first_name, last_name, email, school, phone) = match (
        req.first_name.as_deref().and_then(|v| trim_and_validate_field(v, true).ok()),
        req.last_name.as_deref().and_then(|v| trim_and_validate_field(v, true).ok()),
        req.email.as_deref().and_then(|v| trim_and_validate_field(v, true).ok()),
        req.school.as_deref().and_then(|v| trim_and_validate_field(v, true).ok()),
        req.phone.as_deref().and_then(|v| trim_and_validate_field(v, true).ok()),
    ) {
        (Some(f), Some(l), Some(e), Some(s), Some(p)) => (f, l, e, s, p),
        _ => return form_error("All required fields must be provided"),
    };

    if first_name.len() > 50 {
        return form_error("First name must be 50 characters or less");
    }
    if last_name.len() > 50 {
        return form_error("Last name must be 50 characters or less");
    }
    if !is_valid_email(&email) {
        return form_error("Please enter a valid email address");
    }
    if phone.len() > 20 {
        return form_error("Phone number must be 20 characters or less");
    }
    if !is_valid_phone(&phone) {
        return form_error("Phone number must contain only digits");
    }
    if school.len() > 100 {
        return form_error("School must be 100 characters or less");
    }

    let mut conn = match state.diesel_pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::error!("Failed to get database connection: {}", e);
            return form_server_error();
        },
    };

    let new_request = NewDemoRequest {
        first_name,
        last_name,
        email,
        school,
        phone: Some(phone),
    };

    match new_request.insert(&mut conn).await {
        Ok(id) => {
            tracing::info!(request_id = %id, "Demo request saved");
            (StatusCode::CREATED, Json(json!({ "success": true }))).into_response()
        },
        Err(e) => {
            tracing::error!("Demo form submission error: {}", e);
            form_server_error()
        },
    }
}
