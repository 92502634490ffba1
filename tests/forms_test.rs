// Contact and demo form intake
// Requires the test database from .env.test

mod common;

use axum::http::StatusCode;
use common::setup_test_app;
use serial_test::serial;

fn contact_body() -> serde_json::Value {
    serde_json::json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "phone": "15551234567",
        "subject": "Question about plans",
        "message": "Does the yearly plan include mock exams?"
    })
}

#[tokio::test]
#[serial]
async fn test_contact_form_accepted() {
    let app = setup_test_app().await;

    let response = app.post("/api/contact").json(&contact_body()).send().await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = response.json().await;
    assert_eq!(body["success"], true);
}

#[tokio::test]
#[serial]
async fn test_contact_form_phone_is_optional() {
    let app = setup_test_app().await;

    let mut body = contact_body();
    body.as_object_mut().unwrap().remove("phone");

    let response = app.post("/api/contact").json(&body).send().await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
#[serial]
async fn test_contact_form_rejects_missing_required_fields() {
    let app = setup_test_app().await;

    let mut body = contact_body();
    body.as_object_mut().unwrap().remove("subject");

    let response = app.post("/api/contact").json(&body).send().await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let parsed: serde_json::Value = response.json().await;
    assert_eq!(parsed["success"], false);
    assert_eq!(parsed["error"], "All required fields must be provided");
}

#[tokio::test]
#[serial]
async fn test_contact_form_rejects_bad_email_and_phone() {
    let app = setup_test_app().await;

    let mut bad_email = contact_body();
    bad_email["email"] = serde_json::json!("not-an-email");
    let response = app.post("/api/contact").json(&bad_email).send().await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut bad_phone = contact_body();
    bad_phone["phone"] = serde_json::json!("555-123-4567");
    let response = app.post("/api/contact").json(&bad_phone).send().await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let parsed: serde_json::Value = response.json().await;
    assert_eq!(parsed["error"], "Phone number must contain only digits");
}

#[tokio::test]
#[serial]
async fn test_contact_form_rejects_oversized_message() {
    let app = setup_test_app().await;

    let mut body = contact_body();
    body["message"] = serde_json::json!("x".repeat(1001));

    let response = app.post("/api/contact").json(&body).send().await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn test_demo_form_accepted() {
    let app = setup_test_app().await;

    let response = app
        .post("/api/demo")
        .json(&serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "school": "Analytical Engine University",
            "phone": "15551234567"
        }))
        .send()
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
#[serial]
async fn test_demo_form_requires_phone() {
    let app = setup_test_app().await;

    let response = app
        .post("/api/demo")
        .json(&serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "school": "Analytical Engine University"
        }))
        .send()
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
