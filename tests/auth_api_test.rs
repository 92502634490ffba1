// Signup/login/logout/refresh flow through the full router
// Requires the test database from .env.test

mod common;

use axum::http::StatusCode;
use common::{setup_test_app, signup_body, signup_test_user, unique_email};
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_signup_creates_trial_user_and_sets_cookie() {
    let app = setup_test_app().await;
    let email = unique_email("signup");

    let response = app
        .post("/api/auth/signup")
        .json(&signup_body(&email))
        .send()
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let cookie = response.header("set-cookie").expect("auth cookie set");
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("HttpOnly"));

    let body: serde_json::Value = response.json().await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["email"], email);
    assert_eq!(body["data"]["user"]["subscriptionStatus"], "trial");
    assert!(body["data"]["user"].get("passwordHash").is_none());

    // Token verifies and carries the identity claims
    let token = body["data"]["token"].as_str().unwrap();
    let claims = app.token_service.verify_token(token).unwrap();
    assert_eq!(claims.email, email);
    assert_eq!(claims.first_name, "Test");
    assert_eq!(claims.last_name, "Student");
}

#[tokio::test]
#[serial]
async fn test_signup_rejects_duplicate_email_with_conflict() {
    let app = setup_test_app().await;
    let (email, _token) = signup_test_user(&app, "dup").await;

    let response = app
        .post("/api/auth/signup")
        .json(&signup_body(&email))
        .send()
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = response.json().await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "EMAIL_TAKEN");
}

#[tokio::test]
#[serial]
async fn test_signup_rejects_short_password() {
    let app = setup_test_app().await;
    let mut body = signup_body(&unique_email("shortpw"));
    body["password"] = serde_json::json!("five5");

    let response = app.post("/api/auth/signup").json(&body).send().await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn test_login_succeeds_with_correct_credentials() {
    let app = setup_test_app().await;
    let (email, _token) = signup_test_user(&app, "login").await;

    let response = app
        .post("/api/auth/login")
        .json(&serde_json::json!({ "email": email, "password": "sup3rsecret" }))
        .send()
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await;
    assert_eq!(body["data"]["user"]["email"], email);
    assert!(body["data"]["token"].as_str().is_some());
}

#[tokio::test]
#[serial]
async fn test_login_is_case_insensitive_on_email() {
    let app = setup_test_app().await;
    let (email, _token) = signup_test_user(&app, "case").await;

    let response = app
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": email.to_uppercase(),
            "password": "sup3rsecret"
        }))
        .send()
        .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn test_login_failure_is_uniform_for_unknown_email_and_bad_password() {
    let app = setup_test_app().await;
    let (email, _token) = signup_test_user(&app, "uniform").await;

    let bad_password = app
        .post("/api/auth/login")
        .json(&serde_json::json!({ "email": email, "password": "wrong-password" }))
        .send()
        .await;
    let unknown_email = app
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "email": unique_email("never-signed-up"),
            "password": "wrong-password"
        }))
        .send()
        .await;

    assert_eq!(bad_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    // The two failures must be indistinguishable
    let a: serde_json::Value = bad_password.json().await;
    let b: serde_json::Value = unknown_email.json().await;
    assert_eq!(a["message"], b["message"]);
    assert_eq!(a["error"]["code"], b["error"]["code"]);
}

#[tokio::test]
#[serial]
async fn test_login_requires_both_fields() {
    let app = setup_test_app().await;

    let response = app
        .post("/api/auth/login")
        .json(&serde_json::json!({ "email": "someone@example.com" }))
        .send()
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn test_refresh_reissues_token_for_valid_bearer() {
    let app = setup_test_app().await;
    let (email, token) = signup_test_user(&app, "refresh").await;

    let response = app.post("/api/auth/refresh").bearer(&token).send().await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await;
    let new_token = body["data"]["token"].as_str().unwrap();

    let claims = app.token_service.verify_token(new_token).unwrap();
    assert_eq!(claims.email, email);
}

#[tokio::test]
#[serial]
async fn test_refresh_rejects_missing_and_garbage_tokens() {
    let app = setup_test_app().await;

    let missing = app.post("/api/auth/refresh").send().await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let garbage = app
        .post("/api/auth/refresh")
        .bearer("definitely.not.valid")
        .send()
        .await;
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = garbage.json().await;
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
#[serial]
async fn test_logout_clears_cookie() {
    let app = setup_test_app().await;

    let response = app.post("/api/auth/logout").send().await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.header("set-cookie").expect("delete cookie set");
    assert!(cookie.starts_with("token=;") || cookie.starts_with("token=\"\""));
}

#[tokio::test]
#[serial]
async fn test_profile_requires_authentication() {
    let app = setup_test_app().await;

    let anonymous = app.get("/api/user/profile").send().await;
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let (email, token) = signup_test_user(&app, "profile").await;
    let authed = app.get("/api/user/profile").bearer(&token).send().await;
    assert_eq!(authed.status(), StatusCode::OK);

    let body: serde_json::Value = authed.json().await;
    assert_eq!(body["data"]["email"], email);
    assert_eq!(body["data"]["school"], "Test University");
}
