// Account deletion: user row and payment history go together
// Requires the test database from .env.test

mod common;

use axum::http::StatusCode;
use common::{setup_test_app, signup_test_user};
use prepdeck_backend::models::payment::PaymentRecord;
use prepdeck_backend::models::user::{User, UserError};
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_delete_account_removes_user_and_payment_history() {
    let app = setup_test_app().await;
    let (email, token) = signup_test_user(&app, "delete").await;

    // Buy a plan first so there is payment history to cascade
    let plans = app.get("/api/subscription/plans").send().await;
    let plans: serde_json::Value = plans.json().await;
    let monthly = plans["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["name"] == "Monthly")
        .cloned()
        .unwrap();

    let purchase = app
        .post("/api/subscription/create")
        .bearer(&token)
        .json(&serde_json::json!({
            "planId": monthly["id"],
            "paymentData": { "amountCents": 999 }
        }))
        .send()
        .await;
    assert_eq!(purchase.status(), StatusCode::OK);

    let user_id = {
        let mut conn = app.diesel_pool.get().await.unwrap();
        let user = User::find_by_email(&mut conn, &email).await.unwrap();
        assert_eq!(
            PaymentRecord::count_for_user(&mut conn, user.id).await.unwrap(),
            1
        );
        user.id
    };

    // Delete the account
    let response = app.delete("/api/user/account").bearer(&token).send().await;
    assert_eq!(response.status(), StatusCode::OK);

    // Both the user and the payment rows are gone
    let mut conn = app.diesel_pool.get().await.unwrap();
    assert!(matches!(
        User::find_by_email(&mut conn, &email).await,
        Err(UserError::NotFound)
    ));
    assert_eq!(
        PaymentRecord::count_for_user(&mut conn, user_id).await.unwrap(),
        0
    );
}

#[tokio::test]
#[serial]
async fn test_delete_account_twice_returns_not_found() {
    let app = setup_test_app().await;
    let (_email, token) = signup_test_user(&app, "double-delete").await;

    let first = app.delete("/api/user/account").bearer(&token).send().await;
    assert_eq!(first.status(), StatusCode::OK);

    // The token still verifies, but the row is gone
    let second = app.delete("/api/user/account").bearer(&token).send().await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn test_delete_account_requires_authentication() {
    let app = setup_test_app().await;

    let response = app.delete("/api/user/account").send().await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn test_profile_after_deletion_returns_not_found() {
    let app = setup_test_app().await;
    let (_email, token) = signup_test_user(&app, "ghost").await;

    let deleted = app.delete("/api/user/account").bearer(&token).send().await;
    assert_eq!(deleted.status(), StatusCode::OK);

    let profile = app.get("/api/user/profile").bearer(&token).send().await;
    assert_eq!(profile.status(), StatusCode::NOT_FOUND);
}
