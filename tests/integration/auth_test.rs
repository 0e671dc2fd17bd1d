//! Integration tests for registration, login, and session tokens.

mod helpers;

use axum::http::StatusCode;

use helpers::{TestApp, token_of};

#[tokio::test]
async fn test_register_returns_session() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "alice",
                "email": "Alice@Example.com",
                "password": "password123",
                "confirmPassword": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.data()["user"]["username"], "alice");
    assert_eq!(response.data()["user"]["email"], "alice@example.com");
    assert!(response.data()["token"].is_string());
    assert!(response.data()["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_rejects_mismatched_confirmation() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "password123",
                "confirmPassword": "password124",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Passwords don't match");
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({ "email": "alice@example.com" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "All fields are required");
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.register("alice", "alice@example.com", "password123")
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "alice2",
                "email": "ALICE@example.com",
                "password": "password123",
                "confirmPassword": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_success_and_failure() {
    let app = TestApp::new();
    app.register("bob", "bob@example.com", "password123").await;

    let ok = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "bob@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.data()["user"]["username"], "bob");

    let wrong = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "bob@example.com",
                "password": "wrongpassword",
            })),
            None,
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let unknown = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "nobody@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body["message"], unknown.body["message"]);
}

#[tokio::test]
async fn test_check_requires_valid_token() {
    let app = TestApp::new();
    let token = app.token().await;

    let ok = app.request("GET", "/api/auth/check", None, Some(&token)).await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.data()["user"]["username"], "tester");

    let missing = app.request("GET", "/api/auth/check", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);

    let garbage = app
        .request("GET", "/api/auth/check", None, Some("not-a-token"))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_check_email() {
    let app = TestApp::new();
    app.token().await;

    let taken = app
        .request(
            "POST",
            "/api/auth/check-email",
            Some(serde_json::json!({ "email": "TESTER@example.com" })),
            None,
        )
        .await;
    assert_eq!(taken.status, StatusCode::OK);
    assert_eq!(taken.data()["exists"], true);

    let free = app
        .request(
            "POST",
            "/api/auth/check-email",
            Some(serde_json::json!({ "email": "free@example.com" })),
            None,
        )
        .await;
    assert_eq!(free.data()["exists"], false);
}

#[tokio::test]
async fn test_logout_is_acknowledged() {
    let app = TestApp::new();
    let token = app.token().await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["message"], "Logged out successfully");
}

#[tokio::test]
async fn test_change_password_issues_new_token() {
    let app = TestApp::new();
    let token = app.token().await;

    let wrong = app
        .request(
            "PUT",
            "/api/users/password",
            Some(serde_json::json!({
                "oldPassword": "not-my-password",
                "newPassword": "newpassword123",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let changed = app
        .request(
            "PUT",
            "/api/users/password",
            Some(serde_json::json!({
                "oldPassword": "password123",
                "newPassword": "newpassword123",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(changed.status, StatusCode::OK);
    let fresh = token_of(&changed);

    let check = app.request("GET", "/api/auth/check", None, Some(&fresh)).await;
    assert_eq!(check.status, StatusCode::OK);

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "tester@example.com",
                "password": "newpassword123",
            })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_profile_keeps_blank_fields() {
    let app = TestApp::new();
    let token = app.token().await;
    app.register("other", "other@example.com", "password123")
        .await;

    let updated = app
        .request(
            "PUT",
            "/api/users/profile",
            Some(serde_json::json!({ "username": "renamed", "email": "" })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["user"]["username"], "renamed");
    assert_eq!(updated.data()["user"]["email"], "tester@example.com");

    let clash = app
        .request(
            "PUT",
            "/api/users/profile",
            Some(serde_json::json!({ "email": "other@example.com" })),
            Some(&token),
        )
        .await;
    assert_eq!(clash.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_health_reports_store() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["store"], "memory");
}
