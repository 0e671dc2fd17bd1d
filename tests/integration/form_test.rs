//! Integration tests for typebots, fields, and responses.

mod helpers;

use axum::http::StatusCode;

use helpers::TestApp;

fn sample_fields() -> serde_json::Value {
    serde_json::json!([
        {
            "id": "q1",
            "type": "text",
            "category": "input",
            "content": "What is your name?",
            "required": "yes",
            "options": null
        },
        {
            "id": "q2",
            "type": "choice",
            "category": "input",
            "content": "Pick one",
            "options": ["a", null, 3]
        }
    ])
}

#[tokio::test]
async fn test_create_unfiled_and_get() {
    let app = TestApp::new();
    let token = app.token().await;
    let form_id = app.create_form(&token, "Onboarding").await;

    let response = app
        .request("GET", &format!("/api/typebots/{form_id}"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "Onboarding");
    assert!(response.data()["folder_id"].is_null());
    assert_eq!(response.data()["fields"], serde_json::json!([]));
}

#[tokio::test]
async fn test_names_are_unique_per_folder() {
    let app = TestApp::new();
    let token = app.token().await;
    let folder_id = app.create_folder(&token, "Surveys").await;
    app.create_form(&token, "Poll").await;

    let same_scope = app
        .request(
            "POST",
            "/api/typebots",
            Some(serde_json::json!({ "name": "Poll" })),
            Some(&token),
        )
        .await;
    assert_eq!(same_scope.status, StatusCode::CONFLICT);

    app.create_form_in(&token, &folder_id, "Poll").await;
}

#[tokio::test]
async fn test_set_fields_sanitizes_payload() {
    let app = TestApp::new();
    let token = app.token().await;
    let form_id = app.create_form(&token, "Quiz").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/typebots/{form_id}/fields"),
            Some(serde_json::json!({ "fields": sample_fields() })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let fields = &response.data()["fields"];
    assert_eq!(fields[0]["required"], true);
    assert_eq!(fields[0]["options"], serde_json::json!([]));
    assert_eq!(fields[1]["required"], false);
    assert_eq!(fields[1]["options"], serde_json::json!(["a", "3"]));
    assert_eq!(fields[1]["hint"], "");
}

#[tokio::test]
async fn test_set_fields_rejects_non_array() {
    let app = TestApp::new();
    let token = app.token().await;
    let form_id = app.create_form(&token, "Quiz").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/typebots/{form_id}/fields"),
            Some(serde_json::json!({ "fields": "nope" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_move_between_folders() {
    let app = TestApp::new();
    let token = app.token().await;
    let folder_id = app.create_folder(&token, "Surveys").await;
    let form_id = app.create_form(&token, "Poll").await;

    let moved = app
        .request(
            "PUT",
            &format!("/api/typebots/{form_id}/move"),
            Some(serde_json::json!({ "folderId": folder_id })),
            Some(&token),
        )
        .await;
    assert_eq!(moved.status, StatusCode::OK);
    assert_eq!(moved.data()["folder_id"], folder_id);

    let folder = app
        .request("GET", &format!("/api/folders/{folder_id}"), None, Some(&token))
        .await;
    assert_eq!(folder.data()["form_ids"], serde_json::json!([form_id]));

    let unfiled = app
        .request(
            "PUT",
            &format!("/api/typebots/{form_id}/move"),
            Some(serde_json::json!({ "folderId": null })),
            Some(&token),
        )
        .await;
    assert_eq!(unfiled.status, StatusCode::OK);
    assert!(unfiled.data()["folder_id"].is_null());

    let folder = app
        .request("GET", &format!("/api/folders/{folder_id}"), None, Some(&token))
        .await;
    assert_eq!(folder.data()["form_ids"], serde_json::json!([]));
}

#[tokio::test]
async fn test_delete_form_leaves_folder_consistent() {
    let app = TestApp::new();
    let token = app.token().await;
    let folder_id = app.create_folder(&token, "Surveys").await;
    let form_id = app.create_form_in(&token, &folder_id, "Poll").await;

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/typebots/{form_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let folder = app
        .request("GET", &format!("/api/folders/{folder_id}"), None, Some(&token))
        .await;
    assert_eq!(folder.data()["form_ids"], serde_json::json!([]));

    let again = app
        .request(
            "DELETE",
            &format!("/api/typebots/{form_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_public_view_and_responses_are_anonymous() {
    let app = TestApp::new();
    let token = app.token().await;
    let form_id = app.create_form(&token, "Feedback").await;
    app.request(
        "PUT",
        &format!("/api/typebots/{form_id}/fields"),
        Some(serde_json::json!({ "fields": sample_fields() })),
        Some(&token),
    )
    .await;

    let public = app
        .request("GET", &format!("/api/typebots/{form_id}/public"), None, None)
        .await;
    assert_eq!(public.status, StatusCode::OK);
    assert_eq!(public.data()["name"], "Feedback");
    assert_eq!(public.data()["fields"].as_array().map(Vec::len), Some(2));
    assert!(public.data().get("id").is_none());

    let submitted = app
        .request(
            "POST",
            &format!("/api/typebots/{form_id}/responses"),
            Some(serde_json::json!({ "responses": { "q1": "yes", "q2": 3 } })),
            None,
        )
        .await;
    assert_eq!(submitted.status, StatusCode::CREATED);
    assert_eq!(submitted.data()["responses"]["q2"], "3");

    let stats = app
        .request(
            "GET",
            &format!("/api/typebots/{form_id}/stats"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(stats.status, StatusCode::OK);
    assert_eq!(stats.data()["total_responses"], 1);
    assert_eq!(stats.data()["responses"][0]["responses"]["q1"], "yes");
}

#[tokio::test]
async fn test_stats_require_auth() {
    let app = TestApp::new();
    let token = app.token().await;
    let form_id = app.create_form(&token, "Feedback").await;

    let response = app
        .request("GET", &format!("/api/typebots/{form_id}/stats"), None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_view_of_unknown_form() {
    let app = TestApp::new();

    let response = app
        .request(
            "GET",
            "/api/typebots/00000000-0000-4000-8000-000000000000/public",
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_anonymous_submit_with_bad_id_is_json_error() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/typebots/12345/responses",
            Some(serde_json::json!({ "responses": { "q1": "yes" } })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}
