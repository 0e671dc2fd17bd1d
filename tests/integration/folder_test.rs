//! Integration tests for folders and folder membership.

mod helpers;

use axum::http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_folder_routes_require_auth() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/folders", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_create_and_list_folders() {
    let app = TestApp::new();
    let token = app.token().await;

    let folder_id = app.create_folder(&token, "Surveys").await;
    let form_id = app.create_form_in(&token, &folder_id, "Customer feedback").await;

    let response = app.request("GET", "/api/folders", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let folders = response.data().as_array().expect("folder list");
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0]["name"], "Surveys");
    assert_eq!(folders[0]["form_ids"], serde_json::json!([form_id]));
    assert_eq!(folders[0]["forms"][0]["name"], "Customer feedback");
}

#[tokio::test]
async fn test_duplicate_folder_name_conflicts() {
    let app = TestApp::new();
    let token = app.token().await;
    app.create_folder(&token, "Surveys").await;

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(serde_json::json!({ "name": "Surveys" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["message"], "Folder with this name already exists");
}

#[tokio::test]
async fn test_empty_folder_name_rejected() {
    let app = TestApp::new();
    let token = app.token().await;

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(serde_json::json!({ "name": "" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rename_folder() {
    let app = TestApp::new();
    let token = app.token().await;
    let folder_id = app.create_folder(&token, "Drafts").await;
    app.create_folder(&token, "Archive").await;

    let renamed = app
        .request(
            "PUT",
            &format!("/api/folders/{folder_id}"),
            Some(serde_json::json!({ "name": "Live" })),
            Some(&token),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.data()["name"], "Live");

    let clash = app
        .request(
            "PUT",
            &format!("/api/folders/{folder_id}"),
            Some(serde_json::json!({ "name": "Archive" })),
            Some(&token),
        )
        .await;
    assert_eq!(clash.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_folder_is_not_found() {
    let app = TestApp::new();
    let token = app.token().await;
    let missing = "00000000-0000-4000-8000-000000000000";

    let get = app
        .request("GET", &format!("/api/folders/{missing}"), None, Some(&token))
        .await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);

    let create = app
        .request(
            "POST",
            &format!("/api/folders/{missing}/typebots"),
            Some(serde_json::json!({ "name": "Orphan" })),
            Some(&token),
        )
        .await;
    assert_eq!(create.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_folder_unfiles_members() {
    let app = TestApp::new();
    let token = app.token().await;
    let folder_id = app.create_folder(&token, "Surveys").await;
    let form_id = app.create_form_in(&token, &folder_id, "Poll").await;

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/folders/{folder_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let unfiled = app.request("GET", "/api/typebots", None, Some(&token)).await;
    let forms = unfiled.data().as_array().expect("form list");
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0]["id"], form_id);
    assert!(forms[0]["folder_id"].is_null());

    let gone = app
        .request("GET", &format!("/api/folders/{folder_id}"), None, Some(&token))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_folder_with_unfiled_name_clash_changes_nothing() {
    let app = TestApp::new();
    let token = app.token().await;
    let folder_id = app.create_folder(&token, "Surveys").await;
    app.create_form_in(&token, &folder_id, "Poll").await;
    app.create_form(&token, "Poll").await;

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/folders/{folder_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::CONFLICT);

    let members = app
        .request(
            "GET",
            &format!("/api/folders/{folder_id}/typebots"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(members.status, StatusCode::OK);
    assert_eq!(members.data().as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_malformed_folder_id_is_json_error() {
    let app = TestApp::new();
    let token = app.token().await;

    let response = app
        .request("GET", "/api/folders/not-a-uuid", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["message"].is_string());
}

#[tokio::test]
async fn test_malformed_body_is_json_error() {
    let app = TestApp::new();
    let token = app.token().await;

    let response = app
        .request_raw("POST", "/api/folders", "{\"name\": ", Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(
        response.body["message"]
            .as_str()
            .is_some_and(|m| m.starts_with("Invalid request body"))
    );
}
