//! Editor upload integration tests.
//!
//! Run with: `cargo test -p coachtrust-api --test editor_upload_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::auth::{expired_staff_bearer, forged_staff_bearer, member_bearer, staff_bearer};
use helpers::{setup_test_app, setup_test_app_with, setup_test_app_with_storage, TEST_ADMIN_EMAIL};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nnot really an image";

fn upload_form(file_name: &str, data: &'static [u8]) -> MultipartForm {
    let part = Part::bytes(bytes::Bytes::from_static(data))
        .file_name(file_name)
        .mime_type("image/png");
    MultipartForm::new().add_part("upload", part)
}

fn permission_denied() -> Value {
    json!({
        "uploaded": 0,
        "error": {"message": "Permission denied. Only staff users can upload files."}
    })
}

fn upload_failed() -> Value {
    json!({"uploaded": 0, "error": {"message": "Upload failed"}})
}

fn is_generated_name(name: &str, extension: &str) -> bool {
    name.len() == 32 + extension.len()
        && name.ends_with(extension)
        && name[..32]
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

#[tokio::test]
async fn test_staff_upload_returns_generated_name_and_url() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload/")
        .add_header("Authorization", staff_bearer())
        .multipart(upload_form("diagram.PNG", PNG_BYTES))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["uploaded"], 1);

    let file_name = body["fileName"].as_str().expect("fileName");
    assert!(is_generated_name(file_name, ".PNG"), "unexpected name {}", file_name);
    assert_eq!(
        body["url"],
        format!("/media/uploads/ckeditor/{}", file_name)
    );
    assert_eq!(app.stored_uploads(), vec![file_name.to_string()]);
}

#[tokio::test]
async fn test_uploaded_file_is_served_at_returned_url() {
    let app = setup_test_app().await;

    let body: Value = app
        .client()
        .post("/upload/")
        .add_header("Authorization", staff_bearer())
        .multipart(upload_form("photo.png", PNG_BYTES))
        .await
        .json();
    let url = body["url"].as_str().expect("url").to_string();

    let fetched = app.client().get(&url).await;
    assert_eq!(fetched.status_code(), 200);
    assert_eq!(fetched.as_bytes().as_ref(), PNG_BYTES);
}

#[tokio::test]
async fn test_identical_file_names_get_distinct_names() {
    let app = setup_test_app().await;

    let mut names = Vec::new();
    for _ in 0..2 {
        let body: Value = app
            .client()
            .post("/upload/")
            .add_header("Authorization", staff_bearer())
            .multipart(upload_form("diagram.png", PNG_BYTES))
            .await
            .json();
        let name = body["fileName"].as_str().expect("fileName").to_string();
        assert_ne!(name, "diagram.png");
        names.push(name);
    }

    assert_ne!(names[0], names[1]);
    assert_eq!(app.stored_uploads().len(), 2);
}

#[tokio::test]
async fn test_file_without_extension_keeps_bare_name() {
    let app = setup_test_app().await;

    let body: Value = app
        .client()
        .post("/upload/")
        .add_header("Authorization", staff_bearer())
        .multipart(upload_form("README", b"plain text"))
        .await
        .json();

    assert_eq!(body["uploaded"], 1);
    assert!(is_generated_name(body["fileName"].as_str().unwrap(), ""));
}

#[tokio::test]
async fn test_non_staff_user_is_denied() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload/")
        .add_header("Authorization", member_bearer())
        .multipart(upload_form("diagram.PNG", PNG_BYTES))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), permission_denied());
    assert!(app.stored_uploads().is_empty());
}

#[tokio::test]
async fn test_anonymous_caller_is_denied() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload/")
        .multipart(upload_form("diagram.PNG", PNG_BYTES))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), permission_denied());
    assert!(app.stored_uploads().is_empty());
}

#[tokio::test]
async fn test_invalid_tokens_are_treated_as_anonymous() {
    let app = setup_test_app().await;

    for bearer in [forged_staff_bearer(), expired_staff_bearer()] {
        let response = app
            .client()
            .post("/upload/")
            .add_header("Authorization", bearer)
            .multipart(upload_form("diagram.PNG", PNG_BYTES))
            .await;

        assert_eq!(response.status_code(), 200);
        assert_eq!(response.json::<Value>(), permission_denied());
    }
    assert!(app.stored_uploads().is_empty());
}

#[tokio::test]
async fn test_get_request_from_staff_fails_softly() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/upload/")
        .add_header("Authorization", staff_bearer())
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), upload_failed());
}

#[tokio::test]
async fn test_permission_is_checked_before_method() {
    let app = setup_test_app().await;

    let response = app.client().get("/upload/").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), permission_denied());
}

#[tokio::test]
async fn test_missing_upload_part_fails_softly() {
    let app = setup_test_app().await;

    let part = Part::bytes(bytes::Bytes::from_static(PNG_BYTES)).file_name("diagram.png");
    let form = MultipartForm::new()
        .add_text("title", "no file here")
        .add_part("image", part);

    let response = app
        .client()
        .post("/upload/")
        .add_header("Authorization", staff_bearer())
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), upload_failed());
    assert!(app.stored_uploads().is_empty());
}

#[tokio::test]
async fn test_upload_field_without_filename_fails_softly() {
    let app = setup_test_app().await;

    let form = MultipartForm::new().add_text("upload", "just text");

    let response = app
        .client()
        .post("/upload/")
        .add_header("Authorization", staff_bearer())
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), upload_failed());
}

#[tokio::test]
async fn test_non_multipart_body_fails_softly() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/upload/")
        .add_header("Authorization", staff_bearer())
        .json(&json!({"upload": "diagram.png"}))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), upload_failed());
}

#[tokio::test]
async fn test_oversized_upload_fails_softly() {
    let app = setup_test_app_with(&[("UPLOAD_MAX_SIZE_MB", "1")]).await;

    static LARGE: [u8; 1024 * 1024 + 1] = [7u8; 1024 * 1024 + 1];

    let response = app
        .client()
        .post("/upload/")
        .add_header("Authorization", staff_bearer())
        .multipart(upload_form("large.png", &LARGE))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>(), upload_failed());
    assert!(app.stored_uploads().is_empty());
}

#[tokio::test]
async fn test_storage_failure_is_a_server_error() {
    let app = setup_test_app_with_storage(Arc::new(helpers::storage::FailingStorage)).await;

    let response = app
        .client()
        .post("/upload/")
        .add_header("Authorization", staff_bearer())
        .multipart(upload_form("diagram.PNG", PNG_BYTES))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["code"], "STORAGE_ERROR");
    assert_eq!(body["error"], "Failed to access storage");
    assert!(body.get("uploaded").is_none());

    // Admins are notified in the background.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let outbox = app.state.email.outbox().await;
    assert_eq!(outbox.len(), 1);
    assert!(outbox[0].contains(TEST_ADMIN_EMAIL));
}
