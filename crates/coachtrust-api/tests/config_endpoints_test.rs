//! Admin sidebar, editor configuration and health endpoint tests.

mod helpers;

use helpers::auth::{member_bearer, staff_bearer};
use helpers::{setup_test_app, setup_test_app_with};
use serde_json::Value;

#[tokio::test]
async fn test_sidebar_for_staff() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/admin/sidebar/")
        .add_header("Authorization", staff_bearer())
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["site_title"], "Coach Trusted");
    assert_eq!(body["site_header"], "Coach Trusted Admin");
    assert_eq!(body["show_search"], true);
    assert_eq!(body["navigation"].as_array().unwrap().len(), 12);
    assert_eq!(body["navigation"][1]["items"][0]["link"], "/admin/coach/coach/");
}

#[tokio::test]
async fn test_sidebar_rejects_non_staff() {
    let app = setup_test_app().await;

    let anonymous = app.client().get("/admin/sidebar/").await;
    assert_eq!(anonymous.status_code(), 403);
    assert_eq!(anonymous.json::<Value>()["code"], "FORBIDDEN");

    let member = app
        .client()
        .get("/admin/sidebar/")
        .add_header("Authorization", member_bearer())
        .await;
    assert_eq!(member.status_code(), 403);
}

#[tokio::test]
async fn test_sidebar_follows_admin_url() {
    let app = setup_test_app_with(&[("DJANGO_ADMIN_URL", "backoffice/")]).await;

    let response = app
        .client()
        .get("/backoffice/sidebar/")
        .add_header("Authorization", staff_bearer())
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["navigation"][0]["items"][0]["link"], "/backoffice/");

    let old = app
        .client()
        .get("/admin/sidebar/")
        .add_header("Authorization", staff_bearer())
        .await;
    assert_eq!(old.status_code(), 404);
}

#[tokio::test]
async fn test_editor_config_is_public() {
    let app = setup_test_app().await;

    let response = app.client().get("/ckeditor5/config/").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["uploadUrl"], "/upload/");
    assert_eq!(
        body["configs"]["default"]["toolbar"]["items"][0],
        "heading"
    );
}

#[tokio::test]
async fn test_health_reports_storage_backend() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "local");
}

#[tokio::test]
async fn test_security_headers_are_set() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.header("x-frame-options"), "DENY");
    assert_eq!(response.header("x-content-type-options"), "nosniff");
    assert_eq!(response.header("referrer-policy"), "same-origin");
    assert!(response.maybe_header("strict-transport-security").is_none());
}

#[tokio::test]
async fn test_hsts_header_when_configured() {
    let app = setup_test_app_with(&[("DJANGO_SECURE_HSTS_SECONDS", "60")]).await;

    let response = app.client().get("/health").await;

    assert_eq!(
        response.header("strict-transport-security"),
        "max-age=60; includeSubDomains; preload"
    );
}

#[tokio::test]
async fn test_unknown_media_file_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/media/uploads/ckeditor/missing.png")
        .await;

    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_plain_http_redirects_to_https() {
    let app = setup_test_app_with(&[("DJANGO_SECURE_SSL_REDIRECT", "true")]).await;

    let response = app
        .client()
        .get("/health?x=1")
        .add_header("Host", "localhost:8000")
        .await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(
        response.header("location"),
        "https://localhost:8000/health?x=1"
    );
}

#[tokio::test]
async fn test_proxied_https_is_not_redirected() {
    let app = setup_test_app_with(&[("DJANGO_SECURE_SSL_REDIRECT", "true")]).await;

    let response = app
        .client()
        .get("/health")
        .add_header("Host", "localhost:8000")
        .add_header("X-Forwarded-Proto", "https")
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_redirect_disabled_serves_plain_http() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/health")
        .add_header("Host", "localhost:8000")
        .await;

    assert_eq!(response.status_code(), 200);
    assert!(response.maybe_header("location").is_none());
}

#[tokio::test]
async fn test_disallowed_host_is_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/health")
        .add_header("Host", "evil.com")
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_disallowed_host_is_rejected_before_redirect() {
    let app = setup_test_app_with(&[("DJANGO_SECURE_SSL_REDIRECT", "true")]).await;

    let response = app
        .client()
        .get("/health")
        .add_header("Host", "evil.com")
        .await;

    assert_eq!(response.status_code(), 400);
}
