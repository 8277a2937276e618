//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p coachtrust-api`.

#![allow(dead_code)]

pub mod auth;
pub mod storage;

use axum_test::TestServer;
use coachtrust_api::services::email::EmailService;
use coachtrust_api::setup::{routes, storage as storage_setup};
use coachtrust_api::state::AppState;
use coachtrust_core::Settings;
use coachtrust_storage::Storage;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub const TEST_SECRET_KEY: &str = "test-secret-key-min-32-characters-long-for-testing";
pub const TEST_ADMIN_EMAIL: &str = "ops@example.com";

/// Test application: server, shared state and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub media_root: PathBuf,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Files currently stored under the editor upload directory.
    pub fn stored_uploads(&self) -> Vec<String> {
        let dir = self.media_root.join("uploads/ckeditor");
        match std::fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().to_string())
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

fn test_settings(media_root: &std::path::Path, overrides: &[(&str, &str)]) -> Settings {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("DJANGO_TEST".to_string(), "true".to_string());
    vars.insert("DJANGO_SECRET_KEY".to_string(), TEST_SECRET_KEY.to_string());
    vars.insert("DJANGO_SECURE_SSL_REDIRECT".to_string(), "false".to_string());
    vars.insert("DJANGO_ADMINS".to_string(), TEST_ADMIN_EMAIL.to_string());
    vars.insert("MEDIA_URL".to_string(), "/media/".to_string());
    vars.insert(
        "MEDIA_ROOT".to_string(),
        media_root.to_string_lossy().to_string(),
    );
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }
    Settings::from_lookup(|key| vars.get(key).cloned()).expect("test settings")
}

async fn build_app(
    settings: Settings,
    storage: Arc<dyn Storage>,
    media_root: PathBuf,
    temp_dir: TempDir,
) -> TestApp {
    let email = EmailService::from_settings(&settings.email, &settings.admins)
        .expect("Failed to create email service");
    let state = Arc::new(AppState::new(settings, storage, email));

    let app = routes::setup_routes(state.clone()).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        state,
        media_root,
        _temp_dir: temp_dir,
    }
}

/// Setup test app with local storage in a temporary media root.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(&[]).await
}

/// Same as [`setup_test_app`] with extra environment variables.
pub async fn setup_test_app_with(overrides: &[(&str, &str)]) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let media_root = temp_dir.path().join("media");
    let settings = test_settings(&media_root, overrides);

    let storage = storage_setup::setup_storage(&settings)
        .await
        .expect("Failed to create local storage");

    build_app(settings, storage, media_root, temp_dir).await
}

/// Setup test app backed by a custom storage implementation.
pub async fn setup_test_app_with_storage(storage: Arc<dyn Storage>) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let media_root = temp_dir.path().join("media");
    let settings = test_settings(&media_root, &[]);

    build_app(settings, storage, media_root, temp_dir).await
}
