//! Rich-text editor image upload.
//!
//! The editor widget only understands its own JSON payloads, so permission
//! and input problems are answered with `200` and `{"uploaded": 0, ...}`.
//! Storage failures are real server errors and go through [`HttpAppError`].

use crate::auth::Principal;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::Method,
    Json,
};
use bytes::Bytes;
use coachtrust_core::constants::{
    EDITOR_UPLOAD_DIR, EDITOR_UPLOAD_FIELD, PERMISSION_DENIED_MESSAGE, UPLOAD_FAILED_MESSAGE,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct UploadErrorBody {
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UploadResponse {
    Uploaded {
        uploaded: u8,
        #[serde(rename = "fileName")]
        file_name: String,
        url: String,
    },
    Failed {
        uploaded: u8,
        error: UploadErrorBody,
    },
}

impl UploadResponse {
    fn uploaded(file_name: String, url: String) -> Self {
        UploadResponse::Uploaded {
            uploaded: 1,
            file_name,
            url,
        }
    }

    fn failed(message: &str) -> Self {
        UploadResponse::Failed {
            uploaded: 0,
            error: UploadErrorBody {
                message: message.to_string(),
            },
        }
    }
}

struct UploadedFile {
    client_name: String,
    data: Bytes,
}

pub async fn editor_upload(
    State(state): State<Arc<AppState>>,
    principal: Principal,
    method: Method,
    request: Request,
) -> Result<Json<UploadResponse>, HttpAppError> {
    if !principal.is_staff() {
        tracing::debug!(
            user_id = ?principal.user_id(),
            "Editor upload rejected: staff access required"
        );
        return Ok(Json(UploadResponse::failed(PERMISSION_DENIED_MESSAGE)));
    }

    if method != Method::POST {
        return Ok(Json(UploadResponse::failed(UPLOAD_FAILED_MESSAGE)));
    }

    let Some(file) = read_upload_field(request).await else {
        return Ok(Json(UploadResponse::failed(UPLOAD_FAILED_MESSAGE)));
    };

    let file_name = generated_file_name(&file.client_name);
    let name = format!("{}/{}", EDITOR_UPLOAD_DIR, file_name);
    let size = file.data.len();

    let saved = match state.storage.save(&name, file.data).await {
        Ok(saved) => saved,
        Err(e) => {
            notify_admins(&state, &name, &e.to_string());
            return Err(e.into());
        }
    };
    let url = state.storage.url(&saved)?;

    tracing::info!(
        user_id = ?principal.user_id(),
        key = %saved,
        size_bytes = size,
        "Editor upload stored"
    );

    Ok(Json(UploadResponse::uploaded(file_name, url)))
}

/// First multipart part named `upload` that carries a filename.
///
/// Any multipart failure, including a body over the size limit, yields `None`.
async fn read_upload_field(request: Request) -> Option<UploadedFile> {
    let mut multipart = match Multipart::from_request(request, &()).await {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Editor upload is not multipart");
            return None;
        }
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!(error = %e, "Failed to read multipart field");
                return None;
            }
        };

        if field.name() != Some(EDITOR_UPLOAD_FIELD) {
            continue;
        }
        let client_name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };

        return match field.bytes().await {
            Ok(data) => Some(UploadedFile { client_name, data }),
            Err(e) => {
                tracing::debug!(error = %e, "Failed to read upload body");
                None
            }
        };
    }
}

/// Random 32-hex-digit name keeping the client's extension.
fn generated_file_name(client_name: &str) -> String {
    format!("{}{}", Uuid::new_v4().simple(), file_suffix(client_name))
}

/// Extension of the last path component, dot included, case preserved.
///
/// A dot that starts or ends the component does not begin an extension.
fn file_suffix(client_name: &str) -> &str {
    let name = client_name
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or(client_name);
    match name.rfind('.') {
        Some(idx) if idx > 0 && idx < name.len() - 1 => &name[idx..],
        _ => "",
    }
}

fn notify_admins(state: &AppState, name: &str, error: &str) {
    let email = state.email.clone();
    let body = format!("Saving editor upload {} failed: {}", name, error);
    tokio::spawn(async move {
        if let Err(e) = email.mail_admins("Editor upload failed", &body).await {
            tracing::warn!(error = %e, "Failed to notify admins about upload failure");
        }
    });
}
