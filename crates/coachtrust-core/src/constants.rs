//! Shared constants for the upload contract and the admin site.

/// Virtual directory every editor upload is stored under.
pub const EDITOR_UPLOAD_DIR: &str = "uploads/ckeditor";

/// Multipart field name the editor widget posts the file under.
pub const EDITOR_UPLOAD_FIELD: &str = "upload";

/// Route the editor widget posts uploads to.
pub const EDITOR_UPLOAD_PATH: &str = "/upload/";

pub const PERMISSION_DENIED_MESSAGE: &str =
    "Permission denied. Only staff users can upload files.";

pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed";

pub const SITE_TITLE: &str = "Coach Trusted";

pub const SITE_HEADER: &str = "Coach Trusted Admin";

/// Secret key used when `DJANGO_SECRET_KEY` is unset. Rejected in production.
pub const DEVELOPMENT_SECRET_KEY: &str =
    "insecure-development-secret-key-do-not-use-in-production";
