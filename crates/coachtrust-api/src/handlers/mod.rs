pub mod admin_sidebar;
pub mod editor_config;
pub mod editor_upload;
pub mod health;
