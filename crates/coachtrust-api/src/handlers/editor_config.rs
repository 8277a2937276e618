use axum::Json;
use coachtrust_core::editor::EditorConfig;

pub async fn editor_config() -> Json<EditorConfig> {
    Json(EditorConfig::new())
}
