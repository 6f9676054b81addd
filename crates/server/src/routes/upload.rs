use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::Utc;
use tracing::info;

use crate::{errors::ApiError, state::AppState};

/// Accepts a multipart form with an `image` field and stores it under the
/// uploads directory. The filename gets a timestamp so repeats never clash.
#[utoipa::path(post, path = "/api/upload", tag = "upload",
    responses((status = 200, description = "Stored; body carries the public URL"),
              (status = 400, description = "No image field in the form")))]
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    while let Some(field) =
        multipart.next_field().await.map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let ext = field
            .file_name()
            .and_then(|f| std::path::Path::new(f).extension().and_then(|e| e.to_str()))
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        let data =
            field.bytes().await.map_err(|e| ApiError::BadRequest(e.to_string()))?;

        let filename = format!("image-{}{}", Utc::now().timestamp_millis(), ext);
        let dest = state.uploads_dir.join(&filename);
        tokio::fs::write(&dest, &data)
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        info!(%filename, size = data.len(), "file uploaded");
        return Ok(Json(serde_json::json!({ "imageUrl": format!("/uploads/{filename}") })));
    }
    Err(ApiError::BadRequest("No file uploaded".into()))
}
