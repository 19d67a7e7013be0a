//! Recording upload and listing endpoints

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};

use crate::error::{ApiError, Result};
use crate::models::UploadResponse;
use crate::services::storage::StoredRecitation;
use crate::AppState;

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(e.body_text())
    } else {
        ApiError::BadRequest(e.body_text())
    }
}

/// POST /upload-recitation
/// Multipart fields: `audio` (file), `surah` (name), `verse` (ayah number)
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut audio: Option<Vec<u8>> = None;
    let mut surah: Option<String> = None;
    let mut verse: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("audio") => {
                let bytes = field.bytes().await.map_err(multipart_error)?;
                audio = Some(bytes.to_vec());
            }
            Some("surah") => surah = Some(field.text().await.map_err(multipart_error)?),
            Some("verse") => verse = Some(field.text().await.map_err(multipart_error)?),
            other => tracing::debug!("Ignoring multipart field {:?}", other),
        }
    }

    tracing::debug!("Received surah {:?}, ayah {:?}", surah, verse);

    let audio = audio.ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;
    let (surah, verse) = match (surah, verse) {
        (Some(s), Some(v)) if !s.trim().is_empty() && !v.trim().is_empty() => (s, v),
        _ => {
            return Err(ApiError::BadRequest(
                "Missing Surah name or Ayah number".to_string(),
            ))
        }
    };

    let saved = state.store.save(&surah, &verse, &audio).await?;

    Ok(Json(UploadResponse {
        message: "Recitation saved successfully!".to_string(),
        filename: saved.filename,
        url: saved.url,
    }))
}

/// GET /get-recitations
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<StoredRecitation>>> {
    let recitations = state.store.list().await?;
    Ok(Json(recitations))
}

/// DELETE /api/recitations/:filename
pub async fn delete(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<StatusCode> {
    state.store.delete(&filename).await?;
    Ok(StatusCode::NO_CONTENT)
}
