//! Bookmark endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use recitation_core::catalog::parse_surah_number;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/bookmarks
pub async fn list(State(state): State<AppState>) -> Result<Json<BookmarkListResponse>> {
    let bookmarks = state.db.list_bookmarks().await?;
    Ok(Json(BookmarkListResponse { bookmarks }))
}

/// POST /api/bookmarks
pub async fn add(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookmarkRequest>,
) -> Result<(StatusCode, Json<Bookmark>)> {
    parse_surah_number(&payload.surah_number.to_string())?;

    let bookmark = state.db.add_bookmark(&payload).await?;
    tracing::info!("Bookmarked surah {}", bookmark.surah_number);

    Ok((StatusCode::CREATED, Json(bookmark)))
}

/// DELETE /api/bookmarks/:surah
pub async fn remove(
    State(state): State<AppState>,
    Path(surah): Path<String>,
) -> Result<StatusCode> {
    let number = parse_surah_number(&surah)?;

    if !state.db.remove_bookmark(number).await? {
        return Err(ApiError::NotFound(format!("Bookmark for surah {}", number)));
    }

    Ok(StatusCode::NO_CONTENT)
}
