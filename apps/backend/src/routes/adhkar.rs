//! Adhkar endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use recitation_core::adhkar::clean_entries;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// GET /api/adhkar
/// Category names in dataset order.
pub async fn categories(State(state): State<AppState>) -> Result<Json<AdhkarCategoryList>> {
    let adhkar = state.content.adhkar().await?;
    Ok(Json(AdhkarCategoryList {
        categories: adhkar.iter().map(|(name, _)| name.clone()).collect(),
    }))
}

/// GET /api/adhkar/:category
pub async fn category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<AdhkarCategoryResponse>> {
    let adhkar = state.content.adhkar().await?;
    let entries = adhkar
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, entries)| entries.clone())
        .ok_or_else(|| ApiError::NotFound(format!("Adhkar category {}", category)))?;

    Ok(Json(AdhkarCategoryResponse {
        entries: clean_entries(entries),
        category,
    }))
}
