//! Recitation checking endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use recitation_core::catalog::verse_audio_url;
use recitation_core::{
    check_recitation, highlight_aligned, highlight_positional, render_html, HighlightedWord,
    Threshold,
};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

fn view(words: Vec<HighlightedWord>) -> HighlightView {
    HighlightView {
        html: render_html(&words),
        words,
    }
}

/// POST /api/recitation/check
/// Score a transcript against the verse text and highlight each letter.
pub async fn check(
    State(state): State<AppState>,
    Json(payload): Json<CheckRecitationRequest>,
) -> Result<Json<CheckRecitationResponse>> {
    if payload.reference.trim().is_empty() {
        return Err(ApiError::BadRequest("reference must not be empty".to_string()));
    }
    if payload.verse == Some(0) {
        return Err(ApiError::BadRequest("verse must be a positive integer".to_string()));
    }

    let threshold = match payload.threshold {
        Some(value) => Threshold::new(value)?,
        None => state.config.pronunciation_threshold,
    };

    let check = check_recitation(&payload.reference, &payload.transcript, threshold);
    tracing::debug!(
        "Recitation similarity {:.3} (threshold {:.2}): {:?}",
        check.similarity,
        check.threshold,
        check.verdict
    );

    let correction_audio = if check.verdict.is_accepted() {
        None
    } else {
        payload.ayah_number.map(verse_audio_url)
    };

    let surah = payload
        .surah
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let attempt_id = match (surah, payload.verse) {
        (Some(surah), Some(verse)) => {
            let attempt = state
                .db
                .insert_attempt(Some(surah), Some(verse), &payload.transcript, &check)
                .await?;
            Some(attempt.id)
        }
        _ => None,
    };

    Ok(Json(CheckRecitationResponse {
        positional: view(highlight_positional(&payload.reference, &payload.transcript)),
        aligned: view(highlight_aligned(&payload.reference, &payload.transcript)),
        check,
        correction_audio,
        attempt_id,
    }))
}

/// GET /api/recitation/attempts
pub async fn attempts(
    State(state): State<AppState>,
    Query(query): Query<AttemptQuery>,
) -> Result<Json<AttemptListResponse>> {
    let attempts = state.db.list_attempts(&query).await?;
    Ok(Json(AttemptListResponse { attempts }))
}
