//! Quran browsing endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use recitation_core::catalog::{
    adjacent_surahs, filter_surahs, parse_juz_number, parse_surah_number, resolve_spoken_surah,
};
use recitation_core::Verse;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// Translation used when the client does not pick one.
pub const DEFAULT_TRANSLATION: &str = "en.asad";

/// Edition identifiers end up in upstream URL paths.
fn edition_identifier(raw: &str) -> Result<&str> {
    let id = raw.trim();
    let valid = !id.is_empty()
        && !id.contains("..")
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    if valid {
        Ok(id)
    } else {
        Err(ApiError::BadRequest(format!("Invalid translation: {}", raw)))
    }
}

/// GET /api/quran/surahs
pub async fn list_surahs(
    State(state): State<AppState>,
    Query(query): Query<SurahListQuery>,
) -> Result<Json<SurahListResponse>> {
    let surahs = state.content.surahs().await?;

    let surahs = match query.search.as_deref().map(str::trim) {
        Some(term) if !term.is_empty() => filter_surahs(&surahs, term).into_iter().cloned().collect(),
        _ => surahs,
    };

    Ok(Json(SurahListResponse { surahs }))
}

/// GET /api/quran/surahs/:number
pub async fn surah(
    State(state): State<AppState>,
    Path(number): Path<String>,
    Query(query): Query<TranslationQuery>,
) -> Result<Json<SurahDetail>> {
    let number = parse_surah_number(&number)?;
    let translation = edition_identifier(query.translation.as_deref().unwrap_or(DEFAULT_TRANSLATION))?;

    let surah = state
        .content
        .surah_with_translation(number, translation)
        .await?;
    let (previous, next) = adjacent_surahs(number);

    Ok(Json(SurahDetail {
        number,
        name: surah.summary.name,
        english_name: surah.summary.english_name,
        translation: translation.to_string(),
        previous,
        next,
        verses: Verse::merge(&surah.arabic, &surah.translation),
    }))
}

/// GET /api/quran/translations
pub async fn translations(State(state): State<AppState>) -> Result<Json<TranslationListResponse>> {
    let translations = state.content.translations().await?;
    Ok(Json(TranslationListResponse { translations }))
}

/// GET /api/quran/juz
pub async fn list_juz(State(state): State<AppState>) -> Result<Json<JuzListResponse>> {
    let juz = state.content.juz_list().await?;
    Ok(Json(JuzListResponse { juz }))
}

/// GET /api/quran/juz/:number
pub async fn juz(
    State(state): State<AppState>,
    Path(number): Path<String>,
    Query(query): Query<TranslationQuery>,
) -> Result<Json<JuzDetail>> {
    let number = parse_juz_number(&number)?;
    let translation = query
        .translation
        .as_deref()
        .map(edition_identifier)
        .transpose()?;

    let juz = state.content.juz(number, translation).await?;
    Ok(Json(juz))
}

/// GET /api/quran/ayah-of-the-day
pub async fn ayah_of_the_day(State(state): State<AppState>) -> Result<Json<DailyAyah>> {
    let ayah = state.content.random_ayah().await?;
    Ok(Json(ayah))
}

/// GET /api/quran/voice-search?q=
/// Resolve a spoken surah name to its number.
pub async fn voice_search(Query(query): Query<VoiceSearchQuery>) -> Result<Json<VoiceSearchResponse>> {
    let transcript = query.q.trim();
    if transcript.is_empty() {
        return Err(ApiError::BadRequest("q must not be empty".to_string()));
    }

    let surah_number = resolve_spoken_surah(transcript);
    if surah_number.is_none() {
        tracing::debug!("No surah matched transcript {:?}", transcript);
    }

    Ok(Json(VoiceSearchResponse {
        transcript: transcript.to_string(),
        surah_number,
    }))
}
