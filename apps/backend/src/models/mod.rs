//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub use recitation_core::hadith::{Page, TextSegment};
pub use recitation_core::{
    AdhkarEntry, DailyAyah, HadithEdition, HighlightedWord, JuzDetail, JuzSummary, RecitationCheck,
    SurahDetail, SurahSummary, TranslationEdition,
};

// === Database Entity Types ===

/// Bookmarked surah
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Bookmark {
    pub surah_number: i64,
    pub name: String,
    pub english_name: String,
    pub created_at: DateTime<Utc>,
}

/// Stored result of a recitation check
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecitationAttempt {
    pub id: String,
    pub surah: Option<String>,
    pub verse: Option<i64>,
    pub transcript: String,
    pub similarity: f64,
    pub threshold: f64,
    pub accepted: bool,
    pub created_at: DateTime<Utc>,
}

// === Recordings ===

/// Response to a successful upload
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
    pub url: String,
}

// === Recitation check ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRecitationRequest {
    /// Verse text as published, with diacritics.
    pub reference: String,
    /// Speech-to-text output for the user's recitation.
    pub transcript: String,
    #[serde(default)]
    pub surah: Option<String>,
    #[serde(default)]
    pub verse: Option<u32>,
    /// Global ayah number, used for the correction audio.
    #[serde(default)]
    pub ayah_number: Option<u32>,
    #[serde(default)]
    pub threshold: Option<f64>,
}

/// One highlighting strategy, structured and rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightView {
    pub words: Vec<HighlightedWord>,
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRecitationResponse {
    #[serde(flatten)]
    pub check: RecitationCheck,
    /// Reference recitation to play back when the check failed.
    pub correction_audio: Option<String>,
    pub positional: HighlightView,
    pub aligned: HighlightView,
    /// Id of the stored attempt, when one was recorded.
    pub attempt_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttemptQuery {
    pub surah: Option<String>,
    pub verse: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AttemptListResponse {
    pub attempts: Vec<RecitationAttempt>,
}

// === Quran ===

#[derive(Debug, Default, Deserialize)]
pub struct SurahListQuery {
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SurahListResponse {
    pub surahs: Vec<SurahSummary>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TranslationQuery {
    pub translation: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranslationListResponse {
    pub translations: Vec<TranslationEdition>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JuzListResponse {
    pub juz: Vec<JuzSummary>,
}

#[derive(Debug, Deserialize)]
pub struct VoiceSearchQuery {
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoiceSearchResponse {
    pub transcript: String,
    pub surah_number: Option<u16>,
}

// === Hadith ===

#[derive(Debug, Serialize, Deserialize)]
pub struct BookListResponse {
    pub books: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EditionListResponse {
    pub book: String,
    pub editions: Vec<HadithEdition>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HadithPageQuery {
    pub page: Option<usize>,
    pub search: Option<String>,
}

/// Hadith as shown in a result page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HadithView {
    pub number: Option<String>,
    pub text: String,
    /// Text split around search matches; a single unmatched segment without a search.
    pub segments: Vec<TextSegment>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HadithPageResponse {
    pub edition: HadithEdition,
    pub search: Option<String>,
    #[serde(flatten)]
    pub page: Page<HadithView>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HadithOfTheDay {
    pub date: chrono::NaiveDate,
    pub text: String,
}

// === Adhkar ===

#[derive(Debug, Serialize, Deserialize)]
pub struct AdhkarCategoryList {
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdhkarCategoryResponse {
    pub category: String,
    pub entries: Vec<AdhkarEntry>,
}

// === Prayer times ===

#[derive(Debug, Deserialize)]
pub struct PrayerTimesQuery {
    pub latitude: f64,
    pub longitude: f64,
    /// Local wall-clock time "HH:MM" used for current/next; server time otherwise.
    pub time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrayerTimeView {
    pub name: String,
    /// 24-hour "HH:MM".
    pub time: String,
    /// 12-hour "hh:mm AM".
    pub display: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PrayerTimesResponse {
    pub location: Option<String>,
    pub hijri_date: String,
    pub timings: Vec<PrayerTimeView>,
    pub current: PrayerTimeView,
    pub next: PrayerTimeView,
    pub countdown: String,
}

// === Bookmarks ===

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBookmarkRequest {
    pub surah_number: u16,
    pub name: String,
    pub english_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookmarkListResponse {
    pub bookmarks: Vec<Bookmark>,
}
