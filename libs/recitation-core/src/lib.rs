//! Core library for the Quran companion.
//!
//! Provides:
//! - Recitation checking (diacritic-insensitive Levenshtein similarity)
//! - Letter-level highlighting of a recited verse
//! - Quran catalog helpers (surah/juz lookup, spoken surah search)
//! - Hadith search and pagination, adhkar cleanup, prayer schedule helpers
//! - Shared content types

pub mod adhkar;
pub mod arabic;
pub mod catalog;
pub mod error;
pub mod hadith;
pub mod highlight;
pub mod matching;
pub mod prayer;
pub mod types;

pub use arabic::{split_letters, strip_diacritics, LetterUnit};
pub use error::{CoreError, Result};
pub use highlight::{highlight_aligned, highlight_positional, render_html, HighlightedLetter, HighlightedWord};
pub use matching::{
    check_recitation, levenshtein_distance, normalized_similarity, word_diff, DiffSegment, DiffType,
    RecitationCheck, Threshold, Verdict, DEFAULT_PRONUNCIATION_THRESHOLD,
};
pub use types::{
    AdhkarEntry, AyahText, DailyAyah, EditionGroup, Hadith, HadithEdition, JuzDetail, JuzSummary,
    JuzVerse, PrayerTimings, SurahDetail, SurahSummary, TranslationEdition, Verse,
};
