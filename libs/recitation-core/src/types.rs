//! Core content types shared by the library and the backend.

use serde::{Deserialize, Serialize};

use crate::catalog::verse_audio_url;

/// Surah listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurahSummary {
    pub number: u16,
    /// Arabic name.
    pub name: String,
    pub english_name: String,
    pub english_name_translation: String,
    pub number_of_ayahs: u32,
    pub revelation_type: String,
}

/// Ayah text from a single edition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AyahText {
    /// Number across the whole Quran (1..=6236).
    pub number: u32,
    pub number_in_surah: u32,
    pub text: String,
}

/// Verse prepared for display and recitation practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    pub number: u32,
    pub global_number: u32,
    pub arabic: String,
    pub translation: String,
    /// Reference recitation used for corrective playback.
    pub audio: String,
}

impl Verse {
    /// Pair Arabic ayahs with a translation edition by position.
    ///
    /// A translation shorter than the Arabic text yields empty translations
    /// for the missing tail.
    pub fn merge(arabic: &[AyahText], translation: &[AyahText]) -> Vec<Verse> {
        arabic
            .iter()
            .enumerate()
            .map(|(idx, ayah)| Verse {
                number: ayah.number_in_surah,
                global_number: ayah.number,
                arabic: ayah.text.clone(),
                translation: translation
                    .get(idx)
                    .map(|t| t.text.clone())
                    .unwrap_or_default(),
                audio: verse_audio_url(ayah.number),
            })
            .collect()
    }
}

/// Surah with merged verses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurahDetail {
    pub number: u16,
    pub name: String,
    pub english_name: String,
    pub translation: String,
    pub previous: Option<u16>,
    pub next: Option<u16>,
    pub verses: Vec<Verse>,
}

/// Translation edition offered in the language picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationEdition {
    pub identifier: String,
    pub language: String,
    pub english_name: String,
    /// e.g. "English (Asad)".
    pub label: String,
}

/// Juz listing entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JuzSummary {
    pub number: u8,
    pub name: String,
    pub ayah_count: usize,
    /// First surah that appears in the juz.
    pub first_surah: Option<String>,
}

/// Ayah inside a juz, with the surah it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JuzVerse {
    pub global_number: u32,
    pub number_in_surah: u32,
    pub surah_number: u16,
    pub surah_name: String,
    pub arabic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JuzDetail {
    pub number: u8,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    pub verses: Vec<JuzVerse>,
}

/// Daily ayah card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyAyah {
    pub global_number: u32,
    pub arabic: String,
    pub translation: String,
    /// e.g. "Surah Al-Baqara, Ayah 255".
    pub reference: String,
}

/// Hadith collection edition as published in the editions index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HadithEdition {
    /// Edition identifier, e.g. "eng-bukhari".
    pub name: String,
    pub book: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub direction: String,
    pub link: String,
    #[serde(default)]
    pub linkmin: Option<String>,
}

impl HadithEdition {
    /// Minified link when published, full link otherwise.
    pub fn fetch_link(&self) -> &str {
        self.linkmin.as_deref().unwrap_or(&self.link)
    }

    /// Three-letter language prefix of the edition name ("eng", "ara", ...).
    pub fn lang_code(&self) -> &str {
        self.name.split('-').next().unwrap_or_default()
    }
}

/// Group of editions under one key of the editions index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditionGroup {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub collection: Vec<HadithEdition>,
}

/// A single hadith.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hadith {
    #[serde(rename = "hadithnumber", default)]
    pub number: Option<f64>,
    #[serde(default)]
    pub text: String,
}

impl Hadith {
    /// Display form of the hadith number ("12", "12.1").
    pub fn number_label(&self) -> Option<String> {
        self.number.map(|n| {
            if n.fract() == 0.0 {
                format!("{}", n as i64)
            } else {
                format!("{}", n)
            }
        })
    }
}

/// Repetition count as published, either numeric or text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepeatCount {
    Number(u32),
    Text(String),
}

/// One supplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdhkarEntry {
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<RepeatCount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

/// Raw daily timings as "HH:MM" strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerTimings {
    #[serde(rename = "Fajr")]
    pub fajr: String,
    #[serde(rename = "Dhuhr")]
    pub dhuhr: String,
    #[serde(rename = "Asr")]
    pub asr: String,
    #[serde(rename = "Maghrib")]
    pub maghrib: String,
    #[serde(rename = "Isha")]
    pub isha: String,
}
