//! Static Quran catalog data and navigation helpers.

use crate::error::{CoreError, Result};
use crate::types::SurahSummary;

pub const SURAH_COUNT: u16 = 114;
pub const JUZ_COUNT: u8 = 30;

/// Reciter audio served per global ayah number.
const VERSE_AUDIO_BASE: &str = "https://cdn.islamic.network/quran/audio/128/ar.alafasy";

/// Transliterated surah keys recognised in spoken search, in mushaf order.
const SPOKEN_SURAH_KEYS: [&str; SURAH_COUNT as usize] = [
    "fatihah", "baqarah", "aaliimran", "annisa", "maidah", "anam",
    "araf", "anfal", "attawbah", "yunus", "hud", "yusuf",
    "arrad", "ibrahim", "hijr", "annahl", "isra", "kahf",
    "maryam", "taha", "anbiya", "hajj", "muminun", "annur",
    "furqan", "ashshuara", "annaml", "qasas", "ankabut", "arrum",
    "luqman", "assajdah", "ahzab", "saba", "fatir", "yasin",
    "assaffat", "sad", "azzumar", "ghafir", "fussilat", "ashshura",
    "azzukhruf", "addukhan", "jathiyah", "ahqaf", "muhammad", "fath",
    "hujurat", "qaf", "adhdhariyat", "attur", "annajm", "qamar",
    "arrahman", "waqiah", "hadid", "mujadila", "hashr", "mumtahanah",
    "assaff", "jumuah", "munafiqun", "attaghabun", "attalaq", "attahrim",
    "mulk", "qalam", "haqqah", "maarij", "nuh", "jinn",
    "muzzammil", "muddaththir", "qiyamah", "insan", "mursalat", "annaba",
    "annaziat", "abasa", "attakwir", "infitar", "mutaffifin", "inshiqaq",
    "buruj", "attariq", "ala", "ghashiyah", "fajr", "balad",
    "ashshams", "layl", "adduha", "ashsharh", "attin", "alaq",
    "qadr", "bayyinah", "azzalzalah", "adiyat", "qariah", "attakathur",
    "asr", "humazah", "fil", "quraysh", "maun", "kawthar",
    "kafirun", "annasr", "masad", "ikhlas", "falaq", "annas",
];

/// Opening words of each juz, used as its name.
const JUZ_NAMES: [&str; JUZ_COUNT as usize] = [
    "الم", "سيقول", "تلك الرسل", "لن تنالوا", "والمحصنات",
    "لا يحب الله", "وإذا سمعوا", "ولو ترى", "قال الملأ",
    "واعلموا", "يعتذرون", "وما من دابة", "وما أبريء",
    "ربما", "سبحان الذي", "قال ألم", "اقترب للناس",
    "قد أفلح", "وقال الذين", "أمن خلق", "اتل ما أوحي",
    "ومن يقنت", "وما أنزلنا", "فمن أظلم", "إليه يرد",
    "حم", "قال فما خطبكم", "قد أسمع", "تبارك الذي",
    "عم",
];

/// Parse a surah number typed by the user.
pub fn parse_surah_number(input: &str) -> Result<u16> {
    let trimmed = input.trim();
    match trimmed.parse::<u16>() {
        Ok(n) if (1..=SURAH_COUNT).contains(&n) => Ok(n),
        _ => Err(CoreError::InvalidSurah(trimmed.to_string())),
    }
}

/// Parse a juz number typed by the user.
pub fn parse_juz_number(input: &str) -> Result<u8> {
    let trimmed = input.trim();
    match trimmed.parse::<u8>() {
        Ok(n) if (1..=JUZ_COUNT).contains(&n) => Ok(n),
        _ => Err(CoreError::InvalidJuz(trimmed.to_string())),
    }
}

/// Previous and next surah numbers, `None` past either end.
pub fn adjacent_surahs(number: u16) -> (Option<u16>, Option<u16>) {
    let prev = (number > 1).then(|| number - 1);
    let next = (number < SURAH_COUNT).then(|| number + 1);
    (prev, next)
}

/// Map a speech transcript such as "Surah Al Kahf" to a surah number.
///
/// The first key (in mushaf order) contained in the transcript wins.
pub fn resolve_spoken_surah(transcript: &str) -> Option<u16> {
    let normalized = transcript.to_lowercase().replacen("surah", "", 1);
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return None;
    }

    SPOKEN_SURAH_KEYS
        .iter()
        .position(|key| normalized.contains(key))
        .map(|idx| idx as u16 + 1)
}

/// Arabic name of a juz.
pub fn juz_name(number: u8) -> Option<&'static str> {
    JUZ_NAMES.get(usize::from(number).checked_sub(1)?).copied()
}

/// Recitation audio for an ayah, by its number across the whole Quran.
pub fn verse_audio_url(global_ayah_number: u32) -> String {
    format!("{}/{}.mp3", VERSE_AUDIO_BASE, global_ayah_number)
}

/// Surahs whose Arabic or English name contains `term`, ignoring case.
pub fn filter_surahs<'a>(surahs: &'a [SurahSummary], term: &str) -> Vec<&'a SurahSummary> {
    let term = term.to_lowercase();
    surahs
        .iter()
        .filter(|s| {
            s.name.to_lowercase().contains(&term) || s.english_name.to_lowercase().contains(&term)
        })
        .collect()
}

/// Display name for a translation language code.
pub fn language_label(code: &str) -> &str {
    match code {
        "en" => "English",
        "ur" => "Urdu",
        "ar" => "Arabic",
        "bn" => "Bengali",
        "fr" => "French",
        "de" => "German",
        "id" => "Indonesian",
        "ml" => "Malayalam",
        "fa" => "Persian",
        "pt" => "Portuguese",
        "ru" => "Russian",
        "es" => "Spanish",
        "tr" => "Turkish",
        "hi" => "Hindi",
        other => other,
    }
}
