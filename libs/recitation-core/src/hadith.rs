//! Hadith browsing: edition lookup, search, pagination, and downloads.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::types::{EditionGroup, Hadith, HadithEdition};

pub const HADITHS_PER_PAGE: usize = 10;

/// Short hadiths rotated as the hadith of the day.
const DAILY_HADITHS: [&str; 7] = [
    "The best among you are those who have the best manners and character. (Bukhari)",
    "None of you truly believes until he loves for his brother what he loves for himself. (Muslim)",
    "The strong man is not the one who can wrestle, but the one who controls himself when angry. (Bukhari & Muslim)",
    "A smile in the face of your brother is charity. (Tirmidhi)",
    "Allah does not look at your appearance or wealth, but He looks at your hearts and actions. (Muslim)",
    "The most beloved actions to Allah are those that are consistent, even if small. (Bukhari & Muslim)",
    "Whoever follows a path in pursuit of knowledge, Allah will make easy for him a path to Paradise. (Muslim)",
];

/// Flatten the editions index into a single list.
pub fn flatten_editions<'a, I>(groups: I) -> Vec<HadithEdition>
where
    I: IntoIterator<Item = &'a EditionGroup>,
{
    groups
        .into_iter()
        .flat_map(|g| g.collection.iter().cloned())
        .collect()
}

/// Distinct book identifiers, sorted.
pub fn books(editions: &[HadithEdition]) -> Vec<String> {
    editions
        .iter()
        .map(|e| e.book.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Editions (translations) of one book.
pub fn editions_for_book<'a>(editions: &'a [HadithEdition], book: &str) -> Vec<&'a HadithEdition> {
    let wanted = book.trim().to_lowercase();
    editions
        .iter()
        .filter(|e| e.book.trim().to_lowercase() == wanted)
        .collect()
}

/// Drop hadiths with no readable text.
pub fn readable(hadiths: Vec<Hadith>) -> Vec<Hadith> {
    hadiths
        .into_iter()
        .filter(|h| !h.text.trim().is_empty())
        .collect()
}

/// Lowercase one char to one char, so folded text keeps its char offsets.
fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn fold(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

/// Case-insensitive substring filter. A blank term keeps everything.
pub fn search<'a>(hadiths: &'a [Hadith], term: &str) -> Vec<&'a Hadith> {
    let term = fold(term.trim());
    if term.is_empty() {
        return hadiths.iter().collect();
    }
    hadiths
        .iter()
        .filter(|h| fold(&h.text).contains(&term))
        .collect()
}

/// One page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Slice out a 1-based page. Pages past the end are empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Result<Page<T>> {
    if page == 0 || per_page == 0 {
        return Err(CoreError::InvalidPage);
    }

    let total_items = items.len();
    let start = (page - 1).saturating_mul(per_page).min(total_items);
    let end = start.saturating_add(per_page).min(total_items);

    Ok(Page {
        items: items[start..end].to_vec(),
        page,
        per_page,
        total_items,
        total_pages: total_items.div_ceil(per_page),
    })
}

/// Piece of text, flagged when it matches the search term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    pub text: String,
    pub matched: bool,
}

/// Split `text` into matched and unmatched runs of `term`, ignoring case.
pub fn highlight_matches(text: &str, term: &str) -> Vec<TextSegment> {
    let needle: Vec<char> = term.trim().chars().map(fold_char).collect();
    if needle.is_empty() {
        return vec![TextSegment {
            text: text.to_string(),
            matched: false,
        }];
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let matches_at = |start: usize| -> bool {
        start + needle.len() <= chars.len()
            && needle
                .iter()
                .zip(&chars[start..])
                .all(|(n, (_, c))| fold_char(*c) == *n)
    };
    let byte_at = |idx: usize| chars.get(idx).map(|(b, _)| *b).unwrap_or(text.len());

    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    while i < chars.len() {
        if matches_at(i) {
            if plain_start < i {
                segments.push(TextSegment {
                    text: text[byte_at(plain_start)..byte_at(i)].to_string(),
                    matched: false,
                });
            }
            let end = i + needle.len();
            segments.push(TextSegment {
                text: text[byte_at(i)..byte_at(end)].to_string(),
                matched: true,
            });
            i = end;
            plain_start = end;
        } else {
            i += 1;
        }
    }

    if plain_start < chars.len() {
        segments.push(TextSegment {
            text: text[byte_at(plain_start)..].to_string(),
            matched: false,
        });
    }

    segments
}

/// A hadith packaged as a plain-text download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HadithDownload {
    pub filename: String,
    pub content: String,
}

/// Build the text file for one hadith. `index` is its 0-based position,
/// used when the hadith carries no number.
pub fn download_text(hadith: &Hadith, index: usize, lang: Option<&str>) -> HadithDownload {
    let number = hadith
        .number_label()
        .unwrap_or_else(|| (index + 1).to_string());
    let lang = lang
        .filter(|l| !l.is_empty())
        .map(str::to_uppercase)
        .unwrap_or_else(|| "Hadith".to_string());
    let text = if hadith.text.trim().is_empty() {
        "No text available."
    } else {
        hadith.text.as_str()
    };

    HadithDownload {
        filename: format!("Hadith_{}_{}.txt", number, lang),
        content: format!("Hadith Number: {}\nLanguage: {}\n\n{}", number, lang, text),
    }
}

/// Hadith shown for a given day.
pub fn hadith_of_the_day(date: NaiveDate) -> &'static str {
    DAILY_HADITHS[date.ordinal0() as usize % DAILY_HADITHS.len()]
}
