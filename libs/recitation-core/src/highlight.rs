//! Letter-level highlighting of a recited verse.
//!
//! Two strategies are provided:
//! - [`highlight_positional`] compares the n-th reference word with the n-th
//!   spoken word. A dropped or inserted word shifts every later comparison.
//! - [`highlight_aligned`] first aligns words with [`word_diff`] so a single
//!   dropped word only marks that word.

use crate::arabic::{fold_letter, split_letters, split_words, strip_diacritics, LetterUnit};
use crate::matching::{word_diff, DiffType};
use serde::{Deserialize, Serialize};

/// One reference letter and whether it was recited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightedLetter {
    /// Letter with its marks, as written in the reference.
    pub text: String,
    pub correct: bool,
}

/// One reference word with per-letter results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightedWord {
    pub word: String,
    /// Transcript word it was compared against, if any.
    pub spoken: Option<String>,
    pub letters: Vec<HighlightedLetter>,
}

impl HighlightedWord {
    pub fn is_correct(&self) -> bool {
        self.letters.iter().all(|l| l.correct)
    }
}

fn mark_letters(reference: &[LetterUnit], spoken: &[char]) -> Vec<HighlightedLetter> {
    reference
        .iter()
        .enumerate()
        .map(|(i, unit)| HighlightedLetter {
            text: unit.as_written(),
            correct: spoken.get(i) == Some(&fold_letter(unit.letter)),
        })
        .collect()
}

/// Highlight by word index, the way the recitation view always has.
pub fn highlight_positional(reference: &str, transcript: &str) -> Vec<HighlightedWord> {
    let stripped = strip_diacritics(transcript);
    let spoken_words = split_words(&stripped);

    split_words(reference)
        .into_iter()
        .enumerate()
        .map(|(idx, word)| {
            let spoken = spoken_words.get(idx).copied();
            let spoken_chars: Vec<char> = spoken.map(|w| w.chars().collect()).unwrap_or_default();
            HighlightedWord {
                word: word.to_string(),
                spoken: spoken.map(str::to_string),
                letters: mark_letters(&split_letters(word), &spoken_chars),
            }
        })
        .collect()
}

/// Highlight after aligning reference and transcript words.
pub fn highlight_aligned(reference: &str, transcript: &str) -> Vec<HighlightedWord> {
    let mut words = Vec::new();
    let mut pending: Option<String> = None;

    for segment in word_diff(transcript, reference) {
        match segment.diff_type {
            DiffType::Removed => pending = Some(segment.text),
            DiffType::Same => {
                pending = None;
                let spoken = strip_diacritics(&segment.text);
                words.push(compare_word(&segment.text, Some(spoken)));
            }
            DiffType::Added => {
                let spoken = pending.take().map(|w| strip_diacritics(&w));
                words.push(compare_word(&segment.text, spoken));
            }
        }
    }

    words
}

fn compare_word(reference_word: &str, spoken: Option<String>) -> HighlightedWord {
    let spoken_letters: Vec<char> = spoken
        .as_deref()
        .map(|w| split_letters(w).into_iter().map(|u| u.letter).collect())
        .unwrap_or_default();

    HighlightedWord {
        word: reference_word.to_string(),
        letters: mark_letters(&split_letters(reference_word), &spoken_letters),
        spoken,
    }
}

/// Render highlighted words as the HTML fragment the verse view embeds.
pub fn render_html(words: &[HighlightedWord]) -> String {
    words
        .iter()
        .map(|word| {
            let letters: String = word
                .letters
                .iter()
                .map(|l| {
                    let class = if l.correct { "spoken-correct" } else { "incorrect" };
                    format!("<span class=\"{}\">{}</span>", class, l.text)
                })
                .collect();
            format!("<span class=\"word\">{}</span>", letters)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
