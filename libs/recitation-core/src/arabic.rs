//! Arabic text helpers: diacritic stripping and letter segmentation.

use serde::{Deserialize, Serialize};

/// First vowel-sign mark (fathatan).
const MARK_START: char = '\u{064B}';
/// Last vowel-sign mark (sukun).
const MARK_END: char = '\u{0652}';

/// Superscript (dagger) alef, written like a vowel sign in Quranic text.
const SUPERSCRIPT_ALEF: char = '\u{0670}';

/// Alef wasla, used in Uthmani script where plain text has a bare alef.
const ALEF_WASLA: char = '\u{0671}';
const ALEF: char = '\u{0627}';

/// First base letter (hamza).
const LETTER_START: char = '\u{0621}';
/// Last base letter (yeh).
const LETTER_END: char = '\u{064A}';

/// Whether `c` is a vowel-sign combining mark (harakat, tanween, shadda, sukun, dagger alef).
pub fn is_diacritic(c: char) -> bool {
    (MARK_START..=MARK_END).contains(&c) || c == SUPERSCRIPT_ALEF
}

/// Whether `c` is a base Arabic letter.
pub fn is_arabic_letter(c: char) -> bool {
    (LETTER_START..=LETTER_END).contains(&c) || c == ALEF_WASLA
}

/// Letter used when comparing: alef wasla reads as a plain alef.
pub fn fold_letter(c: char) -> char {
    if c == ALEF_WASLA {
        ALEF
    } else {
        c
    }
}

/// Remove vowel-sign marks, fold alef wasla to alef and trim surrounding
/// whitespace.
///
/// Speech-to-text output carries no diacritics, so both sides of a
/// comparison go through this first.
pub fn strip_diacritics(text: &str) -> String {
    text.chars()
        .filter(|c| !is_diacritic(*c))
        .map(fold_letter)
        .collect::<String>()
        .trim()
        .to_string()
}

/// A base letter together with the marks written on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterUnit {
    pub letter: char,
    pub harakat: String,
}

impl LetterUnit {
    /// The letter with its marks, as written.
    pub fn as_written(&self) -> String {
        let mut s = String::with_capacity(self.harakat.len() + 4);
        s.push(self.letter);
        s.push_str(&self.harakat);
        s
    }
}

/// Split a word into letter units.
///
/// Characters outside the base letter range never start a unit; marks that
/// do not follow a letter are dropped.
pub fn split_letters(word: &str) -> Vec<LetterUnit> {
    let mut units: Vec<LetterUnit> = Vec::new();
    let mut attached = false;

    for c in word.chars() {
        if is_arabic_letter(c) {
            units.push(LetterUnit {
                letter: c,
                harakat: String::new(),
            });
            attached = true;
        } else if is_diacritic(c) && attached {
            if let Some(last) = units.last_mut() {
                last.harakat.push(c);
            }
        } else {
            attached = false;
        }
    }

    units
}

/// Split on single spaces after trimming, as the recitation view does.
pub(crate) fn split_words(text: &str) -> Vec<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split(' ').collect()
}
