//! Recitation scoring: edit distance between the verse and the transcript.

use crate::arabic::strip_diacritics;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Similarity below which corrective playback is offered.
pub const DEFAULT_PRONUNCIATION_THRESHOLD: f64 = 0.95;

/// Minimum similarity for a recitation to be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Threshold(f64);

impl Threshold {
    /// Create a threshold, rejecting anything outside `0.0..=1.0`.
    pub fn new(value: f64) -> Result<Self> {
        if value.is_nan() || !(0.0..=1.0).contains(&value) {
            return Err(CoreError::InvalidThreshold(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(DEFAULT_PRONUNCIATION_THRESHOLD)
    }
}

impl TryFrom<f64> for Threshold {
    type Error = CoreError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Threshold> for f64 {
    fn from(t: Threshold) -> Self {
        t.0
    }
}

/// Outcome of a recitation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Accepted,
    NeedsCorrection,
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Result of comparing a transcript to the canonical verse text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecitationCheck {
    /// Similarity score between 0.0 and 1.0.
    pub similarity: f64,
    /// Levenshtein distance between the normalized strings.
    pub distance: usize,
    pub threshold: f64,
    pub verdict: Verdict,
    /// Reference text with diacritics removed.
    pub reference_normalized: String,
    /// Transcript with diacritics removed.
    pub transcript_normalized: String,
}

/// Score a transcript against the verse it should match.
pub fn check_recitation(reference: &str, transcript: &str, threshold: Threshold) -> RecitationCheck {
    let reference_normalized = strip_diacritics(reference);
    let transcript_normalized = strip_diacritics(transcript);

    let distance = levenshtein_distance(&reference_normalized, &transcript_normalized);
    let similarity = similarity_from_distance(
        distance,
        reference_normalized.chars().count(),
        transcript_normalized.chars().count(),
    );

    let verdict = if similarity >= threshold.value() {
        Verdict::Accepted
    } else {
        Verdict::NeedsCorrection
    };

    RecitationCheck {
        similarity,
        distance,
        threshold: threshold.value(),
        verdict,
        reference_normalized,
        transcript_normalized,
    }
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows instead of the full matrix
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Calculate normalized similarity (0.0 to 1.0) based on Levenshtein distance.
///
/// Lengths are counted in characters. Two empty strings are identical.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    similarity_from_distance(
        levenshtein_distance(a, b),
        a.chars().count(),
        b.chars().count(),
    )
}

fn similarity_from_distance(distance: usize, len_a: usize, len_b: usize) -> f64 {
    let max_len = len_a.max(len_b);
    if max_len == 0 {
        return 1.0;
    }
    1.0 - (distance as f64 / max_len as f64)
}

/// Kind of a word-level diff segment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiffType {
    /// Word is the same in both texts.
    Same,
    /// Word is in the reference but was not recited.
    Added,
    /// Word was recited but is not in the reference.
    Removed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffSegment {
    pub text: String,
    pub diff_type: DiffType,
}

impl DiffSegment {
    fn new(text: &str, diff_type: DiffType) -> Self {
        Self {
            text: text.to_string(),
            diff_type,
        }
    }
}

/// Look-ahead window used when resynchronising the word diff.
const LOOKAHEAD: usize = 3;

fn word_key(word: &str) -> String {
    strip_diacritics(word).to_lowercase()
}

/// Word-level diff between a transcript and the reference text.
///
/// Words compare with diacritics stripped. `Same` segments carry the
/// reference spelling.
pub fn word_diff(typed: &str, correct: &str) -> Vec<DiffSegment> {
    let typed_words: Vec<&str> = typed.split_whitespace().collect();
    let correct_words: Vec<&str> = correct.split_whitespace().collect();
    let typed_keys: Vec<String> = typed_words.iter().map(|w| word_key(w)).collect();
    let correct_keys: Vec<String> = correct_words.iter().map(|w| word_key(w)).collect();

    let mut result = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < typed_words.len() || j < correct_words.len() {
        if i < typed_words.len() && j < correct_words.len() {
            if typed_keys[i] == correct_keys[j] {
                result.push(DiffSegment::new(correct_words[j], DiffType::Same));
                i += 1;
                j += 1;
                continue;
            }

            // Typed word appears a little later in the reference: words were skipped.
            if let Some(k) = (j + 1..correct_words.len().min(j + LOOKAHEAD))
                .find(|&k| typed_keys[i] == correct_keys[k])
            {
                for word in &correct_words[j..k] {
                    result.push(DiffSegment::new(word, DiffType::Added));
                }
                j = k;
                continue;
            }

            // Reference word appears a little later in the transcript: extra words.
            if let Some(k) = (i + 1..typed_words.len().min(i + LOOKAHEAD))
                .find(|&k| correct_keys[j] == typed_keys[k])
            {
                for word in &typed_words[i..k] {
                    result.push(DiffSegment::new(word, DiffType::Removed));
                }
                i = k;
                continue;
            }

            result.push(DiffSegment::new(typed_words[i], DiffType::Removed));
            result.push(DiffSegment::new(correct_words[j], DiffType::Added));
            i += 1;
            j += 1;
        } else if i < typed_words.len() {
            result.push(DiffSegment::new(typed_words[i], DiffType::Removed));
            i += 1;
        } else {
            result.push(DiffSegment::new(correct_words[j], DiffType::Added));
            j += 1;
        }
    }

    result
}
