//! Keyword and punctuation sentiment scoring.

use serde::{Deserialize, Serialize};

use crate::random::RandomSource;
use crate::tables::ResponseTables;

/// Messages longer than this many characters count as "long".
pub const LONG_MESSAGE_CHARS: usize = 20;

const POSITIVE_THRESHOLD: f64 = 0.5;
const NEGATIVE_THRESHOLD: f64 = -0.5;

const EXCLAMATION_BONUS: f64 = 0.5;
const QUESTION_BONUS: f64 = 0.3;
const ELLIPSIS_PENALTY: f64 = 0.5;
const LENGTH_BONUS: f64 = 0.2;
/// Width of the tie-break jitter applied to an exact zero score.
const ZERO_JITTER: f64 = 0.5;

/// Sentiment category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Classify a raw score.
    pub fn from_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentResult {
    pub score: f64,
    pub category: Sentiment,
}

/// Whether `text` contains an ASCII or full-width question mark.
pub fn has_question(text: &str) -> bool {
    text.contains('?') || text.contains('？')
}

/// Whether `text` is longer than [`LONG_MESSAGE_CHARS`] characters.
pub fn is_long(text: &str) -> bool {
    text.chars().count() > LONG_MESSAGE_CHARS
}

/// Score `text` against the configured sentiment words and punctuation.
///
/// `rng` is only consulted when every rule nets out to exactly zero; the
/// score is then replaced by a small jitter in `[-0.25, 0.25)`.
pub fn score_sentiment<R: RandomSource + ?Sized>(
    text: &str,
    tables: &ResponseTables,
    rng: &mut R,
) -> SentimentResult {
    let msg = text.to_lowercase();
    let mut score = 0.0_f64;

    for word in &tables.positive_words {
        if msg.contains(word.as_str()) {
            score += 1.0;
        }
    }
    for word in &tables.negative_words {
        if msg.contains(word.as_str()) {
            score -= 1.0;
        }
    }

    if msg.contains('!') {
        score += EXCLAMATION_BONUS;
    }
    if has_question(&msg) {
        score += QUESTION_BONUS;
    }
    if msg.contains("...") || msg.contains('…') {
        score -= ELLIPSIS_PENALTY;
    }
    if is_long(&msg) {
        score += LENGTH_BONUS;
    }

    if score == 0.0 {
        score = (rng.uniform() - 0.5) * ZERO_JITTER;
    }

    SentimentResult {
        score,
        category: Sentiment::from_score(score),
    }
}
