//! Reply assembly.
//!
//! Turns a scored, mood-tagged, keyword-matched message into an ordered list
//! of reply lines. Every branch is driven by the injected [`RandomSource`],
//! so a scripted source reproduces a reply exactly.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::keywords::KeywordTable;
use crate::mood::{select_mood, Mood};
use crate::random::{choose, shuffle, RandomSource};
use crate::sentiment::{has_question, is_long, score_sentiment, SentimentResult};
use crate::tables::ResponseTables;

/// At most this many matched topics contribute lines to one reply.
pub const MAX_TOPICS: usize = 2;

const ELABORATE_CHANCE: f64 = 0.5;
const MOOD_CHANCE: f64 = 0.4;
const SENTIMENT_CHANCE: f64 = 0.3;
const HESITATION_CHANCE: f64 = 0.3;
const FOLLOWUP_CHANCE: f64 = 0.5;

// =============================================================================
// ReplySet
// =============================================================================

/// Ordered, non-empty list of NPC reply lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplySet {
    lines: Vec<String>,
}

impl ReplySet {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.lines.iter()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl IntoIterator for ReplySet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

impl<'a> IntoIterator for &'a ReplySet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

// =============================================================================
// ResponseAssembler
// =============================================================================

/// Builds NPC replies from a shared set of phrase tables.
#[derive(Debug, Clone)]
pub struct ResponseAssembler {
    tables: Arc<ResponseTables>,
}

impl Default for ResponseAssembler {
    fn default() -> Self {
        Self::new(Arc::new(ResponseTables::builtin()))
    }
}

impl ResponseAssembler {
    pub fn new(tables: Arc<ResponseTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &ResponseTables {
        &self.tables
    }

    pub fn keywords(&self) -> &KeywordTable {
        &self.tables.keywords
    }

    /// Score, pick a mood, match topics and assemble a reply for `text`.
    pub fn compute_reply<R: RandomSource + ?Sized>(&self, text: &str, rng: &mut R) -> ReplySet {
        let sentiment = score_sentiment(text, &self.tables, rng);
        let mood = select_mood(sentiment.category, rng);
        let matched = self.tables.keywords.matches(text);

        let reply = self.assemble(text, &sentiment, mood, &matched, rng);
        debug!(
            score = sentiment.score,
            sentiment = ?sentiment.category,
            %mood,
            topics = ?matched,
            lines = reply.len(),
            "NPC reply assembled"
        );
        reply
    }

    /// Assemble reply lines from already-computed analysis.
    ///
    /// Order: topic or fallback lines, then the optional mood, sentiment,
    /// hesitation and follow-up lines. `matched` keys missing from the
    /// keyword table are skipped.
    pub fn assemble<R: RandomSource + ?Sized>(
        &self,
        text: &str,
        sentiment: &SentimentResult,
        mood: Mood,
        matched: &[&str],
        rng: &mut R,
    ) -> ReplySet {
        let t = &*self.tables;
        let mut lines: Vec<String> = Vec::new();

        if matched.is_empty() {
            let count = 1 + rng.index(2);
            for _ in 0..count {
                lines.push(choose(rng, &t.fallback_lines).clone());
            }
            if rng.chance(ELABORATE_CHANCE) {
                lines.push(t.elaborate_line.clone());
            }
        } else {
            let mut topics: Vec<&str> = matched.to_vec();
            shuffle(rng, &mut topics);
            for key in topics.into_iter().take(MAX_TOPICS) {
                let Some(pool) = t.keywords.lines(key) else {
                    warn!(key, "matched topic has no lines");
                    continue;
                };
                let count = 1 + rng.index(2);
                for _ in 0..count {
                    lines.push(choose(rng, pool).clone());
                }
            }
            lines.push(choose(rng, &t.fallback_lines).clone());
        }

        if rng.chance(MOOD_CHANCE) {
            lines.push(choose(rng, t.mood_lines.for_mood(mood)).clone());
        }

        if let Some(pool) = t.sentiment_lines.for_sentiment(sentiment.category) {
            if rng.chance(SENTIMENT_CHANCE) {
                lines.push(choose(rng, pool).clone());
            }
        }

        if rng.chance(HESITATION_CHANCE) {
            lines.push(choose(rng, &t.hesitation_lines).clone());
        }

        let followups = self.followup_pool(text);
        if !followups.is_empty() && rng.chance(FOLLOWUP_CHANCE) {
            lines.push((*choose(rng, &followups)).to_string());
        }

        ReplySet { lines }
    }

    fn followup_pool<'a>(&'a self, text: &str) -> Vec<&'a str> {
        let t = &*self.tables;
        let mut pool: Vec<&str> = Vec::new();
        if has_question(text) {
            pool.extend(t.question_followups.iter().map(String::as_str));
        }
        if is_long(text) {
            pool.extend(t.long_message_followups.iter().map(String::as_str));
        }
        let folded = text.to_lowercase();
        if t.laughter_markers.iter().any(|m| folded.contains(m.as_str())) {
            pool.push(&t.laughter_line);
        }
        pool
    }
}
