//! Per-reply mood selection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::random::{choose, RandomSource};
use crate::sentiment::Sentiment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Playful,
    Thoughtful,
    Serious,
    Excited,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Playful,
        Mood::Thoughtful,
        Mood::Serious,
        Mood::Excited,
    ];

    /// Moods eligible for a given sentiment.
    pub fn candidates(sentiment: Sentiment) -> &'static [Mood] {
        match sentiment {
            Sentiment::Neutral => &Self::ALL,
            Sentiment::Positive => &[Mood::Happy, Mood::Excited, Mood::Playful],
            Sentiment::Negative => &[Mood::Serious, Mood::Thoughtful],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Playful => "playful",
            Mood::Thoughtful => "thoughtful",
            Mood::Serious => "serious",
            Mood::Excited => "excited",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniformly pick a mood compatible with `sentiment`.
pub fn select_mood<R: RandomSource + ?Sized>(sentiment: Sentiment, rng: &mut R) -> Mood {
    *choose(rng, Mood::candidates(sentiment))
}
