//! Rule-based NPC for the chat room.
//!
//! Replies are assembled from phrase tables without any language model:
//! a keyword sentiment score picks a mood, topic keywords pick candidate
//! lines, and a handful of probabilistic embellishments add variety. All
//! randomness flows through [`RandomSource`] so replies are reproducible
//! under a seeded or scripted source.

pub mod assembler;
pub mod keywords;
pub mod mood;
pub mod random;
pub mod sentiment;
pub mod tables;

pub use assembler::{ReplySet, ResponseAssembler};
pub use keywords::KeywordTable;
pub use mood::{select_mood, Mood};
pub use random::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use sentiment::{score_sentiment, Sentiment, SentimentResult};
pub use tables::ResponseTables;
