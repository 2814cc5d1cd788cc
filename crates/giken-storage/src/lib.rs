//! Giken storage crate - key-value persistence and the chat transcript.
//!
//! Provides a WAL-mode SQLite key-value table with migrations, an in-memory
//! alternative behind the same [`KvStore`] trait, and [`ChatLogStore`], the
//! bounded transcript built on top of it.

pub mod chat_log;
pub mod db;
pub mod kv;
pub mod migrations;

pub use chat_log::{ChatLogStore, CHAT_LOG_KEY, LAST_USER_NAME_KEY};
pub use db::Database;
pub use kv::{KvStore, MemoryStore};
