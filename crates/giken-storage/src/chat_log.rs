//! Bounded chat transcript over a [`KvStore`].

use std::sync::Arc;

use tracing::{debug, warn};

use giken_core::{ChatEntry, Result};

use crate::kv::KvStore;

/// Store key of the JSON-encoded transcript.
pub const CHAT_LOG_KEY: &str = "chat_log";
/// Store key of the JSON-encoded last submitted display name.
pub const LAST_USER_NAME_KEY: &str = "last_user_name";

/// Transcript and last-used name, persisted as JSON values.
#[derive(Clone)]
pub struct ChatLogStore {
    store: Arc<dyn KvStore>,
}

impl ChatLogStore {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Current transcript, oldest first. Empty if nothing has been stored.
    pub fn transcript(&self) -> Result<Vec<ChatEntry>> {
        Ok(decode_log(self.store.get_raw(CHAT_LOG_KEY)?))
    }

    /// Append `entries` and keep only the newest `cap` entries.
    ///
    /// Runs as a single atomic update, so concurrent appends never drop
    /// each other's entries. Returns the stored transcript.
    pub fn append(&self, entries: &[ChatEntry], cap: usize) -> Result<Vec<ChatEntry>> {
        let mut stored = Vec::new();
        self.store.update_raw(CHAT_LOG_KEY, &mut |current| {
            let mut log = decode_log(current);
            log.extend_from_slice(entries);
            if log.len() > cap {
                let excess = log.len() - cap;
                log.drain(..excess);
                debug!(evicted = excess, "Transcript truncated");
            }
            let encoded = serde_json::to_string(&log)?;
            stored = log;
            Ok(encoded)
        })?;
        Ok(stored)
    }

    /// Last submitted display name, or empty if none.
    pub fn last_user_name(&self) -> Result<String> {
        let Some(raw) = self.store.get_raw(LAST_USER_NAME_KEY)? else {
            return Ok(String::new());
        };
        match serde_json::from_str(&raw) {
            Ok(name) => Ok(name),
            Err(e) => {
                warn!("Ignoring unreadable last user name: {}", e);
                Ok(String::new())
            }
        }
    }

    pub fn set_last_user_name(&self, name: &str) -> Result<()> {
        self.store
            .set_raw(LAST_USER_NAME_KEY, &serde_json::to_string(name)?)
    }
}

impl std::fmt::Debug for ChatLogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatLogStore").finish()
    }
}

/// A missing or unreadable value reads as an empty transcript.
fn decode_log(raw: Option<String>) -> Vec<ChatEntry> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!("Discarding unreadable transcript: {}", e);
        Vec::new()
    })
}
