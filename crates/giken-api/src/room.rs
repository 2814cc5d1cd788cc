//! Chat room request service.
//!
//! Everything the HTTP handlers do, minus HTTP: reading the transcript for
//! a page view and turning a form submission into transcript entries.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Deserialize;
use tracing::{debug, info};

use giken_core::config::ChatConfig;
use giken_core::{now_label, sanitize_and_cut, ChatEntry, GikenError, Result};
use giken_npc::random::choose;
use giken_npc::{RandomSource, ResponseAssembler};
use giken_storage::{ChatLogStore, KvStore};

/// Random source shared by every request.
pub type SharedRandom = Arc<Mutex<Box<dyn RandomSource + Send>>>;

/// Raw form fields of a chat submission. Missing fields read as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChatForm {
    pub name: String,
    pub msg: String,
    pub goobi: String,
}

/// Data needed to render the chat page.
#[derive(Debug, Clone)]
pub struct PageView {
    /// Value pre-filled into the name field.
    pub name_value: String,
    pub transcript: Vec<ChatEntry>,
    pub bg_color: String,
}

/// The single chat room: transcript, NPC and shared randomness.
pub struct ChatRoom {
    config: ChatConfig,
    log: ChatLogStore,
    assembler: ResponseAssembler,
    rng: SharedRandom,
}

impl ChatRoom {
    pub fn new(
        config: ChatConfig,
        store: Arc<dyn KvStore>,
        assembler: ResponseAssembler,
        rng: Box<dyn RandomSource + Send>,
    ) -> Self {
        Self {
            config,
            log: ChatLogStore::new(store),
            assembler,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub fn transcript(&self) -> Result<Vec<ChatEntry>> {
        self.log.transcript()
    }

    /// Page for a plain visit: last submitted name and current transcript.
    pub fn view(&self) -> Result<PageView> {
        let name_value = self.log.last_user_name()?;
        let transcript = self.log.transcript()?;
        self.page(name_value, transcript)
    }

    /// Handle a form submission and return the page to show afterwards.
    ///
    /// When the sanitized name or message is empty nothing is stored and
    /// the page is rendered as-is, pre-filled with the sanitized name.
    pub fn submit(&self, form: &ChatForm) -> Result<PageView> {
        let name = sanitize_and_cut(&form.name, self.config.max_name_bytes);
        let message = sanitize_and_cut(&form.msg, self.config.max_msg_bytes);

        if name.is_empty() || message.is_empty() {
            debug!("Ignoring submission with empty name or message");
            let transcript = self.log.transcript()?;
            return self.page(name, transcript);
        }

        let goobi = if self.config.is_known_goobi(&form.goobi) {
            form.goobi.clone()
        } else {
            String::new()
        };

        let (npc_goobi, reply) = {
            let mut rng = self.lock_rng()?;
            let npc_goobi = choose(&mut **rng, &self.config.goobi).clone();
            let reply = self.assembler.compute_reply(&message, &mut **rng);
            (npc_goobi, reply)
        };

        let time = now_label();
        let mut entries = Vec::with_capacity(reply.len() + 1);
        entries.push(ChatEntry::new(time.clone(), name.clone(), message, goobi));
        for line in reply {
            entries.push(ChatEntry::new(
                time.clone(),
                self.config.npc_name.clone(),
                line,
                npc_goobi.clone(),
            ));
        }

        info!(name = %name, npc_lines = entries.len() - 1, "Chat message posted");

        let transcript = self.log.append(&entries, self.config.max_lines)?;
        self.log.set_last_user_name(&name)?;
        self.page(name, transcript)
    }

    fn page(&self, name_value: String, transcript: Vec<ChatEntry>) -> Result<PageView> {
        let bg_color = {
            let mut rng = self.lock_rng()?;
            choose(&mut **rng, &self.config.bg_colors).clone()
        };
        Ok(PageView {
            name_value,
            transcript,
            bg_color,
        })
    }

    fn lock_rng(&self) -> Result<MutexGuard<'_, Box<dyn RandomSource + Send>>> {
        self.rng
            .lock()
            .map_err(|e| GikenError::Api(format!("Random source lock poisoned: {}", e)))
    }
}

impl std::fmt::Debug for ChatRoom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatRoom")
            .field("npc_name", &self.config.npc_name)
            .field("max_lines", &self.config.max_lines)
            .finish()
    }
}
