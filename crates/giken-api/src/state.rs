//! Application state shared across all route handlers.

use std::sync::Arc;
use std::time::Instant;

use giken_core::GikenConfig;
use giken_npc::{RandomSource, ResponseAssembler};
use giken_storage::KvStore;

use crate::room::ChatRoom;

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<GikenConfig>,
    /// The chat room service.
    pub room: Arc<ChatRoom>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        config: GikenConfig,
        store: Arc<dyn KvStore>,
        assembler: ResponseAssembler,
        rng: Box<dyn RandomSource + Send>,
    ) -> Self {
        let room = ChatRoom::new(config.chat.clone(), store, assembler, rng);
        Self {
            config: Arc::new(config),
            room: Arc::new(room),
            start_time: Instant::now(),
        }
    }
}
