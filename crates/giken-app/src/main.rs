//! Giken application binary - composition root.
//!
//! 1. Parse CLI flags and load configuration from TOML
//! 2. Build the NPC phrase tables and random source
//! 3. Open the transcript store (SQLite or in-memory)
//! 4. Start the axum chat server

mod cli;

use std::sync::Arc;

use clap::Parser;

use giken_api::routes;
use giken_api::state::AppState;
use giken_core::config::StorageBackend;
use giken_core::GikenConfig;
use giken_npc::{RandomSource, ResponseAssembler, ResponseTables, SeededRandom, ThreadRandom};
use giken_storage::{Database, KvStore, MemoryStore};

use crate::cli::{expand_home, CliArgs};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config. Loaded before tracing so the configured log level applies.
    let config_file = args.resolve_config_path();
    let loaded = GikenConfig::load(&config_file);
    let mut config = loaded.as_ref().cloned().unwrap_or_default();
    args.apply(&mut config);

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting giken v{}", env!("CARGO_PKG_VERSION"));

    match loaded {
        Ok(_) => tracing::info!(path = %config_file.display(), "Configuration loaded"),
        Err(_) if !config_file.exists() => {
            tracing::info!(path = %config_file.display(), "No configuration file, using defaults")
        }
        Err(e) => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Failed to load configuration, using defaults"
        ),
    }
    config.chat.validate()?;

    // NPC.
    let tables = match config.npc.tables_path {
        Some(ref path) => ResponseTables::from_file(&expand_home(path))?,
        None => ResponseTables::builtin(),
    };
    let assembler = ResponseAssembler::new(Arc::new(tables));
    let rng: Box<dyn RandomSource + Send> = match config.npc.seed {
        Some(seed) => {
            tracing::info!(seed, "NPC replies use a fixed seed");
            Box::new(SeededRandom::new(seed))
        }
        None => Box::new(ThreadRandom),
    };

    // Storage.
    let store: Arc<dyn KvStore> = match config.storage.backend {
        StorageBackend::Sqlite => {
            let data_dir = expand_home(&config.general.data_dir);
            let db_path = data_dir.join(&config.storage.db_file);
            let db = Database::new(&db_path)?;
            tracing::info!(path = %db_path.display(), "SQLite store opened");
            Arc::new(db)
        }
        StorageBackend::Memory => {
            tracing::info!("Using in-memory store; the transcript is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::new(config, store, assembler, rng);
    routes::start_server(state).await?;

    Ok(())
}
