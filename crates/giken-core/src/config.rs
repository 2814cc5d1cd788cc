use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{GikenError, Result};

/// Top-level configuration for the chat server.
///
/// Loaded from `~/.giken/config.toml` by default. Every section falls back
/// to its defaults, so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GikenConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub npc: NpcConfig,
}

impl GikenConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: GikenConfig = toml::from_str(&content)?;
        config.chat.validate()?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| GikenError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory holding the SQLite database.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.giken/data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum accepted request body, in bytes.
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            body_limit_bytes: 16 * 1024,
        }
    }
}

/// Chat room behaviour: input budgets, transcript cap and decoration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Page heading and `<title>`.
    pub title: String,
    /// UTF-8 byte budget for the speaker name.
    pub max_name_bytes: usize,
    /// UTF-8 byte budget for the message body.
    pub max_msg_bytes: usize,
    /// Maximum number of transcript entries retained.
    pub max_lines: usize,
    /// Display name used for every NPC reply line.
    pub npc_name: String,
    /// Closed list of verbal-tic suffixes offered to users and drawn by the NPC.
    pub goobi: Vec<String>,
    /// Background colours picked at random on each render.
    pub bg_colors: Vec<String>,
}

impl ChatConfig {
    /// Reject settings that would break transcript or reply invariants.
    pub fn validate(&self) -> Result<()> {
        if self.max_lines == 0 {
            return Err(GikenError::Config("chat.max_lines must be at least 1".into()));
        }
        if self.npc_name.trim().is_empty() {
            return Err(GikenError::Config("chat.npc_name must not be empty".into()));
        }
        if self.goobi.is_empty() {
            return Err(GikenError::Config("chat.goobi must not be empty".into()));
        }
        if self.bg_colors.is_empty() {
            return Err(GikenError::Config("chat.bg_colors must not be empty".into()));
        }
        Ok(())
    }

    /// Whether `tag` belongs to the configured goobi list.
    pub fn is_known_goobi(&self, tag: &str) -> bool {
        self.goobi.iter().any(|g| g == tag)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            title: "技研チャット風サンプル".to_string(),
            max_name_bytes: 12,
            max_msg_bytes: 240,
            max_lines: 30,
            npc_name: "杏奈(NPC)".to_string(),
            goobi: [
                "にょ",
                "杉(ISP)",
                "にゅ(IEEE)",
                "ぷぅわぷわぷぅ～",
                "気分気分♪(はぁと)",
                "ノレ",
                "くるっく～",
                "りゅん",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            bg_colors: [
                "#FFFFFF", "#FFEEEE", "#EEFFEE", "#EEEEFF", "#F0F0F0", "#FAFFEE", "#EEFAFF",
                "#FFF8E8",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Which key-value backend holds the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Memory,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Database file name, relative to `general.data_dir`.
    pub db_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            db_file: "giken.db".to_string(),
        }
    }
}

/// NPC reply pipeline settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcConfig {
    /// Optional TOML file replacing the built-in phrase tables.
    pub tables_path: Option<String>,
    /// Fixed RNG seed; replies become reproducible across restarts.
    pub seed: Option<u64>,
}
