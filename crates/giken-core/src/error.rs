use thiserror::Error;

/// Top-level error type for the Giken chat system.
///
/// The NPC reply pipeline itself is infallible; these variants cover the
/// surrounding configuration, storage and HTTP layers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GikenError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for GikenError {
    fn from(err: toml::de::Error) -> Self {
        GikenError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for GikenError {
    fn from(err: toml::ser::Error) -> Self {
        GikenError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for GikenError {
    fn from(err: serde_json::Error) -> Self {
        GikenError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Giken operations.
pub type Result<T> = std::result::Result<T, GikenError>;
