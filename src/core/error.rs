use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the adapter library.
/// 适配器库对外暴露的错误。
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid position tree JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration file {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Position not found in tree: {0}")]
    PositionNotFound(String),

    #[error("Test command resolved to an empty argument list")]
    EmptyCommand,
}
