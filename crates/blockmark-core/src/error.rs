use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("extraction request failed: {0}")]
    Network(String),

    #[error("extraction service returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("could not decode extraction response: {0}")]
    Decode(String),

    #[error("invalid text block: {0}")]
    InvalidBlock(String),

    #[error("block index {index} is out of range (list has {len} blocks)")]
    BlockIndexOutOfRange { index: usize, len: usize },

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
