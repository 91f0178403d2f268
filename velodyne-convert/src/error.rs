use std::io;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    #[error("Failed to spawn the converter thread: {0}")]
    ThreadSpawn(io::Error),

    #[error("The converter thread is no longer accepting packet batches")]
    Disconnected,
}
