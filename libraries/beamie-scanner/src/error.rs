//! Error types for the scanner

use thiserror::Error;

/// Result type alias using `ScanError`
pub type Result<T> = std::result::Result<T, ScanError>;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog store rejected a lookup or a batch; the pass is aborted
    #[error("Storage error: {0}")]
    Storage(#[from] beamie_core::BeamieError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
