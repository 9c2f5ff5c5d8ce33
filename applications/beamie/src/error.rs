/// Application error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] beamie_core::BeamieError),

    #[error("Scan failed: {0}")]
    Scan(#[from] beamie_scanner::ScanError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<beamie_storage::StorageError> for AppError {
    fn from(err: beamie_storage::StorageError) -> Self {
        // StorageError -> BeamieError -> AppError
        AppError::Database(err.into())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
