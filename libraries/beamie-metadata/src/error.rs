/// Metadata-specific errors
use thiserror::Error;

/// Result type alias using `MetadataError`
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Metadata error types
#[derive(Error, Debug)]
pub enum MetadataError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// The file parsed but carries no tag at all
    #[error("No tags found in {0}")]
    NoTags(String),

    /// A required field is absent or blank
    #[error("Missing {field} tag in {path}")]
    MissingField { field: &'static str, path: String },

    /// Lofty error
    #[error(transparent)]
    Lofty(#[from] lofty::error::LoftyError),
}

impl From<MetadataError> for beamie_core::BeamieError {
    fn from(err: MetadataError) -> Self {
        beamie_core::BeamieError::metadata(err.to_string())
    }
}
