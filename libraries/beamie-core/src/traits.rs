/// Core traits for Beamie
use crate::error::Result;
use crate::types::TrackTags;
use std::path::Path;

/// Tag reader trait
///
/// Implementers extract the catalog-relevant tags (artist, album, title,
/// track number) from an audio file. A file that cannot be parsed, or that
/// lacks any of the four fields, is reported as an error.
///
/// Readers are shared across worker threads during a scan.
pub trait TagReader: Send + Sync {
    /// Read tags from an audio file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or does not carry all
    /// required fields
    fn read(&self, path: &Path) -> Result<TrackTags>;
}
