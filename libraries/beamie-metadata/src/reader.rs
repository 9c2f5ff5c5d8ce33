/// Tag reader implementation using lofty
use crate::error::{MetadataError, Result};
use beamie_core::{TagReader, TrackTags};
use lofty::{Accessor, TaggedFileExt};
use std::borrow::Cow;
use std::path::Path;

/// Tag reader using the lofty library
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyTagReader;

impl LoftyTagReader {
    /// Create a new tag reader
    pub fn new() -> Self {
        Self
    }

    /// Pull the catalog fields out of a lofty tag
    ///
    /// Every field is required; blank text counts as absent.
    pub(crate) fn extract_from_tag(tag: &lofty::Tag, path: &Path) -> Result<TrackTags> {
        let missing = |field: &'static str| MetadataError::MissingField {
            field,
            path: path.display().to_string(),
        };

        let artist = non_blank(tag.artist()).ok_or_else(|| missing("artist"))?;
        let album = non_blank(tag.album()).ok_or_else(|| missing("album"))?;
        let title = non_blank(tag.title()).ok_or_else(|| missing("title"))?;
        let track_number = tag.track().ok_or_else(|| missing("track number"))?;

        Ok(TrackTags {
            artist,
            album,
            title,
            track_number,
        })
    }

    fn read_tags(path: &Path) -> Result<TrackTags> {
        if !path.exists() {
            return Err(MetadataError::FileNotFound(path.display().to_string()));
        }

        let tagged_file = lofty::read_from_path(path)?;

        // Prefer the format's primary tag, fall back to whatever is present
        let tag = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
            .ok_or_else(|| MetadataError::NoTags(path.display().to_string()))?;

        Self::extract_from_tag(tag, path)
    }
}

fn non_blank(value: Option<Cow<'_, str>>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TagReader for LoftyTagReader {
    fn read(&self, path: &Path) -> beamie_core::Result<TrackTags> {
        let tags = Self::read_tags(path)?;
        tracing::trace!("Read tags from {}: {:?}", path.display(), tags);
        Ok(tags)
    }
}
