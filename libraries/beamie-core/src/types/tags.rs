/// Tag types produced while scanning
use serde::{Deserialize, Serialize};

/// The catalog-relevant tags of one audio file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackTags {
    pub artist: String,
    pub album: String,
    pub title: String,
    pub track_number: u32,
}

impl TrackTags {
    pub fn new(
        artist: impl Into<String>,
        album: impl Into<String>,
        title: impl Into<String>,
        track_number: u32,
    ) -> Self {
        Self {
            artist: artist.into(),
            album: album.into(),
            title: title.into(),
            track_number,
        }
    }
}

/// A scanned file together with its tags
///
/// Lives only for the duration of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedFile {
    pub filename: String,
    pub artist_name: String,
    pub album_name: String,
    pub title: String,
    pub track_number: u32,
}

impl TaggedFile {
    /// Pair a filename with the tags read from it
    pub fn from_tags(filename: impl Into<String>, tags: TrackTags) -> Self {
        Self {
            filename: filename.into(),
            artist_name: tags.artist,
            album_name: tags.album,
            title: tags.title,
            track_number: tags.track_number,
        }
    }
}
