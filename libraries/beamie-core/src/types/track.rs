//! Track types

use super::AlbumId;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type TrackId = i64;

/// A track, unique by the file that backs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub filename: String,
    pub name: String,
    pub album_id: AlbumId,
    pub number: u32,
}

/// Data for creating a new track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTrack {
    pub filename: String,
    pub name: String,
    pub album_id: AlbumId,
    pub number: u32,
}

/// A track joined with the names of its album and artist
///
/// Carries everything needed to describe the track to a person without
/// another catalog lookup, which matters once the row itself is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackSummary {
    pub id: TrackId,
    pub number: u32,
    pub name: String,
    #[serde(rename = "album")]
    pub album_name: String,
    #[serde(rename = "artist")]
    pub artist_name: String,
    pub filename: String,
}

impl fmt::Display for TrackSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {}. {} ({})",
            self.artist_name, self.album_name, self.number, self.name, self.filename
        )
    }
}
