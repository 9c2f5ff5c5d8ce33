//! Album types

use super::ArtistId;
use serde::{Deserialize, Serialize};

pub type AlbumId = i64;

/// An album, unique by name within its artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub name: String,
    pub artist_id: ArtistId,
}

/// Data for creating a new album
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewAlbum {
    pub name: String,
    pub artist_id: ArtistId,
}

/// An album joined with its artist's name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumSummary {
    pub id: AlbumId,
    pub name: String,
    pub artist_id: ArtistId,
    #[serde(rename = "artist")]
    pub artist_name: String,
}
