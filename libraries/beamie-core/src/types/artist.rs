//! Artist types

use serde::{Deserialize, Serialize};

pub type ArtistId = i64;

/// An artist, unique by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
}
