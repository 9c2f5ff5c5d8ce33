//! Catalog store contract

use crate::error::Result;
use crate::types::{Album, Artist, ArtistId, NewAlbum, NewTrack, Track, TrackId, TrackSummary};
use async_trait::async_trait;

/// Catalog store holding the artist → album → track hierarchy
///
/// Batch inserts are atomic: either every row of the batch is created or the
/// call fails and none of them are.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // ========================================================================
    // Lookups
    // ========================================================================

    /// Find artist by exact name
    async fn find_artist_by_name(&self, name: &str) -> Result<Option<Artist>>;

    /// Find album by exact name within one artist
    async fn find_album_by_name(&self, name: &str, artist_id: ArtistId) -> Result<Option<Album>>;

    /// Find track by its backing file
    async fn find_track_by_filename(&self, filename: &str) -> Result<Option<Track>>;

    /// Every track in the catalog, joined with its album and artist names
    async fn all_tracks(&self) -> Result<Vec<TrackSummary>>;

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Create artists, one per name, in order
    async fn insert_artists(&self, names: &[String]) -> Result<Vec<Artist>>;

    /// Create albums, in order
    async fn insert_albums(&self, albums: &[NewAlbum]) -> Result<Vec<Album>>;

    /// Create tracks, in order
    async fn insert_tracks(&self, tracks: &[NewTrack]) -> Result<Vec<Track>>;

    /// Delete a track
    async fn delete_track(&self, id: TrackId) -> Result<()>;
}
