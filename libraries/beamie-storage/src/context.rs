use crate::{albums, artists, tracks};
use async_trait::async_trait;
use beamie_core::{error::Result, storage::CatalogStore, types::*};
use sqlx::SqlitePool;

/// Catalog store backed by `SQLite`
#[derive(Clone)]
pub struct SqliteCatalogStore {
    pool: SqlitePool,
}

impl SqliteCatalogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    // Lookups
    async fn find_artist_by_name(&self, name: &str) -> Result<Option<Artist>> {
        artists::find_by_name(&self.pool, name).await
    }

    async fn find_album_by_name(&self, name: &str, artist_id: ArtistId) -> Result<Option<Album>> {
        albums::find_by_name(&self.pool, name, artist_id).await
    }

    async fn find_track_by_filename(&self, filename: &str) -> Result<Option<Track>> {
        tracks::find_by_filename(&self.pool, filename).await
    }

    async fn all_tracks(&self) -> Result<Vec<TrackSummary>> {
        tracks::get_all_summaries(&self.pool).await
    }

    // Mutations
    async fn insert_artists(&self, names: &[String]) -> Result<Vec<Artist>> {
        artists::create_batch(&self.pool, names).await
    }

    async fn insert_albums(&self, albums: &[NewAlbum]) -> Result<Vec<Album>> {
        albums::create_batch(&self.pool, albums).await
    }

    async fn insert_tracks(&self, tracks: &[NewTrack]) -> Result<Vec<Track>> {
        tracks::create_batch(&self.pool, tracks).await
    }

    async fn delete_track(&self, id: TrackId) -> Result<()> {
        tracks::delete(&self.pool, id).await
    }
}
