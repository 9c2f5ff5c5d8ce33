//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using REAL SQLite files (NOT in-memory)
//! to match production behavior and properly test migrations, constraints, and indexes.

#![allow(dead_code)]

use beamie_core::types::*;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = beamie_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        beamie_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    /// Get the pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Test fixture: Create a test artist
pub async fn create_test_artist(pool: &SqlitePool, name: &str) -> Artist {
    beamie_storage::artists::create_batch(pool, &[name.to_string()])
        .await
        .expect("Failed to create test artist")
        .remove(0)
}

/// Test fixture: Create a test album
pub async fn create_test_album(pool: &SqlitePool, name: &str, artist_id: ArtistId) -> Album {
    beamie_storage::albums::create_batch(
        pool,
        &[NewAlbum {
            name: name.to_string(),
            artist_id,
        }],
    )
    .await
    .expect("Failed to create test album")
    .remove(0)
}

/// Test fixture: Create a test track
pub async fn create_test_track(
    pool: &SqlitePool,
    filename: &str,
    name: &str,
    album_id: AlbumId,
    number: u32,
) -> Track {
    beamie_storage::tracks::create_batch(
        pool,
        &[NewTrack {
            filename: filename.to_string(),
            name: name.to_string(),
            album_id,
            number,
        }],
    )
    .await
    .expect("Failed to create test track")
    .remove(0)
}

/// Count rows in a table
pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}
