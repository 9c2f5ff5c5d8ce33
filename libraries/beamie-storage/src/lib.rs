//! Beamie Storage
//!
//! `SQLite` catalog store for Beamie.
//!
//! This crate persists the artist → album → track hierarchy and implements
//! the `CatalogStore` contract the scanner reconciles against.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each entity (`artists`, `albums`, `tracks`) owns
//!   its own queries
//! - **Atomic Batches**: batch inserts run inside one transaction
//! - **Schema Constraints**: artist names, album names per artist and track
//!   filenames are `UNIQUE`
//!
//! # Example
//!
//! ```rust,no_run
//! use beamie_storage::{SqliteCatalogStore, create_pool, run_migrations};
//! use beamie_core::CatalogStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://beamie.db").await?;
//! run_migrations(&pool).await?;
//!
//! let store = SqliteCatalogStore::new(pool);
//! let tracks = store.all_tracks().await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod albums;
pub mod artists;
pub mod tracks;

pub use context::SqliteCatalogStore;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR
        .run(pool)
        .await
        .map_err(|e| StorageError::Migration(e.to_string()))
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://beamie.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating pool with URL: {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::debug!("Pool created");

    Ok(pool)
}
