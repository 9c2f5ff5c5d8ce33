//! Command implementations behind the `beamie` CLI

use crate::config::BeamieConfig;
use crate::error::{AppError, Result};
use beamie_core::{AlbumSummary, Artist, ScanReport, TrackSummary};
use beamie_metadata::LoftyTagReader;
use beamie_scanner::{ReconcileOptions, Reconciler};
use beamie_storage::albums::AlbumFilter;
use beamie_storage::artists::ArtistFilter;
use beamie_storage::tracks::TrackFilter;
use beamie_storage::SqliteCatalogStore;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Open the catalog database, creating it and applying migrations as needed
pub async fn open_database(config: &BeamieConfig) -> Result<SqlitePool> {
    let url = &config.storage.database_url;
    ensure_database_dir(url)?;

    let pool = beamie_storage::create_pool(url).await?;
    beamie_storage::run_migrations(&pool).await?;

    tracing::debug!("Catalog database ready at {}", url);
    Ok(pool)
}

/// Create the parent directory of a file-backed SQLite URL
fn ensure_database_dir(url: &str) -> Result<()> {
    let Some(path) = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:")) else {
        return Ok(());
    };

    // Drop query parameters such as `?mode=rwc`
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return Ok(());
    }

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            tracing::info!("Created database directory {}", parent.display());
        }
    }

    Ok(())
}

/// Create the catalog database
pub async fn init_db(config: &BeamieConfig) -> Result<()> {
    let pool = open_database(config).await?;
    pool.close().await;

    tracing::info!("Catalog initialized at {}", config.storage.database_url);
    Ok(())
}

/// Run one reconciliation pass
///
/// `paths` and `extensions` replace the configured media paths and allowed
/// extensions when non-empty.
pub async fn scan(
    config: &BeamieConfig,
    paths: Vec<PathBuf>,
    extensions: Vec<String>,
) -> Result<ScanReport> {
    let roots = if paths.is_empty() {
        config.library.media_paths.clone()
    } else {
        paths
    };
    let extensions = if extensions.is_empty() {
        config.library.allowed_extensions.clone()
    } else {
        extensions
    };

    if roots.is_empty() {
        return Err(AppError::Config(
            "No media paths configured (set library.media_paths or pass --path)".to_string(),
        ));
    }

    let pool = open_database(config).await?;
    let store = Arc::new(SqliteCatalogStore::new(pool));

    let reconciler = Reconciler::new(store, Arc::new(LoftyTagReader::new()))
        .with_options(ReconcileOptions::default().tag_workers(config.library.tag_workers));

    let report = reconciler.reconcile(&roots, &extensions).await?;

    for orphan in &report.orphans {
        tracing::info!("Removed orphaned track: {}", orphan);
    }

    Ok(report)
}

pub async fn artists(config: &BeamieConfig, filter: &ArtistFilter) -> Result<Vec<Artist>> {
    let pool = open_database(config).await?;
    Ok(beamie_storage::artists::list(&pool, filter).await?)
}

pub async fn albums(config: &BeamieConfig, filter: &AlbumFilter) -> Result<Vec<AlbumSummary>> {
    let pool = open_database(config).await?;
    Ok(beamie_storage::albums::list(&pool, filter).await?)
}

pub async fn tracks(config: &BeamieConfig, filter: &TrackFilter) -> Result<Vec<TrackSummary>> {
    let pool = open_database(config).await?;
    Ok(beamie_storage::tracks::list(&pool, filter).await?)
}
