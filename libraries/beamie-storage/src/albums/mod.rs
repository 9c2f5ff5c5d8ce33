use beamie_core::{error::Result, types::*};
use serde::Deserialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

/// Filters for browsing albums
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlbumFilter {
    pub id: Option<AlbumId>,
    /// Substring match on the album name
    pub name: Option<String>,
    /// Substring match on the artist name
    pub artist: Option<String>,
}

fn from_row(row: &SqliteRow) -> Result<Album> {
    Ok(Album {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        artist_id: row.try_get("artist_id")?,
    })
}

fn summary_from_row(row: &SqliteRow) -> Result<AlbumSummary> {
    Ok(AlbumSummary {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        artist_id: row.try_get("artist_id")?,
        artist_name: row.try_get("artist_name")?,
    })
}

/// Find an album by exact name within one artist
pub async fn find_by_name(
    pool: &SqlitePool,
    name: &str,
    artist_id: ArtistId,
) -> Result<Option<Album>> {
    let row = sqlx::query("SELECT id, name, artist_id FROM albums WHERE name = ? AND artist_id = ?")
        .bind(name)
        .bind(artist_id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

pub async fn list(pool: &SqlitePool, filter: &AlbumFilter) -> Result<Vec<AlbumSummary>> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT al.id, al.name, al.artist_id, ar.name AS artist_name
         FROM albums al
         JOIN artists ar ON ar.id = al.artist_id
         WHERE 1 = 1",
    );

    if let Some(id) = filter.id {
        query.push(" AND al.id = ").push_bind(id);
    }
    if let Some(name) = &filter.name {
        query.push(" AND al.name LIKE ").push_bind(format!("%{}%", name));
    }
    if let Some(artist) = &filter.artist {
        query.push(" AND ar.name LIKE ").push_bind(format!("%{}%", artist));
    }
    query.push(" ORDER BY al.name");

    let rows = query.build().fetch_all(pool).await?;
    rows.iter().map(summary_from_row).collect()
}

/// Create albums inside a single transaction
///
/// Either every album is created or none is.
pub async fn create_batch(pool: &SqlitePool, albums: &[NewAlbum]) -> Result<Vec<Album>> {
    let mut tx = pool.begin().await?;
    let mut created = Vec::with_capacity(albums.len());

    for album in albums {
        let result = sqlx::query("INSERT INTO albums (name, artist_id) VALUES (?, ?)")
            .bind(&album.name)
            .bind(album.artist_id)
            .execute(&mut *tx)
            .await?;

        created.push(Album {
            id: result.last_insert_rowid(),
            name: album.name.clone(),
            artist_id: album.artist_id,
        });
    }

    tx.commit().await?;
    Ok(created)
}
