use beamie_core::{error::Result, types::*};
use serde::Deserialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

/// Filters for browsing tracks
///
/// Name filters are substring matches; id and number filters are exact.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackFilter {
    pub id: Option<TrackId>,
    pub artist: Option<String>,
    pub artist_id: Option<ArtistId>,
    pub album: Option<String>,
    pub album_id: Option<AlbumId>,
    pub number: Option<u32>,
    pub name: Option<String>,
}

const SUMMARY_SELECT: &str = "SELECT t.id, t.number, t.name, t.filename,
        al.name AS album_name, ar.name AS artist_name
     FROM tracks t
     JOIN albums al ON al.id = t.album_id
     JOIN artists ar ON ar.id = al.artist_id";

fn from_row(row: &SqliteRow) -> Result<Track> {
    Ok(Track {
        id: row.try_get("id")?,
        filename: row.try_get("filename")?,
        name: row.try_get("name")?,
        album_id: row.try_get("album_id")?,
        number: row.try_get::<i64, _>("number")? as u32,
    })
}

fn summary_from_row(row: &SqliteRow) -> Result<TrackSummary> {
    Ok(TrackSummary {
        id: row.try_get("id")?,
        number: row.try_get::<i64, _>("number")? as u32,
        name: row.try_get("name")?,
        album_name: row.try_get("album_name")?,
        artist_name: row.try_get("artist_name")?,
        filename: row.try_get("filename")?,
    })
}

pub async fn find_by_filename(pool: &SqlitePool, filename: &str) -> Result<Option<Track>> {
    let row = sqlx::query(
        "SELECT id, filename, name, album_id, number FROM tracks WHERE filename = ?",
    )
    .bind(filename)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(from_row).transpose()
}

/// Every track with its album and artist names, ordered by id
pub async fn get_all_summaries(pool: &SqlitePool) -> Result<Vec<TrackSummary>> {
    let rows = sqlx::query(&format!("{} ORDER BY t.id", SUMMARY_SELECT))
        .fetch_all(pool)
        .await?;

    rows.iter().map(summary_from_row).collect()
}

pub async fn list(pool: &SqlitePool, filter: &TrackFilter) -> Result<Vec<TrackSummary>> {
    let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(SUMMARY_SELECT);
    query.push(" WHERE 1 = 1");

    if let Some(id) = filter.id {
        query.push(" AND t.id = ").push_bind(id);
    }
    if let Some(artist) = &filter.artist {
        query.push(" AND ar.name LIKE ").push_bind(format!("%{}%", artist));
    }
    if let Some(artist_id) = filter.artist_id {
        query.push(" AND ar.id = ").push_bind(artist_id);
    }
    if let Some(album) = &filter.album {
        query.push(" AND al.name LIKE ").push_bind(format!("%{}%", album));
    }
    if let Some(album_id) = filter.album_id {
        query.push(" AND al.id = ").push_bind(album_id);
    }
    if let Some(number) = filter.number {
        query.push(" AND t.number = ").push_bind(i64::from(number));
    }
    if let Some(name) = &filter.name {
        query.push(" AND t.name LIKE ").push_bind(format!("%{}%", name));
    }
    query.push(" ORDER BY t.number, t.id");

    let rows = query.build().fetch_all(pool).await?;
    rows.iter().map(summary_from_row).collect()
}

/// Create tracks inside a single transaction
///
/// Either every track is created or none is.
pub async fn create_batch(pool: &SqlitePool, tracks: &[NewTrack]) -> Result<Vec<Track>> {
    let mut tx = pool.begin().await?;
    let mut created = Vec::with_capacity(tracks.len());

    for track in tracks {
        let result = sqlx::query(
            "INSERT INTO tracks (filename, name, album_id, number) VALUES (?, ?, ?, ?)",
        )
        .bind(&track.filename)
        .bind(&track.name)
        .bind(track.album_id)
        .bind(i64::from(track.number))
        .execute(&mut *tx)
        .await?;

        created.push(Track {
            id: result.last_insert_rowid(),
            filename: track.filename.clone(),
            name: track.name.clone(),
            album_id: track.album_id,
            number: track.number,
        });
    }

    tx.commit().await?;
    Ok(created)
}

pub async fn delete(pool: &SqlitePool, id: TrackId) -> Result<()> {
    let result = sqlx::query("DELETE FROM tracks WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(beamie_core::BeamieError::not_found("Track", id.to_string()));
    }

    Ok(())
}
