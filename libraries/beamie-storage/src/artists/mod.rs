use beamie_core::{error::Result, types::*};
use serde::Deserialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

/// Filters for browsing artists
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistFilter {
    pub id: Option<ArtistId>,
    /// Substring match on the artist name
    pub name: Option<String>,
}

fn from_row(row: &SqliteRow) -> Result<Artist> {
    Ok(Artist {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Artist>> {
    let row = sqlx::query("SELECT id, name FROM artists WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(from_row).transpose()
}

pub async fn list(pool: &SqlitePool, filter: &ArtistFilter) -> Result<Vec<Artist>> {
    let mut query: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT id, name FROM artists WHERE 1 = 1");

    if let Some(id) = filter.id {
        query.push(" AND id = ").push_bind(id);
    }
    if let Some(name) = &filter.name {
        query.push(" AND name LIKE ").push_bind(format!("%{}%", name));
    }
    query.push(" ORDER BY name");

    let rows = query.build().fetch_all(pool).await?;
    rows.iter().map(from_row).collect()
}

/// Create one artist per name inside a single transaction
///
/// Either every artist is created or none is.
pub async fn create_batch(pool: &SqlitePool, names: &[String]) -> Result<Vec<Artist>> {
    let mut tx = pool.begin().await?;
    let mut created = Vec::with_capacity(names.len());

    for name in names {
        let result = sqlx::query("INSERT INTO artists (name) VALUES (?)")
            .bind(name)
            .execute(&mut *tx)
            .await?;

        created.push(Artist {
            id: result.last_insert_rowid(),
            name: name.clone(),
        });
    }

    tx.commit().await?;
    Ok(created)
}
