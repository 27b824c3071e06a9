//! Track queries
//!
//! Rows come back in insertion order (`seq`). An upsert updates the row in
//! place, so a re-imported track keeps its position.

use crate::error::{Result, StorageError};
use harmonic_core::{Track, TrackId};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::path::PathBuf;

/// Get every track in insertion order
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Track>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, artist, album, cover, file, duration_seconds
        FROM tracks
        ORDER BY seq
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(track_from_row).collect()
}

/// Get a track by id
pub async fn get_by_id(pool: &SqlitePool, id: &TrackId) -> Result<Option<Track>> {
    let row = sqlx::query(
        r#"
        SELECT id, title, artist, album, cover, file, duration_seconds
        FROM tracks
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(track_from_row).transpose()
}

/// Insert a track, or update the existing row with the same id
pub async fn upsert(pool: &SqlitePool, track: &Track) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO tracks (id, title, artist, album, cover, file, duration_seconds)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            title = excluded.title,
            artist = excluded.artist,
            album = excluded.album,
            cover = excluded.cover,
            file = excluded.file,
            duration_seconds = excluded.duration_seconds
        "#,
    )
    .bind(&track.id)
    .bind(&track.title)
    .bind(&track.artist)
    .bind(&track.album)
    .bind(track.cover.as_deref())
    .bind(track.file.to_string_lossy().into_owned())
    .bind(track.duration_seconds)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a track; deleting an unknown id is not an error
pub async fn delete(pool: &SqlitePool, id: &TrackId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM tracks WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete every track
pub async fn clear(pool: &SqlitePool) -> Result<u64> {
    let result = sqlx::query("DELETE FROM tracks").execute(pool).await?;
    Ok(result.rows_affected())
}

/// Number of stored tracks
pub async fn count(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tracks")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

fn track_from_row(row: &SqliteRow) -> Result<Track> {
    let id: TrackId = row.try_get("id")?;
    let file: String = row.try_get("file")?;
    if file.is_empty() {
        return Err(StorageError::CorruptRow(format!("track {} has no file", id)));
    }

    Ok(Track {
        id,
        title: row.try_get("title")?,
        artist: row.try_get("artist")?,
        album: row.try_get("album")?,
        cover: row.try_get("cover")?,
        file: PathBuf::from(file),
        duration_seconds: row.try_get("duration_seconds")?,
    })
}
