//! Harmonic Storage
//!
//! `SQLite` track library for Harmonic.
//!
//! Stores the flat library as one `tracks` table keyed by track id, in
//! insertion order. [`SqliteTrackStore`] implements
//! [`harmonic_core::TrackStore`] for the playback controller.
//!
//! # Example
//!
//! ```rust,no_run
//! use harmonic_core::TrackStore;
//! use harmonic_storage::SqliteTrackStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = SqliteTrackStore::open("sqlite://harmonic.db").await?;
//!
//! for track in store.get_all().await? {
//!     println!("{} - {}", track.artist, track.title);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod store;

pub mod tracks;

pub use error::{Result, StorageError};
pub use store::SqliteTrackStore;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// Called once on startup so the schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://harmonic.db`)
///
/// The database file is created if it does not exist.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    tracing::debug!("Creating pool for {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Create a pool over a private in-memory database
///
/// Every connection to `sqlite::memory:` opens a fresh database, so the pool
/// is pinned to a single connection that is never recycled.
pub async fn create_memory_pool() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    Ok(pool)
}
