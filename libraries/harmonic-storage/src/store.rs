use crate::{create_memory_pool, create_pool, error::Result, run_migrations, tracks};
use async_trait::async_trait;
use harmonic_core::{Track, TrackId, TrackStore};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Track store backed by `SQLite`
#[derive(Clone)]
pub struct SqliteTrackStore {
    pool: SqlitePool,
}

impl SqliteTrackStore {
    /// Open (or create) the database at `database_url` and migrate it
    pub async fn open(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url).await?;
        run_migrations(&pool).await?;
        info!("Opened track library at {}", database_url);
        Ok(Self { pool })
    }

    /// Ephemeral store that lives as long as this value
    pub async fn in_memory() -> Result<Self> {
        let pool = create_memory_pool().await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Wrap an already migrated pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Look up a single track
    pub async fn get(&self, id: &TrackId) -> Result<Option<Track>> {
        tracks::get_by_id(&self.pool, id).await
    }

    /// Number of stored tracks
    pub async fn count(&self) -> Result<i64> {
        tracks::count(&self.pool).await
    }
}

#[async_trait]
impl TrackStore for SqliteTrackStore {
    async fn get_all(&self) -> harmonic_core::Result<Vec<Track>> {
        Ok(tracks::get_all(&self.pool).await?)
    }

    async fn put(&self, track: &Track) -> harmonic_core::Result<()> {
        tracks::upsert(&self.pool, track).await?;
        debug!("Stored track {}", track.id);
        Ok(())
    }

    async fn delete(&self, id: &TrackId) -> harmonic_core::Result<()> {
        if !tracks::delete(&self.pool, id).await? {
            debug!("Delete of unknown track {}", id);
        }
        Ok(())
    }

    async fn clear(&self) -> harmonic_core::Result<()> {
        let removed = tracks::clear(&self.pool).await?;
        debug!("Cleared {} tracks", removed);
        Ok(())
    }
}
