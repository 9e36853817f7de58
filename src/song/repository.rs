//! Song-specific repository surface on top of the generic stores.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::repository::{InMemoryRepository, PgRepository, Repository, RepositoryResult};
use crate::song::model::SongEntity;

#[async_trait]
pub trait SongRepository: Repository<SongEntity> {
    /// First song (by storage order) with an exactly matching title.
    async fn find_first_by_title(&self, title: &str) -> RepositoryResult<Option<SongEntity>>;
}

#[async_trait]
impl SongRepository for InMemoryRepository<SongEntity> {
    async fn find_first_by_title(&self, title: &str) -> RepositoryResult<Option<SongEntity>> {
        Ok(self.find_first(|song| song.title.as_deref() == Some(title)))
    }
}

#[async_trait]
impl SongRepository for PgRepository<SongEntity> {
    async fn find_first_by_title(&self, title: &str) -> RepositoryResult<Option<SongEntity>> {
        self.find_first_by_field("title", title).await
    }
}

/// Postgres-backed song store over the `songs` table.
pub fn pg_song_repository(pool: PgPool) -> PgRepository<SongEntity> {
    PgRepository::new(pool, "songs")
}
