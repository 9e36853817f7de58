//! Asynchronous document stores keyed by entity id.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::entity::Entity;
use crate::error::RepositoryError;

pub mod memory;
pub mod pg;

pub use memory::InMemoryRepository;
pub use pg::PgRepository;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Insert-or-replace. A detached entity (no id) is assigned one by the
    /// store; the returned entity always carries its id.
    async fn save(&self, entity: E) -> RepositoryResult<E>;

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<E>>;

    /// Unordered scan over every stored entity. Each call opens a fresh
    /// scan; the stream is lazy and finite.
    fn find_all(&self) -> BoxStream<'_, RepositoryResult<E>>;

    /// Removes by id, reporting whether a record existed.
    async fn delete_by_id(&self, id: &str) -> RepositoryResult<bool>;
}
