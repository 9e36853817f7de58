//! Generic CRUD orchestration between handlers and the repository.

use std::marker::PhantomData;
use std::sync::Arc;

use futures::stream::{BoxStream, StreamExt, TryStreamExt};

use crate::entity::Entity;
use crate::error::ServiceError;
use crate::events::{EntityAction, EventPublisher};
use crate::repository::Repository;

/// Mediates between converted entities and persistence. Mutations publish a
/// domain event best-effort once the repository call has committed.
pub struct CrudService<E, R> {
    repository: Arc<R>,
    events: EventPublisher,
    _entity: PhantomData<fn() -> E>,
}

impl<E, R> CrudService<E, R>
where
    E: Entity,
    R: Repository<E>,
{
    pub fn new(repository: Arc<R>, events: EventPublisher) -> Self {
        Self {
            repository,
            events,
            _entity: PhantomData,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Persists a detached entity; the store assigns the id.
    pub async fn create(&self, entity: E) -> Result<E, ServiceError> {
        let stored = self.repository.save(entity).await?;
        if let Some(id) = stored.id() {
            self.events.publish(EntityAction::Created, E::KIND, id);
        }
        Ok(stored)
    }

    pub async fn get(&self, id: &str) -> Result<E, ServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::UnknownEntity {
                kind: E::KIND,
                id: id.to_string(),
            })
    }

    /// Whole-entity replace. The path-supplied `id` is authoritative: any id
    /// carried by `entity` is overwritten before saving. Fails without
    /// saving when `id` is unknown.
    pub async fn update(&self, id: &str, entity: E) -> Result<E, ServiceError> {
        self.get(id).await?;
        let stored = self.repository.save(entity.with_id(id)).await?;
        self.events.publish(EntityAction::Updated, E::KIND, id);
        Ok(stored)
    }

    /// Removes by id, returning the entity as it existed before deletion.
    pub async fn delete(&self, id: &str) -> Result<E, ServiceError> {
        let existing = self.get(id).await?;
        self.repository.delete_by_id(id).await?;
        Ok(existing)
    }

    /// Unordered scan of every stored entity.
    pub fn all(&self) -> BoxStream<'_, Result<E, ServiceError>> {
        self.repository.find_all().err_into().boxed()
    }
}
