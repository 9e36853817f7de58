//! In-memory document store for tests and demo deployments.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use uuid::Uuid;

use crate::entity::Entity;
use crate::repository::{Repository, RepositoryResult};

pub struct InMemoryRepository<E> {
    records: RwLock<HashMap<String, E>>,
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// First record satisfying `predicate`, in unspecified storage order.
    pub fn find_first<P>(&self, predicate: P) -> Option<E>
    where
        P: Fn(&E) -> bool,
    {
        self.records
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .find(|e| predicate(e))
            .cloned()
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn save(&self, entity: E) -> RepositoryResult<E> {
        let stored = if entity.id().is_some() {
            entity
        } else {
            let id = Uuid::new_v4().to_string();
            entity.with_id(&id)
        };
        let id = stored.id().unwrap_or_default().to_string();
        self.records
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &str) -> RepositoryResult<Option<E>> {
        Ok(self
            .records
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned())
    }

    fn find_all(&self) -> BoxStream<'_, RepositoryResult<E>> {
        let snapshot: Vec<E> = self
            .records
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect();
        stream::iter(snapshot.into_iter().map(Ok)).boxed()
    }

    async fn delete_by_id(&self, id: &str) -> RepositoryResult<bool> {
        Ok(self
            .records
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id)
            .is_some())
    }
}
