//! Song instantiation of the generic CRUD service.

use crate::entity::Entity;
use crate::error::ServiceError;
use crate::service::CrudService;
use crate::song::model::SongEntity;
use crate::song::repository::SongRepository;

pub type SongService<R> = CrudService<SongEntity, R>;

impl<R: SongRepository> CrudService<SongEntity, R> {
    /// Exact-title lookup; fails like `get` when nothing matches.
    pub async fn find_by_title(&self, title: &str) -> Result<SongEntity, ServiceError> {
        self.repository()
            .find_first_by_title(title)
            .await?
            .ok_or_else(|| ServiceError::UnknownEntity {
                kind: SongEntity::KIND,
                id: title.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use futures::TryStreamExt;

    use super::*;
    use crate::events::{EntityAction, EventPublisher};
    use crate::repository::{InMemoryRepository, Repository};
    use crate::song::model::SongType;

    fn detached_song(title: &str) -> SongEntity {
        SongEntity {
            id: None,
            song_type: SongType::Normal,
            title: Some(title.to_string()),
            authors: vec!["J. Newton".to_string()],
            additional_titles: vec![],
            themes: vec![],
            lyrics: Default::default(),
            lyric_order: vec![],
            source: None,
        }
    }

    fn service() -> (
        SongService<InMemoryRepository<SongEntity>>,
        tokio::sync::mpsc::UnboundedReceiver<crate::events::DomainEvent>,
    ) {
        let (events, rx) = EventPublisher::channel();
        (
            CrudService::new(Arc::new(InMemoryRepository::new()), events),
            rx,
        )
    }

    #[tokio::test]
    async fn create_assigns_id_and_keeps_fields() {
        let (service, mut rx) = service();
        let stored = service.create(detached_song("Amazing Grace")).await.unwrap();
        let id = stored.id.clone().expect("assigned id");
        assert!(!id.is_empty());
        assert_eq!(
            SongEntity { id: None, ..stored },
            detached_song("Amazing Grace")
        );
        let event = rx.recv().await.expect("created event");
        assert_eq!(event.action, EntityAction::Created);
        assert_eq!(event.entity_id, id);
    }

    #[tokio::test]
    async fn get_miss_is_unknown_entity() {
        let (service, _rx) = service();
        let err = service.get("missing").await.unwrap_err();
        assert!(matches!(err, ServiceError::UnknownEntity { .. }));
    }

    #[tokio::test]
    async fn update_miss_fails_without_saving() {
        let (service, _rx) = service();
        let err = service
            .update("missing", detached_song("Amazing Grace"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::UnknownEntity { .. }));
        let remaining: Vec<SongEntity> = service.all().try_collect().await.unwrap();
        assert!(remaining.is_empty());
    }

    #[tokio::test]
    async fn update_pins_the_path_id() {
        let (service, mut rx) = service();
        let stored = service.create(detached_song("Amazing Grace")).await.unwrap();
        let id = stored.id.clone().unwrap();
        rx.recv().await.expect("created event");

        let mut replacement = detached_song("Amazing Grace (Hymn)");
        replacement.id = Some("some-other-id".to_string());
        let updated = service.update(&id, replacement).await.unwrap();
        assert_eq!(updated.id.as_deref(), Some(id.as_str()));
        assert_eq!(updated.title.as_deref(), Some("Amazing Grace (Hymn)"));

        let event = rx.recv().await.expect("updated event");
        assert_eq!(event.action, EntityAction::Updated);
        assert_eq!(event.entity_id, id);
    }

    #[tokio::test]
    async fn delete_returns_snapshot_and_forgets_the_id() {
        let (service, _rx) = service();
        let stored = service.create(detached_song("Amazing Grace")).await.unwrap();
        let id = stored.id.clone().unwrap();
        let snapshot = service.delete(&id).await.unwrap();
        assert_eq!(snapshot, stored);
        let err = service.get(&id).await.unwrap_err();
        assert!(matches!(err, ServiceError::UnknownEntity { .. }));
    }

    #[tokio::test]
    async fn all_returns_every_song_in_any_order() {
        let (service, _rx) = service();
        let mut expected = HashSet::new();
        for title in ["One", "Two", "Three"] {
            let stored = service.create(detached_song(title)).await.unwrap();
            expected.insert(stored.id.unwrap());
        }
        let ids: HashSet<String> = service
            .all()
            .try_collect::<Vec<_>>()
            .await
            .unwrap()
            .into_iter()
            .filter_map(|song| song.id)
            .collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn find_by_title_matches_exactly() {
        let (service, _rx) = service();
        service.create(detached_song("Amazing Grace")).await.unwrap();
        let found = service.find_by_title("Amazing Grace").await.unwrap();
        assert_eq!(found.title.as_deref(), Some("Amazing Grace"));
        let err = service.find_by_title("amazing grace").await.unwrap_err();
        assert!(matches!(err, ServiceError::UnknownEntity { .. }));
    }

    #[tokio::test]
    async fn mutation_succeeds_when_event_channel_is_closed() {
        let (service, rx) = service();
        drop(rx);
        let stored = service.create(detached_song("Amazing Grace")).await.unwrap();
        assert!(stored.id.is_some());
    }

    #[tokio::test]
    async fn save_preserves_an_existing_id() {
        let (service, _rx) = service();
        let repository = service.repository();
        let seeded = repository
            .save(detached_song("Seeded").with_id("fixed-id"))
            .await
            .unwrap();
        assert_eq!(seeded.id.as_deref(), Some("fixed-id"));
        let fetched = service.get("fixed-id").await.unwrap();
        assert_eq!(fetched, seeded);
    }
}
