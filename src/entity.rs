//! Core contracts for CRUD modules: persisted entities and the
//! entity/DTO/metadata conversion seam.

/// A persisted domain record. Implementations are immutable values; an
/// entity without an id is detached (not yet stored).
pub trait Entity: Clone + Send + Sync + 'static {
    /// Short noun used in error messages and domain events (e.g. "song").
    const KIND: &'static str;

    fn id(&self) -> Option<&str>;

    /// Copy differing only in `id`; every other field keeps its value.
    fn with_id(&self, id: &str) -> Self;
}

/// Pure, total mappings between an entity, its wire DTO, and the lighter
/// metadata projection used for list views.
pub trait EntityConverter<E, D, M>: Send + Sync {
    fn entity_to_dto(&self, entity: &E) -> D;

    fn dto_to_entity(&self, dto: &D) -> E;

    fn entity_to_metadata(&self, entity: &E) -> M;
}
