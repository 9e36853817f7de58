//! Route tables: the CRUD verb grid for a module, plus common routes.

use std::sync::Arc;

use axum::{
    routing::get,
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::entity::{Entity, EntityConverter};
use crate::handlers::crud::{
    create_entity, delete_entity, get_entity, patch_entity, retrieve_entities, update_entity,
};
use crate::repository::Repository;
use crate::state::CrudState;

/// Mounts the six CRUD endpoints for one module under `base`
/// (e.g. `/song` and `/song/:id`).
pub fn crud_routes<E, D, M, R, C>(base: &str, state: Arc<CrudState<E, D, M, R, C>>) -> Router
where
    E: Entity,
    D: Serialize + DeserializeOwned + Send + Sync + 'static,
    M: Serialize + Send + Sync + 'static,
    R: Repository<E> + 'static,
    C: EntityConverter<E, D, M> + 'static,
{
    let individual = format!("{base}/:id");
    Router::new()
        .route(
            base,
            get(retrieve_entities::<E, D, M, R, C>).post(create_entity::<E, D, M, R, C>),
        )
        .route(
            &individual,
            get(get_entity::<E, D, M, R, C>)
                .put(update_entity::<E, D, M, R, C>)
                .patch(patch_entity::<E, D, M, R, C>)
                .delete(delete_entity::<E, D, M, R, C>),
        )
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Common routes: GET /health, GET /version.
pub fn common_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
}
