//! Generic CRUD handlers: create, get, update, patch, delete, list.
//!
//! Each handler is stateless per request and generic over the module's
//! entity, DTO, metadata, repository and converter. Failures propagate with
//! `?` and are recovered exactly once, by `AppError::into_response` at the
//! return boundary.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use futures::stream::TryStreamExt;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::entity::{Entity, EntityConverter};
use crate::error::AppError;
use crate::patch::{self, JsonPatch};
use crate::repository::Repository;
use crate::state::CrudState;

/// POST `{base}`: parse DTO, persist, respond 201 with the stored DTO.
pub async fn create_entity<E, D, M, R, C>(
    State(state): State<Arc<CrudState<E, D, M, R, C>>>,
    Json(dto): Json<D>,
) -> Result<impl IntoResponse, AppError>
where
    E: Entity,
    D: Serialize + DeserializeOwned + Send + Sync + 'static,
    M: Serialize + Send + Sync + 'static,
    R: Repository<E> + 'static,
    C: EntityConverter<E, D, M> + 'static,
{
    let entity = state.converter.dto_to_entity(&dto);
    let created = state.service.create(entity).await?;
    Ok((
        StatusCode::CREATED,
        Json(state.converter.entity_to_dto(&created)),
    ))
}

/// GET `{base}/{id}`: 200 with the DTO, 404 when the id is unknown.
pub async fn get_entity<E, D, M, R, C>(
    State(state): State<Arc<CrudState<E, D, M, R, C>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError>
where
    E: Entity,
    D: Serialize + DeserializeOwned + Send + Sync + 'static,
    M: Serialize + Send + Sync + 'static,
    R: Repository<E> + 'static,
    C: EntityConverter<E, D, M> + 'static,
{
    let entity = state.service.get(&id).await?;
    Ok((StatusCode::OK, Json(state.converter.entity_to_dto(&entity))))
}

/// PUT `{base}/{id}`: whole-entity replace; the path id wins over any id in
/// the body.
pub async fn update_entity<E, D, M, R, C>(
    State(state): State<Arc<CrudState<E, D, M, R, C>>>,
    Path(id): Path<String>,
    Json(dto): Json<D>,
) -> Result<impl IntoResponse, AppError>
where
    E: Entity,
    D: Serialize + DeserializeOwned + Send + Sync + 'static,
    M: Serialize + Send + Sync + 'static,
    R: Repository<E> + 'static,
    C: EntityConverter<E, D, M> + 'static,
{
    let entity = state.converter.dto_to_entity(&dto);
    let updated = state.service.update(&id, entity).await?;
    Ok((StatusCode::OK, Json(state.converter.entity_to_dto(&updated))))
}

/// PATCH `{base}/{id}`: fetch, apply the RFC 6902 document to the DTO
/// projection, store the result.
pub async fn patch_entity<E, D, M, R, C>(
    State(state): State<Arc<CrudState<E, D, M, R, C>>>,
    Path(id): Path<String>,
    Json(patch): Json<JsonPatch>,
) -> Result<impl IntoResponse, AppError>
where
    E: Entity,
    D: Serialize + DeserializeOwned + Send + Sync + 'static,
    M: Serialize + Send + Sync + 'static,
    R: Repository<E> + 'static,
    C: EntityConverter<E, D, M> + 'static,
{
    let existing = state.service.get(&id).await?;
    let dto = state.converter.entity_to_dto(&existing);
    let patched = patch::apply(&patch, &dto)?;
    let entity = state.converter.dto_to_entity(&patched);
    let updated = state.service.update(&id, entity).await?;
    Ok((StatusCode::OK, Json(state.converter.entity_to_dto(&updated))))
}

/// DELETE `{base}/{id}`: 200 with the pre-deletion snapshot.
pub async fn delete_entity<E, D, M, R, C>(
    State(state): State<Arc<CrudState<E, D, M, R, C>>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError>
where
    E: Entity,
    D: Serialize + DeserializeOwned + Send + Sync + 'static,
    M: Serialize + Send + Sync + 'static,
    R: Repository<E> + 'static,
    C: EntityConverter<E, D, M> + 'static,
{
    let deleted = state.service.delete(&id).await?;
    Ok((StatusCode::OK, Json(state.converter.entity_to_dto(&deleted))))
}

/// GET `{base}`: every stored entity as its metadata projection.
pub async fn retrieve_entities<E, D, M, R, C>(
    State(state): State<Arc<CrudState<E, D, M, R, C>>>,
) -> Result<impl IntoResponse, AppError>
where
    E: Entity,
    D: Serialize + DeserializeOwned + Send + Sync + 'static,
    M: Serialize + Send + Sync + 'static,
    R: Repository<E> + 'static,
    C: EntityConverter<E, D, M> + 'static,
{
    let mut entities = state.service.all();
    let mut out = Vec::new();
    while let Some(entity) = entities.try_next().await? {
        out.push(state.converter.entity_to_metadata(&entity));
    }
    Ok((StatusCode::OK, Json(out)))
}
