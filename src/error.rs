//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::patch::PatchError;
use crate::response::ErrorBody;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("unknown {kind} '{id}'")]
    UnknownEntity { kind: &'static str, id: String },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Terminal error of a request pipeline. Every handler converts into this
/// exactly once, at its return boundary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("patch: {0}")]
    Patch(#[from] PatchError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Only a failed id lookup maps to 404; everything else, patch
        // application included, surfaces as a 500.
        let (status, code) = match &self {
            AppError::Service(ServiceError::UnknownEntity { .. }) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR"),
        };
        (status, Json(ErrorBody::new(code, self.to_string()))).into_response()
    }
}
