//! Songbook: reactive CRUD microservice for songs on top of a generic
//! entity-converter/CRUD framework.

pub mod config;
pub mod entity;
pub mod error;
pub mod events;
pub mod handlers;
pub mod patch;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod song;
pub mod state;

pub use config::ServiceConfig;
pub use entity::{Entity, EntityConverter};
pub use error::{AppError, RepositoryError, ServiceError};
pub use events::{DomainEvent, EntityAction, EventPublisher};
pub use patch::{JsonPatch, PatchError};
pub use repository::{InMemoryRepository, PgRepository, Repository};
pub use response::ErrorBody;
pub use routes::{common_routes, crud_routes};
pub use service::CrudService;
pub use state::CrudState;
