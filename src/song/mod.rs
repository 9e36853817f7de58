//! The Song CRUD module: models, converter, repository bindings.

pub mod convert;
pub mod model;
pub mod repository;
pub mod service;

pub use convert::SongConverter;
pub use model::{Song, SongEntity, SongMetadata, SongSource, SongType};
pub use repository::{pg_song_repository, SongRepository};
pub use service::SongService;
