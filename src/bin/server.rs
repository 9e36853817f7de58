//! Songbook server: wires the song module to PostgreSQL and serves the
//! CRUD endpoints.

use std::sync::Arc;

use axum::Router;
use songbook::song::{pg_song_repository, SongConverter};
use songbook::{common_routes, crud_routes, CrudService, CrudState, EventPublisher, ServiceConfig};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("songbook=info".parse()?))
        .init();

    let config = ServiceConfig::from_env();
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    let repository = Arc::new(pg_song_repository(pool));
    repository.ensure_schema().await?;

    let (events, mut event_rx) = EventPublisher::channel();
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            tracing::info!(
                action = ?event.action,
                kind = event.entity_kind,
                id = %event.entity_id,
                "domain event"
            );
        }
    });

    let service = CrudService::new(repository, events);
    let state = Arc::new(CrudState::new(service, SongConverter));

    let app = Router::new()
        .merge(common_routes())
        .merge(crud_routes(&config.resource_path("song"), state))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
