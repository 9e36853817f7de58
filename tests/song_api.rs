//! End-to-end exercise of the song endpoints against the in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use songbook::song::{SongConverter, SongEntity};
use songbook::{common_routes, crud_routes, CrudService, CrudState, EventPublisher, InMemoryRepository};
use tower::ServiceExt;

fn app() -> Router {
    let repository = Arc::new(InMemoryRepository::<SongEntity>::new());
    let (events, rx) = EventPublisher::channel();
    // Keep the receiver alive for the lifetime of the router.
    std::mem::forget(rx);
    let service = CrudService::new(repository, events);
    let state = Arc::new(CrudState::new(service, SongConverter));
    Router::new()
        .merge(common_routes())
        .merge(crud_routes("/song", state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn patch_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json-patch+json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn full_song_lifecycle() {
    let app = app();

    // POST: 201 with a generated id and echoed fields.
    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/song",
            json!({"title": "Amazing Grace", "type": "NORMAL", "authors": ["J. Newton"]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().expect("generated id").to_string();
    assert_eq!(created["title"], json!("Amazing Grace"));
    assert_eq!(created["type"], json!("NORMAL"));
    assert_eq!(created["authors"], json!(["J. Newton"]));

    // GET: identical body.
    let (status, fetched) = send(&app, empty_request("GET", &format!("/song/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    // PATCH: title replaced, authors untouched.
    let (status, patched) = send(
        &app,
        patch_request(
            &format!("/song/{id}"),
            json!([{"op": "replace", "path": "/title", "value": "Amazing Grace (Hymn)"}]),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["title"], json!("Amazing Grace (Hymn)"));
    assert_eq!(patched["authors"], json!(["J. Newton"]));
    assert_eq!(patched["id"], json!(id));

    // DELETE: pre-delete snapshot.
    let (status, deleted) = send(&app, empty_request("DELETE", &format!("/song/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, patched);

    // Subsequent GET: 404 with the error body shape.
    let (status, error) = send(&app, empty_request("GET", &format!("/song/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["errorCode"], json!("NOT_FOUND"));
    assert!(error["description"].is_string());
}

#[tokio::test]
async fn put_replaces_the_whole_song_and_pins_the_id() {
    let app = app();
    let (_, created) = send(
        &app,
        json_request("POST", "/song", json!({"title": "Old", "themes": ["a"]})),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        json_request(
            "PUT",
            &format!("/song/{id}"),
            json!({"id": "ignored", "title": "New"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], json!(id));
    assert_eq!(updated["title"], json!("New"));
    // Whole-entity replace: the old themes are gone.
    assert_eq!(updated["themes"], json!([]));
}

#[tokio::test]
async fn put_unknown_id_is_404() {
    let app = app();
    let (status, error) = send(
        &app,
        json_request("PUT", "/song/missing", json!({"title": "New"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["errorCode"], json!("NOT_FOUND"));
}

#[tokio::test]
async fn patch_failure_maps_to_internal_error() {
    let app = app();
    let (_, created) = send(&app, json_request("POST", "/song", json!({"title": "A"}))).await;
    let id = created["id"].as_str().unwrap();

    let (status, error) = send(
        &app,
        patch_request(
            &format!("/song/{id}"),
            json!([{"op": "test", "path": "/title", "value": "B"}]),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error["errorCode"], json!("INTERNAL_SERVER_ERROR"));
}

#[tokio::test]
async fn patch_unknown_id_is_404_before_patching() {
    let app = app();
    let (status, error) = send(
        &app,
        patch_request(
            "/song/missing",
            json!([{"op": "replace", "path": "/title", "value": "X"}]),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["errorCode"], json!("NOT_FOUND"));
}

#[tokio::test]
async fn list_returns_metadata_only() {
    let app = app();
    for title in ["One", "Two"] {
        send(
            &app,
            json_request(
                "POST",
                "/song",
                json!({"title": title, "authors": ["someone"], "lyrics": {"v1": ["line"]}}),
            ),
        )
        .await;
    }

    let (status, listed) = send(&app, empty_request("GET", "/song")).await;
    assert_eq!(status, StatusCode::OK);
    let items = listed.as_array().expect("json array");
    assert_eq!(items.len(), 2);
    let mut titles: Vec<&str> = items
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect();
    titles.sort_unstable();
    assert_eq!(titles, vec!["One", "Two"]);
    for item in items {
        let keys: Vec<&str> = item.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert!(keys.contains(&"id"));
        assert!(keys.contains(&"type"));
        assert!(!keys.contains(&"authors"));
        assert!(!keys.contains(&"lyrics"));
    }
}

#[tokio::test]
async fn health_and_version_respond() {
    let app = app();
    let (status, body) = send(&app, empty_request("GET", "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
    let (status, body) = send(&app, empty_request("GET", "/version")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("songbook"));
}
