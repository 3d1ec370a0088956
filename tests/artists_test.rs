mod common;

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Extension, Json, Router,
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use common::{local_client, spawn_server};
use playlist_eras::{
    error::AppError,
    spotify::artists::{ARTIST_BATCH, artist_genres},
};
use serde_json::{Value, json};

type Batches = Arc<Mutex<Vec<usize>>>;

async fn artists(
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Extension(batches): Extension<Batches>,
) -> Response {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer token") {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"status": 401, "message": "Invalid access token"}})),
        )
            .into_response();
    }

    let ids: Vec<&str> = query["ids"].split(',').collect();
    let batch = {
        let mut batches = batches.lock().unwrap();
        batches.push(ids.len());
        batches.len()
    };

    if batch == 2 {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response();
    }

    let artists: Vec<Value> = ids
        .iter()
        .map(|id| {
            if id.starts_with("gone") {
                Value::Null
            } else {
                json!({"id": id, "name": id, "genres": [format!("genre-{id}")]})
            }
        })
        .collect();
    Json(json!({ "artists": artists })).into_response()
}

async fn spawn_provider() -> (String, Batches) {
    let batches: Batches = Arc::default();
    let base = spawn_server(
        Router::new()
            .route("/v1/artists", get(artists))
            .layer(Extension(Arc::clone(&batches))),
    )
    .await;
    (format!("{base}/v1"), batches)
}

#[tokio::test]
async fn test_genres_are_fetched_in_sequential_batches() {
    let (api_url, batches) = spawn_provider().await;
    let mut ids: Vec<String> = (0..120).map(|i| format!("artist{i}")).collect();
    ids[0] = "gone0".to_string();

    let genres = artist_genres(&local_client(), &api_url, "token", &ids)
        .await
        .unwrap();

    assert_eq!(*batches.lock().unwrap(), vec![ARTIST_BATCH, ARTIST_BATCH, 20]);
    // first batch minus the null entry, second batch failed, third batch complete
    assert_eq!(genres.len(), 49 + 20);
    assert_eq!(genres["artist1"], vec!["genre-artist1"]);
    assert!(!genres.contains_key("gone0"));
    assert!(!genres.contains_key("artist60"));
    assert_eq!(genres["artist119"], vec!["genre-artist119"]);
}

#[tokio::test]
async fn test_no_ids_means_no_requests() {
    let (api_url, batches) = spawn_provider().await;

    let genres = artist_genres(&local_client(), &api_url, "token", &[])
        .await
        .unwrap();

    assert!(genres.is_empty());
    assert!(batches.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_rejected_token_aborts_lookup() {
    let (api_url, _batches) = spawn_provider().await;
    let ids = vec!["artist1".to_string()];

    let result = artist_genres(&local_client(), &api_url, "expired", &ids).await;

    assert!(matches!(result, Err(AppError::Unauthorized)));
}
