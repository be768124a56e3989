//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use lrukv::{api::create_router, AppState, Cache, CacheConfig, LruCache};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Helper Functions ==

fn shared_cache(capacity: usize) -> Arc<LruCache<String, Value>> {
    Arc::new(LruCache::new(
        CacheConfig::new(capacity, Duration::ZERO).unwrap(),
    ))
}

fn app_for(cache: &Arc<LruCache<String, Value>>) -> Router {
    create_router(AppState::from_shared(Arc::clone(cache)))
}

fn create_test_app() -> Router {
    app_for(&shared_cache(100))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn set_item(app: &Router, key: &str, value: Value, ttl: u64) {
    let (status, _) = send(
        app,
        "POST",
        "/cache/items",
        Some(json!({ "key": key, "value": value, "ttl": ttl })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = send(app, "GET", uri, None).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

// == Index Endpoint ==

#[tokio::test]
async fn test_index_endpoint_banner() {
    let app = create_test_app();
    let (status, body) = send(&app, "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        String::from_utf8(body).unwrap(),
        lrukv::api::handlers::BANNER
    );
}

// == SET / GET Endpoints ==

#[tokio::test]
async fn test_set_then_get_item() {
    let app = create_test_app();
    set_item(&app, "get_key", json!({"nested": [1, 2, 3]}), 0).await;

    let (status, json) = get_json(&app, "/cache/items/get_key").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "get_key");
    assert_eq!(json["value"], json!({"nested": [1, 2, 3]}));
    assert_eq!(json["ttl"], 0);
    assert_eq!(json["ExpirationTime"], "");
}

#[tokio::test]
async fn test_set_with_ttl_reports_expiration() {
    let app = create_test_app();
    set_item(&app, "ttl_key", json!("ttl_value"), 60).await;

    let (status, json) = get_json(&app, "/cache/items/ttl_key").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ttl"], 60);
    assert!(json["ExpirationTime"].as_str().unwrap().contains("UTC"));
}

#[tokio::test]
async fn test_set_without_ttl_field() {
    let app = create_test_app();
    let (status, _) = send(
        &app,
        "POST",
        "/cache/items",
        Some(json!({ "key": "plain", "value": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = get_json(&app, "/cache/items/plain").await;
    assert_eq!(json["ttl"], 0);
}

#[tokio::test]
async fn test_get_item_not_found() {
    let app = create_test_app();
    let (status, json) = get_json(&app, "/cache/items/nonexistent_key").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("nonexistent_key"));
}

#[tokio::test]
async fn test_empty_key_request() {
    let app = create_test_app();
    let (status, bytes) = send(
        &app,
        "POST",
        "/cache/items",
        Some(json!({ "key": "", "value": "v" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/cache/items")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

// == GET ALL Endpoint ==

#[tokio::test]
async fn test_get_all_items() {
    let app = create_test_app();
    for key in ["a", "b", "c"] {
        set_item(&app, key, json!(key), 0).await;
    }

    let (status, json) = get_json(&app, "/cache/items/").await;
    assert_eq!(status, StatusCode::OK);

    let mut keys: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["key"].as_str().unwrap())
        .collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["a", "b", "c"]);
}

// == DELETE Endpoints ==

#[tokio::test]
async fn test_delete_item() {
    let app = create_test_app();
    set_item(&app, "to_delete", json!(1), 0).await;

    let (status, _) = send(&app, "DELETE", "/cache/items/to_delete", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get_json(&app, "/cache/items/to_delete").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/cache/items/to_delete", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_purge_items() {
    let cache = shared_cache(100);
    let app = app_for(&cache);
    for i in 0..10 {
        set_item(&app, &format!("k{i}"), json!(i), 0).await;
    }

    let (status, _) = send(&app, "DELETE", "/cache/items/", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = get_json(&app, "/cache/items/").await;
    assert_eq!(json, json!([]));
    assert_eq!(cache.len().await, 0);

    // Purging an empty cache still succeeds
    let (status, _) = send(&app, "DELETE", "/cache/items/", None).await;
    assert_eq!(status, StatusCode::OK);
}

// == Eviction and Expiry ==

#[tokio::test]
async fn test_lru_eviction_via_api() {
    let app = app_for(&shared_cache(4));

    for key in ["A", "B", "C"] {
        set_item(&app, key, json!(key), 0).await;
    }
    let (status, _) = get_json(&app, "/cache/items/A").await;
    assert_eq!(status, StatusCode::OK);
    for key in ["D", "E", "F"] {
        set_item(&app, key, json!(key), 0).await;
    }

    for key in ["B", "C"] {
        let (status, _) = get_json(&app, &format!("/cache/items/{key}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{key} should be evicted");
    }
    for key in ["A", "D", "E", "F"] {
        let (status, _) = get_json(&app, &format!("/cache/items/{key}")).await;
        assert_eq!(status, StatusCode::OK, "{key} should be present");
    }
}

#[tokio::test]
async fn test_ttl_expiration_via_api() {
    let app = create_test_app();
    set_item(&app, "expire_me", json!("soon"), 1).await;

    let (status, _) = get_json(&app, "/cache/items/expire_me").await;
    assert_eq!(status, StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let (_, all) = get_json(&app, "/cache/items/").await;
    assert_eq!(all, json!([]));

    let (status, _) = get_json(&app, "/cache/items/expire_me").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == Stats and Health ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app();
    set_item(&app, "k", json!(1), 0).await;
    get_json(&app, "/cache/items/k").await;
    get_json(&app, "/cache/items/missing").await;

    let (status, json) = get_json(&app, "/cache/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["total_entries"], 1);
    assert_eq!(json["hit_rate"], 0.5);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();
    let (status, json) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}
