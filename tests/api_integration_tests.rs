//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use bounded_cache::{api::create_router, cache::CacheStore, AppState, Config};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app(capacity: usize) -> Router {
    let state = AppState::new(CacheStore::new(capacity));
    create_router(state)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn put_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/cache")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(key: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(format!("/cache/{}", key))
        .body(Body::empty())
        .unwrap()
}

fn delete_request(key: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(format!("/cache/{}", key))
        .body(Body::empty())
        .unwrap()
}

async fn put_kv(app: &Router, key: &str, value: &str) -> StatusCode {
    let body = serde_json::json!({ "key": key, "value": value }).to_string();
    app.clone()
        .oneshot(put_request(&body))
        .await
        .unwrap()
        .status()
}

// == PUT Endpoint Tests ==

#[tokio::test]
async fn test_put_endpoint_success() {
    let app = create_test_app(10);

    let response = app
        .oneshot(put_request(r#"{"key":"test_key","value":"test_value"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["message"], "Key-value pair stored successfully.");
    assert_eq!(json["key"], "test_key");
}

#[tokio::test]
async fn test_put_duplicate_key_keeps_first_value() {
    let app = create_test_app(10);

    assert_eq!(put_kv(&app, "a", "1").await, StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(put_request(r#"{"key":"a","value":"2"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Key already exists in cache.");

    let response = app.oneshot(get_request("a")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["value"], "1");
}

#[tokio::test]
async fn test_put_when_full_then_after_delete() {
    let app = create_test_app(10);

    for i in 1..=10 {
        assert_eq!(
            put_kv(&app, &format!("k{}", i), "v").await,
            StatusCode::CREATED
        );
    }

    let response = app
        .clone()
        .oneshot(put_request(r#"{"key":"k11","value":"v"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Cache is full. Cannot store more items.");

    let response = app.clone().oneshot(delete_request("k1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(put_kv(&app, "k11", "v").await, StatusCode::CREATED);
    assert_eq!(put_kv(&app, "k12", "v").await, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_missing_value() {
    let app = create_test_app(10);

    let response = app
        .oneshot(put_request(r#"{"key":"only_key"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Both key and value are required.");
}

#[tokio::test]
async fn test_put_empty_key() {
    let app = create_test_app(10);

    let response = app
        .oneshot(put_request(r#"{"key":"","value":"test"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app(10);

    let response = app
        .oneshot(put_request(r#"{"invalid json"#))
        .await
        .unwrap();

    // Axum rejects malformed JSON before the handler runs
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}

// == GET Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_success() {
    let app = create_test_app(10);
    assert_eq!(put_kv(&app, "get_key", "get_value").await, StatusCode::CREATED);

    let response = app.oneshot(get_request("get_key")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["key"], "get_key");
    assert_eq!(json["value"], "get_value");
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app(10);

    let response = app.oneshot(get_request("missing")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], "Key not found in cache.");
}

// == DELETE Endpoint Tests ==

#[tokio::test]
async fn test_delete_endpoint_success() {
    let app = create_test_app(10);
    assert_eq!(put_kv(&app, "delete_key", "v").await, StatusCode::CREATED);

    let response = app.clone().oneshot(delete_request("delete_key")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["message"], "Key-value pair deleted successfully.");

    let response = app.oneshot(get_request("delete_key")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_endpoint_not_found_leaves_count() {
    let app = create_test_app(10);
    assert_eq!(put_kv(&app, "a", "1").await, StatusCode::CREATED);

    let response = app.clone().oneshot(delete_request("missing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 1);
}

// == STATS Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app(2);

    put_kv(&app, "a", "1").await;
    put_kv(&app, "a", "1").await;
    put_kv(&app, "b", "2").await;
    put_kv(&app, "c", "3").await;
    app.clone().oneshot(get_request("a")).await.unwrap();
    app.clone().oneshot(get_request("missing")).await.unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["count"], 2);
    assert_eq!(json["capacity"], 2);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["rejected_duplicate"], 1);
    assert_eq!(json["rejected_full"], 1);
    assert!(json.get("hit_rate").is_some());
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(10);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Concurrency Tests ==

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_puts_respect_capacity() {
    let app = create_test_app(10);
    for i in 0..9 {
        assert_eq!(
            put_kv(&app, &format!("seed{}", i), "v").await,
            StatusCode::CREATED
        );
    }

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move { put_kv(&app, &format!("racer{}", i), "v").await })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            status => assert_eq!(status, StatusCode::BAD_REQUEST),
        }
    }
    assert_eq!(created, 1);
}

// == Persistence Tests ==

#[tokio::test]
async fn test_snapshot_survives_restart() {
    let dir = std::env::temp_dir().join(format!(
        "bounded_cache_it_{}_restart",
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    let config = Config {
        max_capacity: 10,
        data_file: Some(dir.join("cache.json")),
        ..Config::default()
    };

    let app = create_router(AppState::from_config(&config).await.unwrap());
    assert_eq!(put_kv(&app, "persisted", "yes").await, StatusCode::CREATED);
    drop(app);

    let app = create_router(AppState::from_config(&config).await.unwrap());
    let response = app.oneshot(get_request("persisted")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["value"], "yes");

    let _ = std::fs::remove_dir_all(dir);
}
