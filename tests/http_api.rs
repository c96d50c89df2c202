//! End-to-end tests for the REST API, driving the full router in-process.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use orrery::db::repositories::LocalRepository;
use orrery::db::repository::BodyRepository;
use orrery::db::{seed, services};
use orrery::http::{create_router, AppState};

async fn test_app(pod_name: Option<&str>) -> Router {
    let repo = Arc::new(LocalRepository::new()) as Arc<dyn BodyRepository>;
    services::seed_if_empty(repo.as_ref(), seed::initial_bodies().unwrap())
        .await
        .unwrap();
    let state = AppState::new(repo, pod_name.map(String::from));
    create_router(state, "public")
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn get_planets_returns_all_bodies() {
    let (status, body) = get(test_app(None).await, "/api/planets").await;
    assert_eq!(status, StatusCode::OK);

    let planets = body.as_array().unwrap();
    assert_eq!(planets.len(), 10);
    assert!(planets[0].get("name").is_some());
    assert!(planets[0].get("description").is_some());
    // Wire format is camelCase with a store-assigned id.
    assert!(planets[0].get("orbitalRadius").is_some());
    assert!(planets[0].get("id").is_some());
}

#[tokio::test]
async fn get_planets_is_in_canonical_order() {
    let (_, body) = get(test_app(None).await, "/api/planets").await;
    let radii: Vec<f64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["orbitalRadius"].as_f64().unwrap())
        .collect();
    let mut sorted = radii.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(radii, sorted);
}

#[tokio::test]
async fn get_planets_range_returns_first_two() {
    let (status, body) = get(test_app(None).await, "/api/planets?start=0&end=2").await;
    assert_eq!(status, StatusCode::OK);

    let planets = body.as_array().unwrap();
    assert_eq!(planets.len(), 2);
    assert_eq!(planets[0]["name"], "Sun");
    assert_eq!(planets[1]["name"], "Mercury");
}

#[tokio::test]
async fn get_planets_range_window_size_is_exact() {
    let (status, body) = get(test_app(None).await, "/api/planets?start=3&end=7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn get_planets_range_past_catalog_end_clamps() {
    let (status, body) = get(test_app(None).await, "/api/planets?start=8&end=99").await;
    assert_eq!(status, StatusCode::OK);
    // Only indices 8 and 9 exist.
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = get(test_app(None).await, "/api/planets?start=50&end=60").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

const INVALID_RANGE: &str =
    "Invalid start or end parameters. Must be non-negative integers where end > start.";

#[tokio::test]
async fn get_planets_rejects_non_numeric_range() {
    let (status, body) = get(test_app(None).await, "/api/planets?start=invalid&end=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], INVALID_RANGE);
}

#[tokio::test]
async fn get_planets_rejects_inverted_range() {
    let (status, body) = get(test_app(None).await, "/api/planets?start=2&end=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], INVALID_RANGE);

    let (status, _) = get(test_app(None).await, "/api/planets?start=2&end=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_planets_rejects_negative_start() {
    let (status, body) = get(test_app(None).await, "/api/planets?start=-1&end=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], INVALID_RANGE);
}

#[tokio::test]
async fn get_planets_rejects_half_a_range() {
    let (status, body) = get(test_app(None).await, "/api/planets?start=1").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], INVALID_RANGE);

    let (status, _) = get(test_app(None).await, "/api/planets?end=4").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_finds_exact_name_case_insensitively() {
    let (status, body) = get(test_app(None).await, "/api/planets/search?name=earth").await;
    assert_eq!(status, StatusCode::OK);
    let planets = body.as_array().unwrap();
    assert_eq!(planets.len(), 1);
    assert_eq!(planets[0]["name"], "Earth");

    let (status, body) = get(test_app(None).await, "/api/planets/search?name=EARTH").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap()[0]["name"], "Earth");
}

#[tokio::test]
async fn search_matches_substrings() {
    let (status, body) = get(test_app(None).await, "/api/planets/search?name=mer").await;
    assert_eq!(status, StatusCode::OK);
    let planets = body.as_array().unwrap();
    assert!(!planets.is_empty());
    assert_eq!(planets[0]["name"], "Mercury");
}

#[tokio::test]
async fn search_no_match_is_empty_success() {
    let (status, body) = get(test_app(None).await, "/api/planets/search?name=xyz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn search_without_name_is_client_error() {
    let (status, body) = get(test_app(None).await, "/api/planets/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Please provide a planet name to search.");

    let (status, _) = get(test_app(None).await, "/api/planets/search?name=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn podname_reflects_configured_identity() {
    let (status, body) = get(test_app(Some("test-pod-123")).await, "/api/podname").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["podName"], "test-pod-123");
}

#[tokio::test]
async fn podname_falls_back_to_sentinel() {
    let (status, body) = get(test_app(None).await, "/api/podname").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["podName"],
        "Not running in Kubernetes or POD_NAME environment variable not set."
    );
}

#[tokio::test]
async fn unknown_api_route_is_json_404() {
    let (status, body) = get(test_app(None).await, "/api/nonexistent").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "API endpoint not found.");

    let (status, body) = get(test_app(None).await, "/api/planets/123/moons").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "API endpoint not found.");
}

#[tokio::test]
async fn non_api_paths_serve_the_spa_asset() {
    let app = test_app(None).await;
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // SPA routes fall back to index.html rather than 404.
    let app = test_app(None).await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/some/client/route")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));
}

#[tokio::test]
async fn endpoints_are_idempotent() {
    let app = test_app(None).await;
    let (_, first) = get(app.clone(), "/api/planets?start=1&end=4").await;
    let (_, second) = get(app, "/api/planets?start=1&end=4").await;
    assert_eq!(first, second);
}
