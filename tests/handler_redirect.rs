//! HTTP tests for the redirect endpoint.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use common::{FALLBACK_URL, spawn_app, wait_for_hit_count};
use seqlink::routes::app_router;
use serde_json::json;

#[tokio::test]
async fn redirect_sets_location_to_destination() {
    let app = spawn_app();
    let server = TestServer::new(app_router(app.state)).unwrap();

    let code = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/page" }))
        .await
        .text();

    let response = server.get(&format!("/{code}")).await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "https://example.com/page"
    );
}

#[tokio::test]
async fn unknown_code_redirects_to_fallback() {
    let app = spawn_app();
    let server = TestServer::new(app_router(app.state)).unwrap();

    let response = server.get("/ZZZZZZ").await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location").to_str().unwrap(), FALLBACK_URL);
}

#[tokio::test]
async fn mixed_case_code_still_redirects() {
    let app = spawn_app();
    let server = TestServer::new(app_router(app.state)).unwrap();

    let code = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .text();

    let response = server.get(&format!("/{}", code.to_lowercase())).await;

    assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "https://example.com"
    );
}

#[tokio::test]
async fn redirects_drive_the_hit_counter() {
    let app = spawn_app();
    let links = app.links.clone();
    let server = TestServer::new(app_router(app.state)).unwrap();

    let code = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await
        .text();

    for _ in 0..3 {
        server.get(&format!("/{code}")).await;
    }

    wait_for_hit_count(&links, &code, 3).await;
}
