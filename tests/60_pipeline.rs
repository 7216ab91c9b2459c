// Router-level checks of the middleware stack, driven without a socket.
mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use json_mock_api::store::JsonFileStore;
use json_mock_api::{app, AppState};

fn router(dir: &tempfile::TempDir) -> Router {
    let config = common::test_config(dir, 3000);
    let store = JsonFileStore::in_memory(common::seed_document());
    app(AppState::new(config, Arc::new(store)))
}

async fn body_json(response: axum::response::Response) -> Result<Value> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

fn json_request(method: Method, uri: &str, body: Value) -> Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body)?))?)
}

#[tokio::test]
async fn json_create_is_stamped_before_the_router() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let app = router(&dir);

    let response = app
        .oneshot(json_request(Method::POST, "/api/students", json!({ "name": "Stamped" }))?)
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await?;
    assert!(created["createdAt"].is_i64());
    assert_eq!(created["createdAt"], created["updatedAt"]);

    Ok(())
}

#[tokio::test]
async fn json_update_only_moves_updated_at() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let app = router(&dir);

    let response = app
        .oneshot(json_request(Method::PATCH, "/api/students/s1", json!({ "mark": 9.5 }))?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let patched = body_json(response).await?;
    assert_eq!(patched["mark"], json!(9.5));
    assert_eq!(patched["createdAt"], json!(1_600_000_000_000_i64));
    assert!(patched["updatedAt"].as_i64() > patched["createdAt"].as_i64());

    Ok(())
}

#[tokio::test]
async fn non_object_bodies_pass_through_to_the_handler() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let app = router(&dir);

    let response = app
        .oneshot(json_request(Method::POST, "/api/students", json!("just a string"))?)
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn envelope_keeps_status_and_headers() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let app = router(&dir);

    let response = app
        .oneshot(Request::get("/api/students?_page=2&_limit=5").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-total-count"], "12");
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()?
        .starts_with("application/json"));

    let body = body_json(response).await?;
    assert_eq!(body["pagination"], json!({ "_page": 2, "_limit": 5, "_totalRows": 12 }));
    assert_eq!(body["data"].as_array().map(Vec::len), Some(5));

    Ok(())
}

#[tokio::test]
async fn uncounted_reads_are_emitted_as_staged() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let app = router(&dir);

    let response = app
        .clone()
        .oneshot(Request::get("/api/students/s2?_page=1").body(Body::empty())?)
        .await?;
    assert_eq!(body_json(response).await?["name"], "Student 02");

    let response = app
        .oneshot(Request::get("/api/tags").body(Body::empty())?)
        .await?;
    assert_eq!(body_json(response).await?, json!(["Design", "Dashboard"]));

    Ok(())
}

#[tokio::test]
async fn cors_exposes_total_count() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let app = router(&dir);

    let response = app
        .oneshot(
            Request::get("/api/posts?_page=1")
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let exposed = response.headers()[header::ACCESS_CONTROL_EXPOSE_HEADERS]
        .to_str()?
        .to_ascii_lowercase();
    assert!(exposed.contains("x-total-count"));

    Ok(())
}

#[tokio::test]
async fn every_response_disables_caching() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let app = router(&dir);

    for uri in ["/api/posts", "/api/posts/999", "/missing.png"] {
        let response = app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty())?)
            .await?;
        let headers = response.headers();
        assert_eq!(headers[header::CACHE_CONTROL], "no-cache", "uri: {}", uri);
        assert_eq!(headers[header::PRAGMA], "no-cache", "uri: {}", uri);
        assert_eq!(headers[header::EXPIRES], "-1", "uri: {}", uri);
    }

    Ok(())
}

#[tokio::test]
async fn guard_runs_before_the_router() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let app = router(&dir);

    let response = app
        .oneshot(json_request(Method::DELETE, "/api/private/posts/1", json!({}))?)
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await?, json!({ "message": "You need to login to access" }));

    Ok(())
}
