//! Lifecycle coverage that reads and writes real documents. Needs a MongoDB
//! instance reachable at `MONGO_URL` (default localhost), so these are
//! ignored by default:
//!
//! ```sh
//! cargo test -- --ignored
//! ```
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use mongodb::{Client, bson::oid::ObjectId};
use serde_json::{Value, json};
use tower::ServiceExt;

use translations::{config::Config, router, routes::DEFAULT_USER_ID, state::AppState};

async fn app() -> Router {
    let config = Config::load();

    let client = Client::with_uri_str(&config.mongo_url).await.unwrap();
    let translations = client
        .database(&config.mongo_database)
        .collection(&config.mongo_collection);

    router(Arc::new(AppState {
        config,
        translations,
    }))
}

async fn send(app: &Router, request: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    serde_json::from_slice(&bytes).unwrap()
}

/// The collection may hold records from earlier runs, so entries are matched
/// by id rather than by position or count.
fn find_entry<'a>(list: &'a Value, id: &str) -> Option<&'a Value> {
    list.as_array().unwrap().iter().find(|entry| entry["id"] == id)
}

#[tokio::test]
#[ignore]
async fn test_lifecycle() {
    let app = app().await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/salvar",
            r#"{"original":"hello","translated":"olá"}"#,
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let saved = body_json(response).await;
    let id = saved["id"].as_str().unwrap().to_string();

    assert_eq!(id.len(), 24);

    let response = send(&app, request("GET", &format!("/traduzidas/{DEFAULT_USER_ID}"))).await;

    assert_eq!(response.status(), StatusCode::OK);

    let list = body_json(response).await;
    let entry = find_entry(&list, &id).unwrap();

    assert_eq!(entry["original"], "hello");
    assert_eq!(entry["translated"], "olá");

    let response = send(
        &app,
        json_request("PUT", &format!("/traducao/{id}"), r#"{"translated":"oi"}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;

    assert_eq!(updated["updated_fields"], json!(["translated"]));

    let response = send(&app, request("GET", &format!("/traduzidas/{DEFAULT_USER_ID}"))).await;
    let list = body_json(response).await;
    let entry = find_entry(&list, &id).unwrap();

    assert_eq!(entry["original"], "hello");
    assert_eq!(entry["translated"], "oi");

    let response = send(&app, request("DELETE", &format!("/traducao/{id}"))).await;

    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, request("GET", &format!("/traduzidas/{DEFAULT_USER_ID}"))).await;
    let list = body_json(response).await;

    assert!(find_entry(&list, &id).is_none());
}

#[tokio::test]
#[ignore]
async fn test_unknown_id_is_not_found() {
    let app = app().await;
    let id = ObjectId::new().to_hex();

    let response = send(
        &app,
        json_request("PUT", &format!("/traducao/{id}"), r#"{"translated":"oi"}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, request("DELETE", &format!("/traducao/{id}"))).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_list_unknown_user_is_empty() {
    let app = app().await;
    let user_id = ObjectId::new().to_hex();

    let response = send(&app, request("GET", &format!("/traduzidas/{user_id}"))).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}
