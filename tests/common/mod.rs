#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use http_body_util::BodyExt;
use movie_catalog::{AppState, app, config::Config, db};
use serde_json::Value;
use tower::ServiceExt;

pub fn test_config() -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        database_url: "sqlite::memory:".to_string(),
        seed_demo_movies: false,
    }
}

/// Full router over a fresh in-memory database with the ratings seeded.
pub async fn build_test_app() -> Router {
    let config = test_config();
    let conn = db::connect_and_migrate(&config.database_url).await.unwrap();
    app(Arc::new(AppState::new(Arc::new(config), conn)))
}

/// Same as [`build_test_app`], with the demo movies inserted.
pub async fn build_seeded_app() -> Router {
    let config = test_config();
    let conn = db::connect_and_migrate(&config.database_url).await.unwrap();
    db::seed_demo_movies(&conn).await.unwrap();
    app(Arc::new(AppState::new(Arc::new(config), conn)))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn json_request(app: &Router, method: Method, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn form_request(app: &Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    send(app, Request::builder().method(Method::DELETE).uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Creates a movie through the API and returns its JSON.
pub async fn create_movie(app: &Router, title: &str, pg_rating_id: i32) -> Value {
    let response = json_request(
        app,
        Method::POST,
        "/movies",
        serde_json::json!({
            "title": title,
            "description": format!("About {title}"),
            "pg_rating_id": pg_rating_id,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
