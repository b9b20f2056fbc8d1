mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use forkflow_api::config::AppConfig;
use forkflow_api::{app_router, AppState};

async fn test_app() -> axum::Router {
    let harness = common::setup().await;
    let config = AppConfig::new(
        "sqlite::memory:".to_string(),
        "127.0.0.1".to_string(),
        0,
        "test".to_string(),
    );
    // Reuse the harness's migrated connection and event channel.
    let state = AppState {
        db: harness.db.clone(),
        config,
        event_sender: std::sync::Arc::new(forkflow_api::events::EventSender::new(
            tokio::sync::mpsc::channel(16).0,
        )),
        services: harness.services.clone(),
    };
    app_router(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_database_up() {
    let app = test_app().await;

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");
}

#[tokio::test]
async fn register_user_round_trip() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::post("/api/v1/users")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "first_name": "Ada",
                        "last_name": "Lovelace",
                        "email": "ada@example.com"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], "ada@example.com");
    assert_eq!(body["data"]["slug"], "ada-lovelace");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::get(format!("/api/v1/users/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn invalid_email_is_a_bad_request() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::post("/api/v1/users")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "first_name": "Ada",
                        "last_name": "Lovelace",
                        "email": "not-an-email"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn missing_order_is_a_not_found() {
    let app = test_app().await;

    let response = app
        .oneshot(
            Request::get("/api/v1/orders/00000000-0000-0000-0000-000000000000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
