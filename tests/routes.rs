// Router-level tests for paths that never reach the database: the pool is
// lazily connected and no handler below issues a query before failing.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use showbill::{
    app,
    config::{AppConfig, Config, DatabaseConfig},
    database::Database,
    AppState,
};

fn test_state() -> Arc<AppState> {
    let config = Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            rust_log: "warn".to_string(),
        },
        database: DatabaseConfig {
            // Nothing listens here; tests must not touch the pool.
            url: "postgres://postgres@127.0.0.1:1/showbill_test".to_string(),
            pool_size: 1,
        },
    };
    let db = Database::connect_lazy(&config.database.url).expect("lazy pool");
    Arc::new(AppState { db, config })
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn home_identifies_the_service() {
    let response = app(test_state())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Showbill");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let response = app(test_state())
        .oneshot(
            Request::builder()
                .uri("/concerts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn blank_venue_form_is_served() {
    let response = app(test_state())
        .oneshot(
            Request::builder()
                .uri("/venues/create")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "");
    assert_eq!(body["seeking_talent"], serde_json::Value::Null);
}

#[tokio::test]
async fn create_venue_without_name_fails_validation() {
    let response = app(test_state())
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/venues/create")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("city=San+Francisco&state=CA"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("could not be listed"));
}

#[tokio::test]
async fn create_show_with_bad_timestamp_fails_validation() {
    let response = app(test_state())
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/shows/create")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from("artist_id=1&venue_id=2&start_time=next+tuesday"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("could not be listed"));
}
