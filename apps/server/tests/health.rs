use axum::{
    body::{to_bytes, Body},
    http::Request,
};
use profile_service_server::{api::app_router, build_state, config::Config};
use tempfile::tempdir;
use tower::ServiceExt;

async fn get_json(uri: &str) -> serde_json::Value {
    let tmp = tempdir().unwrap();
    let config = Config {
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        ..Config::default()
    };
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn root_reports_service_identity() {
    let body = get_json("/").await;
    assert_eq!(body["service"], "profile-service");
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], "1.0.0");
}

#[tokio::test]
async fn health_reports_disabled_bus() {
    let body = get_json("/health").await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["kafka"], "disabled");
}
