use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::main_lib::AppState;

#[derive(Serialize)]
struct ServiceInfo {
    service: &'static str,
    status: &'static str,
    version: &'static str,
}

/// Advisory connectivity report. Nothing inside the service acts on it.
#[derive(Serialize)]
struct HealthReport {
    status: &'static str,
    database: &'static str,
    kafka: &'static str,
}

async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "profile-service",
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthReport> {
    let database = match profile_service_storage_sqlite::ping(&state.pool) {
        Ok(()) => "connected",
        Err(e) => {
            tracing::warn!("Database ping failed: {}", e);
            "disconnected"
        }
    };
    let kafka = state.producer.status().await.as_str();

    Json(HealthReport {
        status: "ok",
        database,
        kafka,
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
}
