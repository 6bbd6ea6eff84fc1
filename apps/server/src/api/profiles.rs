use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use profile_service_core::profiles::{NewProfile, Profile, ProfileUpdate};
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Deserialize)]
struct IdentityQuery {
    user_id: Option<String>,
}

/// Resolves the caller for an update: header first, then query parameter.
fn resolve_identity(headers: &HeaderMap, query_user_id: Option<String>) -> ApiResult<String> {
    let from_header = headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string);

    from_header
        .or_else(|| query_user_id.filter(|v| !v.is_empty()))
        .ok_or_else(|| {
            ApiError::Unauthorized(
                "user_id required (X-User-Id header or user_id query param)".to_string(),
            )
        })
}

async fn get_profile(
    Path(user_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Profile>> {
    let profile = state
        .profile_service
        .get_profile(&user_id)?
        .ok_or_else(|| ApiError::NotFound(format!("Profile {} not found", user_id)))?;
    Ok(Json(profile))
}

async fn create_profile(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewProfile>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Profile>)> {
    let Json(payload) = payload?;
    let profile = state.profile_service.create_profile(payload).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn update_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: Result<Query<IdentityQuery>, QueryRejection>,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> ApiResult<Json<Profile>> {
    let Query(query) = query?;
    let user_id = resolve_identity(&headers, query.user_id)?;
    let Json(update) = payload?;
    let profile = state.profile_service.update_profile(user_id, update).await?;
    Ok(Json(profile))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profiles", post(create_profile).patch(update_profile))
        .route("/profiles/{user_id}", get(get_profile))
}
