//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer. All endpoints are read-only and idempotent; repository failures
//! surface as 500s with fixed messages and no internal detail.

use axum::{
    extract::{Query, State},
    Json,
};

use super::dto::{
    PodNameResponse, RangeQuery, SearchQuery, API_NOT_FOUND_MESSAGE, FETCH_FAILED_MESSAGE,
    INVALID_RANGE_MESSAGE, MISSING_NAME_MESSAGE, POD_NAME_SENTINEL, SEARCH_FAILED_MESSAGE,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::CelestialBody;
use crate::db::services as db_services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /api/planets
///
/// Return the whole catalog, or the `[start, end)` window of it when both
/// range parameters are present. The window may extend past the catalog;
/// whatever fits is returned, down to an empty array.
pub async fn list_planets(
    State(state): State<AppState>,
    Query(range): Query<RangeQuery>,
) -> HandlerResult<Vec<CelestialBody>> {
    let window = range
        .window()
        .map_err(|_| AppError::BadRequest(INVALID_RANGE_MESSAGE.to_string()))?;

    let bodies = db_services::list_bodies(state.repository.as_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to fetch catalog");
            AppError::Internal(FETCH_FAILED_MESSAGE.to_string())
        })?;

    let bodies = match window {
        Some((start, end)) => bodies
            .into_iter()
            .skip(start)
            .take(end - start)
            .collect(),
        None => bodies,
    };

    Ok(Json(bodies))
}

/// GET /api/planets/search?name=<text>
///
/// Case-insensitive, unanchored substring search. A missing or empty `name`
/// is a client error; no match is an empty array with status 200.
pub async fn search_planets(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> HandlerResult<Vec<CelestialBody>> {
    let name = match query.name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => return Err(AppError::BadRequest(MISSING_NAME_MESSAGE.to_string())),
    };

    let bodies = db_services::search_bodies(state.repository.as_ref(), name)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to search catalog");
            AppError::Internal(SEARCH_FAILED_MESSAGE.to_string())
        })?;

    Ok(Json(bodies))
}

/// GET /api/podname
///
/// Opaque host/pod identity from the runtime environment. Always 200; an
/// unset identity yields the fixed sentinel string.
pub async fn pod_name(State(state): State<AppState>) -> Json<PodNameResponse> {
    let pod_name = state
        .pod_name
        .clone()
        .unwrap_or_else(|| POD_NAME_SENTINEL.to_string());
    Json(PodNameResponse { pod_name })
}

/// Fallback for any unmatched `/api/...` path.
pub async fn api_not_found() -> AppError {
    AppError::NotFound(API_NOT_FOUND_MESSAGE.to_string())
}
