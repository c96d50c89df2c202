//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing,
//! panic recovery), the `/api` 404 fallback, and the static single-page
//! asset host, and creates the axum router ready for serving.

use std::path::{Path, PathBuf};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Body of the catch-all 500 produced when a handler panics.
const PANIC_BODY: &str = "Something broke!";

fn handle_panic(_err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, PANIC_BODY).into_response()
}

/// Create the main application router with all routes and middleware.
///
/// `static_dir` holds the single-page client asset; every non-`/api` path
/// falls through to it, with `index.html` served for SPA routes.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/planets", get(handlers::list_planets))
        .route("/planets/search", get(handlers::search_planets))
        .route("/podname", get(handlers::pod_name))
        // Any other /api path is a JSON 404, never the SPA asset.
        .fallback(handlers::api_not_found);

    let static_dir: PathBuf = static_dir.as_ref().to_path_buf();
    let spa = ServeDir::new(&static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .nest("/api", api)
        .fallback_service(spa)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo = Arc::new(LocalRepository::new()) as Arc<dyn crate::db::repository::BodyRepository>;
        let state = AppState::new(repo, None);
        let _router = create_router(state, "public");
        // If we got here, router was created successfully
    }
}
