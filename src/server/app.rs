//! Router assembly and shared application state.

use std::sync::Arc;

use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::invoker::ModelInvoker;

use super::{routes, static_files};

/// State shared by every handler.
///
/// Nothing here is mutable and nothing here is per-caller: credentials
/// arrive in each request body and never enter shared state.
#[derive(Clone)]
pub struct AppState {
    pub invoker: Arc<dyn ModelInvoker>,
    pub config: Arc<ServerConfig>,
}

/// Build the Axum application router.
///
/// CORS is permissive: the gateway performs no caller authentication of its
/// own (credentials in the body authenticate the caller to the *model*
/// endpoints, not to us) and the front end is served from a different
/// origin during development.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze", post(routes::analyze))
        .route("/api/convert", post(routes::convert))
        .route("/api/ocr", post(routes::ocr))
        .fallback(static_files::serve_static)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
