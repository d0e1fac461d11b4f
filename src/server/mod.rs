//! HTTP surface: thin plumbing around the pipelines.
//!
//! Routing, CORS, request tracing and static-asset serving live here; the
//! handlers themselves only deserialize, delegate to a pipeline and
//! serialize the result. Anything with real control flow belongs in
//! [`crate::pipeline`].

mod app;
mod extract;
mod routes;
mod static_files;

pub use app::{build_router, AppState};
