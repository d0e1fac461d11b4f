//! # mathsheet-gateway
//!
//! HTTP annotation gateway for a math/physics document editor. Given a
//! snippet of document context — a formula, an image of handwriting, or
//! mixed Markdown/LaTeX text — it produces derived artifacts by
//! orchestrating one or two calls to externally hosted chat-completion
//! endpoints:
//!
//! * **Analyze** — a natural-language explanation, then an interactive
//!   HTML5 simulation generated *from* that explanation
//! * **Convert** — the document translated between Markdown and LaTeX,
//!   color annotations preserved
//! * **OCR** — a handwritten page transcribed to LaTeX body markup, with
//!   ink-color detection and continuity stitching to adjacent text
//!
//! This is an annotation pipeline, not an inference engine: no model
//! weights, scoring or learning happen here, and nothing persists between
//! requests. Callers supply their own model credentials in every request
//! body; the gateway never stores them.
//!
//! ## Pipeline Overview
//!
//! ```text
//! request
//!  │
//!  ├─ 1. Validate   required fields, cheapest checks first
//!  ├─ 2. Resolve    per-request credentials + model id per role
//!  ├─ 3. Compose    task-specific instruction messages
//!  ├─ 4. Invoke     OpenAI-compatible /chat/completions call
//!  ├─ 5. Sanitize   strip one layer of fenced-block wrapping
//!  └─ 6. Shape      task-specific JSON payload (or `{"error": ...}`)
//! ```
//!
//! Analyze runs stages 2–5 twice, sequentially: the second prompt embeds
//! the first stage's sanitized output.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use mathsheet_gateway::{build_router, AppState, OpenAiInvoker, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Arc::new(ServerConfig::default());
//!     let invoker = Arc::new(OpenAiInvoker::new(Duration::from_secs(config.api_timeout_secs))?);
//!     let app = build_router(AppState { invoker, config: config.clone() });
//!     let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `mathsheet-gateway` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod api;
pub mod config;
pub mod error;
pub mod invoker;
pub mod pipeline;
pub mod prompts;
pub mod resolver;
pub mod sanitize;
pub mod server;

#[cfg(test)]
pub(crate) mod test_support;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use api::{
    AnalyzeRequest, AnalyzeResponse, ConvertRequest, ConvertResponse, ModelConfig, OcrRequest,
    OcrResponse, TargetFormat,
};
pub use config::{ServerConfig, ServerConfigBuilder};
pub use error::GatewayError;
pub use invoker::{ChatMessage, Credentials, InvokeRequest, ModelInvoker, OpenAiInvoker};
pub use resolver::{ResolvedModel, Role};
pub use sanitize::strip_fences;
pub use server::{build_router, AppState};
