//! Error types for the gateway.
//!
//! One enum covers the whole request lifecycle because every failure,
//! wherever it originates, ends the same way: the pipeline aborts and the
//! caller receives a single `{"error": "..."}` JSON body with a status code.
//! The variants map onto that contract:
//!
//! | Variant          | Status | Meaning                                      |
//! |------------------|--------|----------------------------------------------|
//! | `MissingField`   | 400    | A required request field is absent or empty  |
//! | `InvalidField`   | 400    | A field is present but unusable              |
//! | `ConfigMissing`  | 401    | No usable credential block for a model role  |
//! | `Upstream`       | 500    | The remote model call failed                 |
//! | `Internal`       | 500    | Anything else                                |
//!
//! Errors are never retried or recovered internally; partial pipeline
//! progress (e.g. a successful explanation before a failed visualization)
//! is discarded, not surfaced.
//!
//! API keys must never appear in an error message or a log line. Variants
//! carry only role names, field names and upstream status text.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::resolver::Role;

/// All errors surfaced by the annotation pipelines and their HTTP handlers.
#[derive(Debug, Error)]
pub enum GatewayError {
    // ── Request validation ────────────────────────────────────────────────
    /// A required request field was absent or empty.
    #[error("No {field} provided")]
    MissingField { field: &'static str },

    /// A request field was present but its value is not usable.
    #[error("Invalid {field}: {detail}")]
    InvalidField {
        field: &'static str,
        detail: String,
    },

    // ── Credential resolution ─────────────────────────────────────────────
    /// The credential block for a model role is absent or has an empty key.
    ///
    /// Raised before any model call is attempted, so a request that cannot
    /// complete never spends a paid upstream call.
    #[error("{role} API configuration missing. Please configure settings.")]
    ConfigMissing { role: Role },

    // ── Upstream model calls ──────────────────────────────────────────────
    /// The remote model endpoint rejected or failed the call.
    ///
    /// Transport errors, auth rejections and quota errors all land here;
    /// the gateway does not distinguish them because it retries none of them.
    #[error("Model call failed: {detail}")]
    Upstream { detail: String },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// HTTP status code this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingField { .. } | GatewayError::InvalidField { .. } => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::ConfigMissing { .. } => StatusCode::UNAUTHORIZED,
            GatewayError::Upstream { .. } | GatewayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, error = %self, "request failed");
        } else {
            tracing::debug!(%status, error = %self, "request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_is_bad_request() {
        let e = GatewayError::MissingField { field: "context" };
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);
        assert_eq!(e.to_string(), "No context provided");
    }

    #[test]
    fn config_missing_is_unauthorized() {
        let e = GatewayError::ConfigMissing {
            role: Role::Reasoning,
        };
        assert_eq!(e.status(), StatusCode::UNAUTHORIZED);
        assert!(e.to_string().contains("Reasoning"));
    }

    #[test]
    fn upstream_is_server_error() {
        let e = GatewayError::Upstream {
            detail: "connection refused".into(),
        };
        assert_eq!(e.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(e.to_string().contains("connection refused"));
    }
}
