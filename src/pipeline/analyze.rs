//! Analyze: explanation, then a visualization built from it.
//!
//! The only two-stage pipeline. Stage 2's prompt embeds stage 1's sanitized
//! output as its physics source of truth, so the stages are strictly
//! sequential. The vision credentials are resolved only after the
//! explanation succeeds — mirroring the request's own stage order — which
//! means a missing vision block still costs one reasoning call; the
//! reasoning block, checked first, costs nothing.

use tracing::info;

use crate::api::{AnalyzeRequest, AnalyzeResponse};
use crate::error::GatewayError;
use crate::invoker::{InvokeRequest, ModelInvoker};
use crate::prompts;
use crate::resolver::{self, Role};
use crate::sanitize::{strip_fences, EXPLANATION_FENCES, HTML_FENCES};

/// Run the two-stage analyze pipeline.
pub async fn run(
    invoker: &dyn ModelInvoker,
    request: &AnalyzeRequest,
) -> Result<AnalyzeResponse, GatewayError> {
    if request.context.trim().is_empty() {
        return Err(GatewayError::MissingField { field: "context" });
    }

    // ── Stage 1: explanation ─────────────────────────────────────────────
    let reasoning = resolver::resolve(Role::Reasoning, request.reasoning_config.as_ref())?;

    info!(model = %reasoning.model, "requesting explanation");
    let raw = invoker
        .complete(InvokeRequest {
            credentials: reasoning.credentials,
            model: reasoning.model,
            messages: prompts::explain_messages(&request.context, &request.full_context),
            image: None,
            max_tokens: None,
        })
        .await?;
    let explanation = strip_fences(&raw, EXPLANATION_FENCES);

    // ── Stage 2: visualization ───────────────────────────────────────────
    let vision = resolver::resolve(Role::Vision, request.vision_config.as_ref())?;

    info!(model = %vision.model, "requesting visualization");
    let raw = invoker
        .complete(InvokeRequest {
            credentials: vision.credentials,
            model: vision.model,
            messages: prompts::visualize_messages(
                &request.context,
                &explanation,
                &request.full_context,
            ),
            image: None,
            max_tokens: None,
        })
        .await?;
    let visualization = strip_fences(&raw, HTML_FENCES);

    Ok(AnalyzeResponse {
        explanation,
        visualization,
    })
}
