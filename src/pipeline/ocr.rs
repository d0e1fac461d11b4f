//! OCR: one vision call transcribing a handwriting image to LaTeX.
//!
//! The image presence check runs before credential resolution: it is the
//! cheaper check, and a request with no image can never succeed no matter
//! how the credentials look. The image payload itself is passed through to
//! the vision endpoint untouched — never decoded, validated or transcoded.

use tracing::info;

use crate::api::{OcrRequest, OcrResponse};
use crate::error::GatewayError;
use crate::invoker::{ChatMessage, InvokeRequest, ModelInvoker};
use crate::prompts;
use crate::resolver::{self, Role};
use crate::sanitize::{strip_fences, LATEX_FENCES};

/// Run the OCR pipeline. `max_tokens` caps the transcription length.
pub async fn run(
    invoker: &dyn ModelInvoker,
    request: &OcrRequest,
    max_tokens: u32,
) -> Result<OcrResponse, GatewayError> {
    if request.image.trim().is_empty() {
        return Err(GatewayError::MissingField { field: "image" });
    }

    let vision = resolver::resolve(Role::Vision, request.vision_config.as_ref())?;

    let prompt = prompts::ocr_prompt(&request.previous_context, &request.next_context);

    info!(
        model = %vision.model,
        stitched = !request.previous_context.is_empty() || !request.next_context.is_empty(),
        "requesting OCR"
    );
    let raw = invoker
        .complete(InvokeRequest {
            credentials: vision.credentials,
            model: vision.model,
            messages: vec![ChatMessage::user(prompt)],
            image: Some(request.image.clone()),
            max_tokens: Some(max_tokens),
        })
        .await?;

    Ok(OcrResponse {
        latex: strip_fences(&raw, LATEX_FENCES),
    })
}
