//! API route handlers.
//!
//! Each handler is deliberately boring: extract JSON, run the pipeline,
//! wrap the result. Error mapping happens once, in
//! [`GatewayError::into_response`](crate::error::GatewayError), and body
//! extraction uses the crate's own [`Json`] so every failure — including a
//! malformed body — leaves the process as the same `{"error": ...}` shape.

use axum::extract::State;

use crate::api::{
    AnalyzeRequest, AnalyzeResponse, ConvertRequest, ConvertResponse, OcrRequest, OcrResponse,
};
use crate::error::GatewayError;
use crate::pipeline;

use super::extract::Json;
use super::AppState;

pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, GatewayError> {
    let response = pipeline::analyze::run(state.invoker.as_ref(), &request).await?;
    Ok(Json(response))
}

pub async fn convert(
    State(state): State<AppState>,
    Json(request): Json<ConvertRequest>,
) -> Result<Json<ConvertResponse>, GatewayError> {
    let response = pipeline::convert::run(state.invoker.as_ref(), &request).await?;
    Ok(Json(response))
}

pub async fn ocr(
    State(state): State<AppState>,
    Json(request): Json<OcrRequest>,
) -> Result<Json<OcrResponse>, GatewayError> {
    let response = pipeline::ocr::run(
        state.invoker.as_ref(),
        &request,
        state.config.max_ocr_tokens,
    )
    .await?;
    Ok(Json(response))
}
