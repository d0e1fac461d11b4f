//! Wire types for the JSON API.
//!
//! Field names are camelCase on the wire to match the front end. Every
//! request field defaults when absent — missing fields become empty strings
//! or `None` — so presence checks happen in the pipelines (where they map to
//! the 400/401 contract) rather than in serde, which would reject the body
//! with a shape the front end does not understand.
//!
//! All of these are request-scoped: constructed when a request is
//! deserialized, dropped when its response is written. Credentials inside
//! [`ModelConfig`] are never stored beyond the request that carried them.

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Caller-supplied credentials and model choice for one model role.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelConfig {
    /// API key for the endpoint. The block is unusable while this is empty.
    pub api_key: String,
    /// Endpoint override for OpenAI-compatible providers. `None` means the
    /// default OpenAI endpoint.
    pub base_url: Option<String>,
    /// Model identifier, passed to the endpoint unvalidated.
    pub model: String,
}

// ── /api/analyze ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// The target formula or concept to explain and visualize.
    pub context: String,
    /// Surrounding document text; authority for language and parameters.
    pub full_context: String,
    pub reasoning_config: Option<ModelConfig>,
    pub vision_config: Option<ModelConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyzeResponse {
    pub explanation: String,
    pub visualization: String,
}

// ── /api/convert ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConvertRequest {
    /// Mixed Markdown/LaTeX document content to convert.
    pub content: String,
    /// `"tex"` or `"md"`; defaults to `"tex"` when absent.
    pub target_format: Option<String>,
    pub reasoning_config: Option<ModelConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConvertResponse {
    pub converted: String,
}

/// Conversion direction for `/api/convert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFormat {
    /// Markdown-ish input to a compile-ready LaTeX body.
    Tex,
    /// LaTeX input to clean Markdown.
    Md,
}

impl TargetFormat {
    /// Parse the wire value, defaulting to LaTeX when absent.
    pub fn parse(value: Option<&str>) -> Result<Self, GatewayError> {
        match value.unwrap_or("tex") {
            "tex" => Ok(TargetFormat::Tex),
            "md" => Ok(TargetFormat::Md),
            other => Err(GatewayError::InvalidField {
                field: "targetFormat",
                detail: format!("expected \"tex\" or \"md\", got \"{other}\""),
            }),
        }
    }
}

// ── /api/ocr ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OcrRequest {
    /// Image payload as a base64 data-URL (or plain URL), passed through to
    /// the vision endpoint unmodified.
    pub image: String,
    /// Transcribed text immediately preceding this image, if any.
    pub previous_context: String,
    /// Transcribed text immediately following this image, if any.
    pub next_context: String,
    pub vision_config: Option<ModelConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OcrResponse {
    pub latex: String,
}
