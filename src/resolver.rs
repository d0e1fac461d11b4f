//! Per-request credential and model resolution.
//!
//! Every request carries its own credential blocks (`reasoningConfig`,
//! `visionConfig`); nothing is read from the environment and nothing is
//! cached server-side. The resolver turns one such block into a
//! [`ResolvedModel`] — credentials bound to an endpoint plus the model id —
//! or fails closed with [`GatewayError::ConfigMissing`] before any paid
//! model call is attempted.
//!
//! The model id is passed through unvalidated: the upstream endpoint is the
//! authority on which model names exist, and its rejection surfaces through
//! the invoker as an upstream error.

use std::fmt;

use crate::api::ModelConfig;
use crate::error::GatewayError;
use crate::invoker::Credentials;

/// A logical model capability slot, resolved independently per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Text reasoning: explanation and format conversion.
    Reasoning,
    /// Multimodal understanding: OCR and visualization generation.
    Vision,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Reasoning => f.write_str("Reasoning"),
            Role::Vision => f.write_str("Vision"),
        }
    }
}

/// Credentials and model id resolved for one pipeline stage.
#[derive(Debug, Clone)]
pub struct ResolvedModel {
    pub credentials: Credentials,
    pub model: String,
}

/// Resolve the credential block for `role` into a usable model binding.
///
/// Succeeds only when the block is present with a non-empty API key.
/// `base_url` stays optional; the invoker falls back to the default
/// OpenAI-compatible endpoint when it is absent.
pub fn resolve(role: Role, config: Option<&ModelConfig>) -> Result<ResolvedModel, GatewayError> {
    let config = config
        .filter(|c| !c.api_key.trim().is_empty())
        .ok_or(GatewayError::ConfigMissing { role })?;

    Ok(ResolvedModel {
        credentials: Credentials {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        },
        model: config.model.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: &str) -> ModelConfig {
        ModelConfig {
            api_key: api_key.into(),
            base_url: Some("https://models.example/v1".into()),
            model: "test-model".into(),
        }
    }

    #[test]
    fn resolves_configured_block() {
        let resolved = resolve(Role::Reasoning, Some(&config("sk-test"))).unwrap();
        assert_eq!(resolved.model, "test-model");
        assert_eq!(resolved.credentials.api_key, "sk-test");
        assert_eq!(
            resolved.credentials.base_url.as_deref(),
            Some("https://models.example/v1")
        );
    }

    #[test]
    fn absent_block_fails_closed() {
        let err = resolve(Role::Vision, None).unwrap_err();
        assert!(matches!(
            err,
            GatewayError::ConfigMissing { role: Role::Vision }
        ));
    }

    #[test]
    fn empty_api_key_fails_closed() {
        let err = resolve(Role::Reasoning, Some(&config(""))).unwrap_err();
        assert!(matches!(err, GatewayError::ConfigMissing { .. }));
    }

    #[test]
    fn whitespace_api_key_fails_closed() {
        let err = resolve(Role::Reasoning, Some(&config("   "))).unwrap_err();
        assert!(matches!(err, GatewayError::ConfigMissing { .. }));
    }
}
