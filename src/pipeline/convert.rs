//! Convert: one reasoning call translating a document between formats.

use tracing::info;

use crate::api::{ConvertRequest, ConvertResponse, TargetFormat};
use crate::error::GatewayError;
use crate::invoker::{InvokeRequest, ModelInvoker};
use crate::prompts;
use crate::resolver::{self, Role};
use crate::sanitize::{strip_fences, CONVERT_FENCES};

/// Run the convert pipeline.
pub async fn run(
    invoker: &dyn ModelInvoker,
    request: &ConvertRequest,
) -> Result<ConvertResponse, GatewayError> {
    if request.content.trim().is_empty() {
        return Err(GatewayError::MissingField { field: "content" });
    }
    let target = TargetFormat::parse(request.target_format.as_deref())?;

    let reasoning = resolver::resolve(Role::Reasoning, request.reasoning_config.as_ref())?;

    info!(model = %reasoning.model, ?target, "requesting format conversion");
    let raw = invoker
        .complete(InvokeRequest {
            credentials: reasoning.credentials,
            model: reasoning.model,
            messages: prompts::convert_messages(target, &request.content),
            image: None,
            max_tokens: None,
        })
        .await?;

    Ok(ConvertResponse {
        converted: strip_fences(&raw, CONVERT_FENCES),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ModelConfig;
    use crate::test_support::ScriptedInvoker;

    fn request(target: Option<&str>) -> ConvertRequest {
        ConvertRequest {
            content: r"# Notes with \textcolor{red}{F=ma}".into(),
            target_format: target.map(Into::into),
            reasoning_config: Some(ModelConfig {
                api_key: "sk-test".into(),
                base_url: None,
                model: "m".into(),
            }),
        }
    }

    #[tokio::test]
    async fn empty_content_fails_before_any_call() {
        let invoker = ScriptedInvoker::default();
        let mut req = request(None);
        req.content = String::new();
        let err = run(&invoker, &req).await.unwrap_err();
        assert!(matches!(err, GatewayError::MissingField { field: "content" }));
        assert_eq!(invoker.call_count(), 0);
    }

    #[tokio::test]
    async fn unknown_target_format_fails_before_any_call() {
        let invoker = ScriptedInvoker::default();
        let err = run(&invoker, &request(Some("pdf"))).await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidField { .. }));
        assert_eq!(invoker.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_config_fails_before_any_call() {
        let invoker = ScriptedInvoker::default();
        let mut req = request(None);
        req.reasoning_config = None;
        let err = run(&invoker, &req).await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::ConfigMissing {
                role: Role::Reasoning
            }
        ));
        assert_eq!(invoker.call_count(), 0);
    }

    #[tokio::test]
    async fn default_target_is_tex_and_prompt_carries_color_rule() {
        let invoker =
            ScriptedInvoker::with_responses(["```latex\n\\section{Notes} \\textcolor{red}{F=ma}\n```"]);
        let response = run(&invoker, &request(None)).await.unwrap();
        assert_eq!(response.converted, r"\section{Notes} \textcolor{red}{F=ma}");

        let calls = invoker.calls();
        let prompt = &calls[0].messages.last().unwrap().content;
        assert!(prompt.contains("compile-ready LaTeX document body"));
        assert!(prompt.contains(r"\textcolor{red}{F=ma}"));
        assert!(prompt.contains("COLOR PRESERVATION"));
    }

    #[tokio::test]
    async fn markdown_direction_strips_markdown_fence() {
        let invoker = ScriptedInvoker::with_responses(["```markdown\n# Notes\n```"]);
        let response = run(&invoker, &request(Some("md"))).await.unwrap();
        assert_eq!(response.converted, "# Notes");

        let calls = invoker.calls();
        let prompt = &calls[0].messages.last().unwrap().content;
        assert!(prompt.contains("into clean Markdown"));
        assert!(prompt.contains("**DO NOT** convert color to bold"));
    }
}
