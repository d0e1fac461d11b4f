//! Scripted [`ModelInvoker`] stub shared by the pipeline unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::invoker::{InvokeRequest, ModelInvoker};

/// Replays canned completions in order and records every call it receives.
#[derive(Default)]
pub struct ScriptedInvoker {
    responses: Mutex<VecDeque<String>>,
    fail_with: Option<String>,
    calls: Mutex<Vec<InvokeRequest>>,
}

impl ScriptedInvoker {
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// A stub whose every call fails upstream with `detail`.
    pub fn failing(detail: &str) -> Self {
        Self {
            fail_with: Some(detail.into()),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<InvokeRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelInvoker for ScriptedInvoker {
    async fn complete(&self, request: InvokeRequest) -> Result<String, GatewayError> {
        self.calls.lock().unwrap().push(request);
        if let Some(detail) = &self.fail_with {
            return Err(GatewayError::Upstream {
                detail: detail.clone(),
            });
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| GatewayError::Upstream {
                detail: "no scripted response left".into(),
            })
    }
}
