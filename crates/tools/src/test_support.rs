//! Shared test doubles for tool unit tests.

use async_trait::async_trait;
use std::sync::Mutex;
use tidydesk_core::error::ProviderError;
use tidydesk_core::message::Message;
use tidydesk_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};

/// A provider that always answers with the same text and records the
/// last request it saw.
pub(crate) struct StaticProvider {
    reply: String,
    pub(crate) last_request: Mutex<Option<ProviderRequest>>,
}

impl StaticProvider {
    pub(crate) fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            last_request: Mutex::new(None),
        }
    }

    /// The user-facing prompt of the last request, for assertions.
    pub(crate) fn last_user_prompt(&self) -> String {
        self.last_request
            .lock()
            .unwrap()
            .as_ref()
            .and_then(|r| r.messages.last().map(|m| m.content.clone()))
            .unwrap_or_default()
    }
}

#[async_trait]
impl Provider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> Result<ProviderResponse, ProviderError> {
        let model = request.model.clone();
        *self.last_request.lock().unwrap() = Some(request);
        Ok(ProviderResponse {
            message: Message::assistant(self.reply.clone()),
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 20,
                total_tokens: 30,
            }),
            model,
        })
    }
}

/// A provider whose calls always fail with a network error.
pub(crate) struct FailingProvider;

#[async_trait]
impl Provider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(
        &self,
        _request: ProviderRequest,
    ) -> Result<ProviderResponse, ProviderError> {
        Err(ProviderError::Network("connection refused".into()))
    }
}
