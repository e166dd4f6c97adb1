//! MemChat Provider Service
//!
//! This module provides the capability traits the memory core is polymorphic
//! over (chat completion, token estimation) and the async-openai-backed
//! client the CLI injects at construction.

pub mod error;
pub mod estimator;

pub use error::ProviderError;
pub use estimator::{HeuristicEstimator, TokenEstimator, DEFAULT_CONTEXT_LIMIT};

use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use memchat_types::{Message, Role};
use std::time::Duration;
use tracing::debug;

/// Default deadline for a single completion request.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Capability to complete a chat conversation.
///
/// The chat model and the summarizer model are distinct logical services;
/// both are expressed through this trait and may share a transport.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Send the message sequence and return the assistant text.
    ///
    /// A null or missing assistant content is returned as an empty string,
    /// not an error.
    async fn complete(&self, messages: &[Message], temperature: f32)
        -> Result<String, ProviderError>;
}

// ============================================================================
// OpenAI Client
// ============================================================================

/// Chat completion client backed by the OpenAI-compatible API.
///
/// Model identity and request deadline are fixed at construction; callers
/// that need two models (chat vs. summarizer) build two clients.
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
    request_timeout: Duration,
}

impl OpenAiClient {
    /// Create a client for `model`. `base_url` overrides the API endpoint
    /// (OpenAI-compatible gateways, local servers).
    pub fn new(model: impl Into<String>, api_key: Option<&str>, base_url: Option<&str>) -> Self {
        let mut config = OpenAIConfig::new();
        if let Some(key) = api_key {
            config = config.with_api_key(key);
        }
        if let Some(url) = base_url {
            debug!("Using API base URL: {}", url);
            config = config.with_api_base(url);
        }

        Self {
            client: Client::with_config(config),
            model: model.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set the per-request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete(
        &self,
        messages: &[Message],
        temperature: f32,
    ) -> Result<String, ProviderError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(to_request_messages(messages)?)
            .temperature(temperature)
            .build()?;

        debug!(
            model = %self.model,
            messages = messages.len(),
            "sending completion request"
        );

        let response = tokio::time::timeout(self.request_timeout, self.client.chat().create(request))
            .await
            .map_err(|_| ProviderError::Timeout(self.request_timeout))??;

        let choice = response.choices.first().ok_or(ProviderError::EmptyResponse)?;
        let text = choice.message.content.clone().unwrap_or_default();
        Ok(text.trim().to_string())
    }
}

fn to_request_messages(
    messages: &[Message],
) -> Result<Vec<ChatCompletionRequestMessage>, ProviderError> {
    messages
        .iter()
        .map(|msg| {
            let built: ChatCompletionRequestMessage = match msg.role {
                Role::System => ChatCompletionRequestSystemMessageArgs::default()
                    .content(msg.content.clone())
                    .build()?
                    .into(),
                Role::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(msg.content.clone())
                    .build()?
                    .into(),
                Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                    .content(msg.content.clone())
                    .build()?
                    .into(),
            };
            Ok(built)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_messages_preserve_order_and_roles() {
        let messages = vec![
            Message::system("prompt"),
            Message::user("question"),
            Message::assistant("answer"),
        ];
        let built = to_request_messages(&messages).unwrap();
        assert_eq!(built.len(), 3);
    }

    #[test]
    fn test_client_keeps_model_name() {
        let client = OpenAiClient::new("gpt-4.1-mini", None, None);
        assert_eq!(client.model(), "gpt-4.1-mini");
    }
}
