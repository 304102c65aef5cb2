//! OpenAI-backed implementation of the shared `chat_provider` contract.
//!
//! This adapter translates `chat_provider` requests into `openai_api` payloads
//! and maps transport failures onto [`CompletionError`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chat_provider::{
    ChatMessage, ChatRole, CompletionError, CompletionProvider, CompletionRequest,
    ProviderInitError, ProviderProfile,
};
use openai_api::{
    ChatCompletionRequest, OpenAiApiClient, OpenAiApiConfig, OpenAiApiError, ReplyMessage,
    RequestMessage,
};
use tracing::debug;

/// Stable provider identifier used by `task_server` startup selection.
pub const OPENAI_PROVIDER_ID: &str = "openai";

/// Runtime configuration for the OpenAI provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiProviderConfig {
    pub api_key: String,
    pub organization: Option<String>,
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
}

impl OpenAiProviderConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            organization: None,
            base_url: None,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn into_api_config(self) -> OpenAiApiConfig {
        let mut config = OpenAiApiConfig::new(self.api_key);

        if let Some(organization) = self.organization {
            config = config.with_organization(organization);
        }

        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }

        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        config
    }
}

#[async_trait]
trait CompletionClient: Send + Sync {
    fn endpoint(&self) -> String;

    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<Option<ReplyMessage>, OpenAiApiError>;
}

#[derive(Debug)]
struct DefaultCompletionClient {
    client: OpenAiApiClient,
}

#[async_trait]
impl CompletionClient for DefaultCompletionClient {
    fn endpoint(&self) -> String {
        self.client.normalized_endpoint()
    }

    async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<Option<ReplyMessage>, OpenAiApiError> {
        self.client.complete(request).await
    }
}

/// `CompletionProvider` adapter backed by `openai_api` transport primitives.
pub struct OpenAiProvider {
    client: Arc<dyn CompletionClient>,
}

impl OpenAiProvider {
    /// Creates a provider using real HTTP transport.
    ///
    /// Fails before any network call when the API key is missing or blank.
    pub fn new(config: OpenAiProviderConfig) -> Result<Self, ProviderInitError> {
        let client = OpenAiApiClient::new(config.into_api_config()).map_err(map_init_error)?;
        Ok(Self {
            client: Arc::new(DefaultCompletionClient { client }),
        })
    }

    #[cfg(test)]
    fn with_client_for_tests(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn profile(&self) -> ProviderProfile {
        ProviderProfile {
            provider_id: OPENAI_PROVIDER_ID.to_string(),
            endpoint: Some(self.client.endpoint()),
        }
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<Option<ChatMessage>, CompletionError> {
        let payload = to_api_request(request);
        debug!(
            model = %payload.model,
            messages = payload.messages.len(),
            "sending chat completion"
        );

        let reply = self
            .client
            .complete(&payload)
            .await
            .map_err(map_completion_error)?;
        Ok(reply.and_then(from_reply_message))
    }
}

fn to_api_request(request: CompletionRequest) -> ChatCompletionRequest {
    let messages = request
        .messages
        .into_iter()
        .map(|message| RequestMessage::new(message.role.as_str(), message.content))
        .collect();

    ChatCompletionRequest::new(request.model, messages)
        .with_temperature(request.temperature)
        .with_max_tokens(request.max_tokens)
}

/// Unknown roles are read as assistant replies. A null or blank content is no
/// message at all.
fn from_reply_message(message: ReplyMessage) -> Option<ChatMessage> {
    let content = message
        .content
        .filter(|content| !content.trim().is_empty())?;
    let role = match message.role.as_str() {
        "system" => ChatRole::System,
        "user" => ChatRole::User,
        _ => ChatRole::Assistant,
    };
    Some(ChatMessage::new(role, content))
}

fn map_completion_error(error: OpenAiApiError) -> CompletionError {
    match error {
        OpenAiApiError::Status(status, message) => CompletionError::Status {
            status: status.as_u16(),
            message,
        },
        OpenAiApiError::Serde(error) => CompletionError::MalformedResponse(error.to_string()),
        other => CompletionError::Transport(other.to_string()),
    }
}

fn map_init_error(error: OpenAiApiError) -> ProviderInitError {
    ProviderInitError::new(format!("Failed to initialize openai provider: {error}"))
}
