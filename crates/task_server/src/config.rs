//! Server configuration read from the process environment.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use chat_provider_openai::OpenAiProviderConfig;

use crate::error::ServerError;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_COMPLETION_TIMEOUT: Duration = Duration::from_secs(30);

/// Which completion backend the server talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    OpenAi,
    /// Scripted local replies; needs no credential.
    Mock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub provider: ProviderKind,
    pub api_key: Option<String>,
    pub organization: Option<String>,
    pub base_url: Option<String>,
    pub completion_timeout: Duration,
}

impl ServerConfig {
    /// Reads `OPENAI_*` and `TASKGPT_*` variables. The API key is not checked
    /// here; provider construction rejects a missing key.
    pub fn from_env() -> Result<Self, ServerError> {
        let bind_value = env_string_opt("TASKGPT_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_value
            .trim()
            .parse()
            .map_err(|_| ServerError::InvalidSetting {
                key: "TASKGPT_BIND",
                value: bind_value.clone(),
            })?;

        let provider = match env_string_opt("TASKGPT_PROVIDER") {
            None => ProviderKind::OpenAi,
            Some(value) => match value.trim().to_ascii_lowercase().as_str() {
                "openai" => ProviderKind::OpenAi,
                "mock" => ProviderKind::Mock,
                _ => {
                    return Err(ServerError::InvalidSetting {
                        key: "TASKGPT_PROVIDER",
                        value,
                    })
                }
            },
        };

        let completion_timeout = match env_string_opt("TASKGPT_COMPLETION_TIMEOUT_SECS") {
            None => DEFAULT_COMPLETION_TIMEOUT,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ServerError::InvalidSetting {
                        key: "TASKGPT_COMPLETION_TIMEOUT_SECS",
                        value,
                    })
                }
            },
        };

        Ok(Self {
            bind,
            provider,
            api_key: env_string_opt("OPENAI_API_KEY"),
            organization: env_string_opt("OPENAI_ORGANIZATION"),
            base_url: env_string_opt("OPENAI_BASE_URL"),
            completion_timeout,
        })
    }

    pub fn openai_provider_config(&self) -> OpenAiProviderConfig {
        let mut config = OpenAiProviderConfig::new(self.api_key.clone().unwrap_or_default())
            .with_timeout(self.completion_timeout);
        if let Some(organization) = &self.organization {
            config = config.with_organization(organization.clone());
        }
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        config
    }
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
