use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};

use crate::config::OpenAiApiConfig;
use crate::error::{parse_error_message, OpenAiApiError};
use crate::headers::build_headers;
use crate::payload::{ChatCompletionRequest, ChatCompletionResponse, ReplyMessage};
use crate::url::normalize_chat_completions_url;

#[derive(Debug)]
pub struct OpenAiApiClient {
    http: Client,
    config: OpenAiApiConfig,
}

impl OpenAiApiClient {
    /// Builds the HTTP client. Fails without any network activity when the API
    /// key is blank or the base URL is not an http(s) URL.
    pub fn new(config: OpenAiApiConfig) -> Result<Self, OpenAiApiError> {
        if config.api_key.trim().is_empty() {
            return Err(OpenAiApiError::MissingApiKey);
        }
        let endpoint = normalize_chat_completions_url(&config.base_url);
        match Url::parse(&endpoint) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(OpenAiApiError::InvalidBaseUrl(config.base_url.clone())),
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(OpenAiApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &OpenAiApiConfig {
        &self.config
    }

    pub fn normalized_endpoint(&self) -> String {
        normalize_chat_completions_url(&self.config.base_url)
    }

    pub fn build_headers(&self) -> Result<HeaderMap, OpenAiApiError> {
        let headers = build_headers(&self.config)?;
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
                    OpenAiApiError::InvalidHeader(format!("invalid header key: {key}"))
                })?,
                HeaderValue::from_str(&value).map_err(|_| {
                    OpenAiApiError::InvalidHeader(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn build_request(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<reqwest::RequestBuilder, OpenAiApiError> {
        let headers = self.build_headers()?;
        Ok(self
            .http
            .post(self.normalized_endpoint())
            .headers(headers)
            .json(request))
    }

    /// Sends one request. Non-success statuses become [`OpenAiApiError::Status`]
    /// with the message extracted from the error body.
    pub async fn create_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, OpenAiApiError> {
        let response = self.build_request(request)?.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OpenAiApiError::Status(
                status,
                parse_error_message(status, &body),
            ));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Sends one request and returns the first choice's message.
    pub async fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<Option<ReplyMessage>, OpenAiApiError> {
        Ok(self
            .create_chat_completion(request)
            .await?
            .into_first_message())
    }
}
