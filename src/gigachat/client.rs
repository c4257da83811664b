//! GigaChat chat-completions client with function calling.

use super::auth::TokenProvider;
use crate::agent::ChatModel;
use crate::config::GigaToolsConfig;
use crate::error::{Error, Result};
use crate::tools::ToolDescriptor;
use crate::types::*;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Upper bound on the sleep between two attempts.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(8);

/// GigaChat API client.
pub struct GigaChatClient {
    http: reqwest::Client,
    api_url: String,
    model: String,
    profanity_check: bool,
    max_retries: u32,
    retry_delay: Duration,
    log_requests: bool,
    log_responses: bool,
    auth: TokenProvider,
}

// -- Request / response types -----------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    functions: Vec<FunctionPayload<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_call: Option<&'a str>,
    profanity_check: bool,
}

#[derive(Debug, Serialize)]
struct FunctionPayload<'a> {
    name: &'a str,
    description: &'a str,
    parameters: serde_json::Value,
    return_parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    function_call: Option<FunctionCall>,
    functions_state_id: Option<String>,
}

impl GigaChatClient {
    /// Build a client from config and the resolved authorization key.
    pub fn new(config: &GigaToolsConfig, auth_key: &str) -> Result<Self> {
        if !config.verify_ssl_certs {
            warn!("TLS certificate verification is disabled for GigaChat endpoints");
        }
        let mut builder =
            reqwest::Client::builder().danger_accept_invalid_certs(!config.verify_ssl_certs);
        // 0 disables the per-request timeout.
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        let http = builder.build()?;

        let auth = TokenProvider::new(http.clone(), &config.auth_url, auth_key, &config.scope);

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            profanity_check: config.profanity_check,
            max_retries: config.max_retries.max(1),
            retry_delay: Duration::from_millis(500),
            log_requests: config.log_requests,
            log_responses: config.log_responses,
            auth,
        })
    }

    /// Override the initial backoff between attempts.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Exponential backoff before attempt `attempt + 1`, clamped to
    /// `MAX_RETRY_DELAY`.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.retry_delay.saturating_mul(factor).min(MAX_RETRY_DELAY)
    }

    async fn post_chat(&self, body: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.api_url);

        // One forced refresh if the cached token was rejected.
        let mut refreshed = false;
        loop {
            let token = self.auth.token().await?;
            let resp = self
                .http
                .post(&url)
                .bearer_auth(&token)
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body.to_string())
                .send()
                .await?;

            let status = resp.status();
            if status == StatusCode::UNAUTHORIZED && !refreshed {
                debug!("Access token rejected, refreshing");
                self.auth.invalidate().await;
                refreshed = true;
                continue;
            }

            let text = resp.text().await.unwrap_or_default();
            if !status.is_success() {
                return Err(Error::Http {
                    status: status.as_u16(),
                    body: text,
                });
            }
            return Ok(text);
        }
    }

    async fn post_with_retry(&self, body: &str) -> Result<String> {
        let mut attempt = 1;
        loop {
            match self.post_chat(body).await {
                Err(e) if attempt < self.max_retries && e.is_retryable() => {
                    let delay = self.backoff_delay(attempt);
                    warn!(
                        "GigaChat attempt {}/{} failed: {} (retrying in {:?})",
                        attempt, self.max_retries, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}

#[async_trait]
impl ChatModel for GigaChatClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[&ToolDescriptor],
    ) -> Result<Completion> {
        let functions: Vec<FunctionPayload> = tools
            .iter()
            .map(|t| FunctionPayload {
                name: &t.name,
                description: &t.usage_text,
                parameters: t.parameters_schema(),
                return_parameters: ToolDescriptor::return_schema(),
            })
            .collect();

        let request = ChatRequest {
            model: &self.model,
            messages,
            function_call: (!functions.is_empty()).then_some("auto"),
            functions,
            profanity_check: self.profanity_check,
        };
        let body = serde_json::to_string(&request)?;

        if self.log_requests {
            debug!("GigaChat request: {}", body);
        } else {
            debug!("GigaChat request to model: {}", self.model);
        }

        let text = self.post_with_retry(&body).await?;
        if self.log_responses {
            debug!("GigaChat response: {}", text);
        }

        let parsed: ChatResponse = serde_json::from_str(&text)?;
        let message = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(Error::EmptyResponse)?
            .message;

        Ok(Completion {
            content: message.content,
            function_call: message.function_call.map(normalize_call),
            functions_state_id: message.functions_state_id,
            usage: parsed.usage.unwrap_or_default(),
        })
    }
}

/// Arguments occasionally arrive as a JSON-encoded string instead of an object.
fn normalize_call(mut call: FunctionCall) -> FunctionCall {
    if let serde_json::Value::String(raw) = &call.arguments {
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(raw) {
            call.arguments = parsed;
        }
    }
    call
}
