//! Anthropic Messages API client used by the conversion collaborator.
//!
//! The client is constructed explicitly at startup and injected into
//! [`crate::convert::LlmConverter`]; nothing in this crate holds a
//! process-wide client instance.
//!
//! Model is hardcoded — do not make configurable to prevent drift.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::convert::ConvertError;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const MAX_RETRIES: u32 = 3;
/// Low temperature: conversion is extraction, not generation.
const TEMPERATURE: f32 = 0.2;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl MessagesResponse {
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Thin wrapper over the Messages API with retry on transient failures.
#[derive(Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: String,
}

impl AnthropicClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Sends one prompt and returns the model's text response.
    ///
    /// Retries 429s and 5xx responses with exponential backoff; transport
    /// failures, credential rejections, and quota exhaustion map onto the
    /// distinct [`ConvertError`] conditions the caller reports upstream.
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<String, ConvertError> {
        let request_body = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<ConvertError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Conversion call attempt {} failed, retrying after {}ms",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    // Retry transport errors too; report the final one by kind.
                    last_error = Some(classify_transport_error(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Conversion API returned {}: {}", status, body);
                last_error = Some(if status.as_u16() == 429 {
                    ConvertError::RateLimited {
                        retries: MAX_RETRIES,
                    }
                } else {
                    ConvertError::Api {
                        status: status.as_u16(),
                        message: body,
                    }
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(classify_api_error(status.as_u16(), message));
            }

            let parsed: MessagesResponse = response
                .json()
                .await
                .map_err(|e| ConvertError::InvalidResponse(format!("malformed API body: {e}")))?;

            debug!(
                "Conversion call succeeded: input_tokens={}, output_tokens={}",
                parsed.usage.input_tokens, parsed.usage.output_tokens
            );

            return parsed
                .text()
                .map(str::to_string)
                .ok_or_else(|| ConvertError::InvalidResponse("empty model content".to_string()));
        }

        Err(last_error.unwrap_or(ConvertError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

fn classify_transport_error(e: reqwest::Error) -> ConvertError {
    if e.is_timeout() {
        ConvertError::Timeout
    } else {
        ConvertError::Connectivity(e.to_string())
    }
}

/// Maps terminal (non-retried) API statuses onto the error taxonomy.
fn classify_api_error(status: u16, message: String) -> ConvertError {
    match status {
        401 | 403 => ConvertError::InvalidCredentials,
        _ if message.to_lowercase().contains("credit")
            || message.to_lowercase().contains("quota") =>
        {
            ConvertError::QuotaExceeded
        }
        _ => ConvertError::Api { status, message },
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
pub(crate) fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
