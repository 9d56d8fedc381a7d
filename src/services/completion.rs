use crate::models::AISettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

// ─── OpenAI-compatible API types ───

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatSendMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatSendMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatRecvMessage,
}

#[derive(Deserialize)]
struct ChatRecvMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    reasoning_content: Option<String>,
}

/// Why a completion did not produce usable output.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request timed out")]
    Timeout,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("API returned error {status}: {body}")]
    Provider { status: u16, body: String },
    #[error("empty AI response")]
    EmptyResponse,
    #[error("failed to parse AI output: {0}")]
    Parse(String),
}

impl CompletionError {
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(value.to_string())
        }
    }
}

/// One chat-completion round trip per call. No retries.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl CompletionClient {
    pub fn new(settings: &AISettings) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
            .build()?;

        let api_key = Some(settings.api_key.trim().to_string()).filter(|k| !k.is_empty());

        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", settings.base_url.trim_end_matches('/')),
            api_key,
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        let api_key = self.api_key.as_deref().ok_or(CompletionError::MissingApiKey)?;

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatSendMessage {
                    role: "system",
                    content: system,
                },
                ChatSendMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CompletionError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| CompletionError::Transport(format!("malformed API response: {e}")))?;

        // Try content first, then reasoning_content (for reasoning models)
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content.or(c.message.reasoning_content))
            .ok_or(CompletionError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_fails_without_a_request() {
        let settings = AISettings {
            api_key: "   ".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let client = CompletionClient::new(&settings).unwrap();
        let err = client.complete("system", "user").await.unwrap_err();
        assert!(matches!(err, CompletionError::MissingApiKey));
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let settings = AISettings {
            base_url: "http://localhost:1234/v1/".to_string(),
            ..Default::default()
        };
        let client = CompletionClient::new(&settings).unwrap();
        assert_eq!(client.endpoint, "http://localhost:1234/v1/chat/completions");
        assert_eq!(client.model(), "gpt-4");
    }
}
