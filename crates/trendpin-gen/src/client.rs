//! HTTP client for an OpenAI-compatible generative model API.
//!
//! Wraps `reqwest` with bearer authentication, typed request bodies, and
//! non-2xx statuses surfaced as [`GenError::Api`] with the response body
//! attached. Two endpoints are used: `/responses` for web-search-assisted
//! structured generation and `/chat/completions` for plain conversational
//! completions.

use serde::Serialize;

use crate::error::GenError;
use crate::extract::{ChatResponse, ModelResponse};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for an OpenAI-compatible model API.
///
/// Use [`ModelClient::new`] for production or [`ModelClient::with_base_url`]
/// to point at a mock server in tests. Request timeouts are left to the
/// client defaults; the posting pipeline bounds only payload transfers.
pub struct ModelClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    input: &'a str,
    tools: [Tool; 1],
}

#[derive(Serialize)]
struct Tool {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

impl ModelClient {
    /// Creates a new client pointed at the production API.
    #[must_use]
    pub fn new(api_key: &str, model: &str) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    #[must_use]
    pub fn with_base_url(api_key: &str, model: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Invokes the `/responses` endpoint with web-search tooling enabled and
    /// returns the raw response envelope for shape-tolerant text extraction.
    ///
    /// # Errors
    ///
    /// - [`GenError::Http`] on network failure.
    /// - [`GenError::Api`] on a non-2xx status, with the body attached.
    /// - [`GenError::Deserialize`] if the body is not valid JSON.
    pub async fn generate(&self, prompt: &str) -> Result<ModelResponse, GenError> {
        let request = GenerateRequest {
            model: &self.model,
            input: prompt,
            tools: [Tool { kind: "web_search" }],
        };
        let url = format!("{}/responses", self.base_url);
        let body = self.post_json(&url, &request).await?;
        serde_json::from_str(&body).map_err(|e| GenError::Deserialize {
            context: "responses payload".to_owned(),
            source: e,
        })
    }

    /// Invokes the `/chat/completions` endpoint with a single user message
    /// and returns the first choice's message content.
    ///
    /// # Errors
    ///
    /// - [`GenError::Http`] on network failure.
    /// - [`GenError::Api`] on a non-2xx status, with the body attached.
    /// - [`GenError::Deserialize`] if the body is not valid JSON.
    /// - [`GenError::MissingContent`] if no choice carries message content.
    pub async fn complete(&self, prompt: &str) -> Result<String, GenError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
        };
        let url = format!("{}/chat/completions", self.base_url);
        let body = self.post_json(&url, &request).await?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| GenError::Deserialize {
                context: "chat completion payload".to_owned(),
                source: e,
            })?;
        parsed.into_content().ok_or(GenError::MissingContent)
    }

    /// Sends an authenticated POST, asserts a 2xx status, and returns the
    /// response body as text.
    async fn post_json<B: Serialize>(&self, url: &str, body: &B) -> Result<String, GenError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(GenError::Api {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_base_url_strips_trailing_slash() {
        let client = ModelClient::with_base_url("k", "m", "https://api.openai.com/v1/");
        assert_eq!(client.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn generate_request_serializes_web_search_tool() {
        let request = GenerateRequest {
            model: "gpt-5-mini-nano",
            input: "find a product",
            tools: [Tool { kind: "web_search" }],
        };
        let rendered = serde_json::to_value(&request).unwrap();
        assert_eq!(rendered["model"], "gpt-5-mini-nano");
        assert_eq!(rendered["input"], "find a product");
        assert_eq!(rendered["tools"][0]["type"], "web_search");
    }

    #[test]
    fn chat_request_serializes_single_user_message() {
        let request = ChatRequest {
            model: "gpt-5-mini-nano",
            messages: [ChatMessage {
                role: "user",
                content: "write a pin",
            }],
        };
        let rendered = serde_json::to_value(&request).unwrap();
        assert_eq!(rendered["messages"][0]["role"], "user");
        assert_eq!(rendered["messages"][0]["content"], "write a pin");
    }
}
