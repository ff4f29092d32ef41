//! LLM client — the single point of entry for all Gemini API calls.
//!
//! ARCHITECTURAL RULE: no other module may call the Gemini API directly.
//! All LLM interactions MUST go through this module.
//!
//! Model: gemini-1.5-flash (hardcoded — do not make configurable to prevent drift)

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// The model used for all LLM calls. Fast and on the free tier.
pub const MODEL: &str = "gemini-1.5-flash";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Text of the first candidate part, if any.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
            .find_map(|p| p.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The single Gemini client used by the LLM analysis engine.
/// Wraps the generateContent REST API with retry logic and a typed
/// JSON-output helper.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, GEMINI_API_BASE.to_string())
    }

    /// Points the client at a non-default endpoint. Used by tests to target
    /// a local mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url,
        }
    }

    /// Makes a raw generateContent call, requesting a JSON-typed reply.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn call(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<GenerateContentResponse, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            system_instruction: system.map(|text| Content {
                parts: vec![Part { text }],
            }),
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, MODEL);
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Gemini API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                // Try to parse the structured error message
                let message = serde_json::from_str::<GeminiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let llm_response: GenerateContentResponse = response.json().await?;

            if let Some(usage) = &llm_response.usage_metadata {
                debug!(
                    "LLM call succeeded: prompt_tokens={:?}, output_tokens={:?}",
                    usage.prompt_token_count, usage.candidates_token_count
                );
            }

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// Convenience method that calls the model and deserializes the reply as
    /// JSON. The prompt must instruct the model to return valid JSON.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<T, LlmError> {
        let response = self.call(prompt, system).await?;

        let text = response.text().ok_or(LlmError::EmptyContent)?;

        // The model occasionally wraps JSON in fences despite the mime type
        let text = strip_json_fences(text);

        serde_json::from_str(text).map_err(LlmError::Parse)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
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

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_response_text_extracts_first_part() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "{\"ok\":true}"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(response.text(), Some("{\"ok\":true}"));
    }

    #[tokio::test]
    async fn test_call_json_against_mock_server() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path(format!("/models/{MODEL}:generateContent"))
                .header("x-goog-api-key", "test-key");
            then.status(200).json_body(json!({
                "candidates": [
                    {"content": {"parts": [{"text": "{\"summary\":\"ok\"}"}]}}
                ],
                "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5}
            }));
        });

        #[derive(serde::Deserialize)]
        struct Reply {
            summary: String,
        }

        let client = GeminiClient::with_base_url("test-key".to_string(), server.base_url());
        let reply: Reply = client.call_json("hello", None).await.unwrap();
        assert_eq!(reply.summary, "ok");
        mock.assert();
    }

    #[tokio::test]
    async fn test_server_errors_retried_a_bounded_number_of_times() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST);
            then.status(500).body("model overloaded");
        });

        let client = GeminiClient::with_base_url("test-key".to_string(), server.base_url());
        let err = client.call("hello", None).await.unwrap_err();
        match err {
            LlmError::Api { status, .. } => assert_eq!(status, 500),
            other => panic!("unexpected error: {other}"),
        }
        mock.assert_hits(MAX_RETRIES as usize);
    }

    #[tokio::test]
    async fn test_transient_rate_limit_recovers_on_retry() {
        let server = MockServer::start();
        let mut rate_limited = server.mock(|when, then| {
            when.method(POST);
            then.status(429).body("slow down");
        });

        #[derive(serde::Deserialize)]
        struct Reply {
            summary: String,
        }

        let client = GeminiClient::with_base_url("test-key".to_string(), server.base_url());

        // Swap the endpoint to healthy while the client sits in its first
        // backoff sleep, so the retry lands on a 200.
        let swap = async {
            tokio::time::sleep(std::time::Duration::from_millis(300)).await;
            rate_limited.delete();
            server.mock(|when, then| {
                when.method(POST);
                then.status(200).json_body(json!({
                    "candidates": [
                        {"content": {"parts": [{"text": "{\"summary\":\"recovered\"}"}]}}
                    ]
                }));
            });
        };

        let (reply, _) = tokio::join!(client.call_json::<Reply>("hello", None), swap);
        assert_eq!(reply.unwrap().summary, "recovered");
    }

    #[tokio::test]
    async fn test_non_retryable_error_surfaces_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(400)
                .json_body(json!({"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}));
        });

        let client = GeminiClient::with_base_url("bad-key".to_string(), server.base_url());
        let err = client.call("hello", None).await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
