//! Gemini-backed interpretation. Without a configured API key the engine
//! degrades to a canned mock payload so the rest of the flow stays
//! exercisable in local development.

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::GeminiClient;
use crate::models::AnalysisResult;

use super::prompts::build_user_prompt;
use super::{AnalysisContext, AnalysisEngine};

/// Simulated latency of the keyless mock response, matching the feel of a
/// real model call.
const MOCK_DELAY_MS: u64 = 1500;

pub struct LlmEngine {
    client: Option<GeminiClient>,
}

impl LlmEngine {
    /// `api_key = None` selects the mock fallback path.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: api_key.map(GeminiClient::new),
        }
    }

    /// Engine wired to an existing client. Used by tests with a mock server.
    #[cfg(test)]
    pub fn with_client(client: GeminiClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    fn mock_result(ctx: &AnalysisContext) -> AnalysisResult {
        AnalysisResult {
            summary: format!(
                "[Mock Result for {}] 당신은 정말 특별한 사람입니다. (Gemini Key Missing)",
                ctx.test.slug
            ),
            personality: format!(
                "(API Key Missing) {}년주를 가진 당신은 강인한 성품을 지녔습니다.",
                ctx.pillars.year
            ),
            future_partner: "배려심이 깊고 성실한 배우자를 만날 운명입니다.".to_string(),
            advice: "GEMINI_API_KEY를 설정해주세요.".to_string(),
        }
    }
}

#[async_trait]
impl AnalysisEngine for LlmEngine {
    async fn analyze(&self, ctx: &AnalysisContext) -> Result<AnalysisResult, AppError> {
        let Some(client) = &self.client else {
            info!("No GEMINI_API_KEY configured, returning mock response for: {}", ctx.test.slug);
            tokio::time::sleep(std::time::Duration::from_millis(MOCK_DELAY_MS)).await;
            return Ok(Self::mock_result(ctx));
        };

        let prompt = build_user_prompt(ctx);
        client
            .call_json::<AnalysisResult>(&prompt, Some(ctx.test.system_prompt))
            .await
            .map_err(|e| AppError::Llm(format!("analysis failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_config;
    use crate::models::{CalendarType, Gender};
    use crate::saju::four_pillars;
    use chrono::NaiveDate;
    use httpmock::prelude::*;
    use serde_json::json;

    fn context(slug: &str) -> AnalysisContext {
        let birth = NaiveDate::from_ymd_opt(1995, 7, 21)
            .unwrap()
            .and_hms_opt(4, 30, 0)
            .unwrap();
        AnalysisContext {
            test: test_config(slug).unwrap(),
            pillars: four_pillars(birth).unwrap(),
            gender: Gender::Male,
            solar_birth: birth,
            calendar_type: CalendarType::Solar,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_keyless_engine_returns_mock_payload() {
        let engine = LlmEngine::new(None);
        let result = engine.analyze(&context("love")).await.unwrap();
        assert!(result.summary.contains("[Mock Result for love]"));
        assert!(result.personality.contains("년주"));
    }

    #[tokio::test]
    async fn test_engine_parses_model_reply() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200).json_body(json!({
                "candidates": [{"content": {"parts": [{"text":
                    "{\"summary\":\"s\",\"personality\":\"p\",\"future_partner\":\"f\",\"advice\":\"a\"}"
                }]}}]
            }));
        });

        let engine = LlmEngine::with_client(GeminiClient::with_base_url(
            "key".to_string(),
            server.base_url(),
        ));
        let result = engine.analyze(&context("work")).await.unwrap();
        assert_eq!(result.summary, "s");
        assert_eq!(result.future_partner, "f");
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_llm_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200).json_body(json!({
                "candidates": [{"content": {"parts": [{"text": "not json"}]}}]
            }));
        });

        let engine = LlmEngine::with_client(GeminiClient::with_base_url(
            "key".to_string(),
            server.base_url(),
        ));
        let err = engine.analyze(&context("wealth")).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }
}
