//! The analysis endpoint: validate, normalize the calendar, compute pillars,
//! hand off to the configured engine.

use axum::{extract::State, Json};
use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::catalog::test_config;
use crate::engine::AnalysisContext;
use crate::errors::AppError;
use crate::models::{AnalyzeRequest, AnalyzeResponse, CalendarType};
use crate::saju::lunar::lunar_to_solar;
use crate::saju::{four_pillars, KST_OFFSET_HOURS};
use crate::state::AppState;

/// Birth time defaults to noon when the user does not know it.
const DEFAULT_BIRTH_TIME: &str = "12:00";

/// POST /api/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let slug = req.slug.as_deref().filter(|s| !s.is_empty());
    let (Some(slug), Some(birth_date), Some(gender)) =
        (slug, req.birth_date.as_deref(), req.gender)
    else {
        return Err(AppError::Validation("Missing required fields".to_string()));
    };

    let test =
        test_config(slug).ok_or_else(|| AppError::NotFound("Invalid test type".to_string()))?;

    let date = NaiveDate::parse_from_str(birth_date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("birthDate must be YYYY-MM-DD".to_string()))?;
    let time = NaiveTime::parse_from_str(
        req.birth_time.as_deref().unwrap_or(DEFAULT_BIRTH_TIME),
        "%H:%M",
    )
    .map_err(|_| AppError::Validation("birthTime must be HH:mm".to_string()))?;

    // The simple UI carries no leap-month flag, so lunar dates resolve to
    // the regular month.
    let solar_date = match req.calendar_type {
        CalendarType::Lunar => lunar_to_solar(
            date.year(),
            date.month() as u8,
            date.day() as u8,
            false,
            KST_OFFSET_HOURS,
        )?,
        CalendarType::Solar => date,
    };

    let solar_birth = solar_date.and_time(time);
    let pillars = four_pillars(solar_birth)?;

    let ctx = AnalysisContext {
        test,
        pillars,
        gender,
        solar_birth,
        calendar_type: req.calendar_type,
    };

    let result = state.engine.analyze(&ctx).await?;

    Ok(Json(AnalyzeResponse {
        success: true,
        result,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::engine::rules::RuleEngine;
    use crate::engine::EngineKind;
    use crate::profile::ProfileStore;
    use crate::routes::build_router;
    use crate::state::AppState;

    fn test_router() -> (axum::Router, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState {
            config: Config {
                gemini_api_key: None,
                engine: EngineKind::Rules,
                profile_path: dir
                    .path()
                    .join("profile.json")
                    .to_string_lossy()
                    .into_owned(),
                port: 0,
                rust_log: "info".to_string(),
                app_env: "test".to_string(),
            },
            engine: Arc::new(RuleEngine),
            profiles: ProfileStore::new(dir.path().join("profile.json")),
        };
        (build_router(state), dir)
    }

    async fn post_analyze(body: Value) -> (StatusCode, Value) {
        let (app, _dir) = test_router();
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_birth_date_is_400() {
        let (status, body) =
            post_analyze(json!({"slug": "love", "gender": "female"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields");
    }

    #[tokio::test]
    async fn test_missing_gender_is_400() {
        let (status, _) =
            post_analyze(json!({"slug": "love", "birthDate": "1995-07-21"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_slug_is_404() {
        let (status, body) = post_analyze(json!({
            "slug": "career",
            "birthDate": "1995-07-21",
            "gender": "male"
        }))
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Invalid test type");
    }

    #[tokio::test]
    async fn test_malformed_birth_date_is_400() {
        let (status, _) = post_analyze(json!({
            "slug": "love",
            "birthDate": "21-07-1995",
            "gender": "male"
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_successful_analysis_has_four_fields() {
        let (status, body) = post_analyze(json!({
            "slug": "love",
            "birthDate": "2000-01-01",
            "birthTime": "12:00",
            "gender": "female"
        }))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        for field in ["summary", "personality", "future_partner", "advice"] {
            assert!(
                body["result"][field].as_str().is_some_and(|s| !s.is_empty()),
                "missing {field}"
            );
        }
    }

    #[tokio::test]
    async fn test_selector_changes_future_partner_only() {
        let request = |slug: &str| {
            json!({
                "slug": slug,
                "birthDate": "2000-01-01",
                "birthTime": "12:00",
                "gender": "male"
            })
        };
        let (_, love) = post_analyze(request("love")).await;
        let (_, work) = post_analyze(request("work")).await;
        assert_eq!(love["result"]["summary"], work["result"]["summary"]);
        assert_eq!(love["result"]["advice"], work["result"]["advice"]);
        assert_ne!(
            love["result"]["future_partner"],
            work["result"]["future_partner"]
        );
    }

    #[tokio::test]
    async fn test_lunar_birth_date_is_normalized() {
        // Lunar 2000-01-01 and solar 2000-02-05 are the same day, so the
        // rule-engine output must be identical.
        let (status, lunar) = post_analyze(json!({
            "slug": "wealth",
            "birthDate": "2000-01-01",
            "gender": "female",
            "calendarType": "lunar"
        }))
        .await;
        assert_eq!(status, StatusCode::OK);
        let (_, solar) = post_analyze(json!({
            "slug": "wealth",
            "birthDate": "2000-02-05",
            "gender": "female",
            "calendarType": "solar"
        }))
        .await;
        assert_eq!(lunar["result"], solar["result"]);
    }

    #[tokio::test]
    async fn test_out_of_range_year_is_400() {
        let (status, _) = post_analyze(json!({
            "slug": "love",
            "birthDate": "1850-01-01",
            "gender": "male"
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_extreme_lunar_year_is_400_not_a_crash() {
        // chrono parses signed six-digit years like +262142-01-01; the lunar
        // path must turn them into a 400 before any calendar math runs.
        let (status, _) = post_analyze(json!({
            "slug": "love",
            "birthDate": "+262142-01-01",
            "gender": "male",
            "calendarType": "lunar"
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
