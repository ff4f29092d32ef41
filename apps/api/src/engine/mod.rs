//! Interpretation engines behind `POST /api/analyze`.
//!
//! Two implementations of one trait: the deterministic Day-Master rule
//! engine and the Gemini-backed engine. Exactly one is active per process,
//! chosen at startup (`ANALYSIS_ENGINE`); they are never consulted together.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::catalog::TestConfig;
use crate::errors::AppError;
use crate::models::{AnalysisResult, CalendarType, Gender};
use crate::saju::FourPillars;

pub mod llm;
pub mod prompts;
pub mod rules;

/// Everything an engine may draw on for one analysis.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext {
    pub test: &'static TestConfig,
    pub pillars: FourPillars,
    pub gender: Gender,
    /// Birth instant after any lunar-to-solar normalization, local KST.
    pub solar_birth: NaiveDateTime,
    /// Calendar type the user originally entered.
    pub calendar_type: CalendarType,
}

/// Pluggable analysis strategy. Selected once at startup and shared through
/// `AppState`.
#[async_trait]
pub trait AnalysisEngine: Send + Sync {
    async fn analyze(&self, ctx: &AnalysisContext) -> Result<AnalysisResult, AppError>;
}

/// Which engine the process runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineKind {
    Rules,
    #[default]
    Llm,
}

impl EngineKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "rules" => Some(EngineKind::Rules),
            "llm" => Some(EngineKind::Llm),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EngineKind::Rules => "rules",
            EngineKind::Llm => "llm",
        }
    }
}
