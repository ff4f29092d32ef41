//! Wire-level types shared by the routes and engines.
//!
//! Field names are camelCase on the wire, matching what the original web UI
//! sends and stores.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarType {
    #[default]
    Solar,
    Lunar,
}

impl CalendarType {
    pub fn as_str(self) -> &'static str {
        match self {
            CalendarType::Solar => "solar",
            CalendarType::Lunar => "lunar",
        }
    }
}

/// Body of `POST /api/analyze`. Everything is optional at the serde layer so
/// the handler can issue the contract's 400 for missing fields instead of a
/// generic rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub slug: Option<String>,
    pub birth_date: Option<String>,
    pub birth_time: Option<String>,
    pub gender: Option<Gender>,
    #[serde(default)]
    pub calendar_type: CalendarType,
}

/// The four-field analysis schema — the only contract the UI depends on.
/// `future_partner` is a deliberately overloaded slot: the rule engine routes
/// work- or wealth-specific text through it so the response shape never
/// changes per test type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub personality: String,
    pub future_partner: String,
    pub advice: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub result: AnalysisResult,
}

/// The single profile blob. Stored verbatim, last write wins, no migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub gender: Gender,
    pub birth_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_time: Option<String>,
    pub calendar_type: CalendarType,
}
