use axum::Json;
use serde_json::Value;

use crate::catalog::TESTS;

/// GET /api/tests
/// The static catalog the landing page renders its cards from.
pub async fn handle_list_tests() -> Json<Value> {
    Json(serde_json::to_value(TESTS).unwrap_or(Value::Null))
}
