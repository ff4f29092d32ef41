//! Saved-profile endpoints: one blob, read back by the wizard to prefill
//! the birth form.

use axum::{extract::State, http::StatusCode, Json};

use crate::errors::AppError;
use crate::models::Profile;
use crate::state::AppState;

/// GET /api/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
) -> Result<Json<Profile>, AppError> {
    state
        .profiles
        .load()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No saved profile".to_string()))
}

/// PUT /api/profile
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> Result<StatusCode, AppError> {
    state.profiles.save(&profile).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/profile
pub async fn handle_delete_profile(
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.profiles.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}
