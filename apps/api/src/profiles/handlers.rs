use axum::{extract::State, Json};
use serde::Serialize;

use crate::auth::extractor::CurrentUser;
use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::profiles::store;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SaveProfileResponse {
    pub saved: bool,
}

/// GET /api/v1/profile
/// Returns the caller's profile, or default values if none has been saved
/// yet. A first visit is not an error.
pub async fn handle_get_profile(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Profile>, AppError> {
    let profile = store::load_profile(&state.db, user.session.user_id)
        .await?
        .map(Profile::from)
        .unwrap_or_else(Profile::default_for_now);
    Ok(Json(profile))
}

/// PUT /api/v1/profile
/// Wholesale upsert of the caller's profile. Skill and certificate lists
/// are normalized through the duplicate-suppressing add operation before
/// they are stored.
pub async fn handle_save_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(profile): Json<Profile>,
) -> Result<Json<SaveProfileResponse>, AppError> {
    if let Some(field) = profile.missing_required() {
        return Err(AppError::Validation(format!("{field} is required")));
    }

    let profile = profile.normalized();
    store::upsert_profile(&state.db, user.session.user_id, &profile).await?;

    Ok(Json(SaveProfileResponse { saved: true }))
}
