use axum::{extract::State, http::StatusCode};
use tracing::info;

use crate::auth::extractor::CurrentUser;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/v1/auth/signout
/// Delegates session invalidation to the identity provider.
pub async fn handle_sign_out(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<StatusCode, AppError> {
    state.sessions.sign_out(&user.access_token).await?;
    info!("User {} signed out", user.session.user_id);
    Ok(StatusCode::NO_CONTENT)
}
