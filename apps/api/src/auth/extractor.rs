use axum::{async_trait, extract::FromRequestParts, http::header, http::request::Parts};

use crate::auth::Session;
use crate::errors::AppError;
use crate::state::AppState;

/// Extractor for protected routes. Verifies the bearer token against the
/// identity provider on every request; a missing or unrecognized session
/// rejects with `AuthRequired` before the handler body runs, so no data
/// fetch is ever attempted without an authenticated owner.
pub struct CurrentUser {
    pub session: Session,
    /// The raw access token, kept for operations delegated back to the
    /// provider (sign-out).
    pub access_token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::AuthRequired)?.to_string();

        match state.sessions.current_session(&token).await? {
            Some(session) => Ok(CurrentUser {
                session,
                access_token: token,
            }),
            None => Err(AppError::AuthRequired),
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
