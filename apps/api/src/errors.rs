use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// No variant is fatal to the process: every failure maps to a response the
/// client renders as a toast or a redirect, leaving its prior state unchanged.
#[derive(Debug, Error)]
pub enum AppError {
    /// No session. Not an error from the user's point of view: the client
    /// redirects to the sign-in surface.
    #[error("Authentication required")]
    AuthRequired,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Record store read/write rejected. Attempted at most once, no retry.
    #[error("Persistence error: {0}")]
    Persistence(#[from] sqlx::Error),

    /// Identity provider unreachable or returned a malformed response.
    #[error("Identity provider error: {0}")]
    Provider(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::AuthRequired => (
                StatusCode::UNAUTHORIZED,
                "AUTH_REQUIRED",
                "Authentication required".to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Persistence(e) => {
                tracing::error!("Record store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PERSISTENCE_FAILURE",
                    "A storage error occurred. Please try again.".to_string(),
                )
            }
            AppError::Provider(msg) => {
                tracing::error!("Identity provider error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "PROVIDER_ERROR",
                    "The identity service is unavailable".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message,
        });
        // The client mirrors the SPA flow: a missing session sends the user
        // to the sign-in page rather than showing an error toast.
        if matches!(self, AppError::AuthRequired) {
            error["redirect_to"] = json!("/auth");
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_parts(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(axum::body::to_bytes(response.into_body(), 64 * 1024))
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_auth_required_carries_redirect_hint() {
        let (status, body) = response_parts(AppError::AuthRequired);
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "AUTH_REQUIRED");
        assert_eq!(body["error"]["redirect_to"], "/auth");
    }

    #[test]
    fn test_validation_maps_to_400_with_field_message() {
        let (status, body) = response_parts(AppError::Validation("full_name is required".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "full_name is required");
    }

    #[test]
    fn test_persistence_hides_detail_from_client() {
        let (status, body) = response_parts(AppError::Persistence(sqlx::Error::PoolClosed));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "PERSISTENCE_FAILURE");
        let message = body["error"]["message"].as_str().unwrap();
        assert!(!message.contains("Pool"));
    }

    #[test]
    fn test_provider_maps_to_502_without_leaking_detail() {
        let (status, body) = response_parts(AppError::Provider(
            "unexpected status 500: gateway exploded".into(),
        ));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "PROVIDER_ERROR");
        let message = body["error"]["message"].as_str().unwrap();
        assert!(!message.contains("gateway exploded"));
    }

    #[test]
    fn test_internal_maps_to_500_without_leaking_detail() {
        let (status, body) = response_parts(AppError::Internal(anyhow::anyhow!(
            "pool handshake panicked"
        )));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        let message = body["error"]["message"].as_str().unwrap();
        assert!(!message.contains("panicked"));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let (status, body) = response_parts(AppError::NotFound("order 42".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
