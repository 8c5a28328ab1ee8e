use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::auth::{Session, SessionProvider};
use crate::errors::AppError;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Session provider backed by the hosted identity service's REST surface.
#[derive(Clone)]
pub struct HttpSessionProvider {
    client: Client,
    base_url: String,
    anon_key: String,
}

#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: Uuid,
    email: String,
}

impl HttpSessionProvider {
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        }
    }
}

#[async_trait]
impl SessionProvider for HttpSessionProvider {
    async fn current_session(&self, access_token: &str) -> Result<Option<Session>, AppError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Provider(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let user: ProviderUser = response
                    .json()
                    .await
                    .map_err(|e| AppError::Provider(format!("malformed user payload: {e}")))?;
                debug!("Session verified for user {}", user.id);
                Ok(Some(Session {
                    user_id: user.id,
                    email: user.email,
                }))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(AppError::Provider(format!(
                    "unexpected status {status}: {body}"
                )))
            }
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AppError> {
        let response = self
            .client
            .post(format!("{}/auth/v1/logout", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::Provider(e.to_string()))?;

        let status = response.status();
        // An already-invalid token signs out to the same end state.
        if status.is_success() || status == StatusCode::UNAUTHORIZED {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(AppError::Provider(format!(
                "sign-out failed with status {status}: {body}"
            )))
        }
    }
}
