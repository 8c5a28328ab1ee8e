//! Identity session surface.
//!
//! Authentication itself is delegated to the external identity provider;
//! this module only verifies sessions against it and delegates sign-out.
//! All verification goes through the single `SessionProvider` held in
//! `AppState`; handlers never talk to the provider directly.

pub mod extractor;
pub mod handlers;
pub mod provider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// A verified session as reported by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
}

/// The session surface consumed from the external identity provider.
///
/// Carried in `AppState` as `Arc<dyn SessionProvider>`. Each call is
/// attempted at most once; there is no retry policy.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Resolves an access token to its session, or `None` if the provider
    /// does not recognize it (expired, revoked, malformed).
    async fn current_session(&self, access_token: &str) -> Result<Option<Session>, AppError>;

    /// Invalidates the session behind the token at the provider.
    async fn sign_out(&self, access_token: &str) -> Result<(), AppError>;
}
