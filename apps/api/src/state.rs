use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::SessionProvider;
use crate::config::Config;
use crate::orders::settlement::SettlementScheduler;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// The one process-wide session surface. Every protected handler
    /// verifies against this provider; nothing else talks to the identity
    /// service.
    pub sessions: Arc<dyn SessionProvider>,
    /// Owns the pending settlement timers so they stay cancellable.
    pub settlements: SettlementScheduler,
    pub config: Config,
}
