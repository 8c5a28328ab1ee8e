pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::auth::handlers as auth_handlers;
use crate::orders::handlers as order_handlers;
use crate::profiles::handlers as profile_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session surface
        .route("/api/v1/auth/signout", post(auth_handlers::handle_sign_out))
        // Profile intake
        .route("/api/v1/profile", get(profile_handlers::handle_get_profile))
        .route("/api/v1/profile", put(profile_handlers::handle_save_profile))
        // Package selection & checkout
        .route("/api/v1/plans", get(order_handlers::handle_list_plans))
        .route("/api/v1/orders", post(order_handlers::handle_checkout))
        // Dashboard
        .route("/api/v1/orders", get(order_handlers::handle_list_orders))
        .route(
            "/api/v1/orders/:id/settlement",
            delete(order_handlers::handle_cancel_settlement),
        )
        .with_state(state)
}
