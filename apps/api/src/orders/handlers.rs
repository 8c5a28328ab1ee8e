use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::auth::extractor::CurrentUser;
use crate::catalog::{self, ServicePlan};
use crate::errors::AppError;
use crate::models::order::{
    format_amount, payment_method_display_name, service_display_name, status_badge_class,
    status_label, OrderRow, PaymentMethod, ServiceType,
};
use crate::orders::store::{self, NewOrder};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CheckoutRequest {
    pub service_type: String,
    pub payment_method: String,
    #[serde(default)]
    pub payment_reference: String,
}

/// An order row enriched with the display strings the dashboard renders:
/// package name, status badge, formatted amount.
#[derive(Serialize)]
pub struct OrderView {
    pub id: Uuid,
    pub amount: i64,
    pub currency: String,
    pub amount_display: String,
    pub payment_method: String,
    pub payment_method_display: String,
    pub service_type: String,
    pub service_name: String,
    pub status: String,
    pub status_label: String,
    pub status_badge_class: String,
    pub created_at: DateTime<Utc>,
}

impl From<OrderRow> for OrderView {
    fn from(row: OrderRow) -> Self {
        OrderView {
            amount_display: format_amount(row.amount, &row.currency),
            payment_method_display: payment_method_display_name(&row.payment_method),
            service_name: service_display_name(&row.service_type),
            status_label: status_label(&row.status),
            status_badge_class: status_badge_class(&row.status).to_string(),
            id: row.id,
            amount: row.amount,
            currency: row.currency,
            payment_method: row.payment_method,
            service_type: row.service_type,
            status: row.status,
            created_at: row.created_at,
        }
    }
}

/// GET /api/v1/plans
/// The fixed three-tier catalog. Static, not data-driven.
pub async fn handle_list_plans() -> Json<&'static [ServicePlan]> {
    Json(&catalog::PLANS[..])
}

/// POST /api/v1/orders
/// Checkout: creates a `pending` order priced from the selected tier, then
/// schedules the simulated settlement. The settlement outcome is logged,
/// never awaited by the caller.
pub async fn handle_checkout(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<OrderView>), AppError> {
    let service_type = ServiceType::parse(&req.service_type).ok_or_else(|| {
        AppError::Validation(format!("unknown service type '{}'", req.service_type))
    })?;
    let payment_method = PaymentMethod::parse(&req.payment_method).ok_or_else(|| {
        AppError::Validation(format!("unknown payment method '{}'", req.payment_method))
    })?;

    match payment_method {
        PaymentMethod::Momo if req.payment_reference.trim().is_empty() => {
            return Err(AppError::Validation(
                "payment_reference is required for mobile money".to_string(),
            ));
        }
        PaymentMethod::Card => {
            return Err(AppError::Validation(
                "card payments are not yet available".to_string(),
            ));
        }
        PaymentMethod::Momo => {}
    }

    let plan = catalog::plan_for(service_type);
    let order = store::insert_order(
        &state.db,
        NewOrder {
            user_id: user.session.user_id,
            amount: plan.amount_pesewas(),
            currency: catalog::CURRENCY,
            payment_method,
            payment_reference: req.payment_reference.trim(),
            service_type,
        },
    )
    .await?;

    schedule_settlement(&state, order.id);

    Ok((StatusCode::CREATED, Json(OrderView::from(order))))
}

/// GET /api/v1/orders
/// The caller's orders, newest first. An empty list is a normal response.
pub async fn handle_list_orders(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<OrderView>>, AppError> {
    let orders = store::list_orders(&state.db, user.session.user_id).await?;
    Ok(Json(orders.into_iter().map(OrderView::from).collect()))
}

#[derive(Serialize)]
pub struct CancelSettlementResponse {
    pub cancelled: bool,
}

/// DELETE /api/v1/orders/:id/settlement
/// Explicitly cancels a pending settlement timer, e.g. when the user backs
/// out of the checkout flow. Owner-checked; cancelling an order whose
/// settlement already fired reports `cancelled: false`.
pub async fn handle_cancel_settlement(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(order_id): Path<Uuid>,
) -> Result<Json<CancelSettlementResponse>, AppError> {
    store::find_order(&state.db, user.session.user_id, order_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {order_id} not found")))?;

    let cancelled = state.settlements.cancel(order_id);
    Ok(Json(CancelSettlementResponse { cancelled }))
}

/// Schedules the pending → paid transition after the configured delay.
fn schedule_settlement(state: &AppState, order_id: Uuid) {
    let pool = state.db.clone();
    let delay = Duration::from_millis(state.config.settlement_delay_ms);

    state.settlements.schedule(order_id, delay, async move {
        match store::mark_paid(&pool, order_id).await {
            Ok(true) => info!("Order {order_id} settled: pending -> paid"),
            Ok(false) => warn!("Order {order_id} was gone at settlement time"),
            Err(e) => error!("Settlement update for order {order_id} failed: {e}"),
        }
    });
}
