use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::order::{OrderRow, OrderStatus, PaymentMethod, ServiceType};

/// Parameters for creating an order at checkout.
pub struct NewOrder<'a> {
    pub user_id: Uuid,
    /// Minor currency units.
    pub amount: i64,
    pub currency: &'a str,
    pub payment_method: PaymentMethod,
    pub payment_reference: &'a str,
    pub service_type: ServiceType,
}

/// Inserts a new order. Every order starts `pending`; there is no other
/// initial state.
pub async fn insert_order(pool: &PgPool, order: NewOrder<'_>) -> Result<OrderRow, AppError> {
    let row = sqlx::query_as::<_, OrderRow>(
        r#"
        INSERT INTO orders
            (id, user_id, amount, currency, payment_method,
             payment_reference, service_type, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(order.user_id)
    .bind(order.amount)
    .bind(order.currency)
    .bind(order.payment_method.as_str())
    .bind(order.payment_reference)
    .bind(order.service_type.as_str())
    .bind(OrderStatus::Pending.as_str())
    .fetch_one(pool)
    .await?;

    info!(
        "Created order {} for user {} ({} {} pesewas, pending)",
        row.id,
        row.user_id,
        row.service_type,
        row.amount
    );
    Ok(row)
}

/// Moves an order from pending to paid. Returns whether a row was updated.
pub async fn mark_paid(pool: &PgPool, order_id: Uuid) -> Result<bool, AppError> {
    let result = sqlx::query("UPDATE orders SET status = $1 WHERE id = $2")
        .bind(OrderStatus::Paid.as_str())
        .bind(order_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Returns a single order if it exists and is owned by `user_id`.
pub async fn find_order(
    pool: &PgPool,
    user_id: Uuid,
    order_id: Uuid,
) -> Result<Option<OrderRow>, AppError> {
    Ok(
        sqlx::query_as::<_, OrderRow>("SELECT * FROM orders WHERE id = $1 AND user_id = $2")
            .bind(order_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?,
    )
}

/// All orders owned by `user_id`, newest first.
pub async fn list_orders(pool: &PgPool, user_id: Uuid) -> Result<Vec<OrderRow>, AppError> {
    Ok(sqlx::query_as::<_, OrderRow>(
        "SELECT * FROM orders WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}
