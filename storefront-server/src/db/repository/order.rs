//! Order Repository
//!
//! Orders always load with their line items attached. Status changes go
//! through a compare-and-swap write so concurrent transitions cannot clobber
//! each other.

use std::collections::HashMap;

use chrono::Utc;
use shared::models::{Order, OrderLineItem, OrderStatus, UserRole};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{RepoError, RepoResult};
use crate::db::models::OrderItemRow;

const COLUMNS: &str = "id, user_id, status, created_at, updated_at";

/// A line item ready to be written, amounts already converted to cents.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub quantity: i64,
    pub price_cents: i64,
    pub total_cents: i64,
}

/// List orders visible to `user_id`: admins see every order, everyone else
/// sees only their own. Returns the requested page and the total row count.
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: i64,
    roles: &[UserRole],
    limit: u32,
    offset: u64,
) -> RepoResult<(Vec<Order>, u64)> {
    let admin = roles.contains(&UserRole::Admin);

    let (orders, total) = if admin {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders")
            .fetch_one(pool)
            .await?;
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {COLUMNS} FROM orders ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        ))
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(pool)
        .await?;
        (orders, total)
    } else {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {COLUMNS} FROM orders WHERE user_id = ? ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        ))
        .bind(user_id)
        .bind(limit as i64)
        .bind(offset as i64)
        .fetch_all(pool)
        .await?;
        (orders, total)
    };

    let orders = attach_items(pool, orders).await?;
    Ok((orders, total as u64))
}

/// Fetch one order owned by `user_id`. Orders of other users are invisible.
pub async fn find_by_id_for_user(
    pool: &SqlitePool,
    order_id: i64,
    user_id: i64,
) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {COLUMNS} FROM orders WHERE id = ? AND user_id = ?"
    ))
    .bind(order_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    match order {
        Some(order) => Ok(attach_items(pool, vec![order]).await?.pop()),
        None => Ok(None),
    }
}

pub async fn find_by_id(pool: &SqlitePool, order_id: i64) -> RepoResult<Option<Order>> {
    let order =
        sqlx::query_as::<_, Order>(&format!("SELECT {COLUMNS} FROM orders WHERE id = ?"))
            .bind(order_id)
            .fetch_optional(pool)
            .await?;

    match order {
        Some(order) => Ok(attach_items(pool, vec![order]).await?.pop()),
        None => Ok(None),
    }
}

/// Create an order and all its line items in one transaction.
///
/// Either everything is written or nothing is; a failed item insert rolls
/// back the order row as well.
pub async fn create(
    pool: &SqlitePool,
    user_id: i64,
    items: &[NewOrderItem],
) -> RepoResult<Order> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO orders (user_id, status, created_at, updated_at) VALUES (?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(OrderStatus::Pending)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;
    let order_id = result.last_insert_rowid();

    for item in items {
        sqlx::query(
            "INSERT INTO order_items (order_id, product_id, quantity, price_cents, total_cents, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(order_id)
        .bind(item.product_id)
        .bind(item.quantity)
        .bind(item.price_cents)
        .bind(item.total_cents)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))
}

/// Transition an order from `from` to `to`.
///
/// The write is guarded on the current status; returns `false` when the
/// order no longer holds `from` (or vanished) and nothing was written.
pub async fn update_status_guarded(
    pool: &SqlitePool,
    order_id: i64,
    from: OrderStatus,
    to: OrderStatus,
) -> RepoResult<bool> {
    let result =
        sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ? AND status = ?")
            .bind(to)
            .bind(Utc::now())
            .bind(order_id)
            .bind(from)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() == 1)
}

/// Load the line items for a batch of orders in one query.
async fn attach_items(pool: &SqlitePool, mut orders: Vec<Order>) -> RepoResult<Vec<Order>> {
    if orders.is_empty() {
        return Ok(orders);
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT id, order_id, product_id, quantity, price_cents, total_cents, created_at, updated_at FROM order_items WHERE order_id IN (",
    );
    {
        let mut ids = qb.separated(", ");
        for order in &orders {
            ids.push_bind(order.id);
        }
    }
    qb.push(") ORDER BY id");

    let rows: Vec<OrderItemRow> = qb.build_query_as().fetch_all(pool).await?;

    let mut by_order: HashMap<i64, Vec<OrderLineItem>> = HashMap::new();
    for row in rows {
        by_order.entry(row.order_id).or_default().push(row.into());
    }
    for order in &mut orders {
        order.items = by_order.remove(&order.id).unwrap_or_default();
    }
    Ok(orders)
}
