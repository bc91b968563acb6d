//! Order Service - order lifecycle and per-user list caching
//!
//! Orders are created atomically with their line items, listed with a
//! short-lived per-user cache and moved through the lifecycle with status
//! writes guarded on the previously observed status. Every mutation drops
//! the owner's cached listings.

use std::time::Duration;

use rust_decimal::Decimal;
use shared::models::{Order, OrderCreate, OrderStatus};
use shared::request::PaginationQuery;
use shared::response::PaginatedResponse;
use sqlx::SqlitePool;
use tracing::warn;

use super::Notifier;
use crate::auth::CurrentUser;
use crate::cache::TtlCache;
use crate::db::models::decimal_to_cents;
use crate::db::repository::order::{self, NewOrderItem};
use crate::db::repository::product;
use crate::utils::{AppError, AppResult, ErrorCode};

/// How long a cached order listing stays valid.
const LIST_CACHE_TTL: Duration = Duration::from_secs(300);

fn list_cache_key(user_id: i64, page: u32, per_page: u32) -> String {
    format!("user_orders_{user_id}:p{page}:pp{per_page}")
}

/// Prefix covering every cached page of one user's listing. The trailing
/// colon keeps `user_orders_1` from matching `user_orders_10`.
fn list_cache_prefix(user_id: i64) -> String {
    format!("user_orders_{user_id}:")
}

#[derive(Clone)]
pub struct OrderService {
    pool: SqlitePool,
    notifier: Notifier,
    cache: TtlCache<String, PaginatedResponse<Order>>,
}

impl OrderService {
    pub fn new(pool: SqlitePool, notifier: Notifier) -> Self {
        Self {
            pool,
            notifier,
            cache: TtlCache::new(LIST_CACHE_TTL),
        }
    }

    /// List the orders visible to `actor`, cached per user and page.
    ///
    /// Admins see every order, everyone else only their own. Line items
    /// are always loaded with the orders.
    pub async fn list_orders(
        &self,
        actor: &CurrentUser,
        pagination: &PaginationQuery,
    ) -> AppResult<PaginatedResponse<Order>> {
        let per_page = pagination.limit();
        let key = list_cache_key(actor.id, pagination.page, per_page);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        let (orders, total) = order::list_for_user(
            &self.pool,
            actor.id,
            &actor.roles,
            per_page,
            pagination.offset(),
        )
        .await?;

        let response = PaginatedResponse::new(orders, pagination.page, per_page, total);
        self.cache.insert(key, response.clone());
        Ok(response)
    }

    /// Fetch one of the actor's orders. Orders of other users read as
    /// missing rather than forbidden.
    pub async fn get_order(&self, actor: &CurrentUser, order_id: i64) -> AppResult<Order> {
        order::find_by_id_for_user(&self.pool, order_id, actor.id)
            .await?
            .ok_or_else(|| AppError::with_message(ErrorCode::OrderNotFound, "Order not found"))
    }

    /// Create an order for `actor` from the submitted line items.
    pub async fn create_order(&self, actor: &CurrentUser, data: OrderCreate) -> AppResult<Order> {
        // 1. Resolve every line against the catalog and convert to cents
        let mut items = Vec::with_capacity(data.items.len());
        for item in &data.items {
            if product::find_by_id(&self.pool, item.product_id).await?.is_none() {
                return Err(AppError::validation(format!(
                    "Product {} does not exist",
                    item.product_id
                )));
            }
            if item.price < Decimal::ZERO {
                return Err(AppError::validation("Price cannot be negative"));
            }
            let price_cents = decimal_to_cents(item.price)
                .ok_or_else(|| AppError::validation("Price is out of range"))?;
            let total_cents = price_cents
                .checked_mul(item.quantity)
                .ok_or_else(|| AppError::validation("Line total is out of range"))?;
            items.push(NewOrderItem {
                product_id: item.product_id,
                quantity: item.quantity,
                price_cents,
                total_cents,
            });
        }

        // 2. Write the order and all items in one transaction
        let order = order::create(&self.pool, actor.id, &items).await?;

        // 3. Drop the creator's cached listings
        self.cache.remove_prefix(&list_cache_prefix(actor.id));

        Ok(order)
    }

    /// Cancel one of the actor's pending orders.
    pub async fn cancel_order(&self, actor: &CurrentUser, order_id: i64) -> AppResult<Order> {
        // 1. Load the order scoped to the actor
        let order = order::find_by_id_for_user(&self.pool, order_id, actor.id)
            .await?
            .ok_or_else(|| AppError::with_message(ErrorCode::OrderNotFound, "Order not found"))?;

        // 2. Only pending orders can be canceled
        if order.status != OrderStatus::Pending {
            return Err(AppError::with_message(
                ErrorCode::OrderNotPending,
                "Only pending orders can be canceled",
            ));
        }

        // 3. Guarded write; a concurrent transition makes this a no-op
        let updated = order::update_status_guarded(
            &self.pool,
            order.id,
            OrderStatus::Pending,
            OrderStatus::Canceled,
        )
        .await?;
        if !updated {
            return Err(self.classify_lost_update(actor, order_id).await);
        }

        // 4. Drop the owner's cached listings
        self.cache.remove_prefix(&list_cache_prefix(actor.id));

        // 5. Return the order as written
        self.get_order(actor, order_id).await
    }

    /// Move one of the actor's orders to `new_status`.
    ///
    /// Transitions are checked against the order lifecycle before the
    /// guarded write; the owner is notified afterwards.
    pub async fn update_order_status(
        &self,
        actor: &CurrentUser,
        order_id: i64,
        new_status: OrderStatus,
    ) -> AppResult<Order> {
        // 1. Load the order scoped to the actor
        let order = order::find_by_id_for_user(&self.pool, order_id, actor.id)
            .await?
            .ok_or_else(|| AppError::with_message(ErrorCode::OrderNotFound, "Order not found"))?;

        // 2. Reject transitions the lifecycle does not allow
        if !order.status.can_transition_to(new_status) {
            return Err(AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!(
                    "Cannot change order status from {} to {}",
                    order.status, new_status
                ),
            ));
        }

        // 3. Guarded write on the observed status
        let updated =
            order::update_status_guarded(&self.pool, order.id, order.status, new_status).await?;
        if !updated {
            return Err(self.classify_lost_update(actor, order_id).await);
        }

        // 4. Re-read the order as written
        let order = self.get_order(actor, order_id).await?;

        // 5. Notify the owner; delivery failure never fails the update
        if let Err(err) = self.notifier.order_status_changed(&order).await {
            warn!(order_id = order.id, error = %err, "Order status notification failed");
        }

        // 6. Drop the owner's cached listings
        self.cache.remove_prefix(&list_cache_prefix(order.user_id));

        Ok(order)
    }

    /// A guarded status write affected no rows. Re-read the order to tell
    /// a lost race from a vanished row.
    async fn classify_lost_update(&self, actor: &CurrentUser, order_id: i64) -> AppError {
        match order::find_by_id_for_user(&self.pool, order_id, actor.id).await {
            Ok(None) => AppError::with_message(ErrorCode::OrderNotFound, "Order not found"),
            Ok(Some(current)) if current.status != OrderStatus::Pending => AppError::with_message(
                ErrorCode::OrderNotPending,
                format!("Order is already {}", current.status),
            ),
            Ok(Some(_)) => AppError::with_message(
                ErrorCode::OrderUpdateFailed,
                "Failed to update order status",
            ),
            Err(err) => err.into(),
        }
    }
}
