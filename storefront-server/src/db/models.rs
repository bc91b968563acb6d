//! Row types private to the SQLite layer
//!
//! Money is stored as integer cents. These row structs carry the raw column
//! values and convert into the shared API models at the repository boundary.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use shared::models::{OrderLineItem, Product};
use sqlx::FromRow;

/// Convert integer cents into a two-decimal amount.
pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Convert a decimal amount into integer cents.
///
/// Rounds to two decimal places first. Returns `None` when the amount does
/// not fit an `i64` cent count.
pub fn decimal_to_cents(amount: Decimal) -> Option<i64> {
    (amount.round_dp(2) * Decimal::ONE_HUNDRED).to_i64()
}

#[derive(Debug, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price_cents: i64,
    pub stock: i64,
    pub rating: Option<f64>,
    pub category_id: Option<i64>,
    pub tag_id: Option<i64>,
    pub vendor_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: cents_to_decimal(row.price_cents),
            stock: row.stock,
            rating: row.rating,
            category_id: row.category_id,
            tag_id: row.tag_id,
            vendor_id: row.vendor_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct OrderItemRow {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub price_cents: i64,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrderItemRow> for OrderLineItem {
    fn from(row: OrderItemRow) -> Self {
        OrderLineItem {
            id: row.id,
            order_id: row.order_id,
            product_id: row.product_id,
            quantity: row.quantity,
            price: cents_to_decimal(row.price_cents),
            total: cents_to_decimal(row.total_cents),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
