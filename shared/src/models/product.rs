//! Product Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Product entity
///
/// `price` uses decimal currency units (stored as integer cents in the
/// database). `rating` is the stored aggregate of approved review ratings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i64,
    pub rating: Option<f64>,
    pub category_id: Option<i64>,
    pub tag_id: Option<i64>,
    /// Owning vendor (user ID)
    pub vendor_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductCreate {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[serde(default)]
    pub stock: i64,
    pub category_id: Option<i64>,
    pub tag_id: Option<i64>,
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductUpdate {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i64>,
    pub category_id: Option<i64>,
    pub tag_id: Option<i64>,
}

/// Sort order for product listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    PriceAsc,
    PriceDesc,
    /// Highest rated first
    Rating,
}

/// Product listing filter (all fields optional, combined with AND)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFilter {
    /// Substring match against name or description
    pub query: Option<String>,
    pub category_id: Option<i64>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Minimum stored rating (inclusive)
    pub min_rating: Option<f64>,
    /// When true, only products with stock > 0
    pub in_stock: Option<bool>,
    pub sort_by: Option<ProductSort>,
}

/// Keyword search query
#[derive(Debug, Clone, Deserialize)]
pub struct ProductSearchQuery {
    #[serde(default)]
    pub query: String,
}
