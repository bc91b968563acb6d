//! Product Repository
//!
//! Prices cross this boundary as decimals; the cent conversion happens here
//! so callers never see raw integer money.

use chrono::Utc;
use shared::models::{Product, ProductCreate, ProductFilter, ProductSort, ProductUpdate};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{RepoError, RepoResult};
use crate::db::models::{ProductRow, decimal_to_cents};

const COLUMNS: &str =
    "id, name, description, price_cents, stock, rating, category_id, tag_id, vendor_id, created_at, updated_at";

/// Page of products plus the total count. `vendor_scope` narrows the
/// listing to one vendor's products; `None` lists the whole catalog.
pub async fn find_paginated(
    pool: &SqlitePool,
    vendor_scope: Option<i64>,
    limit: u32,
    offset: u64,
) -> RepoResult<(Vec<Product>, u64)> {
    let (rows, total) = match vendor_scope {
        Some(vendor_id) => {
            let total =
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE vendor_id = ?")
                    .bind(vendor_id)
                    .fetch_one(pool)
                    .await?;
            let rows = sqlx::query_as::<_, ProductRow>(&format!(
                "SELECT {COLUMNS} FROM products WHERE vendor_id = ? ORDER BY id LIMIT ? OFFSET ?"
            ))
            .bind(vendor_id)
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(pool)
            .await?;
            (rows, total)
        }
        None => {
            let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
                .fetch_one(pool)
                .await?;
            let rows = sqlx::query_as::<_, ProductRow>(&format!(
                "SELECT {COLUMNS} FROM products ORDER BY id LIMIT ? OFFSET ?"
            ))
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(pool)
            .await?;
            (rows, total)
        }
    };
    Ok((rows.into_iter().map(Into::into).collect(), total as u64))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let row = sqlx::query_as::<_, ProductRow>(&format!("SELECT {COLUMNS} FROM products WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Into::into))
}

/// Free-text search across name and description.
pub async fn search(pool: &SqlitePool, query: &str) -> RepoResult<Vec<Product>> {
    let pattern = format!("%{query}%");
    let rows = sqlx::query_as::<_, ProductRow>(&format!(
        "SELECT {COLUMNS} FROM products WHERE name LIKE ?1 OR description LIKE ?1 ORDER BY id"
    ))
    .bind(pattern)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Filtered product page plus the total count of matching rows.
///
/// Every clause is optional; the text query matches name or description as a
/// substring. Unset sort falls back to an id ordering.
pub async fn find_filtered(
    pool: &SqlitePool,
    filter: &ProductFilter,
    limit: u32,
    offset: u64,
) -> RepoResult<(Vec<Product>, u64)> {
    let mut count_qb: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT COUNT(*) FROM products WHERE 1 = 1");
    push_filters(&mut count_qb, filter)?;
    let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    let mut qb: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {COLUMNS} FROM products WHERE 1 = 1"));
    push_filters(&mut qb, filter)?;

    match filter.sort_by {
        Some(ProductSort::PriceAsc) => qb.push(" ORDER BY price_cents ASC"),
        Some(ProductSort::PriceDesc) => qb.push(" ORDER BY price_cents DESC"),
        Some(ProductSort::Rating) => qb.push(" ORDER BY rating DESC"),
        None => qb.push(" ORDER BY id"),
    };
    qb.push(" LIMIT ");
    qb.push_bind(limit as i64);
    qb.push(" OFFSET ");
    qb.push_bind(offset as i64);

    let rows: Vec<ProductRow> = qb.build_query_as().fetch_all(pool).await?;
    Ok((rows.into_iter().map(Into::into).collect(), total as u64))
}

fn push_filters(qb: &mut QueryBuilder<Sqlite>, filter: &ProductFilter) -> RepoResult<()> {
    if let Some(query) = filter.query.as_deref()
        && !query.is_empty()
    {
        let pattern = format!("%{query}%");
        qb.push(" AND (name LIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR description LIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }
    if let Some(category_id) = filter.category_id {
        qb.push(" AND category_id = ");
        qb.push_bind(category_id);
    }
    if let Some(min_price) = filter.min_price {
        let cents = decimal_to_cents(min_price)
            .ok_or_else(|| RepoError::Validation("min_price is out of range".into()))?;
        qb.push(" AND price_cents >= ");
        qb.push_bind(cents);
    }
    if let Some(max_price) = filter.max_price {
        let cents = decimal_to_cents(max_price)
            .ok_or_else(|| RepoError::Validation("max_price is out of range".into()))?;
        qb.push(" AND price_cents <= ");
        qb.push_bind(cents);
    }
    if let Some(min_rating) = filter.min_rating {
        qb.push(" AND rating >= ");
        qb.push_bind(min_rating);
    }
    if filter.in_stock == Some(true) {
        qb.push(" AND stock > 0");
    }
    Ok(())
}

pub async fn create(pool: &SqlitePool, vendor_id: i64, data: ProductCreate) -> RepoResult<Product> {
    let price_cents = decimal_to_cents(data.price)
        .ok_or_else(|| RepoError::Validation("price is out of range".into()))?;

    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO products (name, description, price_cents, stock, category_id, tag_id, vendor_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(price_cents)
    .bind(data.stock)
    .bind(data.category_id)
    .bind(data.tag_id)
    .bind(vendor_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, result.last_insert_rowid())
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    let price_cents = match data.price {
        Some(price) => Some(
            decimal_to_cents(price)
                .ok_or_else(|| RepoError::Validation("price is out of range".into()))?,
        ),
        None => None,
    };

    let result = sqlx::query(
        "UPDATE products SET name = COALESCE(?1, name), description = COALESCE(?2, description), price_cents = COALESCE(?3, price_cents), stock = COALESCE(?4, stock), category_id = COALESCE(?5, category_id), tag_id = COALESCE(?6, tag_id), updated_at = ?7 WHERE id = ?8",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(price_cents)
    .bind(data.stock)
    .bind(data.category_id)
    .bind(data.tag_id)
    .bind(Utc::now())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Recompute the denormalized rating column from approved reviews.
pub async fn refresh_rating(pool: &SqlitePool, product_id: i64) -> RepoResult<()> {
    sqlx::query(
        "UPDATE products SET rating = (SELECT AVG(rating) FROM reviews WHERE product_id = ?1 AND status = 'approved') WHERE id = ?1",
    )
    .bind(product_id)
    .execute(pool)
    .await?;
    Ok(())
}
