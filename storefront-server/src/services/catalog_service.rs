//! Catalog Service - product management and discovery
//!
//! Listing is role-scoped: vendors see their own products, admins and
//! customers the whole catalog. Creation announces the product to every
//! user; vendors may only modify products they own.

use shared::models::{Product, ProductCreate, ProductFilter, ProductUpdate, UserRole};
use shared::request::PaginationQuery;
use shared::response::{MessageResponse, PaginatedResponse};
use sqlx::SqlitePool;
use tracing::warn;

use super::Notifier;
use crate::auth::CurrentUser;
use crate::db::repository::product;
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Clone)]
pub struct CatalogService {
    pool: SqlitePool,
    notifier: Notifier,
}

impl CatalogService {
    pub fn new(pool: SqlitePool, notifier: Notifier) -> Self {
        Self { pool, notifier }
    }

    /// List products visible to `actor`.
    ///
    /// Admins and customers browse the whole catalog; a user who is only
    /// a vendor manages their own products.
    pub async fn list_products(
        &self,
        actor: &CurrentUser,
        pagination: &PaginationQuery,
    ) -> AppResult<PaginatedResponse<Product>> {
        let whole_catalog = actor.is_admin() || actor.roles.contains(&UserRole::Customer);
        let vendor_scope = if whole_catalog { None } else { Some(actor.id) };

        let per_page = pagination.limit();
        let (products, total) =
            product::find_paginated(&self.pool, vendor_scope, per_page, pagination.offset())
                .await?;
        Ok(PaginatedResponse::new(
            products,
            pagination.page,
            per_page,
            total,
        ))
    }

    pub async fn get_product(&self, product_id: i64) -> AppResult<Product> {
        product::find_by_id(&self.pool, product_id)
            .await?
            .ok_or_else(|| AppError::with_message(ErrorCode::ProductNotFound, "Product not found"))
    }

    /// Create a product owned by `actor` and announce it to every user.
    pub async fn create_product(
        &self,
        actor: &CurrentUser,
        data: ProductCreate,
    ) -> AppResult<Product> {
        // 1. Write the product under the acting vendor
        let product = product::create(&self.pool, actor.id, data).await?;

        // 2. Announce it; delivery failure never fails the create
        if let Err(err) = self.notifier.product_created(&product).await {
            warn!(product_id = product.id, error = %err, "New product announcement failed");
        }

        Ok(product)
    }

    /// Update a product. Vendors may only update their own; admins any.
    pub async fn update_product(
        &self,
        actor: &CurrentUser,
        product_id: i64,
        data: ProductUpdate,
    ) -> AppResult<Product> {
        let product = self.get_product(product_id).await?;
        check_ownership(actor, &product)?;
        Ok(product::update(&self.pool, product_id, data).await?)
    }

    /// Delete a product. Vendors may only delete their own; admins any.
    pub async fn delete_product(
        &self,
        actor: &CurrentUser,
        product_id: i64,
    ) -> AppResult<MessageResponse> {
        let product = self.get_product(product_id).await?;
        check_ownership(actor, &product)?;
        product::delete(&self.pool, product_id).await?;
        Ok(MessageResponse::new("Product deleted successfully"))
    }

    /// Keyword search across name and description. No matches is a normal
    /// empty list, not an error.
    pub async fn search_products(&self, query: &str) -> AppResult<Vec<Product>> {
        Ok(product::search(&self.pool, query).await?)
    }

    pub async fn filter_products(
        &self,
        filter: &ProductFilter,
        pagination: &PaginationQuery,
    ) -> AppResult<PaginatedResponse<Product>> {
        let per_page = pagination.limit();
        let (products, total) =
            product::find_filtered(&self.pool, filter, per_page, pagination.offset()).await?;
        Ok(PaginatedResponse::new(
            products,
            pagination.page,
            per_page,
            total,
        ))
    }
}

fn check_ownership(actor: &CurrentUser, product: &Product) -> AppResult<()> {
    if !actor.is_admin() && product.vendor_id != actor.id {
        return Err(AppError::forbidden("You do not own this product"));
    }
    Ok(())
}
