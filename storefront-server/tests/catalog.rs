//! Catalog integration tests
//!
//! Product listing scopes, ownership checks on mutation, the new-product
//! announcement fanout, and filtering and search over the catalog.

mod common;

use common::*;
use shared::models::{
    ProductCreate, ProductFilter, ProductSort, ReviewCreate, UserRole, kind,
};
use shared::request::PaginationQuery;
use storefront_server::db::repository::{notification, product};
use storefront_server::{ErrorCode, ServerState};

fn page() -> PaginationQuery {
    PaginationQuery::default()
}

// ========================================================================
// Listing scope
// ========================================================================

#[tokio::test]
async fn vendors_manage_their_own_listings() {
    let state = test_state().await;
    let anna = seed_user(&state, "Anna", "anna@example.com", &[UserRole::Vendor]).await;
    let ben = seed_user(&state, "Ben", "ben@example.com", &[UserRole::Vendor]).await;
    let customer = seed_user(&state, "Cara", "cara@example.com", &[UserRole::Customer]).await;
    let admin = seed_user(&state, "Admin", "admin@example.com", &[UserRole::Admin]).await;

    seed_product(&state, &anna, "Kettle", "25.00").await;
    seed_product(&state, &anna, "Toaster", "35.00").await;
    seed_product(&state, &ben, "Blender", "45.00").await;

    // A pure vendor sees only their own products
    let listing = state.catalog.list_products(&anna, &page()).await.unwrap();
    assert_eq!(listing.pagination.total, 2);
    assert!(listing.items.iter().all(|p| p.vendor_id == anna.id));

    // Customers and admins browse the whole catalog
    let listing = state.catalog.list_products(&customer, &page()).await.unwrap();
    assert_eq!(listing.pagination.total, 3);

    let listing = state.catalog.list_products(&admin, &page()).await.unwrap();
    assert_eq!(listing.pagination.total, 3);
}

// ========================================================================
// Announcements
// ========================================================================

#[tokio::test]
async fn new_products_are_announced_to_every_user() {
    let state = test_state().await;
    let vendor = seed_user(&state, "Vendor", "vendor@example.com", &[UserRole::Vendor]).await;
    let alice = seed_user(&state, "Alice", "alice@example.com", &[UserRole::Customer]).await;
    let bob = seed_user(&state, "Bob", "bob@example.com", &[UserRole::Customer]).await;

    let product = state
        .catalog
        .create_product(
            &vendor,
            ProductCreate {
                name: "Kettle".into(),
                description: "Stovetop kettle".into(),
                price: dec("25.00"),
                stock: 5,
                category_id: None,
                tag_id: None,
            },
        )
        .await
        .expect("create product");

    // Everyone on the platform hears about it, the vendor included
    for user in [&vendor, &alice, &bob] {
        let notifications = notification::find_by_user(&state.pool, user.id).await.unwrap();
        let announcement = notifications
            .iter()
            .find(|n| n.kind == kind::NEW_PRODUCT)
            .expect("new product announcement");
        assert_eq!(announcement.data["product_id"], serde_json::json!(product.id));
        assert_eq!(announcement.data["name"], serde_json::json!("Kettle"));
        assert!(!announcement.is_read());
    }
}

// ========================================================================
// Ownership
// ========================================================================

#[tokio::test]
async fn vendors_cannot_touch_foreign_products() {
    let state = test_state().await;
    let anna = seed_user(&state, "Anna", "anna@example.com", &[UserRole::Vendor]).await;
    let ben = seed_user(&state, "Ben", "ben@example.com", &[UserRole::Vendor]).await;
    let kettle = seed_product(&state, &anna, "Kettle", "25.00").await;

    let rename = serde_json::from_value(serde_json::json!({"name": "Stolen Kettle"})).unwrap();
    let err = state
        .catalog
        .update_product(&ben, kettle.id, rename)
        .await
        .expect_err("foreign update must be rejected");
    assert_eq!(err.code, ErrorCode::PermissionDenied);
    assert_eq!(err.message, "You do not own this product");

    let err = state
        .catalog
        .delete_product(&ben, kettle.id)
        .await
        .expect_err("foreign delete must be rejected");
    assert_eq!(err.code, ErrorCode::PermissionDenied);

    // The owner still can
    let response = state.catalog.delete_product(&anna, kettle.id).await.unwrap();
    assert_eq!(response.message, "Product deleted successfully");
    let err = state.catalog.get_product(kettle.id).await.expect_err("gone");
    assert_eq!(err.code, ErrorCode::ProductNotFound);
}

#[tokio::test]
async fn admins_moderate_any_product() {
    let state = test_state().await;
    let anna = seed_user(&state, "Anna", "anna@example.com", &[UserRole::Vendor]).await;
    let admin = seed_user(&state, "Admin", "admin@example.com", &[UserRole::Admin]).await;
    let kettle = seed_product(&state, &anna, "Kettle", "25.00").await;

    let rename = serde_json::from_value(serde_json::json!({"name": "Electric Kettle"})).unwrap();
    let updated = state
        .catalog
        .update_product(&admin, kettle.id, rename)
        .await
        .expect("admins update anything");
    assert_eq!(updated.name, "Electric Kettle");
    assert_eq!(updated.price, dec("25.00"), "unset fields keep their value");

    state
        .catalog
        .delete_product(&admin, kettle.id)
        .await
        .expect("admins delete anything");
}

// ========================================================================
// Filtering and search
// ========================================================================

async fn seed_filter_fixtures(state: &ServerState) -> (i64, i64, i64) {
    let vendor = seed_user(state, "Vendor", "vendor@example.com", &[UserRole::Vendor]).await;
    let cheap = seed_product(state, &vendor, "Mug", "5.00").await;
    let dear = seed_product(state, &vendor, "Grinder", "50.00").await;
    // Mid-priced but sold out
    let mid = product::create(
        &state.pool,
        vendor.id,
        ProductCreate {
            name: "Kettle".into(),
            description: "Kettle description".into(),
            price: dec("15.00"),
            stock: 0,
            category_id: None,
            tag_id: None,
        },
    )
    .await
    .expect("create product");
    (cheap.id, mid.id, dear.id)
}

#[tokio::test]
async fn filters_narrow_by_price_stock_and_rating() {
    let state = test_state().await;
    let (_cheap, _mid, dear) = seed_filter_fixtures(&state).await;

    // Price range keeps the kettle and the grinder
    let filter = ProductFilter {
        min_price: Some(dec("10.00")),
        max_price: Some(dec("60.00")),
        ..Default::default()
    };
    let result = state.catalog.filter_products(&filter, &page()).await.unwrap();
    assert_eq!(result.pagination.total, 2);

    // Adding the stock clause drops the sold-out kettle
    let filter = ProductFilter {
        min_price: Some(dec("10.00")),
        max_price: Some(dec("60.00")),
        in_stock: Some(true),
        ..Default::default()
    };
    let result = state.catalog.filter_products(&filter, &page()).await.unwrap();
    assert_eq!(result.pagination.total, 1);
    assert_eq!(result.items[0].id, dear);

    // Rating filters skip unrated products entirely
    let reviewer = seed_user(&state, "Rita", "rita@example.com", &[UserRole::Customer]).await;
    state
        .reviews
        .submit_review(
            &reviewer,
            dear,
            ReviewCreate {
                review: "Grinds evenly, quiet for the size.".into(),
                rating: 5,
            },
        )
        .await
        .expect("submit review");

    let filter = ProductFilter {
        min_rating: Some(4.0),
        ..Default::default()
    };
    let result = state.catalog.filter_products(&filter, &page()).await.unwrap();
    assert_eq!(result.pagination.total, 1);
    assert_eq!(result.items[0].id, dear);
    assert_eq!(result.items[0].rating, Some(5.0));
}

#[tokio::test]
async fn sorting_orders_the_page_by_price() {
    let state = test_state().await;
    let (cheap, _mid, dear) = seed_filter_fixtures(&state).await;

    let filter = ProductFilter {
        sort_by: Some(ProductSort::PriceAsc),
        ..Default::default()
    };
    let result = state.catalog.filter_products(&filter, &page()).await.unwrap();
    assert_eq!(result.items.first().map(|p| p.id), Some(cheap));

    let filter = ProductFilter {
        sort_by: Some(ProductSort::PriceDesc),
        ..Default::default()
    };
    let result = state.catalog.filter_products(&filter, &page()).await.unwrap();
    assert_eq!(result.items.first().map(|p| p.id), Some(dear));
}

#[tokio::test]
async fn search_scans_names_and_descriptions() {
    let state = test_state().await;
    let vendor = seed_user(&state, "Vendor", "vendor@example.com", &[UserRole::Vendor]).await;
    seed_product(&state, &vendor, "Coffee Grinder", "50.00").await;
    product::create(
        &state.pool,
        vendor.id,
        ProductCreate {
            name: "Espresso Machine".into(),
            description: "Pump driven, integrated grinder".into(),
            price: dec("200.00"),
            stock: 2,
            category_id: None,
            tag_id: None,
        },
    )
    .await
    .expect("create product");

    let hits = state.catalog.search_products("grinder").await.unwrap();
    assert_eq!(hits.len(), 2, "matches in name and in description");

    // No matches is an empty page, not an error
    let hits = state.catalog.search_products("toaster").await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn missing_products_are_reported() {
    let state = test_state().await;
    let err = state.catalog.get_product(999).await.expect_err("missing");
    assert_eq!(err.code, ErrorCode::ProductNotFound);
    assert_eq!(err.message, "Product not found");
}
