//! Order lifecycle integration tests
//!
//! Exercises the order service against a real (in-memory) database:
//! creation with line items, role-scoped listing with caching, guarded
//! cancellation and status transitions with notifications.

mod common;

use common::*;
use shared::models::{OrderStatus, UserRole, kind};
use shared::request::PaginationQuery;
use storefront_server::ErrorCode;
use storefront_server::db::DbService;
use storefront_server::db::repository::{notification, order};
use storefront_server::{Config, ServerState};

fn first_page() -> PaginationQuery {
    PaginationQuery {
        page: 1,
        per_page: 15,
    }
}

// ========================================================================
// Creation
// ========================================================================

#[tokio::test]
async fn create_order_captures_prices_and_totals() {
    let state = test_state().await;
    let vendor = seed_user(&state, "Vendor", "vendor@example.com", &[UserRole::Vendor]).await;
    let customer = seed_user(&state, "Alice", "alice@example.com", &[UserRole::Customer]).await;
    let widget = seed_product(&state, &vendor, "Widget", "10.00").await;
    let gadget = seed_product(&state, &vendor, "Gadget", "20.00").await;

    let order = state
        .orders
        .create_order(
            &customer,
            order_payload(&[(widget.id, 2, "10.00"), (gadget.id, 1, "20.00")]),
        )
        .await
        .expect("create order");

    assert_eq!(order.user_id, customer.id);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 2);

    let widget_line = &order.items[0];
    assert_eq!(widget_line.product_id, widget.id);
    assert_eq!(widget_line.quantity, 2);
    assert_eq!(widget_line.price, dec("10.00"));
    assert_eq!(widget_line.total, dec("20.00"));

    let gadget_line = &order.items[1];
    assert_eq!(gadget_line.total, dec("20.00"));
}

#[tokio::test]
async fn create_order_rejects_unknown_product() {
    let state = test_state().await;
    let customer = seed_user(&state, "Alice", "alice@example.com", &[UserRole::Customer]).await;

    let err = state
        .orders
        .create_order(&customer, order_payload(&[(999, 1, "10.00")]))
        .await
        .expect_err("unknown product must be rejected");

    assert_eq!(err.code, ErrorCode::ValidationFailed);
    assert!(
        err.message.contains("999"),
        "message names the product: {}",
        err.message
    );
}

#[tokio::test]
async fn create_order_rejects_negative_price() {
    let state = test_state().await;
    let vendor = seed_user(&state, "Vendor", "vendor@example.com", &[UserRole::Vendor]).await;
    let customer = seed_user(&state, "Alice", "alice@example.com", &[UserRole::Customer]).await;
    let widget = seed_product(&state, &vendor, "Widget", "10.00").await;

    let err = state
        .orders
        .create_order(&customer, order_payload(&[(widget.id, 1, "-1.00")]))
        .await
        .expect_err("negative price must be rejected");

    assert_eq!(err.code, ErrorCode::ValidationFailed);
    assert_eq!(err.message, "Price cannot be negative");
}

// ========================================================================
// Listing and cache
// ========================================================================

#[tokio::test]
async fn customers_see_only_their_own_orders() {
    let state = test_state().await;
    let vendor = seed_user(&state, "Vendor", "vendor@example.com", &[UserRole::Vendor]).await;
    let alice = seed_user(&state, "Alice", "alice@example.com", &[UserRole::Customer]).await;
    let bob = seed_user(&state, "Bob", "bob@example.com", &[UserRole::Customer]).await;
    let admin = seed_user(&state, "Admin", "admin@example.com", &[UserRole::Admin]).await;
    let widget = seed_product(&state, &vendor, "Widget", "10.00").await;

    for user in [&alice, &bob] {
        state
            .orders
            .create_order(user, order_payload(&[(widget.id, 1, "10.00")]))
            .await
            .expect("create order");
    }

    let alice_page = state.orders.list_orders(&alice, &first_page()).await.unwrap();
    assert_eq!(alice_page.items.len(), 1);
    assert_eq!(alice_page.items[0].user_id, alice.id);
    assert_eq!(alice_page.pagination.total, 1);

    let admin_page = state.orders.list_orders(&admin, &first_page()).await.unwrap();
    assert_eq!(admin_page.pagination.total, 2);
}

#[tokio::test]
async fn listing_is_cached_until_a_mutation() {
    let state = test_state().await;
    let vendor = seed_user(&state, "Vendor", "vendor@example.com", &[UserRole::Vendor]).await;
    let alice = seed_user(&state, "Alice", "alice@example.com", &[UserRole::Customer]).await;
    let widget = seed_product(&state, &vendor, "Widget", "10.00").await;

    let order = state
        .orders
        .create_order(&alice, order_payload(&[(widget.id, 1, "10.00")]))
        .await
        .unwrap();

    // Prime the cache
    let page = state.orders.list_orders(&alice, &first_page()).await.unwrap();
    assert_eq!(page.items.len(), 1);

    // A write that bypasses the service is invisible while the cache holds
    order::create(&state.pool, alice.id, &[]).await.unwrap();
    let page = state.orders.list_orders(&alice, &first_page()).await.unwrap();
    assert_eq!(page.items.len(), 1, "cached page must not see the direct write");

    // A mutation through the service drops the cached pages
    state.orders.cancel_order(&alice, order.id).await.unwrap();
    let page = state.orders.list_orders(&alice, &first_page()).await.unwrap();
    assert_eq!(page.items.len(), 2);
}

// ========================================================================
// Cancellation
// ========================================================================

#[tokio::test]
async fn cancel_pending_order() {
    let state = test_state().await;
    let vendor = seed_user(&state, "Vendor", "vendor@example.com", &[UserRole::Vendor]).await;
    let alice = seed_user(&state, "Alice", "alice@example.com", &[UserRole::Customer]).await;
    let widget = seed_product(&state, &vendor, "Widget", "10.00").await;

    let order = state
        .orders
        .create_order(&alice, order_payload(&[(widget.id, 1, "10.00")]))
        .await
        .unwrap();

    let canceled = state.orders.cancel_order(&alice, order.id).await.unwrap();
    assert_eq!(canceled.status, OrderStatus::Canceled);
    assert_eq!(canceled.items.len(), 1, "line items stay attached");
}

#[tokio::test]
async fn cancel_is_rejected_once_terminal() {
    let state = test_state().await;
    let vendor = seed_user(&state, "Vendor", "vendor@example.com", &[UserRole::Vendor]).await;
    let alice = seed_user(&state, "Alice", "alice@example.com", &[UserRole::Customer]).await;
    let widget = seed_product(&state, &vendor, "Widget", "10.00").await;

    let order = state
        .orders
        .create_order(&alice, order_payload(&[(widget.id, 1, "10.00")]))
        .await
        .unwrap();

    state.orders.cancel_order(&alice, order.id).await.unwrap();

    let err = state
        .orders
        .cancel_order(&alice, order.id)
        .await
        .expect_err("second cancel must fail");
    assert_eq!(err.code, ErrorCode::OrderNotPending);
    assert_eq!(err.message, "Only pending orders can be canceled");
}

#[tokio::test]
async fn foreign_orders_read_as_missing() {
    let state = test_state().await;
    let vendor = seed_user(&state, "Vendor", "vendor@example.com", &[UserRole::Vendor]).await;
    let alice = seed_user(&state, "Alice", "alice@example.com", &[UserRole::Customer]).await;
    let bob = seed_user(&state, "Bob", "bob@example.com", &[UserRole::Customer]).await;
    let widget = seed_product(&state, &vendor, "Widget", "10.00").await;

    let order = state
        .orders
        .create_order(&alice, order_payload(&[(widget.id, 1, "10.00")]))
        .await
        .unwrap();

    // Bob can neither read nor cancel Alice's order
    let err = state.orders.get_order(&bob, order.id).await.expect_err("hidden");
    assert_eq!(err.code, ErrorCode::OrderNotFound);

    let err = state
        .orders
        .cancel_order(&bob, order.id)
        .await
        .expect_err("hidden");
    assert_eq!(err.code, ErrorCode::OrderNotFound);

    // And the order is untouched
    let order = state.orders.get_order(&alice, order.id).await.unwrap();
    assert_eq!(order.status, OrderStatus::Pending);
}

// ========================================================================
// Status transitions
// ========================================================================

#[tokio::test]
async fn completing_an_order_notifies_the_owner() {
    let state = test_state().await;
    let vendor = seed_user(&state, "Vendor", "vendor@example.com", &[UserRole::Vendor]).await;
    // A vendor buying on the platform holds both roles
    let shopkeeper = seed_user(
        &state,
        "Shop",
        "shop@example.com",
        &[UserRole::Customer, UserRole::Vendor],
    )
    .await;
    let widget = seed_product(&state, &vendor, "Widget", "10.00").await;

    let order = state
        .orders
        .create_order(&shopkeeper, order_payload(&[(widget.id, 1, "10.00")]))
        .await
        .unwrap();

    let updated = state
        .orders
        .update_order_status(&shopkeeper, order.id, OrderStatus::Completed)
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Completed);

    let notifications = notification::find_by_user(&state.pool, shopkeeper.id)
        .await
        .unwrap();
    let status_note = notifications
        .iter()
        .find(|n| n.kind == kind::ORDER_STATUS)
        .expect("owner got an order status notification");
    assert_eq!(status_note.data["order_id"], serde_json::json!(order.id));
    assert_eq!(status_note.data["status"], serde_json::json!("completed"));
}

#[tokio::test]
async fn terminal_orders_reject_further_transitions() {
    let state = test_state().await;
    let vendor = seed_user(&state, "Vendor", "vendor@example.com", &[UserRole::Vendor]).await;
    let shopkeeper = seed_user(
        &state,
        "Shop",
        "shop@example.com",
        &[UserRole::Customer, UserRole::Vendor],
    )
    .await;
    let widget = seed_product(&state, &vendor, "Widget", "10.00").await;

    let order = state
        .orders
        .create_order(&shopkeeper, order_payload(&[(widget.id, 1, "10.00")]))
        .await
        .unwrap();

    state
        .orders
        .update_order_status(&shopkeeper, order.id, OrderStatus::Completed)
        .await
        .unwrap();

    let err = state
        .orders
        .update_order_status(&shopkeeper, order.id, OrderStatus::Canceled)
        .await
        .expect_err("completed orders are final");
    assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
    assert_eq!(
        err.message,
        "Cannot change order status from completed to canceled"
    );
}

#[tokio::test]
async fn guarded_write_is_a_noop_when_the_status_moved() {
    let state = test_state().await;
    let vendor = seed_user(&state, "Vendor", "vendor@example.com", &[UserRole::Vendor]).await;
    let alice = seed_user(&state, "Alice", "alice@example.com", &[UserRole::Customer]).await;
    let widget = seed_product(&state, &vendor, "Widget", "10.00").await;

    let order = state
        .orders
        .create_order(&alice, order_payload(&[(widget.id, 1, "10.00")]))
        .await
        .unwrap();

    // First writer wins
    let won = order::update_status_guarded(
        &state.pool,
        order.id,
        OrderStatus::Pending,
        OrderStatus::Completed,
    )
    .await
    .unwrap();
    assert!(won);

    // Second writer observed pending but the row moved on
    let won = order::update_status_guarded(
        &state.pool,
        order.id,
        OrderStatus::Pending,
        OrderStatus::Canceled,
    )
    .await
    .unwrap();
    assert!(!won, "stale guard must not overwrite");

    let current = state.orders.get_order(&alice, order.id).await.unwrap();
    assert_eq!(current.status, OrderStatus::Completed);
}

// ========================================================================
// Persistence
// ========================================================================

#[tokio::test]
async fn orders_survive_reopening_the_database() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite:{}", dir.path().join("storefront.db").display());

    let order_id;
    {
        let db = DbService::new(&url).await.expect("open database");
        let state = ServerState::from_parts(Config::from_env(), db.pool.clone());
        let vendor = seed_user(&state, "Vendor", "vendor@example.com", &[UserRole::Vendor]).await;
        let alice = seed_user(&state, "Alice", "alice@example.com", &[UserRole::Customer]).await;
        let widget = seed_product(&state, &vendor, "Widget", "10.00").await;

        let order = state
            .orders
            .create_order(&alice, order_payload(&[(widget.id, 2, "10.00")]))
            .await
            .unwrap();
        order_id = order.id;

        db.pool.close().await;
    }

    let db = DbService::new(&url).await.expect("reopen database");
    let order = order::find_by_id(&db.pool, order_id)
        .await
        .unwrap()
        .expect("order persisted");
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].total, dec("20.00"));
}
