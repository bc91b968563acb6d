//! Account surface integration tests
//!
//! The notification feed, the caller's profile and roles, admin-gated
//! role administration, and the category and tag taxonomy routes.

mod common;

use common::*;
use http::{Method, StatusCode};
use serde_json::json;
use shared::models::{ProductCreate, UserRole};

// ========================================================================
// Notification feed
// ========================================================================

#[tokio::test]
async fn the_feed_tracks_unread_until_marked() {
    let state = test_state().await;
    let vendor = seed_user(&state, "Vendor", "vendor@example.com", &[UserRole::Vendor]).await;
    let alice = seed_user(&state, "Alice", "alice@example.com", &[UserRole::Customer]).await;
    let app = test_app(&state);
    let token = token_for(&state, &alice);

    // An announcement lands in everyone's feed
    state
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

    let (status, feed) = api_call(&app, Method::GET, "/api/notifications", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feed["notifications"].as_array().map(Vec::len), Some(1));
    assert_eq!(feed["unread_notifications"].as_array().map(Vec::len), Some(1));

    let (status, body) = api_call(
        &app,
        Method::POST,
        "/api/notifications/mark-as-read",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Notifications marked as read");

    // Read notifications stay in the feed but leave the unread subset
    let (_, feed) = api_call(&app, Method::GET, "/api/notifications", Some(&token), None).await;
    assert_eq!(feed["notifications"].as_array().map(Vec::len), Some(1));
    assert_eq!(feed["unread_notifications"].as_array().map(Vec::len), Some(0));
}

// ========================================================================
// Profile
// ========================================================================

#[tokio::test]
async fn callers_read_their_own_profile_and_roles() {
    let state = test_state().await;
    let shopkeeper = seed_user(
        &state,
        "Shop",
        "shop@example.com",
        &[UserRole::Customer, UserRole::Vendor],
    )
    .await;
    let app = test_app(&state);
    let token = token_for(&state, &shopkeeper);

    let (status, profile) = api_call(&app, Method::GET, "/api/user", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["name"], "Shop");
    assert_eq!(profile["email"], "shop@example.com");

    let (status, body) = api_call(&app, Method::GET, "/api/user/roles", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let roles: Vec<String> = serde_json::from_value(body["roles"].clone()).expect("roles array");
    assert_eq!(roles.len(), 2);
    assert!(roles.contains(&"customer".to_string()));
    assert!(roles.contains(&"vendor".to_string()));
}

// ========================================================================
// Role administration
// ========================================================================

#[tokio::test]
async fn admins_grant_and_revoke_roles() {
    let state = test_state().await;
    let admin = seed_user(&state, "Admin", "admin@example.com", &[UserRole::Admin]).await;
    let cara = seed_user(&state, "Cara", "cara@example.com", &[UserRole::Customer]).await;
    let app = test_app(&state);
    let token = token_for(&state, &admin);

    let (status, body) = api_call(
        &app,
        Method::POST,
        &format!("/api/users/{}/assign-role", cara.id),
        Some(&token),
        Some(json!({"role": "vendor"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Role assigned successfully");
    let roles: Vec<String> =
        serde_json::from_value(body["user"]["roles"].clone()).expect("roles array");
    assert!(roles.contains(&"vendor".to_string()));

    let (status, body) = api_call(
        &app,
        Method::POST,
        &format!("/api/users/{}/remove-role", cara.id),
        Some(&token),
        Some(json!({"role": "vendor"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Role removed successfully");

    // Revoking a role the user does not hold is reported as such
    let (status, body) = api_call(
        &app,
        Method::POST,
        &format!("/api/users/{}/remove-role", cara.id),
        Some(&token),
        Some(json!({"role": "vendor"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 3102);
}

#[tokio::test]
async fn role_administration_is_admin_only() {
    let state = test_state().await;
    let cara = seed_user(&state, "Cara", "cara@example.com", &[UserRole::Customer]).await;
    let app = test_app(&state);
    let token = token_for(&state, &cara);

    let (status, body) = api_call(
        &app,
        Method::POST,
        &format!("/api/users/{}/assign-role", cara.id),
        Some(&token),
        Some(json!({"role": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2003);
}

// ========================================================================
// Taxonomy
// ========================================================================

#[tokio::test]
async fn vendors_curate_categories_and_tags() {
    let state = test_state().await;
    let vendor = seed_user(&state, "Vendor", "vendor@example.com", &[UserRole::Vendor]).await;
    let app = test_app(&state);
    let token = token_for(&state, &vendor);

    // Create, then trip over the unique name
    let (status, category) = api_call(
        &app,
        Method::POST,
        "/api/categories",
        Some(&token),
        Some(json!({"name": "Kitchen"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(category["name"], "Kitchen");
    let category_id = category["id"].as_i64().expect("category id");

    let (status, body) = api_call(
        &app,
        Method::POST,
        "/api/categories",
        Some(&token),
        Some(json!({"name": "Kitchen"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6102);

    // Rename and delete
    let (status, renamed) = api_call(
        &app,
        Method::PUT,
        &format!("/api/categories/{category_id}"),
        Some(&token),
        Some(json!({"name": "Kitchenware"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "Kitchenware");

    let (status, body) = api_call(
        &app,
        Method::DELETE,
        &format!("/api/categories/{category_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Category deleted");

    // Tags follow the same surface
    let (status, tag) = api_call(
        &app,
        Method::POST,
        "/api/tags",
        Some(&token),
        Some(json!({"name": "sale"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tag["name"], "sale");

    let (status, body) = api_call(
        &app,
        Method::POST,
        "/api/tags",
        Some(&token),
        Some(json!({"name": "sale"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6202);

    let (status, listing) = api_call(&app, Method::GET, "/api/tags", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn customers_browse_but_do_not_curate() {
    let state = test_state().await;
    let cara = seed_user(&state, "Cara", "cara@example.com", &[UserRole::Customer]).await;
    let app = test_app(&state);
    let token = token_for(&state, &cara);

    let (status, body) = api_call(&app, Method::GET, "/api/categories", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(0));

    let (status, _) = api_call(
        &app,
        Method::POST,
        "/api/categories",
        Some(&token),
        Some(json!({"name": "Kitchen"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
