//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness and component checks
//! - [`auth`] - registration and login
//! - [`users`] - profile and role administration
//! - [`products`] - product management, search and filtering
//! - [`categories`] - category management
//! - [`tags`] - tag management
//! - [`orders`] - order lifecycle
//! - [`reviews`] - review submission and moderation
//! - [`notifications`] - notification feed
//! - [`payments`] - payment intents
//!
//! Each module exposes `router()`; permission layers are applied per
//! route group inside the module.

pub mod auth;
pub mod categories;
pub mod health;
pub mod notifications;
pub mod orders;
pub mod payments;
pub mod products;
pub mod reviews;
pub mod tags;
pub mod users;
