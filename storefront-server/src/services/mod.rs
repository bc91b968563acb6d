//! Service layer - business logic over the repositories
//!
//! # Services
//!
//! - [`OrderService`] - order lifecycle with per-user list caching
//! - [`CatalogService`] - product management and discovery
//! - [`ReviewService`] - review submission, moderation and product review pages
//! - [`PaymentService`] - payment intent creation and confirmation
//! - [`Notifier`] - user notification delivery

pub mod catalog_service;
pub mod notifier;
pub mod order_service;
pub mod payment_service;
pub mod review_service;
pub mod spam;

pub use catalog_service::CatalogService;
pub use notifier::Notifier;
pub use order_service::OrderService;
pub use payment_service::{GatewayIntent, ManualGateway, PaymentGateway, PaymentService};
pub use review_service::ReviewService;
