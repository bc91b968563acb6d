use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::{CatalogService, Notifier, OrderService, PaymentService, ReviewService};
use crate::utils::AppError;

/// Shared application state
///
/// Cloned into every handler; all fields are cheap to clone (pools and
/// services share their internals through `Arc`).
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub notifier: Notifier,
    pub orders: OrderService,
    pub catalog: CatalogService,
    pub reviews: ReviewService,
    pub payments: PaymentService,
}

impl ServerState {
    /// Open the database, run migrations and wire up the services.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_url).await?;
        Ok(Self::from_parts(config.clone(), db.pool))
    }

    /// Build state over an already opened pool.
    ///
    /// Tests use this with an in-memory database.
    pub fn from_parts(config: Config, pool: SqlitePool) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let notifier = Notifier::new(pool.clone());
        let orders = OrderService::new(pool.clone(), notifier.clone());
        let catalog = CatalogService::new(pool.clone(), notifier.clone());
        let reviews = ReviewService::new(pool.clone(), notifier.clone());
        let payments = PaymentService::new(pool.clone());

        Self {
            config,
            pool,
            jwt_service,
            notifier,
            orders,
            catalog,
            reviews,
            payments,
        }
    }
}
