use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// Every field can be overridden through the environment:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HOST | 0.0.0.0 | Listen address |
/// | PORT | 3000 | HTTP port |
/// | DATABASE_URL | sqlite:storefront.db | SQLite database URL |
/// | LOG_LEVEL | info | Log filter level |
/// | LOG_DIR | (unset) | Directory for rolling log files |
/// | ENVIRONMENT | development | development / staging / production |
/// | JWT_SECRET | (generated in dev) | Token signing secret |
///
/// # Example
///
/// ```ignore
/// DATABASE_URL=sqlite:/data/store.db PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address
    pub host: String,
    /// HTTP API port
    pub port: u16,
    /// SQLite database URL
    pub database_url: String,
    /// Log filter level, `info` when unset
    pub log_level: Option<String>,
    /// Directory for rolling log files; stderr only when unset
    pub log_dir: Option<String>,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// JWT authentication configuration
    pub jwt: JwtConfig,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:storefront.db".into()),
            log_level: std::env::var("LOG_LEVEL").ok(),
            log_dir: std::env::var("LOG_DIR").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            jwt: JwtConfig::default(),
        }
    }

    /// Create a config with custom overrides
    ///
    /// Mostly used by tests.
    pub fn with_overrides(database_url: impl Into<String>, port: u16) -> Self {
        let mut config = Self::from_env();
        config.database_url = database_url.into();
        config.port = port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
