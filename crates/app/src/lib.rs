//! Wiring for the sales binary.
//!
//! Loads [`config::Config`], installs the tracing subscriber, opens the
//! SQLite pool and hands out the repositories as a [`SalesContext`].

pub mod config;
pub mod error;
pub mod walkthrough;

use repository::{SqliteCustomerRepository, SqliteOrderRepository, SqliteProductRepository, sqlite};
use sqlx::SqlitePool;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use config::{Config, LogFormat};
pub use error::{AppError, Result};

/// Installs the global tracing subscriber.
///
/// `config.log_level` is an `EnvFilter` directive; an unparsable directive
/// falls back to `info`.
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let (json, plain) = match config.log_format {
        LogFormat::Json => (Some(tracing_subscriber::fmt::layer().json()), None),
        LogFormat::Plain => (None, Some(tracing_subscriber::fmt::layer())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .init();
}

/// Repositories sharing one connection pool.
pub struct SalesContext {
    pool: SqlitePool,
    pub customers: SqliteCustomerRepository,
    pub products: SqliteProductRepository,
    pub orders: SqliteOrderRepository,
}

impl SalesContext {
    /// Opens the database described by `config` and applies pending migrations.
    #[tracing::instrument(skip(config), fields(in_memory = config.is_in_memory()))]
    pub async fn connect(config: &Config) -> Result<Self> {
        let pool = sqlite::connect(&config.database_url, config.max_connections).await?;
        sqlite::run_migrations(&pool).await?;
        tracing::info!(max_connections = config.max_connections, "database ready");

        Ok(Self {
            customers: SqliteCustomerRepository::new(pool.clone()),
            products: SqliteProductRepository::new(pool.clone()),
            orders: SqliteOrderRepository::new(pool.clone()),
            pool,
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the pool, waiting for checked-out connections to return.
    pub async fn close(self) {
        self.pool.close().await;
    }
}
