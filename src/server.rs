//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache tier construction, and Axum server
//! lifecycle. Every cache tier is built here and injected through
//! [`AppState`]; nothing cache-related is ambient or global.

use crate::application::services::CustomerService;
use crate::config::Config;
use crate::domain::entities::Customer;
use crate::infrastructure::cache::{CacheTier, MemoryTier, NullTier, RedisTier};
use crate::infrastructure::persistence::PgCustomerRepository;
use crate::routes::app_router;
use crate::state::{AppState, CachePolicies};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Schema migrations
/// - Redis tier (or NullTier fallback)
/// - In-process memory tiers
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let redis_tier: Arc<dyn CacheTier<Vec<Customer>>> = if let Some(redis_url) = &config.redis_url
    {
        let op_timeout = Duration::from_millis(config.redis_op_timeout_ms);
        match RedisTier::connect(redis_url, op_timeout).await {
            Ok(tier) => {
                tracing::info!("Distributed cache enabled (Redis)");
                Arc::new(tier)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullTier.", e);
                Arc::new(NullTier::new())
            }
        }
    } else {
        tracing::info!("Distributed cache disabled (NullTier)");
        Arc::new(NullTier::new())
    };

    let memory_tier = Arc::new(MemoryTier::new(config.memory_max_capacity));
    let kv_tier = Arc::new(MemoryTier::new(config.memory_max_capacity));

    let repository = Arc::new(PgCustomerRepository::new(Arc::new(pool)));
    let customer_service = Arc::new(CustomerService::new(repository));

    let state = AppState::new(
        customer_service,
        memory_tier,
        redis_tier,
        kv_tier,
        CachePolicies::from_config(&config),
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
