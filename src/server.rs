//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, cache backend selection and the Axum server
//! lifecycle. Schema migrations are applied out of band and never at startup.

use crate::config::{CacheBackend, Config};
use crate::infrastructure::cache::{CacheService, MemoryCache, NullCache, RedisCache};
use crate::infrastructure::persistence::{
    PgCustomerRepository, PgHealthRepository, PgItemRepository, PgOrderRepository,
};
use crate::routes::app_router;
use crate::state::{AppState, Repositories};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Opens a PostgreSQL pool sized and timed by `config`.
///
/// # Errors
///
/// Returns an error if the database is unreachable within the acquire timeout.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Builds the items list cache selected by `CACHE_BACKEND`.
///
/// An unreachable Redis degrades to [`NullCache`] instead of failing startup.
pub async fn build_cache(config: &Config) -> Arc<dyn CacheService> {
    let ttl = config.items_cache_ttl();

    match (config.cache_backend, config.redis_url.as_deref()) {
        (CacheBackend::Memory, _) => {
            tracing::info!("Items cache enabled (memory)");
            Arc::new(MemoryCache::new(config.items_cache_max_entries, ttl))
        }
        (CacheBackend::Redis, Some(redis_url)) => match RedisCache::connect(redis_url, ttl).await {
            Ok(redis) => {
                tracing::info!("Items cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        },
        (CacheBackend::Redis, None) | (CacheBackend::None, _) => {
            tracing::info!("Items cache disabled (NullCache)");
            Arc::new(NullCache::new())
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Items list cache (memory, Redis or NullCache)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = Arc::new(connect_pool(&config).await?);
    tracing::info!("Connected to database");

    let cache = build_cache(&config).await;

    let repositories = Repositories {
        customers: Arc::new(PgCustomerRepository::new(pool.clone())),
        items: Arc::new(PgItemRepository::new(pool.clone())),
        orders: Arc::new(PgOrderRepository::new(pool.clone())),
        health: Arc::new(PgHealthRepository::new(pool.clone())),
    };

    let state = AppState::new(
        repositories,
        cache,
        config.items_cache_ttl(),
        config.behind_proxy,
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
