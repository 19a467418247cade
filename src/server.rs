//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, cache setup, worker spawning, and Axum server lifecycle.

use crate::application::services::{AnalyticsService, ShortenerService, SignedTokenIdentity};
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::geoip::{GeoResolver, HttpGeoResolver, NoopGeoResolver};
use crate::infrastructure::persistence::{PgClickRepository, PgUrlRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::extract::Request;
use axum::ServiceExt;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Redis cache (or NullCache fallback)
/// - Geolocation resolver
/// - Background click worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let geo: Arc<dyn GeoResolver> = match &config.geoip_api_url {
        Some(url) => Arc::new(HttpGeoResolver::new(url.clone(), config.geoip_token.clone())),
        None => Arc::new(NoopGeoResolver),
    };

    let pool_arc = Arc::new(pool.clone());
    let url_repository: Arc<dyn crate::domain::repositories::UrlRepository> =
        Arc::new(PgUrlRepository::new(pool_arc.clone()));
    let click_repository: Arc<dyn crate::domain::repositories::ClickRepository> =
        Arc::new(PgClickRepository::new(pool_arc));

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    tokio::spawn(run_click_worker(click_rx, click_repository.clone(), geo));

    let state = AppState {
        db: pool,
        shortener_service: Arc::new(ShortenerService::new(
            url_repository.clone(),
            cache.clone(),
            config.base_url.clone(),
        )),
        analytics_service: Arc::new(AnalyticsService::new(
            url_repository,
            click_repository,
            cache.clone(),
            config.base_url.clone(),
        )),
        identity: Arc::new(SignedTokenIdentity::new(
            config.session_signing_secret.clone(),
        )),
        cache,
        click_sender: click_tx,
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
