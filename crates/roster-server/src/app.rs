//! Application wiring.

use crate::startup::print_startup_info;
use axum::Router;
use roster_config::{AppConfig, CacheConfig, RedisConfig};
use roster_core::{HealthCheck, RosterError, RosterResult};
use roster_repository::{create_pool, DatabasePool, MySqlUserRepository, UserRepository};
use roster_rest::{create_router, AppState};
use roster_service::{
    CacheInterface, CacheSettings, MemoryCacheService, RedisCacheService, UserServiceImpl,
};
use std::future::Future;
use std::sync::Arc;
use tracing::info;

/// Cache backend chosen from configuration, with its readiness probe.
pub struct CacheBackend {
    pub cache: Arc<dyn CacheInterface>,
    pub health_check: Option<Arc<dyn HealthCheck>>,
    pub name: &'static str,
}

/// Picks Redis when enabled, otherwise a process-local cache.
pub fn build_cache(config: &RedisConfig) -> RosterResult<CacheBackend> {
    if !config.enabled {
        info!("Redis disabled, using in-process cache");
        return Ok(CacheBackend {
            cache: Arc::new(MemoryCacheService::new()),
            health_check: None,
            name: "memory",
        });
    }

    let redis = Arc::new(RedisCacheService::from_config(config)?);
    Ok(CacheBackend {
        cache: redis.clone(),
        health_check: Some(redis),
        name: "redis",
    })
}

/// Assembles the user service and the handler state around it.
pub fn build_state(
    repository: Arc<dyn UserRepository>,
    cache: Arc<dyn CacheInterface>,
    cache_config: &CacheConfig,
    health_checks: Vec<Arc<dyn HealthCheck>>,
) -> AppState {
    let settings = CacheSettings::from(cache_config);
    info!(
        ttl_secs = settings.ttl.as_secs(),
        policy = ?settings.failure_policy,
        "User cache configured"
    );

    let service = UserServiceImpl::new(repository, cache, settings);
    health_checks
        .into_iter()
        .fold(AppState::new(Arc::new(service)), AppState::with_health_check)
}

/// A fully wired server ready to bind.
pub struct Application {
    router: Router,
    addr: String,
    pool: Arc<DatabasePool>,
    cache_backend: &'static str,
}

impl Application {
    /// Connects to the store and cache and builds the router.
    pub async fn build(config: &AppConfig) -> RosterResult<Self> {
        let pool = create_pool(&config.database).await?;
        if config.database.run_migrations {
            pool.run_migrations().await?;
        }

        let backend = build_cache(&config.redis)?;

        let mut health_checks: Vec<Arc<dyn HealthCheck>> = vec![pool.clone()];
        health_checks.extend(backend.health_check);

        let repository = Arc::new(MySqlUserRepository::new(pool.clone()));
        let state = build_state(repository, backend.cache, &config.cache, health_checks);

        Ok(Self {
            router: create_router(state, &config.server),
            addr: config.server.addr(),
            pool,
            cache_backend: backend.name,
        })
    }

    /// Serves requests until `shutdown` resolves, then closes the pool.
    pub async fn run(self, shutdown: impl Future<Output = ()> + Send + 'static) -> RosterResult<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr)
            .await
            .map_err(|e| RosterError::Internal(format!("Failed to bind {}: {}", self.addr, e)))?;

        print_startup_info(&self.addr, self.cache_backend);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RosterError::Internal(format!("REST server error: {}", e)))?;

        self.pool.close().await;
        info!("Server shutdown complete");
        Ok(())
    }
}
