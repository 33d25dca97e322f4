//! Main application router.

use crate::{
    controllers::{health_controller, user_controller},
    middleware::{logging_middleware, REQUEST_ID_HEADER},
    openapi,
    state::AppState,
};
use axum::{
    http::{HeaderName, HeaderValue},
    middleware, Router,
};
use roster_config::ServerConfig;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Builds the full application router.
///
/// Users live under `/api/users`; health probes and the OpenAPI document sit
/// at the root.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let router = Router::new()
        .merge(health_controller::router())
        .nest("/api/users", user_controller::router())
        .merge(openapi::router())
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(server_config.request_timeout()))
                .layer(CompressionLayer::new())
                .layer(create_cors_layer(server_config)),
        );

    info!(
        "Router created with /api/users and OpenAPI document at {}",
        openapi::OPENAPI_PATH
    );
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }
    if server_config.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
