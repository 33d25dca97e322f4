//! Startup log lines.

use tracing::info;

/// Logs the endpoints the server is about to expose.
pub fn print_startup_info(addr: &str, cache_backend: &str) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("Roster v{}", env!("CARGO_PKG_VERSION"));
    info!("REST API:  http://{}/api/users", addr);
    info!("Health:    http://{}/health", addr);
    info!("Readiness: http://{}/ready", addr);
    info!("API Docs:  http://{}/api-docs/openapi.json", addr);
    info!("Cache:     {}", cache_backend);
    info!("{}", separator);
}
