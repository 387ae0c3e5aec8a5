use std::net::SocketAddr;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::handlers::{
    feed::map_home,
    invalidate::{invalidate_all, invalidate_section},
    locations::{all_countries, country_locations},
    map::map_page,
    method_not_allowed,
    ops::{health_check, metrics_handler},
};
use crate::state::AppState;

fn routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Feed routes. The literal segment wins over `{slug}`.
        .route(
            "/api/map/mapHome",
            post(map_home).fallback(method_not_allowed),
        )
        .route(
            "/api/map/{slug}",
            post(map_page).fallback(method_not_allowed),
        )
        // Official map locations, with the `/api` aliases.
        .route("/allCountries.json", get(all_countries))
        .route("/api/allCountries", get(all_countries))
        .route("/countryLocations/{country}", get(country_locations))
        .route("/api/countryLocations/{country}", get(country_locations))
        // Cache administration
        .route("/cache", delete(invalidate_all))
        .route("/cache/{section}", delete(invalidate_section))
        .with_state(state)
}

fn with_middleware(router: Router) -> Router {
    crate::middleware::apply(router.layer(middleware::from_fn(
        crate::metrics::http::http_metrics_middleware,
    )))
}

/// Creates the application router, without `/metrics`.
pub fn create_router(state: AppState) -> Router {
    with_middleware(routes(state))
}

/// Creates the application router with the Prometheus endpoint.
pub fn create_router_with_metrics(state: AppState, prometheus_handle: PrometheusHandle) -> Router {
    // Router for metrics endpoint (different state)
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    with_middleware(routes(state).merge(metrics_router))
}

/// Runs the server until Ctrl-C or SIGTERM.
pub async fn run_server(
    addr: SocketAddr,
    state: AppState,
    prometheus_handle: PrometheusHandle,
) -> Result<(), std::io::Error> {
    let app = create_router_with_metrics(state, prometheus_handle);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
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
