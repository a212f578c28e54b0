//! HTTP API server with observability for the phonebook backend.
//!
//! Provides REST endpoints for contact records and a summary page, with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod telemetry;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use domain::Phonebook;
use metrics_exporter_prometheus::PrometheusHandle;
use person_store::{InMemoryPersonStore, PersonStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use error::ApiError;
use routes::persons::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: PersonStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check::<S>))
        .route("/info", get(routes::info::get::<S>))
        .route(
            "/api/persons",
            get(routes::persons::list::<S>).post(routes::persons::create::<S>),
        )
        .route(
            "/api/persons/{id}",
            get(routes::persons::get::<S>)
                .put(routes::persons::update::<S>)
                .delete(routes::persons::delete::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .fallback(unknown_route)
        .method_not_allowed_fallback(unknown_route)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Wraps a store in the shared application state.
pub fn create_state<S: PersonStore>(store: S, config: &Config) -> Arc<AppState<S>> {
    Arc::new(AppState {
        phonebook: Phonebook::new(store, config.duplicate_names),
    })
}

/// Builds the in-memory store described by the configuration.
pub fn create_memory_store(config: &Config) -> InMemoryPersonStore {
    if config.seed {
        InMemoryPersonStore::with_sample_data(config.id_strategy)
    } else {
        InMemoryPersonStore::with_strategy(config.id_strategy)
    }
}

async fn unknown_route() -> ApiError {
    ApiError::UnknownRoute
}
