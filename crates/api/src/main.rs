//! API server entry point.

use std::error::Error;

use api::config::Config;
use axum::Router;
use person_store::PostgresPersonStore;
use sqlx::postgres::PgPoolOptions;
use tokio::signal;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

async fn build_app(
    config: &Config,
    metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
) -> Result<Router, Box<dyn Error>> {
    match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
            let store = PostgresPersonStore::new(pool);
            store.run_migrations().await?;
            tracing::info!("using PostgreSQL person store");
            Ok(api::create_app(
                api::create_state(store, config),
                metrics_handle,
            ))
        }
        None => {
            let store = api::create_memory_store(config);
            tracing::info!(
                seeded = config.seed,
                id_strategy = ?config.id_strategy,
                "using in-memory person store"
            );
            Ok(api::create_app(
                api::create_state(store, config),
                metrics_handle,
            ))
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env()?;
    api::telemetry::init_tracing(&config);

    // 2. Install Prometheus metrics recorder
    let metrics_handle = api::telemetry::init_metrics()?;

    // 3. Create the store and build the application
    let app = build_app(&config, metrics_handle).await?;

    // 4. Start server
    let addr = config.addr();
    tracing::info!(
        %addr,
        duplicate_names = ?config.duplicate_names,
        "starting phonebook server"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down gracefully");
    Ok(())
}
