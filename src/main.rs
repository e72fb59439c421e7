//! Product catalog server.
//!
//! Serves the catalog over gRPC and the health probes over HTTP until
//! Ctrl-C or SIGTERM.

use anyhow::Context;
use product_catalog::api::grpc::{ProductServiceImpl, panic_guard};
use product_catalog::api::rest::{HealthState, health_router};
use product_catalog::application::CatalogService;
use product_catalog::config::AppConfig;
use product_catalog::domain::entities::{Exchange, Product};
use product_catalog::infrastructure::persistence::PgRepository;
use product_catalog::infrastructure::persistence::postgres::MIGRATOR;
use product_catalog::infrastructure::push::PushClient;
use product_catalog::telemetry::init_tracing;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("loading configuration")?;
    init_tracing(config.log_format).context("installing tracing subscriber")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("connecting to database")?;
    if config.run_migrations {
        MIGRATOR.run(&pool).await.context("running migrations")?;
        tracing::info!("migrations applied");
    }

    if let Some(key) = config.push_key() {
        let push = PushClient::new(key, config.fcm_url.clone(), config.fcm_timeout_ms)
            .context("configuring push client")?;
        tracing::info!(
            url = push.url(),
            timeout_ms = push.timeout_ms(),
            "push notifications configured"
        );
    }

    let catalog = CatalogService::new(
        Arc::new(PgRepository::<Exchange>::new(pool.clone())),
        Arc::new(PgRepository::<Product>::new(pool.clone())),
    );
    let health = HealthState::new();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let grpc_addr = config.grpc_addr()?;
    let grpc = tonic::transport::Server::builder()
        .layer(panic_guard())
        .add_service(ProductServiceImpl::new(catalog).into_server())
        .serve_with_shutdown(grpc_addr, stopped(shutdown_rx.clone()));

    let http_addr = config.http_addr()?;
    let listener = TcpListener::bind(http_addr)
        .await
        .with_context(|| format!("binding {}", http_addr))?;
    let http = axum::serve(listener, health_router(health.clone()))
        .with_graceful_shutdown(stopped(shutdown_rx));

    tracing::info!(%grpc_addr, %http_addr, "listening");
    health.set_ready(true);

    let signal_health = health.clone();
    tokio::try_join!(
        async { grpc.await.context("gRPC server") },
        async { http.await.context("HTTP server") },
        async move {
            shutdown_signal().await;
            tracing::info!("shutting down");
            signal_health.set_ready(false);
            shutdown_tx.send_replace(true);
            Ok::<(), anyhow::Error>(())
        },
    )?;

    health.set_alive(false);
    pool.close().await;
    tracing::info!("stopped");
    Ok(())
}

async fn stopped(mut rx: watch::Receiver<bool>) {
    // A dropped sender also ends the wait.
    let _ = rx.wait_for(|stop| *stop).await;
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
