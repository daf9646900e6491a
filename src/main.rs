//! Studio Edge server binary.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use studio_edge::adapters::{app_router, connect_store, AppState, TracingAuditSink};
use studio_edge::config::{AppConfig, LogFormat, ServerConfig};

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    match server.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    info!(
        store_backend = ?config.store.backend()?,
        webhook_secret_configured = config.payment.webhook_verifier().is_some(),
        stripe_test_mode = config.payment.is_test_mode(),
        offer_marker = %config.offer.marker,
        "config_loaded"
    );

    let store = connect_store(&config.store).await?;

    let state = AppState {
        webhook_verifier: config.payment.webhook_verifier().map(Arc::new),
        booking_confirmer: store.confirmer,
        customer_history: store.history,
        offer_marker: config.offer.offer_marker()?,
        audit_sink: Arc::new(TracingAuditSink::new()),
    };

    let app = app_router(
        state,
        Duration::from_secs(config.server.request_timeout_secs),
    )
    .layer(TraceLayer::new_for_http());

    let address = config.server.socket_addr()?;
    let listener = TcpListener::bind(address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
