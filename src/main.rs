use std::sync::Arc;

use adyen_gateway::adapters::http::{webhook_router, WebhookAppState};
use adyen_gateway::application::HandleNotificationHandler;
use adyen_gateway::config::AppConfig;
use adyen_gateway::domain::payment::PaymentResult;
use adyen_gateway::ports::PaymentGateway;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

fn init_tracing(config: &AppConfig) {
    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let credentials = Arc::new(config.adyen.credentials());
    if credentials.hmac_key().is_none() {
        tracing::warn!("No Adyen HMAC key configured; every notification will be rejected");
    }

    let gateway = config.adyen.gateway_client()?;
    match gateway.validate_credentials().await {
        PaymentResult::Success(_) => tracing::info!("Adyen credentials accepted"),
        PaymentResult::Error(failure) => tracing::warn!(
            code = ?failure.code,
            message = %failure.message,
            "Adyen credential check failed; outbound operations will be rejected"
        ),
    }

    let state = WebhookAppState::new(HandleNotificationHandler::new(credentials.clone()));
    let app = webhook_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        %addr,
        environment = credentials.environment().as_str(),
        merchant_account = credentials.merchant_account(),
        "Adyen gateway listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
