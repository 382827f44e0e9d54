mod cli;
mod telemetry;

use crate::cli::CLI;
use burrow_gateway::{App, AppState};
use burrow_generator::RandomGenerator;
use burrow_shortener::{ShortenerService, ShortenerSettings};
use burrow_storage::InMemoryRepository;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CLI::parse();
    telemetry::init(config.log_format);

    info!(
        listen_addr = %config.listen_addr,
        base_url = %config.base_url,
        max_attempts = config.max_attempts,
        log_format = %config.log_format,
        "starting burrow gateway"
    );

    let settings = ShortenerSettings::builder()
        .max_attempts(config.max_attempts)
        .build();
    let shortener = ShortenerService::with_settings(
        Arc::new(InMemoryRepository::new()),
        RandomGenerator::new(),
        settings,
    );
    let state = AppState::new(Arc::new(shortener), config.base_url);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
