// src/main.rs
use anyhow::Result;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

use status_widget::{
    client::HealthClient,
    config::{self, WidgetConfig},
    render::TerminalTarget,
    widget::StatusWidget,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("status_widget=debug".parse()?)
                .add_directive("reqwest=info".parse()?),
        )
        .init();

    // Load configuration
    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            config::load_config(&path).await?
        }
        None => WidgetConfig::default(),
    };

    let client = HealthClient::new(config.endpoint.clone(), config.timeout());
    let widget = Arc::new(StatusWidget::new(client, TerminalTarget::stdout()));

    if config.auto.enabled {
        let runner = tokio::spawn(widget.clone().run(config.auto.interval()));

        shutdown_signal().await;
        widget.shutdown();
        runner.await?;
    } else {
        widget.fetch_health().await;
    }

    Ok(())
}

// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
