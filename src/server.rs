// 🌐 Server lifecycle - bind, serve, shut down on signal

use anyhow::{Context, Result};

use crate::api::{router, AppState};
use crate::config::ServerConfig;
use crate::store::ExpenseStore;

/// Bind the configured port and serve until Ctrl+C or SIGTERM
pub async fn run(config: ServerConfig, store: ExpenseStore) -> Result<()> {
    let app = router(AppState::new(store));
    let addr = config.addr();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!(port = config.port, environment = ?config.environment, "Expense Tracker Backend starting");
    println!("🚀 Expense Tracker Backend starting on port {}", config.port);
    println!("📊 Health check: http://localhost:{}/api/health", config.port);
    println!("🔗 API docs: http://localhost:{}/api", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Failed to start server")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
