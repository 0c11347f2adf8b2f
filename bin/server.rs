// Expense Tracker - Web Server

use anyhow::{Context, Result};
use expense_tracker::{logging, server, ExpenseStore, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::from_env().context("Failed to read configuration")?;
    logging::init_logging(&config);

    let store = ExpenseStore::with_seed();
    tracing::debug!(count = store.count(), "Sample expenses loaded");

    server::run(config, store).await
}
