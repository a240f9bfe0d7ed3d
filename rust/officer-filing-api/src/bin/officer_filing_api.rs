use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use officer_filing_admission::MemoryFilingStore;
use officer_filing_api::catalog::MessageCatalog;
use officer_filing_api::config::ApiConfig;
use officer_filing_api::logging;
use officer_filing_api::transactions::{RestTransactionConfig, RestTransactionService};
use officer_filing_api::{AppState, router};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::parse();
    logging::init(&config.log_level);

    let catalog = match &config.messages {
        Some(path) => MessageCatalog::with_overrides(path)
            .with_context(|| format!("failed to load messages from {}", path.display()))?,
        None => MessageCatalog::default(),
    };

    let transactions = RestTransactionService::new(
        RestTransactionConfig::new(config.transactions_url.clone())
            .with_timeout(config.request_timeout_secs),
    )
    .context("failed to build transaction client")?;

    let state = AppState::new(
        Arc::new(transactions),
        Arc::new(MemoryFilingStore::default()),
        catalog,
    );

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!(addr = %config.bind, transactions = %config.transactions_url, "officer filing API listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if let Err(error) = tokio::signal::ctrl_c().await {
                tracing::error!(%error, "failed to listen for shutdown signal");
            }
        })
        .await
        .context("server error")?;

    tracing::info!("officer filing API stopped");
    Ok(())
}
