//! Contact server entry point.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use contact_server::{logging, select_store, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Arc::new(Config::from_env().context("Failed to load configuration")?);

    logging::init(&config).context("Failed to initialize logging")?;
    logging::log_config(&config);

    let store = select_store(&config).context("Failed to initialize contact store")?;
    info!(store = store.name(), supabase = ?store.status(), "contact store ready");

    contact_server::run_server(AppState::new(config, store)).await?;

    info!("contact server stopped cleanly");
    Ok(())
}
