//! One-shot seed tool: replaces the menu in the configured store with the
//! fixed fixture. Requires `DATABASE_URL`.

use anyhow::Context;
use tracing::{error, info};

use coffeeshop_infra::{AppConfig, PostgresItemStore, seed_store};

#[tokio::main]
async fn main() {
    coffeeshop_observability::init();

    if let Err(e) = run().await {
        error!("Error seeding database: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    let url = config.require_database_url()?;

    let store = PostgresItemStore::connect_lazy(url, config.query_timeout)
        .context("failed to configure Postgres item store")?;
    store
        .ensure_schema()
        .await
        .context("failed to connect to the item store")?;
    info!("connected to item store");

    let items = seed_store(&store).await?;
    info!(count = items.len(), "sample menu items inserted successfully");
    Ok(())
}
