//! Fixed menu fixture and the one-shot loader that installs it.

use thiserror::Error;
use tracing::info;

use coffeeshop_core::DomainError;
use coffeeshop_menu::{ItemStore, MenuItem, NewMenuItem, Price, StoreError};

/// (name, category, price in hundredths, in stock)
const FIXTURE: &[(&str, &str, i64, bool)] = &[
    ("Espresso", "Hot Drinks", 80050, true),
    ("Cappuccino", "Hot Drinks", 55050, true),
    ("Latte", "Hot Drinks", 90000, true),
    ("Iced Coffee", "Cold Drinks", 80000, true),
    ("Croissant", "Pastries", 70050, true),
    ("Muffin", "Pastries", 40000, false),
];

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid fixture item: {0}")]
    Fixture(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The menu the seed loader installs.
pub fn fixture_items() -> Result<Vec<NewMenuItem>, DomainError> {
    FIXTURE
        .iter()
        .map(|(name, category, cents, in_stock)| {
            NewMenuItem::new(*name, *category, Price::from_cents(*cents)?, *in_stock)
        })
        .collect()
}

/// Replace everything in `store` with the fixture and return what was stored.
pub async fn seed_store(store: &dyn ItemStore) -> Result<Vec<MenuItem>, SeedError> {
    let fixture = fixture_items()?;

    let inserted = store.replace_all(fixture).await?;
    info!(inserted = inserted.len(), "replaced menu items with fixture");

    let items = store.find_all().await?;
    info!("Total menu items: {}", items.len());
    for item in &items {
        info!(
            "- {} ({}) - Rs. {} - In Stock: {}",
            item.name(),
            item.category(),
            item.price(),
            item.in_stock()
        );
    }

    Ok(items)
}
