//! Infrastructure layer: item store backends, configuration, seeding.

pub mod config;
pub mod item_store;
pub mod seed;

pub use config::{AppConfig, ConfigError};
pub use item_store::{InMemoryItemStore, PostgresItemStore};
pub use seed::{SeedError, fixture_items, seed_store};
