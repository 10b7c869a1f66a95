use std::sync::RwLock;

use rand::seq::IteratorRandom;

use coffeeshop_core::MenuItemId;
use coffeeshop_menu::{ItemFilter, ItemStore, MenuItem, NewMenuItem, StoreError};

/// In-memory item store.
///
/// Intended for tests/dev. Sampling filters first and then draws uniformly
/// from the matching records (reservoir sampling, no intermediate copy of the
/// matching set).
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    items: RwLock<Vec<MenuItem>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with already-identified records (tests).
    pub fn with_items(items: Vec<MenuItem>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    fn poisoned() -> StoreError {
        StoreError::Unavailable("in-memory store lock poisoned".to_string())
    }
}

#[async_trait::async_trait]
impl ItemStore for InMemoryItemStore {
    async fn find_all(&self) -> Result<Vec<MenuItem>, StoreError> {
        let items = self.items.read().map_err(|_| Self::poisoned())?;
        Ok(items.clone())
    }

    async fn sample(&self, filter: &ItemFilter, count: usize) -> Result<Vec<MenuItem>, StoreError> {
        let items = self.items.read().map_err(|_| Self::poisoned())?;
        let mut rng = rand::thread_rng();
        Ok(items
            .iter()
            .filter(|item| filter.matches(item))
            .choose_multiple(&mut rng, count)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn replace_all(&self, new_items: Vec<NewMenuItem>) -> Result<Vec<MenuItem>, StoreError> {
        let stored: Vec<MenuItem> = new_items
            .into_iter()
            .map(|item| item.into_item(MenuItemId::new()))
            .collect();

        let mut items = self.items.write().map_err(|_| Self::poisoned())?;
        *items = stored.clone();
        Ok(stored)
    }
}
