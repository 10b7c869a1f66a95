//! Item store abstraction consumed by the menu query service.
//!
//! Implementations own durability and querying; the query service only reads
//! through this trait. Sampling is a store primitive: the store filters first
//! and then draws uniformly from what matched, so callers never have to pull
//! the whole collection to pick one record.

use std::sync::Arc;

use thiserror::Error;

use crate::item::{MenuItem, NewMenuItem};

/// Item store operation error.
///
/// These are infrastructure failures. An empty result is never an error here;
/// deciding what "nothing matched" means is up to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached (connection refused, pool exhausted, timeout).
    #[error("item store unavailable: {0}")]
    Unavailable(String),

    /// The store was reachable but the query failed.
    #[error("item store query failed: {0}")]
    Query(String),

    /// A persisted record did not satisfy the menu item model.
    #[error("invalid menu item record: {0}")]
    InvalidRecord(String),
}

/// Record filter understood by [`ItemStore::sample`].
///
/// `None` fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub in_stock: Option<bool>,
}

impl ItemFilter {
    /// Matches every record.
    pub fn any() -> Self {
        Self::default()
    }

    /// Matches records with `in_stock = true`.
    pub fn in_stock() -> Self {
        Self {
            in_stock: Some(true),
        }
    }

    pub fn matches(&self, item: &MenuItem) -> bool {
        self.in_stock.is_none_or(|wanted| item.in_stock() == wanted)
    }
}

/// Persistent collection of menu items.
#[async_trait::async_trait]
pub trait ItemStore: Send + Sync {
    /// Every record, in store-defined order.
    async fn find_all(&self) -> Result<Vec<MenuItem>, StoreError>;

    /// Up to `count` records drawn uniformly at random from those matching
    /// `filter`, without replacement.
    ///
    /// Returns fewer than `count` records (possibly none) when fewer match.
    async fn sample(&self, filter: &ItemFilter, count: usize) -> Result<Vec<MenuItem>, StoreError>;

    /// Delete every record, then insert `items` with freshly assigned ids.
    ///
    /// Returns the stored records. Only the seed loader calls this.
    async fn replace_all(&self, items: Vec<NewMenuItem>) -> Result<Vec<MenuItem>, StoreError>;
}

#[async_trait::async_trait]
impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    async fn find_all(&self) -> Result<Vec<MenuItem>, StoreError> {
        (**self).find_all().await
    }

    async fn sample(&self, filter: &ItemFilter, count: usize) -> Result<Vec<MenuItem>, StoreError> {
        (**self).sample(filter, count).await
    }

    async fn replace_all(&self, items: Vec<NewMenuItem>) -> Result<Vec<MenuItem>, StoreError> {
        (**self).replace_all(items).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Price;
    use coffeeshop_core::MenuItemId;

    fn item(in_stock: bool) -> MenuItem {
        MenuItem::new(
            MenuItemId::new(),
            "Muffin",
            "Pastries",
            Price::from_cents(40000).unwrap(),
            in_stock,
        )
        .unwrap()
    }

    #[test]
    fn any_filter_matches_everything() {
        assert!(ItemFilter::any().matches(&item(true)));
        assert!(ItemFilter::any().matches(&item(false)));
    }

    #[test]
    fn in_stock_filter_excludes_out_of_stock() {
        assert!(ItemFilter::in_stock().matches(&item(true)));
        assert!(!ItemFilter::in_stock().matches(&item(false)));
    }
}
