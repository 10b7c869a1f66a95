//! Menu query service: the read side of the menu catalog.
//!
//! Two operations, both stateless single-shot reads:
//! - [`MenuQueryService::list_all`] returns the whole catalog with its count.
//! - [`MenuQueryService::sample_one_in_stock`] returns one in-stock item chosen
//!   uniformly at random by the store.
//!
//! Every store call is bounded by a per-request timeout. An expired timeout is
//! reported the same way as an unreachable store.

use std::{future::Future, sync::Arc, time::Duration};

use serde::Serialize;
use thiserror::Error;
use tracing::{error, instrument, warn};

use crate::item::MenuItem;
use crate::store::{ItemFilter, ItemStore, StoreError};

/// Default bound on a single store round trip.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Query failure as seen by callers of the service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// The store could not answer (unreachable, failed query, timeout, or a
    /// response that broke the store contract).
    #[error("{0}")]
    StoreUnavailable(String),

    /// Nothing is in stock. A valid business state, not a fault.
    #[error("no items in stock")]
    NoStockAvailable,
}

impl From<StoreError> for MenuError {
    fn from(err: StoreError) -> Self {
        MenuError::StoreUnavailable(err.to_string())
    }
}

/// Result of [`MenuQueryService::list_all`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuListing {
    pub items: Vec<MenuItem>,
    pub count: usize,
}

impl MenuListing {
    fn new(items: Vec<MenuItem>) -> Self {
        let count = items.len();
        Self { items, count }
    }
}

/// Read-only service over an injected [`ItemStore`].
#[derive(Clone)]
pub struct MenuQueryService {
    store: Arc<dyn ItemStore>,
    timeout: Duration,
}

impl core::fmt::Debug for MenuQueryService {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MenuQueryService")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl MenuQueryService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            store,
            timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Every item currently in the store, in store-defined order.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<MenuListing, MenuError> {
        let items = self.bounded("find_all", self.store.find_all()).await?;
        Ok(MenuListing::new(items))
    }

    /// One in-stock item, chosen uniformly at random by the store.
    ///
    /// Fails with [`MenuError::NoStockAvailable`] when nothing is in stock.
    #[instrument(skip(self))]
    pub async fn sample_one_in_stock(&self) -> Result<MenuItem, MenuError> {
        let filter = ItemFilter::in_stock();
        let mut sampled = self.bounded("sample", self.store.sample(&filter, 1)).await?;

        if sampled.len() > 1 {
            error!(returned = sampled.len(), "store returned more than one record for a sample of 1");
            return Err(MenuError::StoreUnavailable(format!(
                "store returned {} records for a sample of 1",
                sampled.len()
            )));
        }

        let item = sampled.pop().ok_or(MenuError::NoStockAvailable)?;
        if !filter.matches(&item) {
            error!(item_id = %item.id(), "store sampled an out-of-stock record");
            return Err(MenuError::StoreUnavailable(format!(
                "store sampled out-of-stock record {}",
                item.id()
            )));
        }

        Ok(item)
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, MenuError> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                warn!(operation, error = %e, "item store call failed");
                Err(e.into())
            }
            Err(_) => {
                warn!(operation, timeout_ms = self.timeout.as_millis() as u64, "item store call timed out");
                Err(StoreError::Unavailable(format!(
                    "{operation} timed out after {}ms",
                    self.timeout.as_millis()
                ))
                .into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{NewMenuItem, Price};
    use coffeeshop_core::MenuItemId;

    /// Scripted store: answers from a fixed list, or misbehaves on request.
    #[derive(Default)]
    struct ScriptedStore {
        items: Vec<MenuItem>,
        fail: bool,
        delay: Option<Duration>,
        oversample: bool,
        ignore_filter: bool,
    }

    #[async_trait::async_trait]
    impl ItemStore for ScriptedStore {
        async fn find_all(&self) -> Result<Vec<MenuItem>, StoreError> {
            if let Some(d) = self.delay {
                tokio::time::sleep(d).await;
            }
            if self.fail {
                return Err(StoreError::Unavailable("connection refused".to_string()));
            }
            Ok(self.items.clone())
        }

        async fn sample(&self, filter: &ItemFilter, count: usize) -> Result<Vec<MenuItem>, StoreError> {
            if let Some(d) = self.delay {
                tokio::time::sleep(d).await;
            }
            if self.fail {
                return Err(StoreError::Query("aggregate failed".to_string()));
            }
            let take = if self.oversample { count + 1 } else { count };
            Ok(self
                .items
                .iter()
                .filter(|i| self.ignore_filter || filter.matches(i))
                .take(take)
                .cloned()
                .collect())
        }

        async fn replace_all(&self, _items: Vec<NewMenuItem>) -> Result<Vec<MenuItem>, StoreError> {
            unreachable!("query service never writes")
        }
    }

    fn item(name: &str, in_stock: bool) -> MenuItem {
        MenuItem::new(
            MenuItemId::new(),
            name,
            "Hot Drinks",
            Price::from_cents(50050).unwrap(),
            in_stock,
        )
        .unwrap()
    }

    fn service(store: ScriptedStore) -> MenuQueryService {
        MenuQueryService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn list_all_returns_items_with_matching_count() {
        let items = vec![item("Espresso", true), item("Muffin", false)];
        let svc = service(ScriptedStore {
            items: items.clone(),
            ..Default::default()
        });

        let listing = svc.list_all().await.unwrap();
        assert_eq!(listing.items, items);
        assert_eq!(listing.count, 2);
    }

    #[tokio::test]
    async fn list_all_on_empty_store_is_not_an_error() {
        let listing = service(ScriptedStore::default()).list_all().await.unwrap();
        assert!(listing.items.is_empty());
        assert_eq!(listing.count, 0);
    }

    #[tokio::test]
    async fn list_all_is_repeatable() {
        let svc = service(ScriptedStore {
            items: vec![item("Latte", true), item("Croissant", true)],
            ..Default::default()
        });
        assert_eq!(svc.list_all().await.unwrap(), svc.list_all().await.unwrap());
    }

    #[tokio::test]
    async fn store_failure_maps_to_store_unavailable() {
        let svc = service(ScriptedStore {
            fail: true,
            ..Default::default()
        });
        match svc.list_all().await {
            Err(MenuError::StoreUnavailable(msg)) => assert!(msg.contains("connection refused")),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            svc.sample_one_in_stock().await,
            Err(MenuError::StoreUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn sample_skips_out_of_stock_items() {
        let svc = service(ScriptedStore {
            items: vec![item("Muffin", false), item("Espresso", true)],
            ..Default::default()
        });
        let picked = svc.sample_one_in_stock().await.unwrap();
        assert_eq!(picked.name(), "Espresso");
        assert!(picked.in_stock());
    }

    #[tokio::test]
    async fn sample_without_stock_is_no_stock_available() {
        let svc = service(ScriptedStore {
            items: vec![item("Muffin", false)],
            ..Default::default()
        });
        assert_eq!(svc.sample_one_in_stock().await, Err(MenuError::NoStockAvailable));

        let empty = service(ScriptedStore::default());
        assert_eq!(empty.sample_one_in_stock().await, Err(MenuError::NoStockAvailable));
    }

    #[tokio::test]
    async fn oversampling_store_is_reported_as_fault() {
        let svc = service(ScriptedStore {
            items: vec![item("Espresso", true), item("Latte", true)],
            oversample: true,
            ..Default::default()
        });
        match svc.sample_one_in_stock().await {
            Err(MenuError::StoreUnavailable(msg)) => assert!(msg.contains("2 records")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn store_returning_out_of_stock_record_is_reported_as_fault() {
        let svc = service(ScriptedStore {
            items: vec![item("Muffin", false)],
            ignore_filter: true,
            ..Default::default()
        });
        assert!(matches!(
            svc.sample_one_in_stock().await,
            Err(MenuError::StoreUnavailable(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_store_times_out_as_unavailable() {
        let svc = service(ScriptedStore {
            items: vec![item("Espresso", true)],
            delay: Some(Duration::from_secs(60)),
            ..Default::default()
        })
        .with_timeout(Duration::from_millis(250));

        match svc.list_all().await {
            Err(MenuError::StoreUnavailable(msg)) => assert!(msg.contains("timed out")),
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            svc.sample_one_in_stock().await,
            Err(MenuError::StoreUnavailable(_))
        ));
    }
}
