//! `coffeeshop-menu` — menu catalog model and the menu query service.
//!
//! - `item`: [`MenuItem`], [`NewMenuItem`] and the [`Price`] value object
//! - `store`: the [`ItemStore`] contract implemented by infrastructure
//! - `query`: [`MenuQueryService`], the read API over a store

pub mod item;
pub mod query;
pub mod store;

pub use item::{MenuItem, NewMenuItem, Price};
pub use query::{DEFAULT_QUERY_TIMEOUT, MenuError, MenuListing, MenuQueryService};
pub use store::{ItemFilter, ItemStore, StoreError};
