//! Postgres-backed item store.
//!
//! Records live in a single `menu_items` table. Prices are stored as integer
//! hundredths (`price_cents`) so no decimal extension is needed.
//!
//! ## Sampling
//!
//! `sample()` filters and samples inside one statement
//! (`WHERE ... ORDER BY random() LIMIT n`): only the chosen rows cross the
//! wire, and every matching row is equally likely to be chosen.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | PoolTimedOut / PoolClosed / Io / Tls | `Unavailable` |
//! | Database / anything else | `Query` |
//!
//! Rows that fail `MenuItem` validation surface as `InvalidRecord` instead of
//! being served.

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, postgres::PgRow, PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use coffeeshop_core::MenuItemId;
use coffeeshop_menu::{ItemFilter, ItemStore, MenuItem, NewMenuItem, Price, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS menu_items (
    id          UUID PRIMARY KEY,
    name        TEXT NOT NULL CHECK (btrim(name) <> ''),
    category    TEXT NOT NULL,
    price_cents BIGINT NOT NULL CHECK (price_cents >= 0),
    in_stock    BOOLEAN NOT NULL
)
"#;

/// Postgres-backed item store.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct PostgresItemStore {
    pool: PgPool,
}

impl PostgresItemStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a store whose pool connects on first use.
    ///
    /// Succeeds even if the database is down; queries then fail with
    /// `StoreError::Unavailable` once `acquire_timeout` elapses.
    pub fn connect_lazy(database_url: &str, acquire_timeout: Duration) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(acquire_timeout)
            .connect_lazy(database_url)
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `menu_items` table if it does not exist.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ItemStore for PostgresItemStore {
    #[instrument(skip(self), err)]
    async fn find_all(&self) -> Result<Vec<MenuItem>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, category, price_cents, in_stock
            FROM menu_items
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_all", e))?;

        rows.iter().map(row_to_item).collect()
    }

    #[instrument(skip(self), err)]
    async fn sample(&self, filter: &ItemFilter, count: usize) -> Result<Vec<MenuItem>, StoreError> {
        let limit = i64::try_from(count).unwrap_or(i64::MAX);
        let rows = sqlx::query(
            r#"
            SELECT id, name, category, price_cents, in_stock
            FROM menu_items
            WHERE ($1::boolean IS NULL OR in_stock = $1)
            ORDER BY random()
            LIMIT $2
            "#,
        )
        .bind(filter.in_stock)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("sample", e))?;

        rows.iter().map(row_to_item).collect()
    }

    #[instrument(skip(self, items), fields(count = items.len()), err)]
    async fn replace_all(&self, items: Vec<NewMenuItem>) -> Result<Vec<MenuItem>, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("replace_all.begin", e))?;

        sqlx::query("DELETE FROM menu_items")
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("replace_all.delete", e))?;

        let mut stored = Vec::with_capacity(items.len());
        for item in items {
            let item = item.into_item(MenuItemId::new());
            sqlx::query(
                r#"
                INSERT INTO menu_items (id, name, category, price_cents, in_stock)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(item.id().as_uuid())
            .bind(item.name())
            .bind(item.category())
            .bind(item.price().cents())
            .bind(item.in_stock())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("replace_all.insert", e))?;
            stored.push(item);
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("replace_all.commit", e))?;

        Ok(stored)
    }
}

fn row_to_item(row: &PgRow) -> Result<MenuItem, StoreError> {
    let column = |name: &str, e: sqlx::Error| StoreError::InvalidRecord(format!("column {name}: {e}"));

    let id: Uuid = row.try_get("id").map_err(|e| column("id", e))?;
    let name: String = row.try_get("name").map_err(|e| column("name", e))?;
    let category: String = row.try_get("category").map_err(|e| column("category", e))?;
    let price_cents: i64 = row.try_get("price_cents").map_err(|e| column("price_cents", e))?;
    let in_stock: bool = row.try_get("in_stock").map_err(|e| column("in_stock", e))?;

    let invalid = |e: coffeeshop_core::DomainError| StoreError::InvalidRecord(format!("{id}: {e}"));
    let price = Price::from_cents(price_cents).map_err(invalid)?;
    MenuItem::new(MenuItemId::from_uuid(id), name, category, price, in_stock).map_err(invalid)
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut => {
            StoreError::Unavailable(format!("timed out acquiring a connection in {operation}"))
        }
        sqlx::Error::PoolClosed => {
            StoreError::Unavailable(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::Io(e) => StoreError::Unavailable(format!("io error in {operation}: {e}")),
        sqlx::Error::Tls(e) => StoreError::Unavailable(format!("tls error in {operation}: {e}")),
        sqlx::Error::Configuration(e) => {
            StoreError::Unavailable(format!("invalid connection settings in {operation}: {e}"))
        }
        sqlx::Error::Database(db_err) => {
            StoreError::Query(format!("database error in {operation}: {}", db_err.message()))
        }
        other => StoreError::Query(format!("sqlx error in {operation}: {other}")),
    }
}
