//! Persistence backends for items. The engine only talks to [`ItemStore`]; the
//! concrete backend is picked once at startup.

mod memory;
mod postgres;

pub use memory::MemoryItemStore;
pub use postgres::{ensure_database_exists, ensure_items_table, PgItemStore};

use crate::error::AppError;
use crate::model::{Item, ItemFilter, ItemPatch, NewItem, Page};
use async_trait::async_trait;

/// Keyed record store for items.
///
/// Implementations must make `insert` and `update_by_id` atomic with respect to
/// each other: no duplicate ids, no partially applied patch. Reads see a
/// consistent snapshot.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Short backend name for logs and readiness output.
    fn kind(&self) -> &'static str;

    /// Assign the next id and persist the item.
    async fn insert(&self, item: &NewItem) -> Result<Item, AppError>;

    async fn fetch_by_id(&self, id: i64) -> Result<Option<Item>, AppError>;

    /// Apply `patch` to the stored item. `Ok(None)` when no item has this id.
    async fn update_by_id(&self, id: i64, patch: &ItemPatch) -> Result<Option<Item>, AppError>;

    /// Items matching `filter`, ascending by id, windowed by `page`.
    async fn scan_ordered_by_id(&self, filter: &ItemFilter, page: Page) -> Result<Vec<Item>, AppError>;

    /// Cheap liveness probe of the backend.
    async fn ping(&self) -> Result<(), AppError>;
}
