//! In-process backend: ordered map plus id counter behind one lock.

use super::ItemStore;
use crate::error::AppError;
use crate::model::{Item, ItemFilter, ItemPatch, NewItem, Page};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

struct Inner {
    items: BTreeMap<i64, Item>,
    next_id: i64,
}

impl Inner {
    fn empty() -> Self {
        Inner {
            items: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// Memory-backed store. Mutations take the write lock, so id assignment and
/// patches are atomic; reads share the read lock.
pub struct MemoryItemStore {
    inner: RwLock<Inner>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        MemoryItemStore {
            inner: RwLock::new(Inner::empty()),
        }
    }

    /// Drop all items and restart ids at 1.
    pub async fn reset(&self) {
        *self.inner.write().await = Inner::empty();
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for MemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, item: &NewItem) -> Result<Item, AppError> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id;
        inner.next_id += 1;
        let stored = Item {
            id,
            name: item.name.clone(),
            price: item.price,
            stock: item.stock,
        };
        inner.items.insert(id, stored.clone());
        Ok(stored)
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Option<Item>, AppError> {
        Ok(self.inner.read().await.items.get(&id).cloned())
    }

    async fn update_by_id(&self, id: i64, patch: &ItemPatch) -> Result<Option<Item>, AppError> {
        let mut inner = self.inner.write().await;
        Ok(inner.items.get_mut(&id).map(|item| {
            patch.apply_to(item);
            item.clone()
        }))
    }

    async fn scan_ordered_by_id(&self, filter: &ItemFilter, page: Page) -> Result<Vec<Item>, AppError> {
        let inner = self.inner.read().await;
        let offset = usize::try_from(page.offset).unwrap_or(usize::MAX);
        Ok(inner
            .items
            .values()
            .filter(|item| filter.matches(item))
            .skip(offset)
            .take(page.limit as usize)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
