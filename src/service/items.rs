//! Item store engine: validation, list normalization, and delegation to the backend.

use super::validation::ItemValidator;
use crate::error::AppError;
use crate::model::{Item, ItemFilter, ItemPatch, ListQuery, NewItem, Page, DEFAULT_LIMIT, MAX_LIMIT};
use crate::store::ItemStore;
use std::sync::Arc;

/// Cheap to clone; all clones share one backend.
#[derive(Clone)]
pub struct ItemService {
    store: Arc<dyn ItemStore>,
}

impl ItemService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        ItemService { store }
    }

    pub fn store(&self) -> &Arc<dyn ItemStore> {
        &self.store
    }

    pub async fn create(&self, item: NewItem) -> Result<Item, AppError> {
        ItemValidator::validate(&item)?;
        let created = self.store.insert(&item).await?;
        tracing::debug!(id = created.id, "item created");
        Ok(created)
    }

    /// `Ok(None)` when no item has this id.
    pub async fn get(&self, id: i64) -> Result<Option<Item>, AppError> {
        self.store.fetch_by_id(id).await
    }

    /// Filtered, id-ordered page of items. Limit above the ceiling is clamped.
    pub async fn list(&self, query: &ListQuery) -> Result<Vec<Item>, AppError> {
        let (filter, page) = normalize_list_query(query)?;
        self.store.scan_ordered_by_id(&filter, page).await
    }

    /// Apply a partial update. Every present field is validated before the store
    /// is touched, so a rejected patch changes nothing.
    pub async fn update(&self, id: i64, patch: ItemPatch) -> Result<Option<Item>, AppError> {
        ItemValidator::validate_partial(&patch)?;
        let updated = self.store.update_by_id(id, &patch).await?;
        if updated.is_some() {
            tracing::debug!(id, "item updated");
        }
        Ok(updated)
    }
}

/// Check list arguments and turn them into a filter and window.
pub fn normalize_list_query(query: &ListQuery) -> Result<(ItemFilter, Page), AppError> {
    let limit = query.limit.unwrap_or(i64::from(DEFAULT_LIMIT));
    if limit < 0 {
        return Err(AppError::InvalidArgument("limit must be >= 0".into()));
    }
    let offset = query.offset.unwrap_or(0);
    if offset < 0 {
        return Err(AppError::InvalidArgument("offset must be >= 0".into()));
    }
    for (key, bound) in [("min_price", query.min_price), ("max_price", query.max_price)] {
        if let Some(v) = bound {
            if !v.is_finite() || v < 0.0 {
                return Err(AppError::InvalidArgument(format!(
                    "{} must be a non-negative number",
                    key
                )));
            }
        }
    }
    if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
        if min > max {
            return Err(AppError::InvalidArgument(
                "min_price cannot be greater than max_price".into(),
            ));
        }
    }

    let name_contains = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let filter = ItemFilter {
        name_contains,
        min_price: query.min_price,
        max_price: query.max_price,
    };
    let page = Page {
        limit: limit.min(i64::from(MAX_LIMIT)) as u32,
        offset: offset as u64,
    };
    Ok((filter, page))
}
