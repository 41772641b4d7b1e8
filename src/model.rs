//! Item entity, create/patch payloads, and normalized list parameters.

use serde::{Deserialize, Serialize};

/// Default page size when `limit` is not given.
pub const DEFAULT_LIMIT: u32 = 100;
/// Safety ceiling; larger limits are clamped, not rejected.
pub const MAX_LIMIT: u32 = 1000;

/// Stored inventory record. Only the store assigns `id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

/// POST body.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

/// PATCH body. `None` means "leave unchanged"; JSON `null` is treated the same as absent.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub stock: Option<i64>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.stock.is_none()
    }

    /// Applies the present fields to `item`. `id` is never touched.
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        if let Some(stock) = self.stock {
            item.stock = stock;
        }
    }
}

/// Raw list request as received from the caller, before normalization.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListQuery {
    pub q: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Normalized predicate over items. `name_contains` is already lowercased and trimmed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ItemFilter {
    pub name_contains: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ItemFilter {
    /// Name matching uses full Unicode lowercasing, the same folding PostgreSQL's
    /// `lower()` applies under a UTF-8 database with a non-C collation.
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(needle) = &self.name_contains {
            if !item.name.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if item.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if item.price > max {
                return false;
            }
        }
        true
    }
}

/// Window over the id-ordered result set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub offset: u64,
}

impl Default for Page {
    fn default() -> Self {
        Page {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}
