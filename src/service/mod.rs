//! ItemService: the item engine, plus field validation.

mod items;
mod validation;
pub use items::{normalize_list_query, ItemService};
pub use validation::{ItemValidator, NAME_MAX_LENGTH, NAME_MIN_LENGTH};
