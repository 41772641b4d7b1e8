//! Inventory service: item CRUD with filtering, pagination and partial updates
//! over a memory or PostgreSQL backend.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{DatabaseSettings, Settings, StoreBackend};
pub use error::{AppError, ConfigError};
pub use model::{Item, ItemFilter, ItemPatch, ListQuery, NewItem, Page, DEFAULT_LIMIT, MAX_LIMIT};
pub use routes::{build_router, common_routes, item_routes};
pub use service::ItemService;
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_items_table, ItemStore, MemoryItemStore, PgItemStore};
