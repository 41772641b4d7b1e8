//! PostgreSQL backend: items table DDL, database bootstrap, and the [`ItemStore`] impl.
//! The table lives in a schema named from settings (default `inventory`).

use super::ItemStore;
use crate::error::{AppError, ConfigError};
use crate::model::{Item, ItemFilter, ItemPatch, NewItem, Page};
use crate::sql::{self, bind_all, qualified_table, quoted, QueryBuf};
use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

pub const ITEMS_TABLE: &str = "items";

/// Create the schema if not exists, then the items table and its name index.
pub async fn ensure_items_table(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)))
        .execute(pool)
        .await?;

    let table = qualified_table(schema, ITEMS_TABLE);
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(200) NOT NULL,
            price DOUBLE PRECISION NOT NULL,
            stock BIGINT NOT NULL
        )
        "#,
        table
    );
    sqlx::query(&ddl).execute(pool).await?;
    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} (name)",
        quoted("ix_items_name"),
        table
    ))
    .execute(pool)
    .await?;
    tracing::info!(table = %table, "items table ready");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
/// A URL without a database path leaves the server default in place.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin, db_name) = admin_connect_options(database_url)?;
    let db_name = match db_name {
        Some(name) if !name.is_empty() && name != "postgres" => name,
        _ => return Ok(()),
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the `postgres` maintenance database on the same server, plus the
/// database named in the URL, if any.
fn admin_connect_options(url: &str) -> Result<(PgConnectOptions, Option<String>), ConfigError> {
    let opts = PgConnectOptions::from_str(url).map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let db_name = opts.get_database().map(str::to_string);
    Ok((opts.database("postgres"), db_name))
}

/// Items table in PostgreSQL. Each mutation is one statement, so the database's
/// own isolation makes it atomic.
#[derive(Clone)]
pub struct PgItemStore {
    pool: PgPool,
    table: String,
}

impl PgItemStore {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgItemStore {
            pool,
            table: qualified_table(schema, ITEMS_TABLE),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Item>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all(sqlx::query_as::<_, Item>(&q.sql), &q.params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    fn kind(&self) -> &'static str {
        "postgres"
    }

    async fn insert(&self, item: &NewItem) -> Result<Item, AppError> {
        let q = sql::insert(&self.table, item);
        self.fetch_optional(&q)
            .await?
            .ok_or_else(|| AppError::Backend(format!("insert into {} returned no row", self.table)))
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Option<Item>, AppError> {
        self.fetch_optional(&sql::select_by_id(&self.table, id)).await
    }

    async fn update_by_id(&self, id: i64, patch: &ItemPatch) -> Result<Option<Item>, AppError> {
        match sql::update(&self.table, id, patch) {
            Some(q) => self.fetch_optional(&q).await,
            None => self.fetch_by_id(id).await,
        }
    }

    async fn scan_ordered_by_id(&self, filter: &ItemFilter, page: Page) -> Result<Vec<Item>, AppError> {
        let q = sql::select_list(&self.table, filter, page);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_all(sqlx::query_as::<_, Item>(&q.sql), &q.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_options_point_at_maintenance_database() {
        let (admin, name) =
            admin_connect_options("postgres://user:pw@localhost:5432/inventory?sslmode=disable").unwrap();
        assert_eq!(name.as_deref(), Some("inventory"));
        assert_eq!(admin.get_database(), Some("postgres"));
        assert_eq!(admin.get_host(), "localhost");
        assert_eq!(admin.get_port(), 5432);
        assert_eq!(admin.get_username(), "user");
    }

    #[test]
    fn url_without_database_path_keeps_host() {
        // PGDATABASE fills in a missing path, so only check the name when it is unset.
        let pg_database_unset = std::env::var("PGDATABASE").is_err();
        for (url, host) in [
            ("postgres://user@localhost:5432", "localhost"),
            ("postgres://db.internal", "db.internal"),
            ("postgres://db.internal/", "db.internal"),
        ] {
            let (admin, name) = admin_connect_options(url).unwrap();
            assert_eq!(admin.get_host(), host, "url {}", url);
            assert_eq!(admin.get_database(), Some("postgres"));
            if pg_database_unset {
                assert_eq!(name, None, "url {}", url);
            }
        }
    }

    #[test]
    fn unparseable_url_is_config_error() {
        assert!(matches!(
            admin_connect_options("localhost"),
            Err(ConfigError::DatabaseUrl(_))
        ));
    }
}
