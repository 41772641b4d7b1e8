//! Builds parameterized INSERT, SELECT, UPDATE for the items table.

use super::params::SqlParam;
use crate::model::{ItemFilter, ItemPatch, NewItem, Page};

const ITEM_COLUMNS: &str = "\"id\", \"name\", \"price\", \"stock\"";

/// Quote identifier for PostgreSQL (safe: only from configuration).
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlParam) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

/// SELECT by primary key.
pub fn select_by_id(table: &str, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(SqlParam::I64(id));
    q.sql = format!("SELECT {} FROM {} WHERE \"id\" = ${}", ITEM_COLUMNS, table, n);
    q
}

/// SELECT list: filter conditions ANDed in name, min, max order, then id order and window.
pub fn select_list(table: &str, filter: &ItemFilter, page: Page) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut conditions: Vec<String> = Vec::new();
    if let Some(needle) = &filter.name_contains {
        let n = q.push_param(SqlParam::Text(needle.clone()));
        // Unicode folding here depends on the database collation (not C/POSIX).
        conditions.push(format!("strpos(lower(\"name\"), lower(${})) > 0", n));
    }
    if let Some(min) = filter.min_price {
        let n = q.push_param(SqlParam::F64(min));
        conditions.push(format!("\"price\" >= ${}", n));
    }
    if let Some(max) = filter.max_price {
        let n = q.push_param(SqlParam::F64(max));
        conditions.push(format!("\"price\" <= ${}", n));
    }
    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };
    let limit_n = q.push_param(SqlParam::I64(i64::from(page.limit)));
    let offset_n = q.push_param(SqlParam::I64(i64::try_from(page.offset).unwrap_or(i64::MAX)));
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY \"id\" ASC LIMIT ${} OFFSET ${}",
        ITEM_COLUMNS, table, where_clause, limit_n, offset_n
    );
    q
}

/// INSERT one item; id comes from the table's sequence.
pub fn insert(table: &str, item: &NewItem) -> QueryBuf {
    let mut q = QueryBuf::new();
    let name = q.push_param(SqlParam::Text(item.name.clone()));
    let price = q.push_param(SqlParam::F64(item.price));
    let stock = q.push_param(SqlParam::I64(item.stock));
    q.sql = format!(
        "INSERT INTO {} (\"name\", \"price\", \"stock\") VALUES (${}, ${}, ${}) RETURNING {}",
        table, name, price, stock, ITEM_COLUMNS
    );
    q
}

/// UPDATE only the fields present in the patch. `None` when the patch is empty.
pub fn update(table: &str, id: i64, patch: &ItemPatch) -> Option<QueryBuf> {
    if patch.is_empty() {
        return None;
    }
    let mut q = QueryBuf::new();
    let mut sets: Vec<String> = Vec::new();
    if let Some(name) = &patch.name {
        let n = q.push_param(SqlParam::Text(name.clone()));
        sets.push(format!("\"name\" = ${}", n));
    }
    if let Some(price) = patch.price {
        let n = q.push_param(SqlParam::F64(price));
        sets.push(format!("\"price\" = ${}", n));
    }
    if let Some(stock) = patch.stock {
        let n = q.push_param(SqlParam::I64(stock));
        sets.push(format!("\"stock\" = ${}", n));
    }
    let id_n = q.push_param(SqlParam::I64(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE \"id\" = ${} RETURNING {}",
        table,
        sets.join(", "),
        id_n,
        ITEM_COLUMNS
    );
    Some(q)
}
