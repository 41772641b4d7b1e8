//! Typed bind values for the items table and a helper to attach them to a query.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;

/// A value bound to a numbered placeholder.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlParam {
    I64(i64),
    F64(f64),
    Text(String),
}

/// Bind every param in order to a `query_as`.
pub fn bind_all<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    params: &'q [SqlParam],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for p in params {
        query = match p {
            SqlParam::I64(n) => query.bind(*n),
            SqlParam::F64(n) => query.bind(*n),
            SqlParam::Text(s) => query.bind(s.as_str()),
        };
    }
    query
}
