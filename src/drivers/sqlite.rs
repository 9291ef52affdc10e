use std::borrow::Cow;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::types::{ToSqlOutput, Value, ValueRef};
use rusqlite::{params_from_iter, Connection, ToSql};
use tracing::debug;

use crate::error::{DbError, Result};
use crate::traits::DatabaseDriver;
use crate::types::{RawQueryResult, SqlValue};

/// Embedded SQLite driver implementation using rusqlite.
///
/// SQLite has no date type; dates are stored as `YYYY-MM-DD` text and come
/// back as `SqlValue::Text`, which `Row::get_opt_date` accepts. Calls run on
/// the caller's task and hold the connection lock for one round trip.
pub struct SqliteDriver {
    conn: Mutex<Connection>,
}

impl SqliteDriver {
    /// Open (or create) a database file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionFailed(e.to_string()))?;
        Ok(Self::from_connection(conn))
    }

    /// Wrap an already open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| DbError::ConnectionFailed("sqlite connection lock poisoned".to_string()))
    }
}

#[async_trait]
impl DatabaseDriver for SqliteDriver {
    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<RawQueryResult> {
        let sql = to_sqlite_placeholders(sql);
        debug!(sql = %sql, params = params.len(), "sqlite query");

        let conn = self.lock()?;
        let mut statement = conn.prepare(&sql).map_err(query_failed)?;
        let columns: Vec<String> = statement
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();

        let mut rows = statement
            .query(params_from_iter(params.iter()))
            .map_err(query_failed)?;
        let mut result_rows = Vec::new();
        while let Some(row) = rows.next().map_err(query_failed)? {
            let values = (0..columns.len())
                .map(|i| row.get_ref(i).map_err(query_failed).and_then(from_value_ref))
                .collect::<Result<Vec<_>>>()?;
            result_rows.push(values);
        }

        Ok(RawQueryResult::new(columns, result_rows))
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<u64> {
        let sql = to_sqlite_placeholders(sql);
        debug!(sql = %sql, params = params.len(), "sqlite execute");

        let conn = self.lock()?;
        let mut statement = conn.prepare(&sql).map_err(query_failed)?;
        let affected = statement
            .execute(params_from_iter(params.iter()))
            .map_err(query_failed)?;
        Ok(affected as u64)
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            SqlValue::Null => ToSqlOutput::Owned(Value::Null),
            SqlValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            SqlValue::Int32(i) => ToSqlOutput::Owned(Value::Integer(i64::from(*i))),
            SqlValue::Int64(i) => ToSqlOutput::Owned(Value::Integer(*i)),
            SqlValue::Date(d) => ToSqlOutput::Owned(Value::Text(d.format("%Y-%m-%d").to_string())),
        })
    }
}

fn query_failed(e: rusqlite::Error) -> DbError {
    DbError::QueryFailed(e.to_string())
}

fn from_value_ref(value: ValueRef<'_>) -> Result<SqlValue> {
    match value {
        ValueRef::Null => Ok(SqlValue::Null),
        ValueRef::Integer(i) => Ok(SqlValue::Int64(i)),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map(|s| SqlValue::Text(s.to_string()))
            .map_err(|e| DbError::QueryFailed(e.to_string())),
        ValueRef::Real(_) => Err(DbError::UnsupportedType("REAL".to_string())),
        ValueRef::Blob(_) => Err(DbError::UnsupportedType("BLOB".to_string())),
    }
}

/// Rewrite `$N` placeholders as SQLite's numbered `?N` form.
///
/// Quoted literals and identifiers are copied untouched. Builders never put
/// values in the text, so in practice only placeholders match.
fn to_sqlite_placeholders(sql: &str) -> Cow<'_, str> {
    if !sql.contains('$') {
        return Cow::Borrowed(sql);
    }

    let mut out = String::with_capacity(sql.len());
    let mut quote: Option<char> = None;
    let mut chars = sql.chars().peekable();
    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
                out.push(c);
            }
            None => match c {
                '\'' | '"' => {
                    quote = Some(c);
                    out.push(c);
                }
                '$' if chars.peek().is_some_and(|n| n.is_ascii_digit()) => out.push('?'),
                _ => out.push(c),
            },
        }
    }
    Cow::Owned(out)
}
