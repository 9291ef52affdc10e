use async_trait::async_trait;

use crate::error::Result;
use crate::types::{RawQueryResult, SqlValue};

/// An open connection to a relational store.
///
/// The handle is opened and closed by whoever supplies it; tables only issue
/// statements through it. Each call is one round trip. Statement text uses
/// PostgreSQL-style placeholders ($1, $2, etc.) and every value travels as a
/// bound parameter. Drivers release any prepared statement or cursor before
/// returning, on error paths too.
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    /// Run a statement that returns rows.
    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<RawQueryResult>;

    /// Run a statement that returns no rows (DDL, INSERT, UPDATE, DELETE).
    /// Returns the number of rows affected.
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<u64>;
}
