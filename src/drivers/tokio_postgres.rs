use async_trait::async_trait;
use chrono::NaiveDate;
use tokio_postgres::{
    types::{ToSql, Type},
    Client, NoTls, Statement,
};
use tracing::{debug, error};

use crate::error::{DbError, Result};
use crate::traits::DatabaseDriver;
use crate::types::{RawQueryResult, SqlValue};

/// PostgreSQL driver implementation using tokio-postgres.
pub struct TokioPostgresDriver {
    client: Client,
}

impl TokioPostgresDriver {
    /// Connect to a PostgreSQL database.
    pub async fn connect(connection_string: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(connection_string, NoTls)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        // Spawn the connection handler
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "PostgreSQL connection error");
            }
        });

        Ok(Self { client })
    }

    async fn prepare(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<(Statement, Vec<Box<dyn ToSql + Sync + Send>>)> {
        let statement = self.client.prepare(sql).await.map_err(query_failed)?;
        let converted = bind_params(statement.params(), params)?;
        Ok((statement, converted))
    }
}

#[async_trait]
impl DatabaseDriver for TokioPostgresDriver {
    async fn query(&self, sql: &str, params: &[SqlValue]) -> Result<RawQueryResult> {
        debug!(sql, params = params.len(), "postgres query");
        let (statement, converted) = self.prepare(sql, params).await?;
        let param_refs: Vec<&(dyn ToSql + Sync)> = converted
            .iter()
            .map(|b| b.as_ref() as &(dyn ToSql + Sync))
            .collect();

        let rows = self
            .client
            .query(&statement, &param_refs)
            .await
            .map_err(query_failed)?;

        let columns: Vec<String> = statement
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        let result_rows = rows
            .iter()
            .map(|row| {
                row.columns()
                    .iter()
                    .enumerate()
                    .map(|(i, col)| row_value(row, i, col.type_()))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RawQueryResult::new(columns, result_rows))
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<u64> {
        debug!(sql, params = params.len(), "postgres execute");
        let (statement, converted) = self.prepare(sql, params).await?;
        let param_refs: Vec<&(dyn ToSql + Sync)> = converted
            .iter()
            .map(|b| b.as_ref() as &(dyn ToSql + Sync))
            .collect();

        self.client
            .execute(&statement, &param_refs)
            .await
            .map_err(query_failed)
    }
}

/// Convert `params` for a statement whose placeholders have types `types`.
/// Typed against the prepared statement so NULL binds as the column's type.
fn bind_params(types: &[Type], params: &[SqlValue]) -> Result<Vec<Box<dyn ToSql + Sync + Send>>> {
    if types.len() != params.len() {
        return Err(DbError::InvalidStatement(format!(
            "statement expects {} parameter(s), got {}",
            types.len(),
            params.len()
        )));
    }

    Ok(params
        .iter()
        .zip(types)
        .map(|(value, ty)| sql_value_to_tosql(value, ty))
        .collect())
}

fn query_failed(e: tokio_postgres::Error) -> DbError {
    DbError::QueryFailed(e.to_string())
}

/// Convert a SqlValue to a boxed ToSql trait object for a parameter of type `ty`.
fn sql_value_to_tosql(value: &SqlValue, ty: &Type) -> Box<dyn ToSql + Sync + Send> {
    match value {
        SqlValue::Null => typed_null(ty),
        SqlValue::Text(s) => Box::new(s.clone()),
        SqlValue::Int32(i) => Box::new(*i),
        SqlValue::Int64(i) => Box::new(*i),
        SqlValue::Date(d) => Box::new(*d),
    }
}

fn typed_null(ty: &Type) -> Box<dyn ToSql + Sync + Send> {
    match *ty {
        Type::INT2 => Box::new(None::<i16>),
        Type::INT4 => Box::new(None::<i32>),
        Type::INT8 => Box::new(None::<i64>),
        Type::DATE => Box::new(None::<NaiveDate>),
        _ => Box::new(None::<String>),
    }
}

/// Read the value at `index`, mapping SQL NULL to `SqlValue::Null`.
fn row_value(row: &tokio_postgres::Row, index: usize, ty: &Type) -> Result<SqlValue> {
    let value = match *ty {
        Type::INT2 => row
            .try_get::<_, Option<i16>>(index)
            .map(|v| v.map(|v| SqlValue::Int32(v.into()))),
        Type::INT4 => row
            .try_get::<_, Option<i32>>(index)
            .map(|v| v.map(SqlValue::Int32)),
        Type::INT8 => row
            .try_get::<_, Option<i64>>(index)
            .map(|v| v.map(SqlValue::Int64)),
        Type::DATE => row
            .try_get::<_, Option<NaiveDate>>(index)
            .map(|v| v.map(SqlValue::Date)),
        // CHAR(n) pads with spaces on the way out
        Type::BPCHAR => row
            .try_get::<_, Option<String>>(index)
            .map(|v| v.map(|s| SqlValue::Text(s.trim_end_matches(' ').to_string()))),
        Type::TEXT | Type::VARCHAR | Type::NAME => row
            .try_get::<_, Option<String>>(index)
            .map(|v| v.map(SqlValue::Text)),
        _ => return Err(DbError::UnsupportedType(ty.name().to_string())),
    };

    value
        .map(|v| v.unwrap_or(SqlValue::Null))
        .map_err(query_failed)
}
