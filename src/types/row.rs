use std::collections::HashMap;

use chrono::NaiveDate;

use crate::{
    error::{DbError, Result},
    Column, SqlValue,
};

/// Driver-agnostic raw result from a database query.
#[derive(Debug, Clone)]
pub struct RawQueryResult {
    /// Column names in order
    pub columns: Vec<String>,
    /// Rows, where each row is a vector of values in column order
    pub rows: Vec<Vec<SqlValue>>,
}

impl RawQueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }
}

/// A single row result from a query.
///
/// Values are accessed by column name. Lookup ignores ASCII case, since
/// PostgreSQL reports unquoted identifiers such as `firstName` folded to
/// lower case.
#[derive(Debug, Clone)]
pub struct Row {
    values: HashMap<String, SqlValue>,
}

impl Row {
    /// Creates a new Row from column names and values.
    pub(crate) fn new(columns: &[String], values: Vec<SqlValue>) -> Self {
        let values = columns
            .iter()
            .zip(values)
            .map(|(col, val)| (col.to_ascii_lowercase(), val))
            .collect();
        Self { values }
    }

    /// Gets a value by column name.
    pub fn get<T: Column + ?Sized>(&self, column: &T) -> Result<&SqlValue> {
        self.values
            .get(&column.column_name().to_ascii_lowercase())
            .ok_or_else(|| DbError::ColumnNotFound(column.qualified_name()))
    }

    /// Gets an integer column. 64-bit values are accepted when they fit.
    pub fn get_i32<T: Column + ?Sized>(&self, column: &T) -> Result<i32> {
        match self.get(column)? {
            SqlValue::Int32(v) => Ok(*v),
            SqlValue::Int64(v) => i32::try_from(*v).map_err(|_| mismatch(column, "int32")),
            _ => Err(mismatch(column, "int32")),
        }
    }

    /// Gets a non-null text column.
    pub fn get_str<T: Column + ?Sized>(&self, column: &T) -> Result<&str> {
        match self.get(column)? {
            SqlValue::Text(s) => Ok(s.as_str()),
            _ => Err(mismatch(column, "text")),
        }
    }

    /// Gets a nullable date column. NULL maps to `None`; drivers without a
    /// native date type may hand back `YYYY-MM-DD` text.
    pub fn get_opt_date<T: Column + ?Sized>(&self, column: &T) -> Result<Option<NaiveDate>> {
        match self.get(column)? {
            SqlValue::Null => Ok(None),
            SqlValue::Date(d) => Ok(Some(*d)),
            SqlValue::Text(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| mismatch(column, "date")),
            _ => Err(mismatch(column, "date")),
        }
    }
}

fn mismatch<T: Column + ?Sized>(column: &T, expected: &'static str) -> DbError {
    DbError::TypeMismatch {
        column: column.qualified_name(),
        expected,
    }
}

/// Result of a query execution, containing zero or more rows.
#[derive(Debug)]
pub struct QueryResult {
    rows: Vec<Row>,
}

impl QueryResult {
    /// Creates a QueryResult from a RawQueryResult.
    pub fn from_raw(raw: RawQueryResult) -> Self {
        let rows = raw
            .rows
            .into_iter()
            .map(|values| Row::new(&raw.columns, values))
            .collect();
        Self { rows }
    }

    /// Extracts a single row from the result.
    /// Returns an error if the result contains zero or more than one row.
    pub fn single_row(self) -> Result<Row> {
        let actual = self.rows.len();
        let mut rows = self.rows.into_iter();
        match (rows.next(), rows.next()) {
            (Some(row), None) => Ok(row),
            _ => Err(DbError::UnexpectedRowCount {
                expected: 1,
                actual,
            }),
        }
    }

    /// Returns all rows from the result.
    pub fn rows(self) -> Vec<Row> {
        self.rows
    }

    /// Returns the number of rows in this result.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if this result contains no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
