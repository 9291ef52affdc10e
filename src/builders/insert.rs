use std::sync::Arc;

use crate::error::{DbError, Result};
use crate::traits::{Column, ColumnRef, DatabaseDriver};
use crate::types::SqlValue;

/// Builder for `INSERT INTO table (...) VALUES (...)`.
pub struct Insert {
    driver: Arc<dyn DatabaseDriver>,
    table: &'static str,
    values: Vec<(ColumnRef, SqlValue)>,
}

impl Insert {
    pub(crate) fn new(driver: Arc<dyn DatabaseDriver>, table: &'static str) -> Self {
        Self {
            driver,
            table,
            values: Vec::new(),
        }
    }

    /// Bind `value` to `column`. Columns are emitted in call order.
    pub fn value<C: Column, V: Into<SqlValue>>(mut self, column: &C, value: V) -> Self {
        self.values
            .push((ColumnRef::from_column(column), value.into()));
        self
    }

    pub(crate) fn build_sql(&self) -> Result<(String, Vec<SqlValue>)> {
        if self.values.is_empty() {
            return Err(DbError::InvalidStatement(format!(
                "INSERT INTO {} without values",
                self.table
            )));
        }

        let columns: Vec<&str> = self.values.iter().map(|(col, _)| col.column).collect();
        let placeholders: Vec<String> = (1..=self.values.len()).map(|i| format!("${i}")).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            columns.join(", "),
            placeholders.join(", ")
        );
        let params = self.values.iter().map(|(_, value)| value.clone()).collect();

        Ok((sql, params))
    }

    /// Execute the insert and return the number of rows affected.
    pub async fn execute(self) -> Result<u64> {
        let (sql, params) = self.build_sql()?;
        self.driver.execute(&sql, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::InMemoryTestDriver;

    #[test]
    fn test_build_insert() {
        let insert = Insert::new(Arc::new(InMemoryTestDriver::new()), "students")
            .value(&ColumnRef::new("students", "id"), 1)
            .value(&ColumnRef::new("students", "lastName"), "O'Brien");

        let (sql, params) = insert.build_sql().unwrap();
        assert_eq!(sql, "INSERT INTO students (id, lastName) VALUES ($1, $2)");
        assert_eq!(
            params,
            vec![SqlValue::Int32(1), SqlValue::Text("O'Brien".to_string())]
        );
    }

    #[test]
    fn test_insert_without_values_is_rejected() {
        let insert = Insert::new(Arc::new(InMemoryTestDriver::new()), "students");
        assert!(matches!(
            insert.build_sql(),
            Err(DbError::InvalidStatement(_))
        ));
    }
}
