use std::sync::Arc;

use crate::clauses::WhereClause;
use crate::error::{DbError, Result};
use crate::traits::{Column, ColumnRef, DatabaseDriver};
use crate::types::SqlValue;

/// Builder for `UPDATE table SET ... [WHERE ...]`.
pub struct Update {
    driver: Arc<dyn DatabaseDriver>,
    table: &'static str,
    assignments: Vec<(ColumnRef, SqlValue)>,
    where_clause: Option<WhereClause>,
}

impl Update {
    pub(crate) fn new(driver: Arc<dyn DatabaseDriver>, table: &'static str) -> Self {
        Self {
            driver,
            table,
            assignments: Vec::new(),
            where_clause: None,
        }
    }

    /// Add `column = value` to the SET list.
    pub fn set<C: Column, V: Into<SqlValue>>(mut self, column: &C, value: V) -> Self {
        self.assignments
            .push((ColumnRef::from_column(column), value.into()));
        self
    }

    /// Restrict the rows updated.
    pub fn where_(mut self, clause: WhereClause) -> Self {
        self.where_clause = Some(clause);
        self
    }

    pub(crate) fn build_sql(&self) -> Result<(String, Vec<SqlValue>)> {
        if self.assignments.is_empty() {
            return Err(DbError::InvalidStatement(format!(
                "UPDATE {} without SET",
                self.table
            )));
        }

        let mut params = Vec::with_capacity(self.assignments.len() + 1);
        let mut sql = format!("UPDATE {} SET ", self.table);
        for (i, (col, value)) in self.assignments.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            params.push(value.clone());
            // SET targets cannot be table-qualified in PostgreSQL
            sql.push_str(&format!("{} = ${}", col.column, params.len()));
        }

        if let Some(ref where_clause) = self.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&where_clause.build_sql(&mut params));
        }

        Ok((sql, params))
    }

    /// Execute the update and return the number of rows affected.
    pub async fn execute(self) -> Result<u64> {
        let (sql, params) = self.build_sql()?;
        self.driver.execute(&sql, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::InMemoryTestDriver;

    const ID: ColumnRef = ColumnRef {
        table: "students",
        column: "id",
    };
    const FIRST: ColumnRef = ColumnRef {
        table: "students",
        column: "firstName",
    };

    #[test]
    fn test_build_update_with_where() {
        let update = Update::new(Arc::new(InMemoryTestDriver::new()), "students")
            .set(&FIRST, "Ann")
            .where_(WhereClause::eq(&ID, 1));

        let (sql, params) = update.build_sql().unwrap();
        assert_eq!(sql, "UPDATE students SET firstName = $1 WHERE students.id = $2");
        assert_eq!(
            params,
            vec![SqlValue::Text("Ann".to_string()), SqlValue::Int32(1)]
        );
    }

    #[test]
    fn test_update_without_set_is_rejected() {
        let update = Update::new(Arc::new(InMemoryTestDriver::new()), "students")
            .where_(WhereClause::eq(&ID, 1));
        assert!(matches!(
            update.build_sql(),
            Err(DbError::InvalidStatement(_))
        ));
    }
}
