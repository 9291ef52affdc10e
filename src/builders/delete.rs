use std::sync::Arc;

use crate::clauses::WhereClause;
use crate::error::Result;
use crate::traits::DatabaseDriver;
use crate::types::SqlValue;

/// Builder for `DELETE FROM table [WHERE ...]`.
pub struct Delete {
    driver: Arc<dyn DatabaseDriver>,
    table: &'static str,
    where_clause: Option<WhereClause>,
}

impl Delete {
    pub(crate) fn new(driver: Arc<dyn DatabaseDriver>, table: &'static str) -> Self {
        Self {
            driver,
            table,
            where_clause: None,
        }
    }

    /// Restrict the rows deleted. Without one, every row goes.
    pub fn where_(mut self, clause: WhereClause) -> Self {
        self.where_clause = Some(clause);
        self
    }

    pub(crate) fn build_sql(&self) -> (String, Vec<SqlValue>) {
        let mut params = Vec::new();
        let mut sql = format!("DELETE FROM {}", self.table);
        if let Some(ref where_clause) = self.where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(&where_clause.build_sql(&mut params));
        }
        (sql, params)
    }

    /// Execute the delete and return the number of rows affected.
    pub async fn execute(self) -> Result<u64> {
        let (sql, params) = self.build_sql();
        self.driver.execute(&sql, &params).await
    }
}
