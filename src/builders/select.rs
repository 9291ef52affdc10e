use std::sync::Arc;

use crate::clauses::WhereClause;
use crate::error::Result;
use crate::traits::{Column, ColumnRef, DatabaseDriver};
use crate::types::{QueryResult, SqlValue};

/// Entry point for building a SELECT query.
/// Must call `.columns()` or `.all()` to proceed.
pub struct Select {
    driver: Arc<dyn DatabaseDriver>,
}

impl Select {
    pub(crate) fn new(driver: Arc<dyn DatabaseDriver>) -> Self {
        Self { driver }
    }

    /// Specify the columns to select.
    pub fn columns(self, cols: &[&dyn Column]) -> SelectWithColumns {
        let columns = cols.iter().map(|c| ColumnRef::from_column(*c)).collect();
        SelectWithColumns {
            driver: self.driver,
            columns,
        }
    }

    /// Select every column (`SELECT *`).
    pub fn all(self) -> SelectWithColumns {
        SelectWithColumns {
            driver: self.driver,
            columns: Vec::new(),
        }
    }
}

/// SELECT builder after columns have been specified.
/// Must call `.from()` to proceed.
pub struct SelectWithColumns {
    driver: Arc<dyn DatabaseDriver>,
    columns: Vec<ColumnRef>,
}

impl SelectWithColumns {
    /// Specify the table to select from.
    pub fn from(self, table: &'static str) -> SelectWithTable {
        SelectWithTable {
            driver: self.driver,
            columns: self.columns,
            table,
            where_clause: None,
            limit: None,
        }
    }
}

/// SELECT builder after table has been specified.
/// Can optionally add WHERE clause, LIMIT, or execute directly.
pub struct SelectWithTable {
    driver: Arc<dyn DatabaseDriver>,
    columns: Vec<ColumnRef>,
    table: &'static str,
    where_clause: Option<WhereClause>,
    limit: Option<u64>,
}

impl SelectWithTable {
    /// Add a WHERE clause to the query.
    pub fn where_(mut self, clause: WhereClause) -> Self {
        self.where_clause = Some(clause);
        self
    }

    /// Add a LIMIT to the query.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Build the SQL query string and parameters.
    pub(crate) fn build_sql(&self) -> (String, Vec<SqlValue>) {
        let mut sql = String::with_capacity(256);
        let mut params = Vec::new();

        sql.push_str("SELECT ");
        if self.columns.is_empty() {
            sql.push('*');
        }
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&col.qualified_name());
        }

        sql.push_str(" FROM ");
        sql.push_str(self.table);

        if let Some(ref where_clause) = self.where_clause {
            sql.push_str(" WHERE ");
            let where_sql = where_clause.build_sql(&mut params);
            sql.push_str(&where_sql);
        }

        // LIMIT is a u64, never caller text
        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ");
            sql.push_str(&limit.to_string());
        }

        (sql, params)
    }

    /// Execute the query and return the result.
    pub async fn execute(self) -> Result<QueryResult> {
        let (sql, params) = self.build_sql();
        let raw_result = self.driver.query(&sql, &params).await?;
        Ok(QueryResult::from_raw(raw_result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::InMemoryTestDriver;

    struct StudentId;
    struct StudentName;

    impl Column for StudentId {
        fn column_name(&self) -> &'static str {
            "id"
        }
        fn table_name(&self) -> &'static str {
            "students"
        }
    }

    impl Column for StudentName {
        fn column_name(&self) -> &'static str {
            "firstName"
        }
        fn table_name(&self) -> &'static str {
            "students"
        }
    }

    fn select() -> Select {
        Select::new(Arc::new(InMemoryTestDriver::new()))
    }

    #[test]
    fn test_build_select_all() {
        let (sql, params) = select().all().from("students").build_sql();
        assert_eq!(sql, "SELECT * FROM students");
        assert!(params.is_empty());
    }

    #[test]
    fn test_build_simple_select() {
        let builder = select()
            .columns(&[&StudentId, &StudentName])
            .from("students");

        let (sql, params) = builder.build_sql();
        assert_eq!(sql, "SELECT students.id, students.firstName FROM students");
        assert!(params.is_empty());
    }

    #[test]
    fn test_build_select_with_where() {
        let builder = select()
            .all()
            .from("students")
            .where_(WhereClause::eq(&StudentName, "John"));

        let (sql, params) = builder.build_sql();
        assert_eq!(sql, "SELECT * FROM students WHERE students.firstName = $1");
        assert_eq!(params, vec![SqlValue::Text("John".to_string())]);
    }

    #[test]
    fn test_build_select_with_where_and_limit() {
        let builder = select()
            .columns(&[&StudentId])
            .from("students")
            .where_(WhereClause::eq(&StudentName, "John"))
            .limit(10);

        let (sql, params) = builder.build_sql();
        assert_eq!(
            sql,
            "SELECT students.id FROM students WHERE students.firstName = $1 LIMIT 10"
        );
        assert_eq!(params.len(), 1);
    }
}
