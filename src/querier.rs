use std::sync::Arc;

use crate::builders::{Delete, Insert, Select, Update};
use crate::error::Result;
use crate::traits::DatabaseDriver;

/// Query builder factory.
/// Created from a DbClient or a table and used to build and execute statements.
#[derive(Clone)]
pub struct Querier {
    driver: Arc<dyn DatabaseDriver>,
}

impl Querier {
    pub(crate) fn new(driver: Arc<dyn DatabaseDriver>) -> Self {
        Self { driver }
    }

    /// Start building a SELECT query.
    pub fn select(&self) -> Select {
        Select::new(Arc::clone(&self.driver))
    }

    /// Start building an INSERT statement.
    pub fn insert_into(&self, table: &'static str) -> Insert {
        Insert::new(Arc::clone(&self.driver), table)
    }

    /// Start building an UPDATE statement.
    pub fn update(&self, table: &'static str) -> Update {
        Update::new(Arc::clone(&self.driver), table)
    }

    /// Start building a DELETE statement.
    pub fn delete_from(&self, table: &'static str) -> Delete {
        Delete::new(Arc::clone(&self.driver), table)
    }

    /// Run a parameterless schema statement such as CREATE TABLE.
    pub async fn ddl(&self, statement: &str) -> Result<()> {
        self.driver.execute(statement, &[]).await.map(|_| ())
    }
}
