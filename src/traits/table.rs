use async_trait::async_trait;
use tracing::warn;

use crate::error::Result;
use crate::types::Lookup;

/// A backing store holding entities of type `E` keyed by `K`.
///
/// Implementors provide the `try_*` methods, which report a tagged outcome.
/// The remaining methods are provided and collapse that outcome into a plain
/// success flag, `Option` or `Vec`; the cause of a collapsed failure is only
/// logged. Under those methods "not found" and "query failed" look the same.
///
/// Implementations must bind every caller-supplied value as a statement
/// parameter. The table name is the only identifier interpolated into SQL.
#[async_trait]
pub trait Table<E, K>: Send + Sync
where
    E: Send + Sync + 'static,
    K: Send + Sync + 'static,
{
    /// Returns the table name as it appears in the database.
    fn table_name(&self) -> &'static str;

    /// Creates the backing store. Fails if it already exists.
    async fn try_create_schema(&self) -> Result<()>;

    /// Drops the backing store.
    async fn try_drop_schema(&self) -> Result<()>;

    async fn try_find_by_key(&self, key: K) -> Lookup<E>;

    /// Returns every stored entity, in whatever order the store yields them.
    async fn try_find_all(&self) -> Result<Vec<E>>;

    /// Inserts a new entity. Fails on a duplicate key.
    async fn try_save(&self, entity: &E) -> Result<()>;

    /// Overwrites the entity stored under `entity`'s key. Fails if there is none.
    async fn try_update(&self, entity: &E) -> Result<()>;

    /// Removes the entity stored under `key`. Fails if there is none.
    async fn try_delete(&self, key: K) -> Result<()>;

    async fn create_schema(&self) -> bool {
        let outcome = self.try_create_schema().await;
        succeeded(self.table_name(), "create_schema", outcome)
    }

    async fn drop_schema(&self) -> bool {
        let outcome = self.try_drop_schema().await;
        succeeded(self.table_name(), "drop_schema", outcome)
    }

    async fn find_by_key(&self, key: K) -> Option<E> {
        match self.try_find_by_key(key).await {
            Lookup::Failed(err) => {
                warn!(table = self.table_name(), error = %err, "find_by_key failed");
                None
            }
            lookup => lookup.into_option(),
        }
    }

    async fn find_all(&self) -> Vec<E> {
        match self.try_find_all().await {
            Ok(entities) => entities,
            Err(err) => {
                warn!(table = self.table_name(), error = %err, "find_all failed");
                Vec::new()
            }
        }
    }

    async fn save(&self, entity: &E) -> bool {
        let outcome = self.try_save(entity).await;
        succeeded(self.table_name(), "save", outcome)
    }

    async fn update(&self, entity: &E) -> bool {
        let outcome = self.try_update(entity).await;
        succeeded(self.table_name(), "update", outcome)
    }

    async fn delete(&self, key: K) -> bool {
        let outcome = self.try_delete(key).await;
        succeeded(self.table_name(), "delete", outcome)
    }
}

fn succeeded(table: &'static str, operation: &'static str, outcome: Result<()>) -> bool {
    match outcome {
        Ok(()) => true,
        Err(err) => {
            warn!(table, operation, error = %err, "table operation failed");
            false
        }
    }
}
