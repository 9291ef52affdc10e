mod sqlite;
mod tokio_postgres;

pub use self::in_memory_test::{
    InMemoryTestDriver, InMemoryTestResponseBuilder, RecordedQuery, ScriptedResponse,
};
pub use self::sqlite::SqliteDriver;
pub use self::tokio_postgres::TokioPostgresDriver;
