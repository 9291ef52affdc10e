//! studentdb - typed table access over parameterized SQL
//!
//! A [`Table`] exposes schema creation and CRUD for one entity type. Every
//! value reaches the database as a bound parameter; the only identifiers
//! spliced into SQL text are `&'static str` table and column names.
//!
//! # Example
//! ```ignore
//! use studentdb::{DbClient, Lookup, Student, Table};
//!
//! // The caller owns the connection; tables only borrow it
//! let client = DbClient::connect("postgres://localhost/lab").await?;
//! let students = client.students();
//!
//! students.create_schema().await;
//! students.save(&Student::new(1, "Ann", "Lee", None)).await;
//!
//! match students.try_find_by_key(1).await {
//!     Lookup::Found(student) => println!("{}", student.last_name()),
//!     Lookup::NotFound => println!("no such student"),
//!     Lookup::Failed(err) => eprintln!("lookup failed: {err}"),
//! }
//! ```

pub mod builders;
pub mod clauses;
pub mod config;
pub mod drivers;
pub mod error;
pub mod models;
pub mod querier;
pub mod tables;
pub mod traits;
pub mod types;

mod client;

// Re-export main types for convenient access
pub use clauses::WhereClause;
pub use client::DbClient;
pub use config::DbConfig;
pub use error::{DbError, Result};
pub use models::Student;
pub use querier::Querier;
pub use tables::StudentsTable;
pub use traits::{Column, ColumnRef, DatabaseDriver, Table};
pub use types::{Lookup, QueryResult, RawQueryResult, Row, SqlValue};
