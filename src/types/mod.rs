mod lookup;
mod row;
mod sql_value;

pub use lookup::Lookup;
pub use row::{QueryResult, RawQueryResult, Row};
pub use sql_value::SqlValue;
