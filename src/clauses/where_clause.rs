use crate::traits::{Column, ColumnRef};
use crate::types::SqlValue;

/// Represents a WHERE clause condition.
/// Values are never written into the SQL text; each becomes a `$n` parameter.
#[derive(Debug, Clone)]
pub enum WhereClause {
    /// column = value
    Eq(ColumnRef, SqlValue),
    /// clause AND clause
    And(Box<WhereClause>, Box<WhereClause>),
    /// clause OR clause
    Or(Box<WhereClause>, Box<WhereClause>),
}

impl WhereClause {
    /// Creates an equality condition: column = value
    pub fn eq<C: Column, V: Into<SqlValue>>(column: &C, value: V) -> Self {
        WhereClause::Eq(ColumnRef::from_column(column), value.into())
    }

    /// Combines this clause with another using AND
    pub fn and(self, other: WhereClause) -> Self {
        WhereClause::And(Box::new(self), Box::new(other))
    }

    /// Combines this clause with another using OR
    pub fn or(self, other: WhereClause) -> Self {
        WhereClause::Or(Box::new(self), Box::new(other))
    }

    /// Builds the SQL fragment and appends this clause's values to `params`.
    ///
    /// Placeholders continue numbering from whatever `params` already holds,
    /// so a clause can follow the values of a SET list or a VALUES list.
    pub fn build_sql(&self, params: &mut Vec<SqlValue>) -> String {
        match self {
            WhereClause::Eq(col, value) => {
                params.push(value.clone());
                format!("{} = ${}", col.qualified_name(), params.len())
            }
            WhereClause::And(left, right) => {
                let left_sql = left.build_sql(params);
                let right_sql = right.build_sql(params);
                format!("({}) AND ({})", left_sql, right_sql)
            }
            WhereClause::Or(left, right) => {
                let left_sql = left.build_sql(params);
                let right_sql = right.build_sql(params);
                format!("({}) OR ({})", left_sql, right_sql)
            }
        }
    }
}
