/// A column of a backing store.
///
/// Both names are `&'static str`: identifiers are fixed at compile time and
/// are the only text builders splice into SQL verbatim.
pub trait Column {
    /// Returns the column name as it appears in the database.
    fn column_name(&self) -> &'static str;

    /// Returns the table name this column belongs to.
    fn table_name(&self) -> &'static str;

    /// Returns the fully qualified column name (table.column).
    fn qualified_name(&self) -> String {
        format!("{}.{}", self.table_name(), self.column_name())
    }
}

/// A type-erased column, stored by builders and clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRef {
    pub table: &'static str,
    pub column: &'static str,
}

impl ColumnRef {
    pub fn new(table: &'static str, column: &'static str) -> Self {
        Self { table, column }
    }

    pub fn from_column<C: Column + ?Sized>(col: &C) -> Self {
        Self {
            table: col.table_name(),
            column: col.column_name(),
        }
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.table, self.column)
    }
}

impl Column for ColumnRef {
    fn column_name(&self) -> &'static str {
        self.column
    }

    fn table_name(&self) -> &'static str {
        self.table
    }
}
