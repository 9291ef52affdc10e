use chrono::NaiveDate;

/// One row of the students table.
///
/// Immutable once built; the fields are only readable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Student {
    id: i32,
    first_name: String,
    last_name: String,
    birthday: Option<NaiveDate>,
}

impl Student {
    pub fn new(
        id: i32,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birthday: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            birthday,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn birthday(&self) -> Option<NaiveDate> {
        self.birthday
    }
}
