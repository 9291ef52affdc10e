use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::warn;

use crate::clauses::WhereClause;
use crate::error::{DbError, Result};
use crate::models::Student;
use crate::querier::Querier;
use crate::traits::{Column, DatabaseDriver, Table};
use crate::types::{Lookup, QueryResult, Row};

/// The `students` table: `Student` rows keyed by their integer id.
///
/// Layout: `id INT NOT NULL PRIMARY KEY`, `firstName CHAR(40) NOT NULL`,
/// `lastName CHAR(40) NOT NULL`, `birthday DATE` (nullable).
///
/// The table borrows a connection handle; it never opens or closes it.
///
/// Trailing spaces in names are store dependent. PostgreSQL's `CHAR(40)`
/// cannot tell padding from content, so `"Ann "` reads back as `"Ann"`
/// there, while SQLite returns it unchanged.
pub struct StudentsTable {
    querier: Querier,
}

/// Column accessors for the students table.
pub struct StudentsColumns {
    pub id: StudentsId,
    pub first_name: StudentsFirstName,
    pub last_name: StudentsLastName,
    pub birthday: StudentsBirthday,
}

pub struct StudentsId;
pub struct StudentsFirstName;
pub struct StudentsLastName;
pub struct StudentsBirthday;

impl Column for StudentsId {
    fn column_name(&self) -> &'static str {
        "id"
    }
    fn table_name(&self) -> &'static str {
        StudentsTable::TABLE_NAME
    }
}

impl Column for StudentsFirstName {
    fn column_name(&self) -> &'static str {
        "firstName"
    }
    fn table_name(&self) -> &'static str {
        StudentsTable::TABLE_NAME
    }
}

impl Column for StudentsLastName {
    fn column_name(&self) -> &'static str {
        "lastName"
    }
    fn table_name(&self) -> &'static str {
        StudentsTable::TABLE_NAME
    }
}

impl Column for StudentsBirthday {
    fn column_name(&self) -> &'static str {
        "birthday"
    }
    fn table_name(&self) -> &'static str {
        StudentsTable::TABLE_NAME
    }
}

impl StudentsTable {
    pub const TABLE_NAME: &'static str = "students";

    pub fn new(driver: Arc<dyn DatabaseDriver>) -> Self {
        Self {
            querier: Querier::new(driver),
        }
    }

    pub fn columns() -> StudentsColumns {
        StudentsColumns {
            id: StudentsId,
            first_name: StudentsFirstName,
            last_name: StudentsLastName,
            birthday: StudentsBirthday,
        }
    }

    /// Every student born on `date`.
    pub async fn try_find_by_birthday(&self, date: NaiveDate) -> Result<Vec<Student>> {
        let result = self
            .querier
            .select()
            .all()
            .from(Self::TABLE_NAME)
            .where_(WhereClause::eq(&Self::columns().birthday, date))
            .execute()
            .await?;
        read_students(result)
    }

    /// Like [`Self::try_find_by_birthday`], but a failed query yields no students.
    pub async fn find_by_birthday(&self, date: NaiveDate) -> Vec<Student> {
        match self.try_find_by_birthday(date).await {
            Ok(students) => students,
            Err(err) => {
                warn!(table = Self::TABLE_NAME, error = %err, "find_by_birthday failed");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl Table<Student, i32> for StudentsTable {
    fn table_name(&self) -> &'static str {
        Self::TABLE_NAME
    }

    async fn try_create_schema(&self) -> Result<()> {
        let statement = format!(
            "CREATE TABLE {} (\
             id INT NOT NULL PRIMARY KEY, \
             firstName CHAR(40) NOT NULL, \
             lastName CHAR(40) NOT NULL, \
             birthday DATE)",
            Self::TABLE_NAME
        );
        self.querier.ddl(&statement).await
    }

    async fn try_drop_schema(&self) -> Result<()> {
        self.querier
            .ddl(&format!("DROP TABLE {}", Self::TABLE_NAME))
            .await
    }

    async fn try_find_by_key(&self, id: i32) -> Lookup<Student> {
        self.querier
            .select()
            .all()
            .from(Self::TABLE_NAME)
            .where_(WhereClause::eq(&Self::columns().id, id))
            .execute()
            .await
            .and_then(read_students)
            .into()
    }

    async fn try_find_all(&self) -> Result<Vec<Student>> {
        let result = self
            .querier
            .select()
            .all()
            .from(Self::TABLE_NAME)
            .execute()
            .await?;
        read_students(result)
    }

    async fn try_save(&self, student: &Student) -> Result<()> {
        let columns = Self::columns();
        let affected = self
            .querier
            .insert_into(Self::TABLE_NAME)
            .value(&columns.id, student.id())
            .value(&columns.first_name, student.first_name())
            .value(&columns.last_name, student.last_name())
            .value(&columns.birthday, student.birthday())
            .execute()
            .await?;
        exactly_one(affected)
    }

    async fn try_update(&self, student: &Student) -> Result<()> {
        let columns = Self::columns();
        let affected = self
            .querier
            .update(Self::TABLE_NAME)
            .set(&columns.first_name, student.first_name())
            .set(&columns.last_name, student.last_name())
            .set(&columns.birthday, student.birthday())
            .where_(WhereClause::eq(&columns.id, student.id()))
            .execute()
            .await?;
        exactly_one(affected)
    }

    async fn try_delete(&self, id: i32) -> Result<()> {
        let affected = self
            .querier
            .delete_from(Self::TABLE_NAME)
            .where_(WhereClause::eq(&Self::columns().id, id))
            .execute()
            .await?;
        exactly_one(affected)
    }
}

/// Maps every row of `result`; the first unreadable row fails the whole read.
fn read_students(result: QueryResult) -> Result<Vec<Student>> {
    result.rows().iter().map(read_student).collect()
}

fn read_student(row: &Row) -> Result<Student> {
    let columns = StudentsTable::columns();
    Ok(Student::new(
        row.get_i32(&columns.id)?,
        row.get_str(&columns.first_name)?,
        row.get_str(&columns.last_name)?,
        row.get_opt_date(&columns.birthday)?,
    ))
}

fn exactly_one(affected: u64) -> Result<()> {
    if affected == 1 {
        Ok(())
    } else {
        Err(DbError::UnexpectedRowCount {
            expected: 1,
            actual: affected as usize,
        })
    }
}
