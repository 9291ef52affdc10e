use std::sync::Arc;

use chrono::NaiveDate;
use studentdb::drivers::SqliteDriver;
use studentdb::{DbClient, DbError, Lookup, Student, StudentsTable, Table};

async fn students() -> StudentsTable {
    let driver = SqliteDriver::open_in_memory().unwrap();
    let table = DbClient::with_driver(Arc::new(driver)).students();
    assert!(table.create_schema().await);
    table
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_saved_student_is_found_by_key() {
    let table = students().await;
    let student = Student::new(1, "Ann", "Lee", Some(date(1999, 5, 17)));

    assert!(table.save(&student).await);
    assert_eq!(table.find_by_key(1).await, Some(student));
}

#[tokio::test]
async fn test_create_schema_twice() {
    let driver = Arc::new(SqliteDriver::open_in_memory().unwrap());
    let table = StudentsTable::new(driver);

    assert!(table.create_schema().await);
    assert!(!table.create_schema().await);
    assert!(matches!(
        table.try_create_schema().await,
        Err(DbError::QueryFailed(_))
    ));
}

#[tokio::test]
async fn test_drop_schema() {
    let table = students().await;

    assert!(table.drop_schema().await);
    assert!(!table.drop_schema().await);
    assert!(table.find_all().await.is_empty());
    assert!(table.try_find_all().await.is_err());
    assert!(table.create_schema().await);
}

#[tokio::test]
async fn test_delete_removes_exactly_one() {
    let table = students().await;
    let ann = Student::new(1, "Ann", "Lee", None);
    let bo = Student::new(2, "Bo", "Park", None);
    assert!(table.save(&ann).await);
    assert!(table.save(&bo).await);

    assert!(table.delete(1).await);
    assert_eq!(table.find_by_key(1).await, None);
    assert!(!table.delete(1).await);
    assert_eq!(table.find_all().await, vec![bo]);
}

#[tokio::test]
async fn test_update_changes_visible_fields() {
    let table = students().await;
    assert!(table.save(&Student::new(1, "Ann", "Lee", None)).await);

    let updated = Student::new(1, "Ann", "Lee", Some(date(2000, 1, 1)));
    assert!(table.update(&updated).await);

    let found = table.find_by_key(1).await.unwrap();
    assert_eq!(found.birthday(), Some(date(2000, 1, 1)));
    assert_eq!(found, updated);
}

#[tokio::test]
async fn test_update_of_missing_key_fails() {
    let table = students().await;

    assert!(!table.update(&Student::new(42, "No", "One", None)).await);
    assert!(matches!(
        table.try_update(&Student::new(42, "No", "One", None)).await,
        Err(DbError::UnexpectedRowCount { expected: 1, actual: 0 })
    ));
}

#[tokio::test]
async fn test_duplicate_key_save_fails() {
    let table = students().await;
    let ann = Student::new(1, "Ann", "Lee", None);

    assert!(table.save(&ann).await);
    assert!(!table.save(&Student::new(1, "Other", "Person", None)).await);
    assert_eq!(table.find_by_key(1).await, Some(ann));
}

#[tokio::test]
async fn test_find_all_returns_every_student() {
    let table = students().await;
    let saved: Vec<Student> = (1..=5)
        .map(|id| Student::new(id, format!("First{id}"), format!("Last{id}"), None))
        .collect();
    for student in &saved {
        assert!(table.save(student).await);
    }

    let mut found = table.find_all().await;
    found.sort_by_key(Student::id);
    assert_eq!(found, saved);
}

#[tokio::test]
async fn test_quotes_and_sql_in_values_are_stored_verbatim() {
    let table = students().await;
    let tricky = Student::new(7, "x'); DROP TABLE students;--", "O'Brien", None);
    let plain = Student::new(8, "Ann", "Lee", None);

    assert!(table.save(&tricky).await);
    assert!(table.save(&plain).await);

    assert_eq!(table.find_by_key(7).await, Some(tricky));
    assert_eq!(table.find_all().await.len(), 2);
}

#[tokio::test]
async fn test_missing_birthday_maps_to_none() {
    let table = students().await;
    assert!(table.save(&Student::new(3, "Cy", "Moe", None)).await);

    match table.try_find_by_key(3).await {
        Lookup::Found(student) => assert_eq!(student.birthday(), None),
        other => panic!("expected a student, got {other:?}"),
    }
}

#[tokio::test]
async fn test_lookup_outcomes() {
    let table = students().await;
    assert!(table.try_find_by_key(1).await.is_not_found());

    assert!(table.drop_schema().await);
    assert!(table.try_find_by_key(1).await.is_failed());
    assert_eq!(table.find_by_key(1).await, None);
}

#[tokio::test]
async fn test_find_by_birthday() {
    let table = students().await;
    let ann = Student::new(1, "Ann", "Lee", Some(date(2000, 1, 1)));
    let bo = Student::new(2, "Bo", "Park", Some(date(2001, 2, 2)));
    let cy = Student::new(3, "Cy", "Moe", Some(date(2000, 1, 1)));
    for student in [&ann, &bo, &cy] {
        assert!(table.save(student).await);
    }

    let mut found = table.find_by_birthday(date(2000, 1, 1)).await;
    found.sort_by_key(Student::id);
    assert_eq!(found, vec![ann, cy]);
    assert!(table.find_by_birthday(date(1990, 1, 1)).await.is_empty());
}

#[tokio::test]
async fn test_trailing_spaces_kept_by_sqlite() {
    let table = students().await;
    let padded = Student::new(4, "Ann ", "Lee  ", None);

    assert!(table.save(&padded).await);
    assert_eq!(table.find_by_key(4).await, Some(padded));
}
