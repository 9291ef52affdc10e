//! Runs against the PostgreSQL server named by `DATABASE_URL`:
//! `cargo test -- --ignored`. The `students` table is dropped and recreated.

use chrono::NaiveDate;
use studentdb::{DbClient, DbConfig, Student, StudentsTable, Table};

async fn students() -> Option<StudentsTable> {
    let Ok(config) = DbConfig::from_env() else {
        eprintln!("DATABASE_URL not set, skipping");
        return None;
    };
    let table = DbClient::connect_with(&config).await.unwrap().students();
    table.drop_schema().await;
    assert!(table.create_schema().await);
    Some(table)
}

#[tokio::test]
#[ignore = "needs a PostgreSQL server in DATABASE_URL"]
async fn test_char_names_and_null_birthday_round_trip() {
    let Some(table) = students().await else {
        return;
    };
    let ann = Student::new(1, "Ann", "Lee", None);
    let bo = Student::new(2, "Bo", "Park", NaiveDate::from_ymd_opt(2000, 1, 1));

    assert!(table.save(&ann).await);
    assert!(table.save(&bo).await);
    assert_eq!(table.find_by_key(1).await, Some(ann));
    assert_eq!(table.find_by_key(2).await, Some(bo.clone()));

    let cleared = Student::new(2, "Bo", "Park", None);
    assert!(table.update(&cleared).await);
    assert_eq!(table.find_by_key(2).await, Some(cleared));

    assert!(table.drop_schema().await);
}

#[tokio::test]
#[ignore = "needs a PostgreSQL server in DATABASE_URL"]
async fn test_char_padding_is_trimmed() {
    let Some(table) = students().await else {
        return;
    };

    assert!(table.save(&Student::new(1, "Ann ", "Lee", None)).await);
    let found = table.find_by_key(1).await.unwrap();
    assert_eq!(found.first_name(), "Ann");

    assert!(table.drop_schema().await);
}
