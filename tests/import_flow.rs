use std::io::Write;

use anyhow::Result;
use entity::{KpiMonth, employee_kpis, employees};
use importer::{CsvImporter, ImportError, ImportSummary};
use sea_orm::{
    ColumnTrait, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, EntityTrait,
    QueryFilter, Statement,
};
use tempfile::NamedTempFile;

const HEADER: &str = "ФИО,Стаж,Возраст,В подчиненнии сотрудники,\
Отпуск (когда ходил в последний раз),Больничный (брал или нет в 2025 году),\
Выговор (да/нет),Участие в активностях корпоративных,Январь,Февраль,Март,Апрель";

async fn sqlite_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    db.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        "PRAGMA foreign_keys = ON;",
    ))
    .await?;
    db.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"
        CREATE TABLE employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            full_name TEXT NOT NULL,
            tenure_years REAL NOT NULL,
            age INTEGER,
            has_subordinates INTEGER NOT NULL DEFAULT 0,
            last_vacation_date TEXT,
            took_sick_leave INTEGER,
            has_disciplinary_action INTEGER,
            participates_in_corporate_events INTEGER,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    ))
    .await?;
    db.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"
        CREATE TABLE employee_kpis (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_id INTEGER NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
            month INTEGER NOT NULL,
            year INTEGER NOT NULL DEFAULT 2025,
            kpi_value REAL NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            UNIQUE (employee_id, month, year)
        );
        "#,
    ))
    .await?;
    Ok(db)
}

fn csv_file(lines: &[&str]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    for line in lines {
        writeln!(file, "{line}")?;
    }
    file.flush()?;
    Ok(file)
}

async fn seed_employee(db: &DatabaseConnection, full_name: &str) -> Result<()> {
    db.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO employees (full_name, tenure_years, has_subordinates, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?)",
        vec![
            full_name.into(),
            1.0f64.into(),
            false.into(),
            "2025-01-01T00:00:00+00:00".into(),
            "2025-01-01T00:00:00+00:00".into(),
        ],
    ))
    .await?;
    Ok(())
}

#[tokio::test]
async fn fresh_import_creates_employee_and_monthly_kpis() -> Result<()> {
    let db = sqlite_db().await?;
    let file = csv_file(&[
        HEADER,
        "Иванов Иван Иванович,3 года 4 месяца,35.0,Руководит группой,\
2024-05-01 00:00:00,нет,,да,\"87,5\",нет,92,88",
    ])?;

    let summary = CsvImporter::new(db.clone(), 2025).run(file.path()).await?;
    assert_eq!(
        summary,
        ImportSummary {
            employees_inserted: 1,
            kpis_inserted: 3,
            skipped_existing: 0,
            skipped_unnamed: 0,
        }
    );

    let employee = employees::Entity::find()
        .filter(employees::Column::FullName.eq("Иванов Иван Иванович"))
        .one(&db)
        .await?
        .expect("employee inserted");
    assert!((employee.tenure_years - (3.0 + 4.0 / 12.0)).abs() < 1e-9);
    assert_eq!(employee.age, Some(35));
    assert!(employee.has_subordinates);
    assert_eq!(
        employee.last_vacation_date,
        chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
    );
    assert_eq!(employee.took_sick_leave, Some(false));
    assert_eq!(employee.has_disciplinary_action, None);
    assert_eq!(employee.participates_in_corporate_events, Some(true));

    let mut kpis = employee_kpis::Entity::find()
        .filter(employee_kpis::Column::EmployeeId.eq(employee.id))
        .all(&db)
        .await?;
    kpis.sort_by_key(|kpi| kpi.month);
    let readings: Vec<(KpiMonth, f64, i32)> = kpis
        .iter()
        .map(|kpi| (kpi.month, kpi.kpi_value, kpi.year))
        .collect();
    assert_eq!(
        readings,
        vec![
            (KpiMonth::January, 87.5, 2025),
            (KpiMonth::March, 92.0, 2025),
            (KpiMonth::April, 88.0, 2025),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn existing_names_are_skipped_and_reruns_are_idempotent() -> Result<()> {
    let db = sqlite_db().await?;
    seed_employee(&db, "Петров Петр").await?;
    let file = csv_file(&[
        HEADER,
        "Петров Петр,2 года,40,нет,,да,нет,да,55,60,нет,нет",
        "Сидорова Анна,5,,нет,2024-03-15,да,нет,,90,\"85,5\",нет,77",
    ])?;

    let importer = CsvImporter::new(db.clone(), 2025);
    let summary = importer.run(file.path()).await?;
    assert_eq!(
        summary,
        ImportSummary {
            employees_inserted: 1,
            kpis_inserted: 3,
            skipped_existing: 1,
            skipped_unnamed: 0,
        }
    );

    // the seeded employee gained nothing, the new one got the 3 parsed months
    let total_employees = employees::Entity::find().all(&db).await?.len();
    assert_eq!(total_employees, 2);
    let total_kpis = employee_kpis::Entity::find().all(&db).await?.len();
    assert_eq!(total_kpis, 3);

    let rerun = importer.run(file.path()).await?;
    assert_eq!(
        rerun,
        ImportSummary {
            employees_inserted: 0,
            kpis_inserted: 0,
            skipped_existing: 2,
            skipped_unnamed: 0,
        }
    );
    assert_eq!(employees::Entity::find().all(&db).await?.len(), 2);
    assert_eq!(employee_kpis::Entity::find().all(&db).await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn rows_without_a_name_are_skipped() -> Result<()> {
    let db = sqlite_db().await?;
    let file = csv_file(&[HEADER, ",5,30,нет,,нет,нет,нет,70,71,72,73"])?;

    let summary = CsvImporter::new(db.clone(), 2025).run(file.path()).await?;
    assert_eq!(summary.skipped_unnamed, 1);
    assert_eq!(summary.employees_inserted, 0);
    assert_eq!(employees::Entity::find().all(&db).await?.len(), 0);
    Ok(())
}

#[tokio::test]
async fn missing_required_column_aborts_before_rows() -> Result<()> {
    let db = sqlite_db().await?;
    let file = csv_file(&[
        "ФИО,Возраст,В подчиненнии сотрудники,Отпуск (когда ходил в последний раз),\
Больничный (брал или нет в 2025 году),Выговор (да/нет),Участие в активностях корпоративных",
        "Иванов Иван,35,нет,,нет,нет,нет",
    ])?;

    let err = CsvImporter::new(db.clone(), 2025)
        .run(file.path())
        .await
        .unwrap_err();
    match err {
        ImportError::MissingColumn(column) => assert_eq!(column, "стаж"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(employees::Entity::find().all(&db).await?.len(), 0);
    Ok(())
}

#[tokio::test]
async fn empty_input_is_rejected() -> Result<()> {
    let db = sqlite_db().await?;
    let file = csv_file(&[])?;

    let err = CsvImporter::new(db, 2025).run(file.path()).await.unwrap_err();
    assert!(matches!(err, ImportError::EmptyInput));
    Ok(())
}

#[tokio::test]
async fn header_only_input_imports_nothing() -> Result<()> {
    let db = sqlite_db().await?;
    let file = csv_file(&[HEADER])?;

    let summary = CsvImporter::new(db.clone(), 2025).run(file.path()).await?;
    assert_eq!(summary, ImportSummary::default());
    Ok(())
}

#[tokio::test]
async fn conversion_failure_rolls_back_the_whole_run() -> Result<()> {
    let db = sqlite_db().await?;
    let file = csv_file(&[
        HEADER,
        "Иванов Иван,5,35,нет,,нет,нет,нет,70,нет,нет,нет",
        "Сидорова Анна,стаж неизвестен,30,нет,,нет,нет,нет,80,нет,нет,нет",
    ])?;

    let err = CsvImporter::new(db.clone(), 2025)
        .run(file.path())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ImportError::ValueConversion { field: "tenure", .. }
    ));
    // the first row was staged but never committed
    assert_eq!(employees::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(employee_kpis::Entity::find().all(&db).await?.len(), 0);
    Ok(())
}

#[tokio::test]
async fn missing_file_fails_before_touching_the_store() -> Result<()> {
    let db = sqlite_db().await?;
    let err = CsvImporter::new(db, 2025)
        .run(std::path::Path::new("does/not/exist.csv"))
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
    Ok(())
}
