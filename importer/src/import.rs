use std::{collections::HashMap, fs::File, path::Path};

use entity::{KpiMonth, employee_kpis, employees};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, TransactionTrait,
};
use tracing::{info, warn};

use crate::{error::ImportError, parse};

const NAME: &str = "фио";
const TENURE: &str = "стаж";
const AGE: &str = "возраст";
const SUBORDINATES: &str = "в подчиненнии сотрудники";
const LAST_VACATION: &str = "отпуск (когда ходил в последний раз)";
const SICK_LEAVE: &str = "больничный (брал или нет в 2025 году)";
const DISCIPLINARY: &str = "выговор (да/нет)";
const CORPORATE_EVENTS: &str = "участие в активностях корпоративных";

const REQUIRED_HEADERS: &[&str] = &[
    NAME,
    TENURE,
    AGE,
    SUBORDINATES,
    LAST_VACATION,
    SICK_LEAVE,
    DISCIPLINARY,
    CORPORATE_EVENTS,
];

/// Month column titles as they appear in the export.
const MONTH_COLUMNS: &[(&str, KpiMonth)] = &[
    ("январь", KpiMonth::January),
    ("февраль", KpiMonth::February),
    ("март", KpiMonth::March),
    ("апрель", KpiMonth::April),
    ("май", KpiMonth::May),
    ("июнь", KpiMonth::June),
    ("июль", KpiMonth::July),
    ("август", KpiMonth::August),
    ("сентябрь", KpiMonth::September),
    ("октябрь", KpiMonth::October),
    ("ноябрь", KpiMonth::November),
    ("декабрь", KpiMonth::December),
];

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ImportSummary {
    pub employees_inserted: usize,
    pub kpis_inserted: usize,
    pub skipped_existing: usize,
    pub skipped_unnamed: usize,
}

/// Batch loader for the spreadsheet export. Collaborators are held
/// explicitly; nothing here reads process-wide state.
pub struct CsvImporter {
    db: DatabaseConnection,
    kpi_year: i32,
}

impl CsvImporter {
    pub fn new(db: DatabaseConnection, kpi_year: i32) -> Self {
        Self { db, kpi_year }
    }

    /// Import every data row of `path` in file order, committing all inserts
    /// as one transaction at end-of-file. A cell that fails to convert
    /// aborts the run and rolls back everything staged so far; rows without
    /// a name or with an already-imported name are skipped, not fatal.
    pub async fn run(&self, path: &Path) -> Result<ImportSummary, ImportError> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.to_path_buf()));
        }
        // exports are ragged; short rows simply lack the trailing cells
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(File::open(path)?);
        let headers = validate_headers(reader.headers()?)?;

        let txn = self.db.begin().await?;
        let mut summary = ImportSummary::default();

        for record in reader.records() {
            let record = record?;
            let row = build_row(&headers, &record);

            let full_name = row.get(NAME).cloned().unwrap_or_default();
            if full_name.is_empty() {
                warn!(row = ?record, "skipping row without a name");
                summary.skipped_unnamed += 1;
                continue;
            }

            let candidate = employee_candidate(&row, &full_name)?;

            let existing = employees::Entity::find()
                .filter(employees::Column::FullName.eq(full_name.as_str()))
                .one(&txn)
                .await?;
            if existing.is_some() {
                info!(%full_name, "skipping already imported employee");
                summary.skipped_existing += 1;
                continue;
            }

            let inserted = candidate.insert(&txn).await?;
            summary.employees_inserted += 1;
            summary.kpis_inserted += self
                .insert_monthly_kpis(&txn, &row, inserted.id)
                .await?;
        }

        txn.commit().await?;
        info!(
            employees = summary.employees_inserted,
            kpis = summary.kpis_inserted,
            existing = summary.skipped_existing,
            unnamed = summary.skipped_unnamed,
            "import finished"
        );
        Ok(summary)
    }

    async fn insert_monthly_kpis(
        &self,
        txn: &DatabaseTransaction,
        row: &HashMap<String, String>,
        employee_id: i32,
    ) -> Result<usize, ImportError> {
        let mut inserted = 0;
        for (column, month) in MONTH_COLUMNS {
            let Some(cell) = row.get(*column) else {
                continue;
            };
            let Some(kpi_value) = parse::parse_kpi_value(cell)? else {
                continue;
            };
            let now = chrono::Utc::now();
            employee_kpis::ActiveModel {
                employee_id: Set(employee_id),
                month: Set(*month),
                year: Set(self.kpi_year),
                kpi_value: Set(kpi_value),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
                ..Default::default()
            }
            .insert(txn)
            .await?;
            inserted += 1;
        }
        Ok(inserted)
    }
}

/// Normalize the header row and confirm every required column is present,
/// in any order. Unrecognized extra headers are ignored.
fn validate_headers(raw: &csv::StringRecord) -> Result<Vec<String>, ImportError> {
    if raw.is_empty() {
        return Err(ImportError::EmptyInput);
    }
    let normalized: Vec<String> = raw.iter().map(parse::normalize_header).collect();
    for required in REQUIRED_HEADERS {
        if !normalized.iter().any(|header| header == required) {
            return Err(ImportError::MissingColumn((*required).to_string()));
        }
    }
    Ok(normalized)
}

/// Lookup from normalized header to trimmed cell text for one data row.
fn build_row(headers: &[String], record: &csv::StringRecord) -> HashMap<String, String> {
    headers
        .iter()
        .zip(record.iter())
        .filter(|(header, _)| !header.is_empty())
        .map(|(header, value)| (header.clone(), parse::normalize_value(value)))
        .collect()
}

fn employee_candidate(
    row: &HashMap<String, String>,
    full_name: &str,
) -> Result<employees::ActiveModel, ImportError> {
    let now = chrono::Utc::now();
    Ok(employees::ActiveModel {
        full_name: Set(full_name.to_string()),
        tenure_years: Set(parse::parse_tenure(cell(row, TENURE))?),
        age: Set(parse::parse_optional_int(cell(row, AGE))?),
        has_subordinates: Set(parse::parse_subordinates(cell(row, SUBORDINATES))),
        last_vacation_date: Set(parse::parse_optional_date(cell(row, LAST_VACATION))?),
        took_sick_leave: Set(parse::parse_bool(cell(row, SICK_LEAVE))),
        has_disciplinary_action: Set(parse::parse_bool(cell(row, DISCIPLINARY))),
        participates_in_corporate_events: Set(parse::parse_bool(cell(row, CORPORATE_EVENTS))),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
        ..Default::default()
    })
}

fn cell<'a>(row: &'a HashMap<String, String>, header: &str) -> &'a str {
    row.get(header).map(String::as_str).unwrap_or("")
}
