//! Export action - writes a search snapshot to the report spreadsheet

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::cmp::Ordering;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domains::vacancies::models::Vacancy;
use crate::kernel::ServerDeps;

pub const EXPORT_HEADER: [&str; 7] = [
    "Title",
    "City",
    "Specialization",
    "Min Salary",
    "Max Salary",
    "Currency",
    "URL",
];

pub const NOTHING_TO_EXPORT: &str = "No vacancies to export. Please run the search first.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Exported {
        search_id: Uuid,
        rows: usize,
        /// When the exported search ran
        searched_at: DateTime<Utc>,
    },
    /// No snapshot for the requested id, or it holds no vacancies
    NothingToExport,
}

/// The spreadsheet write failed; the snapshot itself was fine.
#[derive(Debug, thiserror::Error)]
#[error("Spreadsheet export failed: {0:#}")]
pub struct SpreadsheetWriteError(pub anyhow::Error);

/// Stable sort: `primary_currency` rows first by ascending minimum salary,
/// everything else after them in its existing order.
pub fn sort_for_export(vacancies: &mut [Vacancy], primary_currency: &str) {
    vacancies.sort_by(|a, b| compare_for_export(a, b, primary_currency));
}

fn compare_for_export(a: &Vacancy, b: &Vacancy, primary_currency: &str) -> Ordering {
    let a_primary = a.currency == primary_currency;
    let b_primary = b.currency == primary_currency;

    match (a_primary, b_primary) {
        (true, true) => a.salary_min.total_cmp(&b.salary_min),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// Header row followed by one row per vacancy.
pub fn export_rows(vacancies: &[Vacancy]) -> Vec<Vec<Value>> {
    let mut rows = Vec::with_capacity(vacancies.len() + 1);
    rows.push(EXPORT_HEADER.iter().map(|h| Value::from(*h)).collect());

    for v in vacancies {
        rows.push(vec![
            Value::from(v.title.as_str()),
            Value::from(v.city.as_str()),
            Value::from(v.specialization.as_str()),
            salary_cell(v.salary_min),
            salary_cell(v.salary_max),
            Value::from(v.currency.as_str()),
            Value::from(v.url.as_str()),
        ]);
    }
    rows
}

// Whole amounts go out as integers so the sheet shows 5000, not 5000.0.
fn salary_cell(amount: f64) -> Value {
    if amount.fract() == 0.0 && amount.abs() < i64::MAX as f64 {
        Value::from(amount as i64)
    } else {
        Value::from(amount)
    }
}

/// Export the snapshot `search_id`, or the latest one when `None`.
///
/// Nothing is written when the snapshot is missing or empty.
pub async fn export_search(search_id: Option<Uuid>, deps: &ServerDeps) -> Result<ExportOutcome> {
    let snapshot = match deps.searches.resolve(search_id).await {
        Some(s) if !s.vacancies.is_empty() => s,
        _ => {
            warn!(?search_id, "Export requested without a matching search");
            return Ok(ExportOutcome::NothingToExport);
        }
    };

    let mut vacancies = snapshot.vacancies.clone();
    sort_for_export(&mut vacancies, &deps.export.primary_currency);
    let rows = export_rows(&vacancies);

    deps.spreadsheet
        .replace_first_sheet(&deps.export.spreadsheet_name, rows)
        .await
        .map_err(SpreadsheetWriteError)?;

    info!(
        search_id = %snapshot.id,
        searched_at = %snapshot.created_at,
        rows = vacancies.len(),
        spreadsheet = %deps.export.spreadsheet_name,
        "Exported vacancies"
    );

    Ok(ExportOutcome::Exported {
        search_id: snapshot.id,
        rows: vacancies.len(),
        searched_at: snapshot.created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vacancy(id: i64, currency: &str, salary_min: f64) -> Vacancy {
        Vacancy {
            id,
            title: format!("Vacancy {}", id),
            city: "Moscow".into(),
            specialization: "Programmer".into(),
            salary_min,
            salary_max: 0.0,
            currency: currency.into(),
            url: format!("https://hh.ru/vacancy/{}", id),
        }
    }

    fn ids(vacancies: &[Vacancy]) -> Vec<i64> {
        vacancies.iter().map(|v| v.id).collect()
    }

    #[test]
    fn primary_currency_first_by_salary() {
        let mut list = vec![
            vacancy(1, "USD", 0.0),
            vacancy(2, "RUR", 2000.0),
            vacancy(3, "RUR", 1000.0),
        ];
        sort_for_export(&mut list, "RUR");
        assert_eq!(ids(&list), vec![3, 2, 1]);
    }

    #[test]
    fn other_currencies_keep_relative_order() {
        let mut list = vec![
            vacancy(1, "USD", 9000.0),
            vacancy(2, "EUR", 100.0),
            vacancy(3, "RUR", 500.0),
            vacancy(4, "N/A", 0.0),
            vacancy(5, "KZT", 1.0),
        ];
        sort_for_export(&mut list, "RUR");
        assert_eq!(ids(&list), vec![3, 1, 2, 4, 5]);
    }

    #[test]
    fn equal_primary_salaries_are_stable() {
        let mut list = vec![
            vacancy(1, "RUR", 1000.0),
            vacancy(2, "RUR", 1000.0),
            vacancy(3, "RUR", 0.0),
        ];
        sort_for_export(&mut list, "RUR");
        assert_eq!(ids(&list), vec![3, 1, 2]);
    }

    #[test]
    fn rows_start_with_header() {
        let rows = export_rows(&[vacancy(7, "RUR", 5000.0)]);
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            vec![
                Value::from("Title"),
                Value::from("City"),
                Value::from("Specialization"),
                Value::from("Min Salary"),
                Value::from("Max Salary"),
                Value::from("Currency"),
                Value::from("URL"),
            ]
        );
        assert_eq!(
            rows[1],
            vec![
                Value::from("Vacancy 7"),
                Value::from("Moscow"),
                Value::from("Programmer"),
                Value::from(5000),
                Value::from(0),
                Value::from("RUR"),
                Value::from("https://hh.ru/vacancy/7"),
            ]
        );
    }

    #[test]
    fn fractional_salary_stays_float() {
        assert_eq!(salary_cell(1500.5), Value::from(1500.5));
        assert_eq!(salary_cell(1500.0), Value::from(1500));
    }

    #[test]
    fn empty_list_yields_header_only() {
        assert_eq!(export_rows(&[]).len(), 1);
    }
}
