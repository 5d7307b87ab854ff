//! Parse action - reloads the vacancies table from hh.ru

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::domains::vacancies::models::{NewVacancy, Vacancy};
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ParseSummary {
    pub fetched: usize,
    pub stored: u64,
}

/// Fetch every upstream vacancy and replace the stored table with them.
///
/// The fetch completes before the database is touched, so an upstream
/// failure leaves the previous contents in place. Delete and insert commit
/// together.
pub async fn parse_vacancies(deps: &ServerDeps) -> Result<ParseSummary> {
    info!("Fetching vacancies from upstream");

    let raw = deps
        .vacancy_source
        .fetch_all()
        .await
        .context("Failed to fetch vacancies from hh.ru")?;

    let rows: Vec<NewVacancy> = raw.iter().map(NewVacancy::from_raw).collect();

    let stored = Vacancy::replace_all(&rows, &deps.db_pool)
        .await
        .context("Failed to store vacancies")?;

    info!(fetched = raw.len(), stored, "Vacancies reloaded");

    Ok(ParseSummary {
        fetched: raw.len(),
        stored,
    })
}
