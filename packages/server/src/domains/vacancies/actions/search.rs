use anyhow::{Context, Result};
use tracing::debug;
use uuid::Uuid;

use crate::domains::vacancies::models::{Vacancy, VacancyFilter};
use crate::kernel::ServerDeps;

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub search_id: Uuid,
    pub vacancies: Vec<Vacancy>,
}

/// Filter stored vacancies and record the result as an exportable snapshot.
pub async fn search_vacancies(filter: VacancyFilter, deps: &ServerDeps) -> Result<SearchResult> {
    let filter = filter.bounded(deps.list_max_limit);

    let vacancies = Vacancy::search(&filter, &deps.db_pool)
        .await
        .context("Failed to query vacancies")?;

    let search_id = deps.searches.record(filter, vacancies.clone()).await;
    debug!(%search_id, count = vacancies.len(), "Recorded search snapshot");

    Ok(SearchResult {
        search_id,
        vacancies,
    })
}
