use axum::{
    extract::{Extension, Query},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domains::vacancies::actions::{
    export_search, parse_vacancies, search_vacancies, ExportOutcome, NOTHING_TO_EXPORT,
};
use crate::domains::vacancies::VacancyFilter;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ErrorResponse};

/// Response header carrying the id of the search snapshot a read produced.
pub const SEARCH_ID_HEADER: &str = "x-search-id";

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseResponse {
    pub status: String,
    pub count: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListVacanciesQuery {
    pub city: Option<String>,
    pub specialization: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl From<ListVacanciesQuery> for VacancyFilter {
    fn from(q: ListVacanciesQuery) -> Self {
        VacancyFilter {
            city: q.city,
            specialization: q.specialization,
            limit: q.limit,
            offset: q.offset,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportRequest {
    pub search_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportResponse {
    pub status: String,
    pub search_id: Uuid,
    pub rows: usize,
    pub searched_at: DateTime<Utc>,
}

/// POST /api/parse - reload the table from hh.ru
pub async fn parse_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<ParseResponse>, ApiError> {
    let summary = parse_vacancies(&state.server_deps).await?;

    Ok(Json(ParseResponse {
        status: "completed".to_string(),
        count: summary.stored,
    }))
}

/// GET /api/vacancies - filtered read; the snapshot id goes in `x-search-id`
pub async fn list_vacancies_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<ListVacanciesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let result = search_vacancies(query.into(), &state.server_deps).await?;

    Ok((
        [(SEARCH_ID_HEADER, result.search_id.to_string())],
        Json(result.vacancies),
    ))
}

/// POST /api/export - write a search snapshot to the spreadsheet
///
/// The snapshot id may come from `?search_id=` or a JSON body; without one
/// the latest search is exported.
pub async fn export_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<ExportRequest>,
    body: Option<Json<ExportRequest>>,
) -> Result<Response, ApiError> {
    let search_id = query
        .search_id
        .or_else(|| body.and_then(|Json(b)| b.search_id));

    let response = match export_search(search_id, &state.server_deps).await? {
        ExportOutcome::Exported {
            search_id,
            rows,
            searched_at,
        } => Json(ExportResponse {
            status: "exported".to_string(),
            search_id,
            rows,
            searched_at,
        })
        .into_response(),
        ExportOutcome::NothingToExport => Json(ErrorResponse {
            error: NOTHING_TO_EXPORT.to_string(),
        })
        .into_response(),
    };

    Ok(response)
}
