//! Server dependencies for actions (using traits for testability)
//!
//! This module provides the central dependency container used by the HTTP
//! routes and the CLI. All external services use trait abstractions.

use anyhow::{Context, Result};
use async_trait::async_trait;
use hh_client::{HhClient, HhClientOptions, RawVacancy};
use sheets_client::{SheetsClient, SheetsClientOptions};
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::Config;
use crate::domains::vacancies::SearchRegistry;
use crate::kernel::{BaseSpreadsheetExporter, BaseVacancySource};

// =============================================================================
// HhClient Adapter (implements BaseVacancySource trait)
// =============================================================================

/// Wrapper around HhClient that implements BaseVacancySource trait
pub struct HhAdapter(pub Arc<HhClient>);

impl HhAdapter {
    pub fn new(client: Arc<HhClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseVacancySource for HhAdapter {
    async fn fetch_all(&self) -> Result<Vec<RawVacancy>> {
        Ok(self.0.fetch_all().await?)
    }
}

// =============================================================================
// SheetsClient Adapter (implements BaseSpreadsheetExporter trait)
// =============================================================================

/// Wrapper around SheetsClient that implements BaseSpreadsheetExporter trait
pub struct SheetsAdapter(pub Arc<SheetsClient>);

impl SheetsAdapter {
    pub fn new(client: Arc<SheetsClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseSpreadsheetExporter for SheetsAdapter {
    async fn replace_first_sheet(
        &self,
        spreadsheet: &str,
        rows: Vec<Vec<serde_json::Value>>,
    ) -> Result<usize> {
        let sheet = self.0.open_first_sheet(spreadsheet).await?;
        self.0.clear(&sheet).await?;
        self.0.append_rows(&sheet, &rows).await?;
        Ok(rows.len())
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Export destination and ordering.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub spreadsheet_name: String,
    /// Currency sorted first (by ascending minimum salary) on export.
    pub primary_currency: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            spreadsheet_name: "HH Vacancy Export".to_string(),
            primary_currency: "RUR".to_string(),
        }
    }
}

/// Server dependencies accessible to actions (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub vacancy_source: Arc<dyn BaseVacancySource>,
    pub spreadsheet: Arc<dyn BaseSpreadsheetExporter>,
    /// Search results awaiting export, keyed by search id
    pub searches: SearchRegistry,
    pub export: ExportSettings,
    /// Ceiling for list reads; `None` leaves them unbounded
    pub list_max_limit: Option<i64>,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        vacancy_source: Arc<dyn BaseVacancySource>,
        spreadsheet: Arc<dyn BaseSpreadsheetExporter>,
        searches: SearchRegistry,
        export: ExportSettings,
        list_max_limit: Option<i64>,
    ) -> Self {
        Self {
            db_pool,
            vacancy_source,
            spreadsheet,
            searches,
            export,
            list_max_limit,
        }
    }

    /// Wire the real hh.ru and Google Sheets clients from configuration.
    pub fn from_config(config: &Config, db_pool: PgPool) -> Result<Self> {
        let hh = HhClient::new(HhClientOptions {
            base_url: config.hh_api_url.clone(),
            user_agent: config.hh_user_agent.clone(),
            timeout: config.http_timeout,
            ..Default::default()
        })
        .context("Failed to create hh.ru client")?;

        let sheets = SheetsClient::from_service_account_file(
            &config.google_service_account_file,
            SheetsClientOptions {
                timeout: config.http_timeout,
                ..Default::default()
            },
        )
        .with_context(|| {
            format!(
                "Failed to load Google service account from {}",
                config.google_service_account_file
            )
        })?;

        Ok(Self::new(
            db_pool,
            Arc::new(HhAdapter::new(Arc::new(hh))),
            Arc::new(SheetsAdapter::new(Arc::new(sheets))),
            SearchRegistry::with_capacity(config.search_cache_capacity),
            ExportSettings {
                spreadsheet_name: config.export_spreadsheet_name.clone(),
                primary_currency: config.export_primary_currency.clone(),
            },
            config.vacancy_list_max_limit,
        ))
    }
}
