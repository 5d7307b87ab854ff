// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use hh_client::RawVacancy;
use sqlx::PgPool;
use std::sync::{Arc, Mutex};

use super::{BaseSpreadsheetExporter, BaseVacancySource, ExportSettings, ServerDeps};
use crate::domains::vacancies::SearchRegistry;

// =============================================================================
// Mock Vacancy Source
// =============================================================================

pub struct MockVacancySource {
    items: Arc<Mutex<Vec<RawVacancy>>>,
    error: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<usize>>,
}

impl MockVacancySource {
    pub fn new() -> Self {
        Self {
            items: Arc::new(Mutex::new(Vec::new())),
            error: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Items returned by every `fetch_all` call
    pub fn with_items(self, items: Vec<RawVacancy>) -> Self {
        *self.items.lock().unwrap() = items;
        self
    }

    /// Make every `fetch_all` call fail
    pub fn with_error(self, message: &str) -> Self {
        *self.error.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn set_items(&self, items: Vec<RawVacancy>) {
        *self.items.lock().unwrap() = items;
    }

    pub fn set_error(&self, message: Option<&str>) {
        *self.error.lock().unwrap() = message.map(str::to_string);
    }

    /// Number of `fetch_all` calls so far
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl Default for MockVacancySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseVacancySource for MockVacancySource {
    async fn fetch_all(&self) -> Result<Vec<RawVacancy>> {
        *self.calls.lock().unwrap() += 1;

        if let Some(message) = self.error.lock().unwrap().clone() {
            return Err(anyhow::anyhow!(message));
        }
        Ok(self.items.lock().unwrap().clone())
    }
}

// =============================================================================
// Mock Spreadsheet Exporter
// =============================================================================

/// A captured `replace_first_sheet` call
#[derive(Debug, Clone)]
pub struct SheetWrite {
    pub spreadsheet: String,
    pub rows: Vec<Vec<serde_json::Value>>,
}

pub struct MockSpreadsheetExporter {
    writes: Arc<Mutex<Vec<SheetWrite>>>,
    error: Arc<Mutex<Option<String>>>,
}

impl MockSpreadsheetExporter {
    pub fn new() -> Self {
        Self {
            writes: Arc::new(Mutex::new(Vec::new())),
            error: Arc::new(Mutex::new(None)),
        }
    }

    /// Make every write fail
    pub fn with_error(self, message: &str) -> Self {
        *self.error.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Get all captured writes
    pub fn writes(&self) -> Vec<SheetWrite> {
        self.writes.lock().unwrap().clone()
    }

    pub fn last_write(&self) -> Option<SheetWrite> {
        self.writes.lock().unwrap().last().cloned()
    }
}

impl Default for MockSpreadsheetExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseSpreadsheetExporter for MockSpreadsheetExporter {
    async fn replace_first_sheet(
        &self,
        spreadsheet: &str,
        rows: Vec<Vec<serde_json::Value>>,
    ) -> Result<usize> {
        if let Some(message) = self.error.lock().unwrap().clone() {
            return Err(anyhow::anyhow!(message));
        }

        let count = rows.len();
        self.writes.lock().unwrap().push(SheetWrite {
            spreadsheet: spreadsheet.to_string(),
            rows,
        });
        Ok(count)
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Mocks plus the handles tests use to inspect them
pub struct TestDependencies {
    pub vacancy_source: Arc<MockVacancySource>,
    pub spreadsheet: Arc<MockSpreadsheetExporter>,
    pub searches: SearchRegistry,
    pub export: ExportSettings,
    pub list_max_limit: Option<i64>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            vacancy_source: Arc::new(MockVacancySource::new()),
            spreadsheet: Arc::new(MockSpreadsheetExporter::new()),
            searches: SearchRegistry::new(),
            export: ExportSettings::default(),
            list_max_limit: None,
        }
    }

    pub fn with_vacancy_source(mut self, source: MockVacancySource) -> Self {
        self.vacancy_source = Arc::new(source);
        self
    }

    pub fn with_spreadsheet(mut self, exporter: MockSpreadsheetExporter) -> Self {
        self.spreadsheet = Arc::new(exporter);
        self
    }

    pub fn with_list_max_limit(mut self, limit: i64) -> Self {
        self.list_max_limit = Some(limit);
        self
    }

    pub fn into_server_deps(&self, db_pool: PgPool) -> ServerDeps {
        ServerDeps::new(
            db_pool,
            self.vacancy_source.clone(),
            self.spreadsheet.clone(),
            self.searches.clone(),
            self.export.clone(),
            self.list_max_limit,
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
