// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (transform, sort, row layout) lives in domain functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseVacancySource)

use anyhow::Result;
use async_trait::async_trait;
use hh_client::RawVacancy;

// =============================================================================
// Vacancy Source Trait (Infrastructure - upstream listing API)
// =============================================================================

#[async_trait]
pub trait BaseVacancySource: Send + Sync {
    /// Fetch every upstream vacancy, in upstream order.
    async fn fetch_all(&self) -> Result<Vec<RawVacancy>>;
}

// =============================================================================
// Spreadsheet Exporter Trait (Infrastructure - report destination)
// =============================================================================

#[async_trait]
pub trait BaseSpreadsheetExporter: Send + Sync {
    /// Clear the first sheet of `spreadsheet` and write `rows` into it.
    /// Returns the number of rows written.
    async fn replace_first_sheet(
        &self,
        spreadsheet: &str,
        rows: Vec<Vec<serde_json::Value>>,
    ) -> Result<usize>;
}
