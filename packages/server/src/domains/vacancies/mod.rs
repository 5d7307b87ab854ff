pub mod actions;
pub mod models;
pub mod search_registry;
pub mod transform;

// Re-export actions
pub use actions::{export_search, parse_vacancies, search_vacancies, ExportOutcome};

// Re-export models (domain models)
pub use models::vacancy::{NewVacancy, Vacancy, VacancyFilter, SENTINEL};

pub use search_registry::{SearchRegistry, SearchSnapshot};
