// Vacancy Export - API Core
//
// Fetches hh.ru vacancies into Postgres, serves filtered reads and exports
// search results to a Google spreadsheet.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
