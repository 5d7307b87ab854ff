pub mod export;
pub mod parse;
pub mod search;

pub use export::{
    export_rows, export_search, sort_for_export, ExportOutcome, SpreadsheetWriteError,
    EXPORT_HEADER, NOTHING_TO_EXPORT,
};
pub use parse::{parse_vacancies, ParseSummary};
pub use search::{search_vacancies, SearchResult};
