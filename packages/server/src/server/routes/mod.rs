// HTTP routes
pub mod health;
pub mod vacancies;

pub use health::*;
pub use vacancies::*;
