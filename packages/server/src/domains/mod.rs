// Business domains
pub mod vacancies;
