//! Raw hh.ru records → flat `NewVacancy` rows.
//!
//! Missing upstream data never fails the transform; it is replaced by the
//! sentinel (text) or zero (salary bounds).

use hh_client::{RawProfessionalRole, RawSalary, RawVacancy};

use super::models::{NewVacancy, SENTINEL};

/// Salary bounds and currency. Absent object or null bounds become zero.
pub fn extract_salary(salary: Option<&RawSalary>) -> (f64, f64, String) {
    match salary {
        Some(s) => (
            s.from.unwrap_or(0.0),
            s.to.unwrap_or(0.0),
            s.currency.clone().unwrap_or_else(|| SENTINEL.to_string()),
        ),
        None => (0.0, 0.0, SENTINEL.to_string()),
    }
}

/// Role names joined with ", ". Roles without a name are skipped.
pub fn extract_professional_roles(roles: Option<&[RawProfessionalRole]>) -> String {
    match roles {
        Some(roles) if !roles.is_empty() => roles
            .iter()
            .filter_map(|r| r.name.as_deref())
            .collect::<Vec<_>>()
            .join(", "),
        _ => SENTINEL.to_string(),
    }
}

impl NewVacancy {
    pub fn from_raw(raw: &RawVacancy) -> Self {
        let (salary_min, salary_max, currency) = extract_salary(raw.salary.as_ref());

        Self {
            title: raw.name.clone().unwrap_or_default(),
            city: raw
                .area
                .as_ref()
                .and_then(|a| a.name.clone())
                .unwrap_or_else(|| SENTINEL.to_string()),
            specialization: extract_professional_roles(raw.professional_roles.as_deref()),
            salary_min,
            salary_max,
            currency,
            url: raw.alternate_url.clone().unwrap_or_default(),
        }
    }
}
