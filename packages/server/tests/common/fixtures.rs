//! Test fixtures for creating upstream vacancy payloads.

use hh_client::{RawArea, RawProfessionalRole, RawSalary, RawVacancy};

/// Builder for a raw hh.ru vacancy item.
pub struct RawVacancyBuilder {
    inner: RawVacancy,
}

impl RawVacancyBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            inner: RawVacancy {
                id: Some(id.to_string()),
                name: Some(name.to_string()),
                alternate_url: Some(format!("https://hh.ru/vacancy/{}", id)),
                ..Default::default()
            },
        }
    }

    pub fn city(mut self, city: &str) -> Self {
        self.inner.area = Some(RawArea {
            name: Some(city.to_string()),
            ..Default::default()
        });
        self
    }

    pub fn salary(mut self, from: Option<f64>, to: Option<f64>, currency: &str) -> Self {
        self.inner.salary = Some(RawSalary {
            from,
            to,
            currency: Some(currency.to_string()),
            ..Default::default()
        });
        self
    }

    pub fn roles(mut self, roles: &[&str]) -> Self {
        self.inner.professional_roles = Some(
            roles
                .iter()
                .map(|name| RawProfessionalRole {
                    name: Some(name.to_string()),
                    ..Default::default()
                })
                .collect(),
        );
        self
    }

    pub fn build(self) -> RawVacancy {
        self.inner
    }
}

/// A small, mixed page of vacancies used by most API tests.
pub fn sample_vacancies() -> Vec<RawVacancy> {
    vec![
        RawVacancyBuilder::new("1", "Rust Developer")
            .city("Москва")
            .salary(Some(250000.0), Some(350000.0), "RUR")
            .roles(&["Программист, разработчик"])
            .build(),
        RawVacancyBuilder::new("2", "Data Analyst")
            .city("Санкт-Петербург")
            .salary(Some(120000.0), None, "RUR")
            .roles(&["Аналитик"])
            .build(),
        RawVacancyBuilder::new("3", "Backend Engineer")
            .city("Москва")
            .salary(Some(4000.0), Some(6000.0), "USD")
            .roles(&["Программист, разработчик", "Системный архитектор"])
            .build(),
        RawVacancyBuilder::new("4", "QA Engineer")
            .city("Москва")
            .salary(Some(90000.0), Some(110000.0), "RUR")
            .roles(&["Тестировщик"])
            .build(),
        RawVacancyBuilder::new("5", "Intern").build(),
    ]
}
