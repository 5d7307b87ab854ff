use serde::{Deserialize, Serialize};

/// One page of the `/vacancies` listing.
#[derive(Debug, Clone, Deserialize)]
pub struct VacancyPage {
    #[serde(default)]
    pub items: Vec<RawVacancy>,
    pub page: u32,
    pub pages: u32,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub found: Option<u64>,
}

impl VacancyPage {
    /// True when `page` is the last page the API reports.
    pub fn is_last(&self) -> bool {
        self.page >= self.pages.saturating_sub(1)
    }
}

/// A vacancy as returned by hh.ru. Every field is optional; the API omits
/// keys freely and the server applies its own defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawVacancy {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub area: Option<RawArea>,
    #[serde(default)]
    pub salary: Option<RawSalary>,
    #[serde(default)]
    pub professional_roles: Option<Vec<RawProfessionalRole>>,
    #[serde(default)]
    pub alternate_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawArea {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSalary {
    #[serde(default)]
    pub from: Option<f64>,
    #[serde(default)]
    pub to: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub gross: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProfessionalRole {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}
