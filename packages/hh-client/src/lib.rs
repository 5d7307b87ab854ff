//! Pure hh.ru REST API client.
//!
//! A minimal client for the public `/vacancies` listing. Pages through the
//! whole result set with a fixed page size and returns the raw items in
//! upstream order.
//!
//! # Example
//!
//! ```rust,ignore
//! use hh_client::{HhClient, HhClientOptions};
//!
//! let client = HhClient::new(HhClientOptions::default())?;
//!
//! let vacancies = client.fetch_all().await?;
//! for vacancy in &vacancies {
//!     println!("{}", vacancy.name.as_deref().unwrap_or("(untitled)"));
//! }
//! ```

pub mod error;
pub mod types;

use std::future::Future;
use std::time::Duration;

pub use error::{HhError, Result};
pub use types::{RawArea, RawProfessionalRole, RawSalary, RawVacancy, VacancyPage};

pub const DEFAULT_BASE_URL: &str = "https://api.hh.ru";

/// Page size requested from the API.
pub const DEFAULT_PER_PAGE: u32 = 100;

/// hh.ru rejects requests without a descriptive User-Agent.
pub const DEFAULT_USER_AGENT: &str = "vacancy-server/0.1 (vacancy-export)";

#[derive(Debug, Clone)]
pub struct HhClientOptions {
    pub base_url: String,
    pub user_agent: String,
    pub per_page: u32,
    /// Request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for HhClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            per_page: DEFAULT_PER_PAGE,
            timeout: None,
        }
    }
}

pub struct HhClient {
    client: reqwest::Client,
    vacancies_url: reqwest::Url,
    per_page: u32,
}

impl HhClient {
    pub fn new(options: HhClientOptions) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(options.user_agent);
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            vacancies_url: vacancies_url(&options.base_url)?,
            per_page: options.per_page,
        })
    }

    /// Fetch a single zero-based page of vacancies.
    pub async fn fetch_page(&self, page: u32) -> Result<VacancyPage> {
        let resp = self
            .client
            .get(self.vacancies_url.clone())
            .query(&[("per_page", self.per_page), ("page", page)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(HhError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let bytes = resp.bytes().await?;
        let data: VacancyPage = serde_json::from_slice(&bytes)?;
        Ok(data)
    }

    /// Fetch every page until the API reports the last one.
    ///
    /// Any failure aborts the whole fetch; pages already received are dropped.
    pub async fn fetch_all(&self) -> Result<Vec<RawVacancy>> {
        collect_pages(|page| self.fetch_page(page)).await
    }
}

/// Drive `fetch` from page 0 until the last page and concatenate the items
/// in upstream order.
async fn collect_pages<F, Fut>(mut fetch: F) -> Result<Vec<RawVacancy>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<VacancyPage>>,
{
    let mut all = Vec::new();
    let mut page = 0;

    loop {
        let data = fetch(page).await?;
        tracing::debug!(
            page = data.page,
            pages = data.pages,
            items = data.items.len(),
            "Fetched vacancy page"
        );

        // An empty page also ends the loop in case `pages` is misreported.
        let is_last = data.is_last() || data.items.is_empty();
        all.extend(data.items);
        if is_last {
            break;
        }
        page += 1;
    }

    tracing::info!(count = all.len(), pages = page + 1, "Fetched all vacancies");
    Ok(all)
}

fn vacancies_url(base_url: &str) -> Result<reqwest::Url> {
    let trimmed = base_url.trim_end_matches('/');
    reqwest::Url::parse(&format!("{}/vacancies", trimmed))
        .map_err(|_| HhError::InvalidBaseUrl(base_url.to_string()))
}
