use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub hh_api_url: String,
    pub hh_user_agent: String,
    /// Applies to upstream and spreadsheet requests. `None` means no timeout.
    pub http_timeout: Option<Duration>,
    pub google_service_account_file: String,
    pub export_spreadsheet_name: String,
    pub export_primary_currency: String,
    pub search_cache_capacity: usize,
    /// Ceiling for `GET /api/vacancies?limit=`. `None` leaves reads unbounded.
    pub vacancy_list_max_limit: Option<i64>,
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            database_url: var("DATABASE_URL").context("DATABASE_URL must be set")?,
            database_max_connections: var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|| "10".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            hh_api_url: var("HH_API_URL")
                .unwrap_or_else(|| hh_client::DEFAULT_BASE_URL.to_string()),
            hh_user_agent: var("HH_USER_AGENT")
                .unwrap_or_else(|| hh_client::DEFAULT_USER_AGENT.to_string()),
            http_timeout: var("HTTP_TIMEOUT_SECS")
                .map(|v| v.parse::<u64>().map(Duration::from_secs))
                .transpose()
                .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            google_service_account_file: var("GOOGLE_SERVICE_ACCOUNT_FILE")
                .context("GOOGLE_SERVICE_ACCOUNT_FILE must be set")?,
            export_spreadsheet_name: var("EXPORT_SPREADSHEET_NAME")
                .unwrap_or_else(|| "HH Vacancy Export".to_string()),
            export_primary_currency: var("EXPORT_PRIMARY_CURRENCY")
                .unwrap_or_else(|| "RUR".to_string()),
            search_cache_capacity: var("SEARCH_CACHE_CAPACITY")
                .unwrap_or_else(|| "32".to_string())
                .parse()
                .context("SEARCH_CACHE_CAPACITY must be a valid number")?,
            vacancy_list_max_limit: var("VACANCY_LIST_MAX_LIMIT")
                .map(|v| v.parse::<i64>())
                .transpose()
                .context("VACANCY_LIST_MAX_LIMIT must be a valid number")?,
            allowed_origins: var("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/hh_base"),
            ("GOOGLE_SERVICE_ACCOUNT_FILE", "/etc/key.json"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.hh_api_url, "https://api.hh.ru");
        assert_eq!(config.export_spreadsheet_name, "HH Vacancy Export");
        assert_eq!(config.export_primary_currency, "RUR");
        assert_eq!(config.search_cache_capacity, 32);
        assert!(config.http_timeout.is_none());
        assert!(config.vacancy_list_max_limit.is_none());
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/hh_base"),
            ("GOOGLE_SERVICE_ACCOUNT_FILE", "/etc/key.json"),
            ("PORT", "9090"),
            ("HTTP_TIMEOUT_SECS", "30"),
            ("VACANCY_LIST_MAX_LIMIT", "500"),
            ("ALLOWED_ORIGINS", "http://a.test, http://b.test,"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(config.http_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.vacancy_list_max_limit, Some(500));
        assert_eq!(config.allowed_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn requires_database_url() {
        let err = Config::from_lookup(lookup(&[("GOOGLE_SERVICE_ACCOUNT_FILE", "/k.json")]))
            .unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn rejects_bad_port() {
        let result = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/hh_base"),
            ("GOOGLE_SERVICE_ACCOUNT_FILE", "/etc/key.json"),
            ("PORT", "eighty"),
        ]));
        assert!(result.is_err());
    }
}
