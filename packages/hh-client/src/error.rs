use thiserror::Error;

pub type Result<T> = std::result::Result<T, HhError>;

#[derive(Debug, Error)]
pub enum HhError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("hh.ru API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}
