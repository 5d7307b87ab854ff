//! Minimal Google Sheets REST client.
//!
//! Covers exactly what a report export needs: find a spreadsheet by name
//! (via the Drive API), resolve its first sheet, clear it and append rows.
//! Requests are authorized with a service account key.
//!
//! # Example
//!
//! ```rust,ignore
//! use sheets_client::{SheetsClient, SheetsClientOptions};
//!
//! let client = SheetsClient::from_service_account_file("key.json", SheetsClientOptions::default())?;
//! let sheet = client.open_first_sheet("HH Vacancy Export").await?;
//! client.clear(&sheet).await?;
//! client.append_rows(&sheet, &rows).await?;
//! ```

pub mod auth;
pub mod error;
pub mod types;

use std::path::Path;
use std::time::Duration;

use serde::de::DeserializeOwned;

pub use auth::{ServiceAccountKey, TokenProvider, SCOPE_DRIVE, SCOPE_SPREADSHEETS};
pub use error::{Result, SheetsError};
pub use types::{AppendResponse, Worksheet};

use types::{DriveFileList, SpreadsheetMeta, ValueRange};

const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4";
const DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3";
const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

#[derive(Debug, Clone)]
pub struct SheetsClientOptions {
    pub sheets_base_url: String,
    pub drive_base_url: String,
    /// Request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for SheetsClientOptions {
    fn default() -> Self {
        Self {
            sheets_base_url: SHEETS_BASE_URL.to_string(),
            drive_base_url: DRIVE_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

pub struct SheetsClient {
    client: reqwest::Client,
    auth: TokenProvider,
    sheets_base_url: String,
    drive_base_url: String,
}

impl SheetsClient {
    pub fn new(key: ServiceAccountKey, options: SheetsClientOptions) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            auth: TokenProvider::new(key, &[SCOPE_SPREADSHEETS, SCOPE_DRIVE])?,
            sheets_base_url: options.sheets_base_url.trim_end_matches('/').to_string(),
            drive_base_url: options.drive_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_service_account_file(
        path: impl AsRef<Path>,
        options: SheetsClientOptions,
    ) -> Result<Self> {
        Self::new(ServiceAccountKey::from_file(path)?, options)
    }

    /// Find a spreadsheet shared with the service account by its exact name.
    pub async fn find_spreadsheet(&self, name: &str) -> Result<String> {
        let url = format!("{}/files", self.drive_base_url);
        let query = drive_name_query(name);
        let req = self.client.get(&url).query(&[
            ("q", query.as_str()),
            ("fields", "files(id,name)"),
            ("pageSize", "1"),
        ]);

        let list: DriveFileList = self.send(req).await?;
        list.files
            .into_iter()
            .next()
            .map(|f| f.id)
            .ok_or_else(|| SheetsError::SpreadsheetNotFound(name.to_string()))
    }

    /// Resolve the first sheet (lowest index) of a spreadsheet.
    pub async fn first_sheet(&self, spreadsheet_id: &str) -> Result<Worksheet> {
        let url = format!("{}/spreadsheets/{}", self.sheets_base_url, spreadsheet_id);
        let req = self
            .client
            .get(&url)
            .query(&[("fields", "sheets.properties")]);

        let meta: SpreadsheetMeta = self.send(req).await?;
        meta.sheets
            .into_iter()
            .min_by_key(|s| s.properties.index)
            .map(|s| Worksheet {
                spreadsheet_id: spreadsheet_id.to_string(),
                title: s.properties.title,
            })
            .ok_or_else(|| SheetsError::NoSheets(spreadsheet_id.to_string()))
    }

    /// Open the first sheet of the spreadsheet named `name`.
    pub async fn open_first_sheet(&self, name: &str) -> Result<Worksheet> {
        let spreadsheet_id = self.find_spreadsheet(name).await?;
        let sheet = self.first_sheet(&spreadsheet_id).await?;
        tracing::debug!(spreadsheet_id = %sheet.spreadsheet_id, title = %sheet.title, "Opened worksheet");
        Ok(sheet)
    }

    /// Remove every value from the sheet. Formatting is kept.
    pub async fn clear(&self, sheet: &Worksheet) -> Result<()> {
        let url = self.values_url(sheet, "clear")?;
        let req = self.client.post(url).json(&serde_json::json!({}));
        let _: serde_json::Value = self.send(req).await?;
        Ok(())
    }

    /// Append rows after the last non-empty row of the sheet.
    pub async fn append_rows(
        &self,
        sheet: &Worksheet,
        rows: &[Vec<serde_json::Value>],
    ) -> Result<AppendResponse> {
        let url = self.values_url(sheet, "append")?;
        let body = ValueRange {
            major_dimension: "ROWS",
            values: rows,
        };
        let req = self
            .client
            .post(url)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&body);

        let resp: AppendResponse = self.send(req).await?;
        tracing::debug!(
            rows = rows.len(),
            updated_range = ?resp.updates.as_ref().and_then(|u| u.updated_range.as_deref()),
            "Appended rows"
        );
        Ok(resp)
    }

    fn values_url(&self, sheet: &Worksheet, action: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&format!(
            "{}/spreadsheets/{}/values",
            self.sheets_base_url, sheet.spreadsheet_id
        ))
        .map_err(|e| SheetsError::InvalidUrl(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| SheetsError::InvalidUrl(self.sheets_base_url.clone()))?
            .push(&format!("{}:{}", sheet.full_range(), action));
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> Result<T> {
        let token = self.auth.access_token(&self.client).await?;
        let resp = req.bearer_auth(token).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(resp.json().await?)
    }
}

/// Drive search expression matching a non-trashed spreadsheet by exact name.
fn drive_name_query(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        "name = '{}' and mimeType = '{}' and trashed = false",
        escaped, SPREADSHEET_MIME_TYPE
    )
}
