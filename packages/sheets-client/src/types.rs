use serde::{Deserialize, Serialize};

/// A sheet (tab) inside a spreadsheet, addressed by its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worksheet {
    pub spreadsheet_id: String,
    pub title: String,
}

impl Worksheet {
    /// A1 range covering the whole sheet, e.g. `'Sheet1'`.
    pub fn full_range(&self) -> String {
        format!("'{}'", self.title.replace('\'', "''"))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DriveFileList {
    #[serde(default)]
    pub files: Vec<DriveFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DriveFile {
    pub id: String,
    #[allow(dead_code)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SpreadsheetMeta {
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Sheet {
    pub properties: SheetProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SheetProperties {
    pub title: String,
    #[serde(default)]
    pub index: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ValueRange<'a> {
    pub major_dimension: &'static str,
    pub values: &'a [Vec<serde_json::Value>],
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendResponse {
    #[serde(default)]
    pub updates: Option<UpdateValuesResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValuesResponse {
    #[serde(default)]
    pub updated_range: Option<String>,
    #[serde(default)]
    pub updated_rows: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_properties_need_only_title() {
        let meta: SpreadsheetMeta = serde_json::from_str(
            r#"{"sheets": [
                {"properties": {"title": "Second", "index": 1}},
                {"properties": {"title": "First"}}
            ]}"#,
        )
        .unwrap();

        assert_eq!(meta.sheets[0].properties.title, "Second");
        assert_eq!(meta.sheets[1].properties.index, 0);
    }

    #[test]
    fn full_range_quotes_title() {
        let sheet = Worksheet {
            spreadsheet_id: "abc".into(),
            title: "Sheet1".into(),
        };
        assert_eq!(sheet.full_range(), "'Sheet1'");

        let sheet = Worksheet {
            spreadsheet_id: "abc".into(),
            title: "Bob's data".into(),
        };
        assert_eq!(sheet.full_range(), "'Bob''s data'");
    }

    #[test]
    fn decodes_first_sheet_properties() {
        let json = r#"{"sheets": [
            {"properties": {"sheetId": 0, "title": "Sheet1", "index": 0}},
            {"properties": {"sheetId": 7, "title": "Archive", "index": 1}}
        ]}"#;
        let meta: SpreadsheetMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.sheets.len(), 2);
        assert_eq!(meta.sheets[1].properties.title, "Archive");
    }

    #[test]
    fn decodes_append_response() {
        let json = r#"{"spreadsheetId": "abc", "updates": {"updatedRange": "Sheet1!A1:G3", "updatedRows": 3}}"#;
        let resp: AppendResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.updates.unwrap().updated_rows, Some(3));
    }
}
