//! Remote worksheet backend: a blocking HTTP client for a sheet service
//! that exposes worksheets as JSON row arrays.
//!
//! The wire contract mirrors the store's snapshot semantics: `GET` returns
//! the whole worksheet, `PUT` replaces it. Each request is attempted once;
//! there are no retries and no timeout beyond the transport default. Fetch
//! failures are absorbed by the store's degrade-to-empty policy, write
//! failures surface to the caller.

use clinic_desk_core::store::BackendError;
use clinic_desk_core::{SheetBackend, SheetRow};
use tracing::debug;

/// Client for one spreadsheet document on a REST sheet service.
///
/// Worksheets live at `{base_url}/worksheets/{name}`.
pub struct SheetsClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl SheetsClient {
    /// `base_url` addresses the spreadsheet document, without a trailing
    /// slash (e.g. `https://sheets.example.com/v1/documents/abc123`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::blocking::Client::new(),
        }
    }

    fn worksheet_url(&self, worksheet: &str) -> String {
        format!("{}/worksheets/{}", self.base_url, worksheet)
    }
}

impl SheetBackend for SheetsClient {
    fn fetch(&self, worksheet: &str) -> Result<Vec<SheetRow>, BackendError> {
        let url = self.worksheet_url(worksheet);
        debug!(%url, "fetching worksheet");
        let response = self
            .http
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| BackendError(format!("GET {url}: {e}")))?;
        response
            .json::<Vec<SheetRow>>()
            .map_err(|e| BackendError(format!("GET {url}: invalid body: {e}")))
    }

    fn replace(&self, worksheet: &str, rows: &[SheetRow]) -> Result<(), BackendError> {
        let url = self.worksheet_url(worksheet);
        debug!(%url, rows = rows.len(), "replacing worksheet");
        self.http
            .put(&url)
            .json(rows)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| BackendError(format!("PUT {url}: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worksheet_url() {
        let client = SheetsClient::new("https://sheets.example.com/v1/documents/abc/");
        assert_eq!(
            client.worksheet_url("Patients"),
            "https://sheets.example.com/v1/documents/abc/worksheets/Patients"
        );
    }

    #[test]
    fn test_row_wire_format() {
        let mut row = SheetRow::new();
        row.insert("Name".into(), "Asha".into());
        row.insert("Pending Amount".into(), "500".into());

        let json = serde_json::to_string(&vec![row.clone()]).unwrap();
        assert_eq!(json, r#"[{"Name":"Asha","Pending Amount":"500"}]"#);

        let back: Vec<SheetRow> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![row]);
    }
}
