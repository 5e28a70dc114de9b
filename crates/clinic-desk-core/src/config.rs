//! Clinic profile: the practice identity printed on receipts and used for
//! outbound messages. Loadable from a JSON file; defaults match the
//! clinic's stationery.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read profile: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid profile JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClinicProfile {
    pub clinic_name: String,
    pub doctor_name: String,
    pub qualification: String,
    pub phone: String,
    pub address: String,
    pub hours: String,
    pub currency_symbol: String,
    /// Prefixed to phone numbers that do not already carry it.
    pub country_code: String,
}

impl Default for ClinicProfile {
    fn default() -> Self {
        Self {
            clinic_name: "Sudantam Clinic".into(),
            doctor_name: "Dr. S. Jangid".into(),
            qualification: "Dental Surgeon (BDS)".into(),
            phone: "+91-8000000000".into(),
            address: "Opposite Agrasen Bhawan, Kishangarh".into(),
            hours: "Timing: 9AM-2PM & 4PM-8PM".into(),
            currency_symbol: "Rs.".into(),
            country_code: "91".into(),
        }
    }
}

impl ClinicProfile {
    /// Load a profile from a JSON file. Missing fields fall back to the
    /// defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
