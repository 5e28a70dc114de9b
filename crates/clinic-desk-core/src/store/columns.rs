//! Worksheet column schema and row/record conversion.
//!
//! The remote document is schema-less; every read goes through
//! [`normalize_row`] so the rest of the crate can assume the full column set
//! is present.

use std::collections::BTreeMap;

use crate::models::{format_amount, Gender, PatientRecord};

/// One worksheet row: column name to cell text.
pub type SheetRow = BTreeMap<String, String>;

pub const COL_ID: &str = "Patient ID";
pub const COL_NAME: &str = "Name";
pub const COL_AGE: &str = "Age";
pub const COL_GENDER: &str = "Gender";
pub const COL_CONTACT: &str = "Contact";
pub const COL_LAST_VISIT: &str = "Last Visit";
pub const COL_NEXT_APPOINTMENT: &str = "Next Appointment";
pub const COL_MEDICAL_HISTORY: &str = "Medical History";
pub const COL_PENDING_AMOUNT: &str = "Pending Amount";

/// Every column a conformant row carries.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    COL_ID,
    COL_NAME,
    COL_AGE,
    COL_GENDER,
    COL_CONTACT,
    COL_LAST_VISIT,
    COL_NEXT_APPOINTMENT,
    COL_MEDICAL_HISTORY,
    COL_PENDING_AMOUNT,
];

/// Fill in any missing required column with an empty cell. Existing cells
/// are left untouched.
pub fn normalize_row(row: &mut SheetRow) {
    for col in REQUIRED_COLUMNS {
        row.entry(col.to_string()).or_default();
    }
}

impl PatientRecord {
    /// Typed view of a normalized row. Unparseable numerics coerce to zero
    /// rather than failing the whole load.
    pub fn from_row(row: &SheetRow) -> Self {
        let cell = |col: &str| row.get(col).map(String::as_str).unwrap_or("");
        Self {
            id: cell(COL_ID).trim().parse().unwrap_or(0),
            name: cell(COL_NAME).to_string(),
            age: cell(COL_AGE).trim().parse().unwrap_or(0),
            gender: Gender::from_cell(cell(COL_GENDER)),
            contact: cell(COL_CONTACT).to_string(),
            last_visit: cell(COL_LAST_VISIT).to_string(),
            next_appointment: cell(COL_NEXT_APPOINTMENT).to_string(),
            medical_history: cell(COL_MEDICAL_HISTORY).to_string(),
            pending_amount: cell(COL_PENDING_AMOUNT).trim().parse().unwrap_or(0.0),
        }
    }

    /// Row form for a whole-table save.
    pub fn to_row(&self) -> SheetRow {
        let mut row = SheetRow::new();
        row.insert(COL_ID.into(), self.id.to_string());
        row.insert(COL_NAME.into(), self.name.clone());
        row.insert(COL_AGE.into(), self.age.to_string());
        row.insert(COL_GENDER.into(), self.gender.as_str().into());
        row.insert(COL_CONTACT.into(), self.contact.clone());
        row.insert(COL_LAST_VISIT.into(), self.last_visit.clone());
        row.insert(COL_NEXT_APPOINTMENT.into(), self.next_appointment.clone());
        row.insert(COL_MEDICAL_HISTORY.into(), self.medical_history.clone());
        row.insert(
            COL_PENDING_AMOUNT.into(),
            format_amount(self.pending_amount),
        );
        row
    }
}
