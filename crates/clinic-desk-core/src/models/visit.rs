//! Visit, billing, and intake input models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::patient::{Gender, DATE_FORMAT, NO_APPOINTMENT};

/// One billable treatment for a visit. The price defaults from the catalog
/// but is editable per visit, so the line item carries its own copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillLineItem {
    pub name: String,
    pub price: f64,
}

impl BillLineItem {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// Clinical notes captured during a visit. All three fields may be empty;
/// the receipt omits empty blocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VisitNotes {
    pub diagnosis: String,
    pub advice: String,
    pub prescription: String,
}

/// Follow-up scheduling choice from the form layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextVisit {
    Scheduled(NaiveDate),
    NotRequired,
}

impl NextVisit {
    /// Worksheet cell value: the date in `DD-MM-YYYY`, or the sentinel.
    pub fn to_field(self) -> String {
        match self {
            NextVisit::Scheduled(date) => date.format(DATE_FORMAT).to_string(),
            NextVisit::NotRequired => NO_APPOINTMENT.to_string(),
        }
    }
}

/// Raw intake form input for a new patient.
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub contact: String,
    /// Conditions ticked on the medical-history checklist.
    pub conditions: Vec<String>,
    /// Teeth selected on the dental chart (e.g. `"UL6"`).
    pub teeth: Vec<String>,
    pub next_visit: NextVisit,
}

impl NewPatient {
    /// Assemble the stored medical-history text: checklist conditions joined
    /// by commas, with the teeth annotation appended when present.
    pub fn medical_history(&self) -> String {
        let conditions = self.conditions.join(", ");
        if self.teeth.is_empty() {
            conditions
        } else {
            format!("{} | Teeth: {}", conditions, self.teeth.join(", "))
        }
    }
}
