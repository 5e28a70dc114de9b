//! Patient models.

use serde::{Deserialize, Serialize};

/// Date format used throughout the worksheet (`DD-MM-YYYY`).
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Sentinel stored when no follow-up visit is scheduled.
pub const NO_APPOINTMENT: &str = "Not Required";

/// Patient gender as recorded on the intake form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Parse a worksheet cell. Anything unrecognised maps to `Other`,
    /// matching the zero-validation policy of the legacy sheet.
    pub fn from_cell(cell: &str) -> Self {
        match cell.trim() {
            "Male" => Gender::Male,
            "Female" => Gender::Female,
            _ => Gender::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the `Patients` worksheet, typed.
///
/// Records are created once and then mutated in place on every billing save
/// (`pending_amount`, `last_visit`, `next_appointment`) or dues-clearing save
/// (`pending_amount` only). The application never deletes a record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientRecord {
    /// Numeric ID assigned at creation (`row_count + 101`). Monotonic under a
    /// single writer; two concurrent creators can mint the same ID.
    pub id: u32,
    /// Display name. Lookup is by `id`; name matching is a UI convenience only.
    pub name: String,
    /// Age in years, 1-100 on intake.
    pub age: u32,
    pub gender: Gender,
    /// Free-text phone string, as typed.
    pub contact: String,
    /// `DD-MM-YYYY` of the most recent visit.
    pub last_visit: String,
    /// `DD-MM-YYYY`, or the sentinel `"Not Required"` / `"TBD"`.
    pub next_appointment: String,
    /// Free text, optionally assembled from the condition checklist plus a
    /// teeth-chart annotation.
    pub medical_history: String,
    /// Outstanding balance. Invariant across every billing save:
    /// `after = before + sum(line item prices) - amount paid now`.
    /// Never clamped; overpayment leaves it negative.
    pub pending_amount: f64,
}

impl PatientRecord {
    /// True when a follow-up visit is actually booked.
    pub fn has_next_appointment(&self) -> bool {
        !matches!(
            self.next_appointment.trim(),
            "" | "Not Required" | "TBD"
        )
    }

    /// Strictly positive balance makes the patient a defaulter.
    pub fn is_defaulter(&self) -> bool {
        self.pending_amount > 0.0
    }

    /// Case-insensitive substring match across every field, used by the
    /// records search view.
    pub fn matches(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        [
            self.id.to_string(),
            self.name.clone(),
            self.age.to_string(),
            self.gender.to_string(),
            self.contact.clone(),
            self.last_visit.clone(),
            self.next_appointment.clone(),
            self.medical_history.clone(),
            crate::models::format_amount(self.pending_amount),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&q))
    }
}

/// Render a monetary amount the way the worksheet stores it: integers stay
/// integers, fractional balances keep their decimals.
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Today's date in worksheet format.
pub fn today_field() -> String {
    chrono::Local::now().date_naive().format(DATE_FORMAT).to_string()
}
