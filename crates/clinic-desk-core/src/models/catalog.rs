//! Treatment price catalog and standard pick-lists.

use serde::{Deserialize, Serialize};

use super::visit::BillLineItem;

/// Conditions offered on the intake medical-history checklist.
pub const MEDICAL_CONDITIONS: [&str; 6] =
    ["Diabetes", "BP", "Thyroid", "Cardiac", "Allergy", "Pregnancy"];

/// Frequent diagnoses offered in the clinical-notes view.
pub const COMMON_DIAGNOSES: [&str; 7] = [
    "Caries",
    "Abscess",
    "Gingivitis",
    "Fracture",
    "Mobile Tooth",
    "Impaction",
    "Pulpitis",
];

/// Frequently prescribed medicines.
pub const COMMON_MEDICINES: [&str; 7] = [
    "Augmentin 625",
    "Amoxicillin 500",
    "Metrogyl 400",
    "Zerodol-SP",
    "Ketorol-DT",
    "Pan-D",
    "Hexidine",
];

/// The clinic's standard treatments and their default prices. Prices here
/// are defaults only; the billing form may override per visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreatmentCatalog {
    entries: Vec<(String, f64)>,
}

impl Default for TreatmentCatalog {
    fn default() -> Self {
        Self {
            entries: vec![
                ("Consultation".into(), 200.0),
                ("X-Ray (IOPA)".into(), 150.0),
                ("Scaling".into(), 800.0),
                ("Extraction".into(), 500.0),
                ("Restoration".into(), 1000.0),
                ("RCT".into(), 3500.0),
                ("Crown (Metal)".into(), 2000.0),
                ("Crown (Ceramic)".into(), 4000.0),
                ("Implant".into(), 15000.0),
                ("Braces".into(), 25000.0),
                ("Bleaching".into(), 5000.0),
            ],
        }
    }
}

impl TreatmentCatalog {
    /// Treatment names in menu order.
    pub fn treatment_names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Default price for a treatment, if it is in the catalog.
    pub fn default_price(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, price)| *price)
    }

    /// Build a line item at the catalog's default price.
    pub fn line_item(&self, name: &str) -> Option<BillLineItem> {
        self.default_price(name)
            .map(|price| BillLineItem::new(name, price))
    }
}
