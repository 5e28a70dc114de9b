//! Front-desk facade: the four interactive operations the form layer
//! invokes (add patient, clinical visit & bill, manage dues, records
//! search), wired over one patient store.

use thiserror::Error;
use tracing::info;

use crate::config::ClinicProfile;
use crate::ledger::{self, BillTotals, LedgerError};
use crate::messaging;
use crate::models::{
    today_field, BillLineItem, NewPatient, NextVisit, PatientRecord, TreatmentCatalog, VisitNotes,
};
use crate::receipt::{Receipt, ReceiptError};
use crate::store::{PatientStore, SheetBackend, StoreError, FIRST_PATIENT_ID};

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("patient name is required")]
    NameRequired,

    #[error("no patient with id {0}")]
    UnknownPatient(u32),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Receipt(#[from] ReceiptError),
}

impl From<LedgerError> for DeskError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::UnknownPatient(id) => DeskError::UnknownPatient(id),
            LedgerError::Store(e) => DeskError::Store(e),
        }
    }
}

pub type DeskResult<T> = Result<T, DeskError>;

/// Result of a billing save: the updated record, the computed totals, the
/// rendered receipt, and a ready-to-send WhatsApp link when the patient has
/// a contact number.
#[derive(Debug)]
pub struct VisitOutcome {
    pub record: PatientRecord,
    pub totals: BillTotals,
    pub receipt: Receipt,
    pub pdf: Vec<u8>,
    pub whatsapp_link: Option<String>,
}

/// The clinic front desk over one worksheet backend.
pub struct FrontDesk<B> {
    store: PatientStore<B>,
    catalog: TreatmentCatalog,
    profile: ClinicProfile,
}

impl<B: SheetBackend> FrontDesk<B> {
    pub fn new(backend: B, profile: ClinicProfile) -> Self {
        Self {
            store: PatientStore::new(backend),
            catalog: TreatmentCatalog::default(),
            profile,
        }
    }

    pub fn store(&self) -> &PatientStore<B> {
        &self.store
    }

    pub fn catalog(&self) -> &TreatmentCatalog {
        &self.catalog
    }

    pub fn profile(&self) -> &ClinicProfile {
        &self.profile
    }

    /// Register a new patient. An empty name aborts before any write; a
    /// fresh record starts with a zero balance and today as the last visit.
    pub fn add_patient(&self, input: NewPatient) -> DeskResult<PatientRecord> {
        if input.name.trim().is_empty() {
            return Err(DeskError::NameRequired);
        }

        let mut all = self.store.load_all();
        let record = PatientRecord {
            id: all.len() as u32 + FIRST_PATIENT_ID,
            name: input.name.clone(),
            age: input.age,
            gender: input.gender,
            contact: input.contact.clone(),
            last_visit: today_field(),
            next_appointment: input.next_visit.to_field(),
            medical_history: input.medical_history(),
            pending_amount: 0.0,
        };
        all.push(record.clone());
        self.store.save_all(&all)?;
        info!(id = record.id, "patient added");
        Ok(record)
    }

    /// Finalize a clinical visit: compute the new balance, persist the
    /// record (`pending_amount`, `last_visit`, `next_appointment` only),
    /// and hand back the receipt.
    pub fn record_visit(
        &self,
        patient_id: u32,
        notes: VisitNotes,
        line_items: Vec<BillLineItem>,
        amount_paid: f64,
        next_visit: NextVisit,
    ) -> DeskResult<VisitOutcome> {
        let mut all = self.store.load_all();
        let record = all
            .iter_mut()
            .find(|p| p.id == patient_id)
            .ok_or(DeskError::UnknownPatient(patient_id))?;

        let totals = ledger::bill_totals(record.pending_amount, &line_items, amount_paid);
        record.pending_amount = totals.new_due;
        record.last_visit = today_field();
        record.next_appointment = next_visit.to_field();
        let record = record.clone();
        self.store.save_all(&all)?;
        info!(id = patient_id, due = totals.new_due, "visit recorded");

        let receipt = Receipt {
            patient_name: record.name.clone(),
            age: record.age,
            gender: record.gender,
            visit_date: record.last_visit.clone(),
            next_appointment: record.next_appointment.clone(),
            notes,
            line_items,
            totals,
            amount_paid,
        };
        let pdf = receipt.render_pdf(&self.profile)?;

        let whatsapp_link = if record.contact.trim().is_empty() {
            None
        } else {
            let message = messaging::visit_summary(
                &self.profile,
                &record.name,
                &totals,
                amount_paid,
                &record.next_appointment,
            );
            Some(messaging::whatsapp_link(
                &record.contact,
                &self.profile.country_code,
                &message,
            ))
        };

        Ok(VisitOutcome {
            record,
            totals,
            receipt,
            pdf,
            whatsapp_link,
        })
    }

    /// Dues-clearing view: reduce a balance by the amount received. The
    /// form layer caps the amount at the current due.
    pub fn clear_dues(&self, patient_id: u32, amount: f64) -> DeskResult<f64> {
        Ok(ledger::apply_payment(&self.store, patient_id, amount)?)
    }

    /// Patients with a strictly positive balance.
    pub fn list_defaulters(&self) -> Vec<PatientRecord> {
        let all = self.store.load_all();
        ledger::defaulters(&all).into_iter().cloned().collect()
    }

    /// Records view: substring search across every column, or the full
    /// table for an empty query.
    pub fn search(&self, query: &str) -> Vec<PatientRecord> {
        self.store.search(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use crate::store::MemorySheet;

    fn desk() -> FrontDesk<MemorySheet> {
        FrontDesk::new(MemorySheet::new(), ClinicProfile::default())
    }

    fn intake(name: &str) -> NewPatient {
        NewPatient {
            name: name.into(),
            age: 30,
            gender: Gender::Male,
            contact: "98765 43210".into(),
            conditions: vec![],
            teeth: vec![],
            next_visit: NextVisit::NotRequired,
        }
    }

    #[test]
    fn test_add_patient_assigns_sequential_ids() {
        let desk = desk();
        let a = desk.add_patient(intake("Asha")).unwrap();
        let b = desk.add_patient(intake("Ravi")).unwrap();
        assert_eq!(a.id, 101);
        assert_eq!(b.id, 102);
        assert_eq!(a.pending_amount, 0.0);
    }

    #[test]
    fn test_add_patient_empty_name_rejected() {
        let desk = desk();
        let err = desk.add_patient(intake("   ")).unwrap_err();
        assert!(matches!(err, DeskError::NameRequired));
        assert!(desk.store().load_all().is_empty());
    }

    #[test]
    fn test_record_visit_unknown_patient() {
        let desk = desk();
        let err = desk
            .record_visit(999, VisitNotes::default(), vec![], 0.0, NextVisit::NotRequired)
            .unwrap_err();
        assert!(matches!(err, DeskError::UnknownPatient(999)));
    }

    #[test]
    fn test_record_visit_updates_only_billing_fields() {
        let desk = desk();
        let before = desk.add_patient(intake("Asha")).unwrap();

        let outcome = desk
            .record_visit(
                before.id,
                VisitNotes::default(),
                vec![BillLineItem::new("Scaling", 800.0)],
                300.0,
                NextVisit::NotRequired,
            )
            .unwrap();

        assert_eq!(outcome.record.pending_amount, 500.0);
        assert_eq!(outcome.record.name, before.name);
        assert_eq!(outcome.record.medical_history, before.medical_history);

        let stored = desk.store().find(before.id).unwrap();
        assert_eq!(stored.pending_amount, 500.0);
    }

    #[test]
    fn test_whatsapp_link_requires_contact() {
        let desk = desk();
        let mut input = intake("Asha");
        input.contact = String::new();
        let p = desk.add_patient(input).unwrap();

        let outcome = desk
            .record_visit(p.id, VisitNotes::default(), vec![], 0.0, NextVisit::NotRequired)
            .unwrap();
        assert!(outcome.whatsapp_link.is_none());

        let q = desk.add_patient(intake("Ravi")).unwrap();
        let outcome = desk
            .record_visit(q.id, VisitNotes::default(), vec![], 0.0, NextVisit::NotRequired)
            .unwrap();
        let link = outcome.whatsapp_link.unwrap();
        assert!(link.starts_with("https://wa.me/919876543210?text="));
    }
}
