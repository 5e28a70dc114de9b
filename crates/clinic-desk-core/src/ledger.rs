//! Ledger engine: balance arithmetic for billing and dues clearing.
//!
//! The one hard invariant in the system lives here: after every billing
//! save, `pending_after = pending_before + sum(line item prices) - paid`.
//! The arithmetic is deliberately unclamped. Overpayment drives the balance
//! negative and is passed through unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{BillLineItem, PatientRecord};
use crate::store::{PatientStore, SheetBackend, StoreError};

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("no patient with id {0}")]
    UnknownPatient(u32),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Totals for one billing save.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BillTotals {
    /// Sum of this visit's line item prices.
    pub charges: f64,
    /// Previous due plus this visit's charges.
    pub grand_total: f64,
    /// Grand total minus the amount paid now. May be negative.
    pub new_due: f64,
}

impl BillTotals {
    /// The receipt branches on the sign of the due, not its magnitude:
    /// `due <= 0` prints as settled.
    pub fn is_settled(&self) -> bool {
        self.new_due <= 0.0
    }
}

/// Pure balance computation. No validation, no I/O: callers are expected
/// to have coerced their inputs to numbers already.
pub fn bill_totals(
    previous_due: f64,
    line_items: &[BillLineItem],
    amount_paid: f64,
) -> BillTotals {
    let charges: f64 = line_items.iter().map(|item| item.price).sum();
    let grand_total = previous_due + charges;
    BillTotals {
        charges,
        grand_total,
        new_due: grand_total - amount_paid,
    }
}

/// Reduce a patient's due by `amount` and persist, returning the new
/// balance. Used by the dues-clearing view. Capping `amount` at the current
/// due is the caller's contract; this function does not enforce it.
pub fn apply_payment<B: SheetBackend>(
    store: &PatientStore<B>,
    patient_id: u32,
    amount: f64,
) -> LedgerResult<f64> {
    let mut all = store.load_all();
    let record = all
        .iter_mut()
        .find(|p| p.id == patient_id)
        .ok_or(LedgerError::UnknownPatient(patient_id))?;

    record.pending_amount -= amount;
    let balance = record.pending_amount;
    store.save_all(&all)?;
    Ok(balance)
}

/// Patients with a strictly positive outstanding balance.
pub fn defaulters(records: &[PatientRecord]) -> Vec<&PatientRecord> {
    records.iter().filter(|p| p.is_defaulter()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;
    use crate::store::MemorySheet;
    use proptest::prelude::*;

    fn items(prices: &[f64]) -> Vec<BillLineItem> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| BillLineItem::new(format!("Tx{i}"), p))
            .collect()
    }

    #[test]
    fn test_bill_totals_basic() {
        let totals = bill_totals(500.0, &items(&[3500.0]), 2000.0);
        assert_eq!(totals.charges, 3500.0);
        assert_eq!(totals.grand_total, 4000.0);
        assert_eq!(totals.new_due, 2000.0);
        assert!(!totals.is_settled());
    }

    #[test]
    fn test_no_items_no_payment() {
        let totals = bill_totals(0.0, &[], 0.0);
        assert_eq!(totals.new_due, 0.0);
        assert!(totals.is_settled());
    }

    #[test]
    fn test_overpayment_goes_negative() {
        let totals = bill_totals(0.0, &items(&[200.0]), 500.0);
        assert_eq!(totals.new_due, -300.0);
        assert!(totals.is_settled());
    }

    #[test]
    fn test_apply_payment_persists_balance() {
        let store = crate::store::PatientStore::new(MemorySheet::new());
        store
            .append(PatientRecord {
                id: 101,
                name: "Asha".into(),
                age: 30,
                gender: Gender::Female,
                contact: String::new(),
                last_visit: String::new(),
                next_appointment: String::new(),
                medical_history: String::new(),
                pending_amount: 1000.0,
            })
            .unwrap();

        let balance = apply_payment(&store, 101, 400.0).unwrap();
        assert_eq!(balance, 600.0);
        assert_eq!(store.find(101).unwrap().pending_amount, 600.0);
    }

    #[test]
    fn test_apply_payment_unknown_patient() {
        let store = crate::store::PatientStore::new(MemorySheet::new());
        let err = apply_payment(&store, 999, 100.0).unwrap_err();
        assert!(matches!(err, LedgerError::UnknownPatient(999)));
    }

    proptest! {
        /// Integer-valued inputs produce exact arithmetic with no drift.
        #[test]
        fn prop_bill_totals_exact(
            previous in 0u32..1_000_000,
            prices in proptest::collection::vec(0u32..100_000, 0..8),
            paid in 0u32..1_000_000,
        ) {
            let line_items = items(&prices.iter().map(|&p| p as f64).collect::<Vec<_>>());
            let totals = bill_totals(previous as f64, &line_items, paid as f64);

            let charges: i64 = prices.iter().map(|&p| p as i64).sum();
            prop_assert_eq!(totals.charges, charges as f64);
            prop_assert_eq!(totals.grand_total, (previous as i64 + charges) as f64);
            prop_assert_eq!(totals.new_due, (previous as i64 + charges - paid as i64) as f64);
        }
    }
}
