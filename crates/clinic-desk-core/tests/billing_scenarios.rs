//! End-to-end billing scenarios over an in-memory worksheet.

use clinic_desk_core::desk::DeskError;
use clinic_desk_core::{
    BillLineItem, ClinicProfile, FrontDesk, Gender, MemorySheet, NewPatient, NextVisit, VisitNotes,
};

fn desk() -> FrontDesk<MemorySheet> {
    FrontDesk::new(MemorySheet::new(), ClinicProfile::default())
}

fn intake(name: &str) -> NewPatient {
    NewPatient {
        name: name.into(),
        age: 34,
        gender: Gender::Female,
        contact: "98765 43210".into(),
        conditions: vec!["Diabetes".into()],
        teeth: vec![],
        next_visit: NextVisit::NotRequired,
    }
}

/// Consultation fully paid on the day: zero due, receipt shows Paid.
#[test]
fn consultation_settled_same_day() {
    let desk = desk();
    let patient = desk.add_patient(intake("Asha")).unwrap();

    let outcome = desk
        .record_visit(
            patient.id,
            VisitNotes::default(),
            vec![BillLineItem::new("Consultation", 200.0)],
            200.0,
            NextVisit::NotRequired,
        )
        .unwrap();

    assert_eq!(outcome.totals.new_due, 0.0);
    assert_eq!(outcome.record.pending_amount, 0.0);
    assert_eq!(
        outcome.receipt.invoice_rows().last().unwrap(),
        &("Status".to_string(), "Paid".to_string())
    );
}

/// RCT on top of an old due, partly paid: balance carries forward and the
/// receipt shows it.
#[test]
fn partial_payment_carries_balance() {
    let desk = desk();
    let patient = desk.add_patient(intake("Ravi")).unwrap();

    // Establish a previous due of 500.
    desk.record_visit(
        patient.id,
        VisitNotes::default(),
        vec![BillLineItem::new("Extraction", 500.0)],
        0.0,
        NextVisit::NotRequired,
    )
    .unwrap();

    let outcome = desk
        .record_visit(
            patient.id,
            VisitNotes::default(),
            vec![BillLineItem::new("RCT", 3500.0)],
            2000.0,
            NextVisit::NotRequired,
        )
        .unwrap();

    assert_eq!(outcome.totals.grand_total, 4000.0);
    assert_eq!(outcome.totals.new_due, 2000.0);
    assert_eq!(
        outcome.receipt.invoice_rows().last().unwrap(),
        &("Balance Due".to_string(), "2000".to_string())
    );
    assert_eq!(desk.store().find(patient.id).unwrap().pending_amount, 2000.0);
}

/// A visit with nothing billed renders no invoice block at all.
#[test]
fn visit_with_no_billing_has_no_invoice() {
    let desk = desk();
    let patient = desk.add_patient(intake("Meera")).unwrap();

    let outcome = desk
        .record_visit(
            patient.id,
            VisitNotes {
                diagnosis: "Routine check".into(),
                ..Default::default()
            },
            vec![],
            0.0,
            NextVisit::NotRequired,
        )
        .unwrap();

    assert_eq!(outcome.totals.new_due, 0.0);
    assert!(outcome.receipt.invoice_rows().is_empty());
    assert!(outcome.pdf.starts_with(b"%PDF"));
}

/// Clearing the full due removes the patient from the defaulters view.
#[test]
fn dues_clearing_removes_defaulter() {
    let desk = desk();
    let patient = desk.add_patient(intake("Asha")).unwrap();
    desk.record_visit(
        patient.id,
        VisitNotes::default(),
        vec![BillLineItem::new("Restoration", 1000.0)],
        0.0,
        NextVisit::NotRequired,
    )
    .unwrap();
    assert_eq!(desk.list_defaulters().len(), 1);

    let balance = desk.clear_dues(patient.id, 1000.0).unwrap();
    assert_eq!(balance, 0.0);
    assert!(desk.list_defaulters().is_empty());
}

/// An empty name is rejected before anything touches the worksheet.
#[test]
fn empty_name_rejected_without_write() {
    let desk = desk();
    let err = desk.add_patient(intake("")).unwrap_err();
    assert!(matches!(err, DeskError::NameRequired));
    assert!(desk.store().load_all().is_empty());
}

/// Repeated edits keep the ledger invariant: the stored balance equals the
/// running sum of (charges - paid) deltas.
#[test]
fn balance_consistent_across_repeated_edits() {
    let desk = desk();
    let patient = desk.add_patient(intake("Asha")).unwrap();

    let visits: [(f64, f64); 3] = [(800.0, 500.0), (150.0, 0.0), (0.0, 450.0)];
    let mut expected = 0.0;
    for (charge, paid) in visits {
        let items = if charge > 0.0 {
            vec![BillLineItem::new("Tx", charge)]
        } else {
            vec![]
        };
        desk.record_visit(patient.id, VisitNotes::default(), items, paid, NextVisit::NotRequired)
            .unwrap();
        expected += charge - paid;
    }

    assert_eq!(desk.store().find(patient.id).unwrap().pending_amount, expected);
    assert_eq!(expected, 0.0);
}
