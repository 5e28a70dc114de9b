//! Clinic Desk Core Library
//!
//! Single-clinic patient management: records, visit billing, outstanding
//! dues, and PDF receipts, persisted to a remote worksheet.
//!
//! # Architecture
//!
//! ```text
//! Form Layer (out of scope)
//!      │
//!      ▼
//! FrontDesk ── add patient / record visit / clear dues / search
//!      │
//!      ├──▶ Ledger Engine     pure balance arithmetic
//!      │        new_due = previous_due + sum(prices) - paid
//!      │
//!      ├──▶ Receipt Formatter fixed-layout PDF bytes
//!      │
//!      └──▶ Patient Store ──▶ SheetBackend (remote worksheet snapshot)
//!                              whole-table saves, last writer wins
//! ```
//!
//! # Persistence contract
//!
//! The store reads and writes the `Patients` worksheet as a full-table
//! snapshot. Reads are always fresh and degrade to an empty dataset on any
//! fetch failure; writes replace the whole table and propagate failures.
//! There is no locking: the system assumes a single operator, and the
//! store's docs say so rather than pretending otherwise.
//!
//! # Modules
//!
//! - [`models`]: Domain types (PatientRecord, BillLineItem, TreatmentCatalog)
//! - [`store`]: Worksheet-backed patient store with schema normalization
//! - [`ledger`]: Balance arithmetic and dues clearing
//! - [`receipt`]: PDF receipt rendering
//! - [`messaging`]: WhatsApp summary links
//! - [`config`]: Clinic profile
//! - [`desk`]: Front-desk facade over the four user operations

pub mod config;
pub mod desk;
pub mod ledger;
pub mod messaging;
pub mod models;
pub mod receipt;
pub mod store;

// Re-export commonly used types
pub use config::ClinicProfile;
pub use desk::{DeskError, FrontDesk, VisitOutcome};
pub use ledger::{bill_totals, BillTotals};
pub use models::{
    BillLineItem, Gender, NewPatient, NextVisit, PatientRecord, TreatmentCatalog, VisitNotes,
};
pub use receipt::Receipt;
pub use store::{MemorySheet, PatientStore, SheetBackend, SheetRow};
