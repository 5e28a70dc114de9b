//! Patient store: the durable mapping from patient identity to record,
//! backed by a remote tabular document.
//!
//! Persistence is whole-table snapshots: a save replaces the entire
//! worksheet, last writer wins. There is no locking and no per-record
//! versioning; the store assumes a single operator. Reads always go to the
//! backend (no cache), and a failed read degrades to an empty dataset
//! instead of failing the caller.

mod columns;
mod memory;

pub use columns::*;
pub use memory::*;

use thiserror::Error;
use tracing::{debug, warn};

use crate::models::PatientRecord;

/// Worksheet holding one row per patient.
pub const PATIENTS_WORKSHEET: &str = "Patients";

/// First patient ID ever assigned; subsequent IDs are `row_count + 101`.
pub const FIRST_PATIENT_ID: u32 = 101;

/// Transport-level failure reported by a worksheet backend.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct BackendError(pub String);

/// Store errors. Fetch failures never surface (degrade-to-empty); only
/// write failures reach the caller.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("worksheet write failed: {0}")]
    Write(#[from] BackendError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A remote tabular document addressed by worksheet name. Implementations
/// read and write full-table snapshots; there are no partial writes and no
/// transactions. Callers must assume a single concurrent writer.
pub trait SheetBackend {
    fn fetch(&self, worksheet: &str) -> Result<Vec<SheetRow>, BackendError>;
    fn replace(&self, worksheet: &str, rows: &[SheetRow]) -> Result<(), BackendError>;
}

/// Typed access to the `Patients` worksheet.
pub struct PatientStore<B> {
    backend: B,
    worksheet: String,
}

impl<B: SheetBackend> PatientStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_worksheet(backend, PATIENTS_WORKSHEET)
    }

    pub fn with_worksheet(backend: B, worksheet: impl Into<String>) -> Self {
        Self {
            backend,
            worksheet: worksheet.into(),
        }
    }

    /// Fetch every patient row, fresh from the backend.
    ///
    /// Rows are normalized to the full column schema before conversion, so
    /// a worksheet missing columns still yields complete records. Any fetch
    /// failure (unreachable store, missing worksheet) returns an empty
    /// dataset; the failure is logged, never surfaced.
    pub fn load_all(&self) -> Vec<PatientRecord> {
        match self.backend.fetch(&self.worksheet) {
            Ok(rows) => rows
                .into_iter()
                .map(|mut row| {
                    normalize_row(&mut row);
                    PatientRecord::from_row(&row)
                })
                .collect(),
            Err(err) => {
                warn!(worksheet = %self.worksheet, error = %err, "fetch failed, serving empty dataset");
                Vec::new()
            }
        }
    }

    /// Overwrite the whole worksheet with the given records. Write failures
    /// propagate; there is no retry.
    pub fn save_all(&self, records: &[PatientRecord]) -> StoreResult<()> {
        let rows: Vec<SheetRow> = records.iter().map(PatientRecord::to_row).collect();
        self.backend.replace(&self.worksheet, &rows)?;
        debug!(worksheet = %self.worksheet, rows = rows.len(), "worksheet saved");
        Ok(())
    }

    /// `save_all(load_all() + [record])`. A read-modify-write with no
    /// locking; an interleaved insert from another writer is lost.
    pub fn append(&self, record: PatientRecord) -> StoreResult<()> {
        let mut all = self.load_all();
        all.push(record);
        self.save_all(&all)
    }

    /// Next ID to assign: current row count plus the base offset. Not
    /// collision-free under concurrent writers.
    pub fn next_patient_id(&self) -> u32 {
        self.load_all().len() as u32 + FIRST_PATIENT_ID
    }

    /// Identity-based lookup.
    pub fn find(&self, id: u32) -> Option<PatientRecord> {
        self.load_all().into_iter().find(|p| p.id == id)
    }

    /// Case-insensitive substring search across every field.
    pub fn search(&self, query: &str) -> Vec<PatientRecord> {
        let query = query.trim();
        let all = self.load_all();
        if query.is_empty() {
            return all;
        }
        all.into_iter().filter(|p| p.matches(query)).collect()
    }
}
