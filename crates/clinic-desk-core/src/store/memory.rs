//! In-process worksheet backend for tests and offline development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::{BackendError, SheetBackend, SheetRow};

/// A worksheet document held in memory. Snapshot semantics match the remote
/// backend: `fetch` clones the whole table, `replace` overwrites it.
#[derive(Default)]
pub struct MemorySheet {
    worksheets: Mutex<HashMap<String, Vec<SheetRow>>>,
    fail_fetches: AtomicBool,
    fail_replaces: AtomicBool,
}

impl MemorySheet {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock just means a panicking test held it; the data is
    // still usable.
    fn table(&self) -> MutexGuard<'_, HashMap<String, Vec<SheetRow>>> {
        self.worksheets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Seed a worksheet with raw rows, bypassing normalization.
    pub fn seed(&self, worksheet: &str, rows: Vec<SheetRow>) {
        self.table().insert(worksheet.to_string(), rows);
    }

    /// Raw rows currently stored, for assertions on persisted state.
    pub fn raw_rows(&self, worksheet: &str) -> Vec<SheetRow> {
        self.table().get(worksheet).cloned().unwrap_or_default()
    }

    /// Make every subsequent fetch fail, to exercise degrade-to-empty.
    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent replace fail, to exercise write-error paths.
    pub fn fail_replaces(&self, fail: bool) {
        self.fail_replaces.store(fail, Ordering::SeqCst);
    }
}

impl SheetBackend for MemorySheet {
    fn fetch(&self, worksheet: &str) -> Result<Vec<SheetRow>, BackendError> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(BackendError(format!(
                "worksheet '{worksheet}' unreachable"
            )));
        }
        Ok(self.raw_rows(worksheet))
    }

    fn replace(&self, worksheet: &str, rows: &[SheetRow]) -> Result<(), BackendError> {
        if self.fail_replaces.load(Ordering::SeqCst) {
            return Err(BackendError(format!(
                "worksheet '{worksheet}' unreachable"
            )));
        }
        self.seed(worksheet, rows.to_vec());
        Ok(())
    }
}
