//! In-memory row sinks.
//!
//! `Vec<OutputRow>` is itself a sink for single-owner use (the impl lives
//! in `lxe-core`). [`SharedTable`] hands out cloneable handles to one
//! mutex-guarded table.

use std::sync::{Arc, Mutex, MutexGuard};

use lxe_core::{OutputRow, RowSink, SinkError};

/// A table shared by several writers.
///
/// Each append takes the lock once, so rows from one writer stay in
/// that writer's order. Clones are handles to the same table.
#[derive(Clone, Debug, Default)]
pub struct SharedTable {
    rows: Arc<Mutex<Vec<OutputRow>>>,
}

impl SharedTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<OutputRow>>, SinkError> {
        self.rows.lock().map_err(|_| SinkError::Poisoned)
    }

    /// Append a batch under a single lock acquisition.
    pub fn append_batch(&self, batch: Vec<OutputRow>) -> Result<(), SinkError> {
        self.lock()?.extend(batch);
        Ok(())
    }

    /// Number of rows.
    pub fn len(&self) -> Result<usize, SinkError> {
        Ok(self.lock()?.len())
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> Result<bool, SinkError> {
        Ok(self.lock()?.is_empty())
    }

    /// A copy of every row, in append order.
    pub fn snapshot(&self) -> Result<Vec<OutputRow>, SinkError> {
        Ok(self.lock()?.clone())
    }

    /// Remove and return every row.
    pub fn take(&self) -> Result<Vec<OutputRow>, SinkError> {
        Ok(std::mem::take(&mut *self.lock()?))
    }
}

impl RowSink for SharedTable {
    fn append_row(&mut self, row: OutputRow) -> Result<(), SinkError> {
        self.lock()?.push(row);
        Ok(())
    }
}
