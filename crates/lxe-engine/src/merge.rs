//! Worker-side row batching.
//!
//! Each worker owns a [`BatchSink`]: rows accumulate locally and are
//! handed to the run's merger in batches over a bounded crossbeam
//! channel, so the shared output table is touched by one thread only.

use crossbeam_channel::Sender;
use lxe_core::{OutputRow, RowSink, SinkError};

/// Buffers rows and ships them to the merger in batches.
#[derive(Debug)]
pub struct BatchSink {
    buffer: Vec<OutputRow>,
    batch_size: usize,
    tx: Sender<Vec<OutputRow>>,
    batches_sent: u64,
}

impl BatchSink {
    /// Ship a batch every `batch_size` rows (at least 1).
    pub fn new(tx: Sender<Vec<OutputRow>>, batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            buffer: Vec::with_capacity(batch_size),
            batch_size,
            tx,
            batches_sent: 0,
        }
    }

    /// Rows buffered but not yet shipped.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Batches shipped so far.
    pub fn batches_sent(&self) -> u64 {
        self.batches_sent
    }

    fn ship(&mut self) -> Result<(), SinkError> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let batch = std::mem::replace(&mut self.buffer, Vec::with_capacity(self.batch_size));
        self.tx.send(batch).map_err(|_| SinkError::Closed)?;
        self.batches_sent += 1;
        Ok(())
    }
}

impl RowSink for BatchSink {
    fn append_row(&mut self, row: OutputRow) -> Result<(), SinkError> {
        self.buffer.push(row);
        if self.buffer.len() >= self.batch_size {
            self.ship()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.ship()
    }
}
