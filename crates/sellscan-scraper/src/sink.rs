//! Append-only output sink for seller records.
//!
//! Records are pushed incrementally as they are produced, not buffered to
//! the end of the run.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::types::SellerRecord;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write record: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// An append operation over an external record store.
pub trait RecordSink {
    /// Append one record.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] when the record cannot be written; the
    /// orchestrator logs the failure and continues.
    fn append(&mut self, record: &SellerRecord) -> Result<(), SinkError>;
}

/// JSON Lines sink: one record per line, flushed per record so that an
/// aborted run keeps everything emitted so far.
pub struct JsonlSink {
    writer: BufWriter<File>,
}

impl JsonlSink {
    /// Open `path` for appending, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Io`] if the file cannot be opened.
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl RecordSink for JsonlSink {
    fn append(&mut self, record: &SellerRecord) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) struct MemorySink {
    pub records: Vec<SellerRecord>,
}

#[cfg(test)]
impl MemorySink {
    pub(crate) fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

#[cfg(test)]
impl RecordSink for MemorySink {
    fn append(&mut self, record: &SellerRecord) -> Result<(), SinkError> {
        self.records.push(record.clone());
        Ok(())
    }
}
