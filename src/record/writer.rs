//! Record writer
//!
//! Serializes opaque payloads as frames per FORMAT.md §1. The writer is
//! append-only and keeps no state beyond position counters; emission is
//! atomic only at the byte level of the underlying sink. Per FORMAT.md
//! §5, a write interrupted mid-frame leaves a truncated final frame for
//! readers to report; recovery policy belongs to the caller.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::errors::{RecordError, RecordResult};
use super::frame::{self, frame_size};

/// Writes framed records to an underlying byte sink.
///
/// Works over any `Write`; file-backed construction via [`create`] wraps
/// the file in a `BufWriter`.
///
/// [`create`]: RecordWriter::create
pub struct RecordWriter<W: Write> {
    /// Underlying byte sink
    sink: W,
    /// Byte offset the next frame will start at
    current_offset: u64,
    /// Number of records written so far
    records_written: u64,
}

impl RecordWriter<BufWriter<File>> {
    /// Creates (or truncates) a record file at `path` for writing.
    pub fn create(path: &Path) -> RecordResult<Self> {
        let file = File::create(path).map_err(|e| {
            RecordError::io_failure(
                format!("failed to create record file: {}", path.display()),
                e,
            )
        })?;
        Ok(Self::new(BufWriter::new(file)))
    }

    /// Flushes buffered frames and fsyncs the underlying file.
    ///
    /// Never called implicitly; the format has no per-record durability
    /// contract (FORMAT.md §5).
    pub fn sync(&mut self) -> RecordResult<()> {
        self.flush()?;
        self.sink
            .get_ref()
            .sync_all()
            .map_err(|e| RecordError::io_failure("fsync of record file failed", e))
    }
}

impl<W: Write> RecordWriter<W> {
    /// Wraps an arbitrary byte sink.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            current_offset: 0,
            records_written: 0,
        }
    }

    /// Writes one payload as a frame.
    ///
    /// Emits, in order: length (u64 LE), masked length checksum (u32 LE),
    /// the raw payload bytes, masked data checksum (u32 LE).
    ///
    /// # Returns
    ///
    /// The total number of bytes written: `8 + 4 + payload.len() + 4`.
    ///
    /// # Errors
    ///
    /// Returns `TFREC_IO_FAILURE` if the sink rejects any of the writes.
    /// The frame may be partially emitted in that case.
    pub fn write(&mut self, payload: &[u8]) -> RecordResult<usize> {
        let length = payload.len() as u64;
        let length_checksum = frame::length_checksum(length);
        let data_checksum = frame::data_checksum(payload);

        self.write_all(&frame::encode_length(length))?;
        self.write_all(&length_checksum.to_le_bytes())?;
        self.write_all(payload)?;
        self.write_all(&data_checksum.to_le_bytes())?;

        let written = frame_size(payload.len());
        self.current_offset += written as u64;
        self.records_written += 1;
        Ok(written)
    }

    fn write_all(&mut self, bytes: &[u8]) -> RecordResult<()> {
        self.sink.write_all(bytes).map_err(|e| {
            RecordError::io_failure(
                format!(
                    "failed to write record frame at offset {}",
                    self.current_offset
                ),
                e,
            )
        })
    }

    /// Flushes any buffering in the sink.
    pub fn flush(&mut self) -> RecordResult<()> {
        self.sink
            .flush()
            .map_err(|e| RecordError::io_failure("failed to flush record sink", e))
    }

    /// Byte offset the next frame will start at.
    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Number of records written so far.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Flushes and returns the underlying sink.
    pub fn into_inner(mut self) -> RecordResult<W> {
        self.flush()?;
        Ok(self.sink)
    }
}
