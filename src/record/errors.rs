//! Record container error types
//!
//! Per FORMAT.md §4, every failure is surfaced as a distinct, inspectable
//! error kind:
//! - TFREC_IO_FAILURE — the underlying read or write failed
//! - TFREC_LENGTH_CHECKSUM_MISMATCH — corrupt length field
//! - TFREC_DATA_CHECKSUM_MISMATCH — corrupt payload bytes
//! - TFREC_TRUNCATED_PAYLOAD — the stream ended mid-frame
//!
//! Clean end-of-stream is not an error; the reader reports it as
//! `Ok(None)`.

use std::fmt;
use std::io;

/// Error kinds for record container operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordErrorKind {
    /// Underlying read/write failed; not corruption, not retried here
    IoFailure,
    /// Stored length checksum does not match the length bytes
    LengthChecksumMismatch,
    /// Stored data checksum does not match the payload bytes
    DataChecksumMismatch,
    /// Stream ended before a complete frame was read
    TruncatedPayload,
}

impl RecordErrorKind {
    /// Returns the stable string code for this kind.
    pub fn code(&self) -> &'static str {
        match self {
            RecordErrorKind::IoFailure => "TFREC_IO_FAILURE",
            RecordErrorKind::LengthChecksumMismatch => "TFREC_LENGTH_CHECKSUM_MISMATCH",
            RecordErrorKind::DataChecksumMismatch => "TFREC_DATA_CHECKSUM_MISMATCH",
            RecordErrorKind::TruncatedPayload => "TFREC_TRUNCATED_PAYLOAD",
        }
    }

    /// Returns true if this kind indicates on-disk corruption rather than
    /// an environmental I/O failure.
    pub fn is_corruption(&self) -> bool {
        !matches!(self, RecordErrorKind::IoFailure)
    }
}

impl fmt::Display for RecordErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error type for record container operations.
///
/// Corruption errors carry the byte offset of the frame they were
/// detected in, so callers can report the exact failure position.
#[derive(Debug)]
pub struct RecordError {
    /// Error kind
    kind: RecordErrorKind,
    /// Human-readable message
    message: String,
    /// Byte offset of the frame being read or written, if known
    offset: Option<u64>,
    /// Underlying I/O error if applicable
    source: Option<io::Error>,
}

impl RecordError {
    /// Create an I/O failure error.
    pub fn io_failure(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            kind: RecordErrorKind::IoFailure,
            message: message.into(),
            offset: None,
            source: Some(source),
        }
    }

    /// Create a length checksum mismatch error at a frame offset.
    pub fn length_checksum_mismatch(offset: u64, stored: u32, actual: u32) -> Self {
        Self {
            kind: RecordErrorKind::LengthChecksumMismatch,
            message: format!(
                "length checksum mismatch: stored {:#010x}, computed {:#010x}",
                stored, actual
            ),
            offset: Some(offset),
            source: None,
        }
    }

    /// Create a data checksum mismatch error at a frame offset.
    pub fn data_checksum_mismatch(offset: u64, stored: u32, actual: u32) -> Self {
        Self {
            kind: RecordErrorKind::DataChecksumMismatch,
            message: format!(
                "data checksum mismatch: stored {:#010x}, computed {:#010x}",
                stored, actual
            ),
            offset: Some(offset),
            source: None,
        }
    }

    /// Create a truncation error at a frame offset.
    pub fn truncated(offset: u64, message: impl Into<String>) -> Self {
        Self {
            kind: RecordErrorKind::TruncatedPayload,
            message: message.into(),
            offset: Some(offset),
            source: None,
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> RecordErrorKind {
        self.kind
    }

    /// Returns the byte offset of the affected frame, if known.
    pub fn offset(&self) -> Option<u64> {
        self.offset
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true if this error indicates corruption.
    pub fn is_corruption(&self) -> bool {
        self.kind.is_corruption()
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.code(), self.message)?;
        if let Some(offset) = self.offset {
            write!(f, " (byte_offset: {})", offset)?;
        }
        Ok(())
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for record container operations.
pub type RecordResult<T> = Result<T, RecordError>;
