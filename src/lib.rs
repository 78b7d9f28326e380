//! tfrec - a strict, corruption-detecting reader and writer for the
//! TFRecord container format
//!
//! Payloads are opaque byte sequences stored as self-contained frames:
//! a little-endian length, a masked CRC-32C of the length bytes, the raw
//! payload, and a masked CRC-32C of the payload (FORMAT.md §1). The
//! writer and reader interoperate byte-for-byte with other TFRecord
//! implementations.
//!
//! ```no_run
//! use std::path::Path;
//! use tfrec::{RecordReader, RecordWriter};
//!
//! # fn main() -> tfrec::RecordResult<()> {
//! let mut writer = RecordWriter::create(Path::new("data.tfrecord"))?;
//! writer.write(b"hello")?;
//! writer.sync()?;
//!
//! let mut reader = RecordReader::open(Path::new("data.tfrecord"))?;
//! while let Some(payload) = reader.read_next()? {
//!     // payload bytes are verified against both checksums
//! }
//! # Ok(())
//! # }
//! ```

pub mod checksum;
pub mod cli;
pub mod observability;
pub mod record;

pub use record::{
    RecordError, RecordErrorKind, RecordIterator, RecordReader, RecordResult, RecordWriter,
};

/// Current version of tfrec.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
