//! Framed record container
//!
//! The writer serializes opaque payloads into self-describing,
//! corruption-detectable frames; the reader streams them back while
//! verifying integrity. Payload contents are never inspected here.
//!
//! # Design Principles
//!
//! - Byte-for-byte interoperability with the TFRecord container format
//! - Explicit failure over silent recovery
//! - Length checksum verified before the payload is touched
//!
//! # Frame Format (FORMAT.md §1)
//!
//! ```text
//! ┌───────────────────────────────────────────────────┐
//! │ Frame 1                                           │
//! │ ┌────────────┬──────────────┬─────────┬─────────┐ │
//! │ │ length (8) │ len crc (4)  │ payload │ crc (4) │ │
//! │ └────────────┴──────────────┴─────────┴─────────┘ │
//! ├───────────────────────────────────────────────────┤
//! │ Frame 2                                           │
//! │ ┌────────────┬──────────────┬─────────┬─────────┐ │
//! │ │ length (8) │ len crc (4)  │ payload │ crc (4) │ │
//! │ └────────────┴──────────────┴─────────┴─────────┘ │
//! └───────────────────────────────────────────────────┘
//! ```
//!
//! All integer fields are little-endian; both checksums are masked
//! CRC-32C values (see [`crate::checksum`]).

mod errors;
mod frame;
mod reader;
mod writer;

pub use errors::{RecordError, RecordErrorKind, RecordResult};
pub use frame::{frame_size, CHECKSUM_SIZE, FOOTER_SIZE, FRAME_OVERHEAD, HEADER_SIZE, LENGTH_SIZE};
pub use reader::{RecordIterator, RecordReader};
pub use writer::RecordWriter;
