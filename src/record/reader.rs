//! Record reader with strict corruption detection
//!
//! Per FORMAT.md §3, reading a frame is strictly sequential with no
//! backtracking:
//!
//! 1. Read the 8-byte length; zero bytes available here is clean
//!    end-of-stream, not corruption.
//! 2. Read and verify the length checksum *before* the payload, so a
//!    corrupt length field can never size an allocation or a read.
//! 3. Read exactly `length` payload bytes, looping on short reads.
//! 4. Read and verify the data checksum.
//!
//! Per FORMAT.md §4, corruption is fatal to the stream: no skipping, no
//! resynchronization, no repair.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use super::errors::{RecordError, RecordResult};
use super::frame::{self, CHECKSUM_SIZE, LENGTH_SIZE};

/// Reads framed records sequentially from an underlying byte source.
///
/// Works over any `Read`; file-backed construction via [`open`] wraps
/// the file in a `BufReader`.
///
/// [`open`]: RecordReader::open
pub struct RecordReader<R: Read> {
    /// Underlying byte source
    source: R,
    /// Byte offset of the frame currently being read
    current_offset: u64,
    /// Number of records successfully read
    records_read: u64,
}

impl RecordReader<BufReader<File>> {
    /// Opens a record file at `path` for reading.
    pub fn open(path: &Path) -> RecordResult<Self> {
        let file = File::open(path).map_err(|e| {
            RecordError::io_failure(
                format!("failed to open record file: {}", path.display()),
                e,
            )
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> RecordReader<R> {
    /// Wraps an arbitrary byte source.
    pub fn new(source: R) -> Self {
        Self {
            source,
            current_offset: 0,
            records_read: 0,
        }
    }

    /// Reads the next record from the stream.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(payload))` if a frame was read and both checksums
    ///   verified
    /// - `Ok(None)` on clean end-of-stream (the source was exhausted at
    ///   a frame boundary)
    /// - `Err(RecordError)` on I/O failure or corruption
    ///
    /// # Errors
    ///
    /// - `TFREC_LENGTH_CHECKSUM_MISMATCH` if the stored length checksum
    ///   does not match the length bytes; detected before any payload
    ///   allocation
    /// - `TFREC_TRUNCATED_PAYLOAD` if the stream ends inside a frame
    /// - `TFREC_DATA_CHECKSUM_MISMATCH` if the stored data checksum does
    ///   not match the payload bytes
    /// - `TFREC_IO_FAILURE` if the underlying source fails
    pub fn read_next(&mut self) -> RecordResult<Option<Vec<u8>>> {
        let frame_offset = self.current_offset;

        // Length field. Exhaustion before the first byte is the expected
        // terminal condition of a well-formed stream.
        let mut length_bytes = [0u8; LENGTH_SIZE];
        if self.fill_or_clean_eof(&mut length_bytes, frame_offset)?.is_none() {
            return Ok(None);
        }
        let length = u64::from_le_bytes(length_bytes);

        // Length checksum, verified before the payload is allocated or
        // read (FORMAT.md §3).
        let stored_length_checksum = self.read_checksum(
            frame_offset,
            "stream ended inside the frame header",
        )?;
        let actual_length_checksum = frame::length_checksum(length);
        if stored_length_checksum != actual_length_checksum {
            return Err(RecordError::length_checksum_mismatch(
                frame_offset,
                stored_length_checksum,
                actual_length_checksum,
            ));
        }

        // Payload. read_exact loops until `length` bytes are obtained or
        // the source is genuinely exhausted.
        let mut payload = vec![0u8; length as usize];
        self.source.read_exact(&mut payload).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                RecordError::truncated(
                    frame_offset,
                    format!("payload truncated: expected {} bytes", length),
                )
            } else {
                RecordError::io_failure("failed to read record payload", e)
            }
        })?;

        // Data checksum.
        let stored_data_checksum = self.read_checksum(
            frame_offset,
            "stream ended before the data checksum",
        )?;
        let actual_data_checksum = frame::data_checksum(&payload);
        if stored_data_checksum != actual_data_checksum {
            return Err(RecordError::data_checksum_mismatch(
                frame_offset,
                stored_data_checksum,
                actual_data_checksum,
            ));
        }

        self.current_offset += frame::frame_size(payload.len()) as u64;
        self.records_read += 1;
        Ok(Some(payload))
    }

    /// Reads all remaining records from the stream.
    ///
    /// The minimal driver loop: reads until end-of-stream, treating any
    /// other error as fatal to the whole stream.
    pub fn read_all(&mut self) -> RecordResult<Vec<Vec<u8>>> {
        let mut records = Vec::new();
        while let Some(payload) = self.read_next()? {
            records.push(payload);
        }
        Ok(records)
    }

    /// Byte offset of the frame the next read will start at.
    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Number of records successfully read so far.
    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Fills `buf` completely, or reports clean end-of-stream as
    /// `Ok(None)` if the source was exhausted before the first byte.
    ///
    /// A partial fill followed by exhaustion is a torn frame header.
    fn fill_or_clean_eof(
        &mut self,
        buf: &mut [u8],
        frame_offset: u64,
    ) -> RecordResult<Option<()>> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.source.read(&mut buf[filled..]) {
                Ok(0) => {
                    if filled == 0 {
                        return Ok(None);
                    }
                    return Err(RecordError::truncated(
                        frame_offset,
                        format!(
                            "stream ended inside the length field ({} of {} bytes)",
                            filled,
                            buf.len()
                        ),
                    ));
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(RecordError::io_failure("failed to read record length", e))
                }
            }
        }
        Ok(Some(()))
    }

    /// Reads one little-endian u32 checksum field.
    fn read_checksum(&mut self, frame_offset: u64, eof_context: &str) -> RecordResult<u32> {
        let mut bytes = [0u8; CHECKSUM_SIZE];
        self.source.read_exact(&mut bytes).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                RecordError::truncated(frame_offset, eof_context)
            } else {
                RecordError::io_failure("failed to read record checksum", e)
            }
        })?;
        Ok(u32::from_le_bytes(bytes))
    }
}

/// Iterator adapter for `RecordReader`.
///
/// Stops at the first error, which is fatal to the stream and can be
/// inspected afterwards via [`error`] or [`into_error`].
///
/// [`error`]: RecordIterator::error
/// [`into_error`]: RecordIterator::into_error
pub struct RecordIterator<R: Read> {
    reader: RecordReader<R>,
    error: Option<RecordError>,
}

impl<R: Read> RecordIterator<R> {
    /// Creates a new iterator from a reader.
    pub fn new(reader: RecordReader<R>) -> Self {
        Self {
            reader,
            error: None,
        }
    }

    /// Returns the error if iteration stopped on one.
    pub fn error(&self) -> Option<&RecordError> {
        self.error.as_ref()
    }

    /// Consumes the iterator and returns the error if any.
    pub fn into_error(self) -> Option<RecordError> {
        self.error
    }

    /// Number of records successfully read so far.
    pub fn records_read(&self) -> u64 {
        self.reader.records_read()
    }
}

impl<R: Read> Iterator for RecordIterator<R> {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.error.is_some() {
            return None;
        }

        match self.reader.read_next() {
            Ok(Some(payload)) => Some(payload),
            Ok(None) => None,
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

impl<R: Read> IntoIterator for RecordReader<R> {
    type Item = Vec<u8>;
    type IntoIter = RecordIterator<R>;

    fn into_iter(self) -> Self::IntoIter {
        RecordIterator::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::errors::RecordErrorKind;
    use crate::record::frame::HEADER_SIZE;
    use crate::record::writer::RecordWriter;
    use std::io::Cursor;

    fn encode_records(payloads: &[&[u8]]) -> Vec<u8> {
        let mut writer = RecordWriter::new(Vec::new());
        for payload in payloads {
            writer.write(payload).unwrap();
        }
        writer.into_inner().unwrap()
    }

    #[test]
    fn test_empty_stream_is_clean_eof() {
        let mut reader = RecordReader::new(Cursor::new(Vec::new()));
        assert!(reader.read_next().unwrap().is_none());
    }

    #[test]
    fn test_round_trip_single_record() {
        let bytes = encode_records(&[b"hello"]);
        let mut reader = RecordReader::new(Cursor::new(bytes));

        assert_eq!(reader.read_next().unwrap().unwrap(), b"hello");
        assert!(reader.read_next().unwrap().is_none());
        assert_eq!(reader.records_read(), 1);
    }

    #[test]
    fn test_round_trip_empty_payload() {
        let bytes = encode_records(&[b""]);
        let mut reader = RecordReader::new(Cursor::new(bytes));

        assert_eq!(reader.read_next().unwrap().unwrap(), b"");
        assert!(reader.read_next().unwrap().is_none());
    }

    #[test]
    fn test_multi_record_stream_preserves_order() {
        let bytes = encode_records(&[b"hello", b"", b"world"]);
        let mut reader = RecordReader::new(Cursor::new(bytes));
        let records = reader.read_all().unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0], b"hello");
        assert_eq!(records[1], b"");
        assert_eq!(records[2], b"world");
    }

    #[test]
    fn test_corrupt_length_field_detected_before_payload() {
        let mut bytes = encode_records(&[b"hello"]);
        // Flip a bit in the length field without recomputing its
        // checksum. The reader must fail on the header, not return a
        // wrong-length payload.
        bytes[0] ^= 0x04;

        let mut reader = RecordReader::new(Cursor::new(bytes));
        let err = reader.read_next().unwrap_err();
        assert_eq!(err.kind(), RecordErrorKind::LengthChecksumMismatch);
        assert_eq!(err.offset(), Some(0));
    }

    #[test]
    fn test_oversized_corrupt_length_rejected_without_payload_read() {
        let mut bytes = encode_records(&[b"hello"]);
        // Set the high byte of the length so a naive reader would try to
        // allocate an enormous payload.
        bytes[7] = 0xff;

        let mut reader = RecordReader::new(Cursor::new(bytes));
        let err = reader.read_next().unwrap_err();
        assert_eq!(err.kind(), RecordErrorKind::LengthChecksumMismatch);
    }

    #[test]
    fn test_corrupt_payload_detected() {
        let mut bytes = encode_records(&[b"hello"]);
        bytes[HEADER_SIZE + 1] ^= 0x01;

        let mut reader = RecordReader::new(Cursor::new(bytes));
        let err = reader.read_next().unwrap_err();
        assert_eq!(err.kind(), RecordErrorKind::DataChecksumMismatch);
    }

    #[test]
    fn test_every_payload_bit_flip_is_detected() {
        let bytes = encode_records(&[b"hi"]);
        for bit in 0..16 {
            let mut corrupted = bytes.clone();
            corrupted[HEADER_SIZE + bit / 8] ^= 1 << (bit % 8);

            let mut reader = RecordReader::new(Cursor::new(corrupted));
            let err = reader.read_next().unwrap_err();
            assert_eq!(err.kind(), RecordErrorKind::DataChecksumMismatch);
        }
    }

    #[test]
    fn test_truncated_payload_detected() {
        let bytes = encode_records(&[b"hello"]);
        // Keep the header but cut the stream partway into the payload.
        let truncated = bytes[..HEADER_SIZE + 2].to_vec();

        let mut reader = RecordReader::new(Cursor::new(truncated));
        let err = reader.read_next().unwrap_err();
        assert_eq!(err.kind(), RecordErrorKind::TruncatedPayload);
    }

    #[test]
    fn test_missing_data_checksum_detected() {
        let bytes = encode_records(&[b"hello"]);
        // Payload is complete but the trailing checksum is cut off.
        let truncated = bytes[..bytes.len() - 2].to_vec();

        let mut reader = RecordReader::new(Cursor::new(truncated));
        let err = reader.read_next().unwrap_err();
        assert_eq!(err.kind(), RecordErrorKind::TruncatedPayload);
    }

    #[test]
    fn test_torn_length_field_detected() {
        let bytes = encode_records(&[b"hello"]);
        // Only part of the length field survives.
        let truncated = bytes[..3].to_vec();

        let mut reader = RecordReader::new(Cursor::new(truncated));
        let err = reader.read_next().unwrap_err();
        assert_eq!(err.kind(), RecordErrorKind::TruncatedPayload);
    }

    #[test]
    fn test_second_frame_offset_reported_on_corruption() {
        let mut bytes = encode_records(&[b"hello", b"world"]);
        let first_frame = frame::frame_size(5);
        // Corrupt the second frame's payload.
        bytes[first_frame + HEADER_SIZE] ^= 0x01;

        let mut reader = RecordReader::new(Cursor::new(bytes));
        assert_eq!(reader.read_next().unwrap().unwrap(), b"hello");
        let err = reader.read_next().unwrap_err();
        assert_eq!(err.kind(), RecordErrorKind::DataChecksumMismatch);
        assert_eq!(err.offset(), Some(first_frame as u64));
    }

    #[test]
    fn test_fragmented_source_is_reassembled() {
        // A source that returns at most one byte per read call, like a
        // slow socket. The payload read must loop until complete.
        struct OneByteAtATime(Cursor<Vec<u8>>);

        impl Read for OneByteAtATime {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                let len = buf.len().min(1);
                self.0.read(&mut buf[..len])
            }
        }

        let bytes = encode_records(&[b"fragmented payload", b"second"]);
        let mut reader = RecordReader::new(OneByteAtATime(Cursor::new(bytes)));

        assert_eq!(reader.read_next().unwrap().unwrap(), b"fragmented payload");
        assert_eq!(reader.read_next().unwrap().unwrap(), b"second");
        assert!(reader.read_next().unwrap().is_none());
    }

    #[test]
    fn test_iterator_yields_all_records() {
        let bytes = encode_records(&[b"a", b"b", b"c"]);
        let reader = RecordReader::new(Cursor::new(bytes));

        let records: Vec<Vec<u8>> = reader.into_iter().collect();
        assert_eq!(records, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn test_iterator_parks_error_and_stops() {
        let mut bytes = encode_records(&[b"good", b"bad"]);
        let second_frame = frame::frame_size(4);
        bytes[second_frame + HEADER_SIZE] ^= 0x01;

        let mut iter = RecordReader::new(Cursor::new(bytes)).into_iter();
        assert_eq!(iter.next().unwrap(), b"good");
        assert!(iter.next().is_none());

        let err = iter.into_error().expect("error must be parked");
        assert_eq!(err.kind(), RecordErrorKind::DataChecksumMismatch);
    }

    #[test]
    fn test_read_all_halts_on_corruption() {
        let mut bytes = encode_records(&[b"one", b"two", b"three"]);
        let second_frame = frame::frame_size(3);
        bytes[second_frame] ^= 0x01;

        let mut reader = RecordReader::new(Cursor::new(bytes));
        assert!(reader.read_all().is_err());
        // Only the first record was decoded before the halt.
        assert_eq!(reader.records_read(), 1);
    }
}
