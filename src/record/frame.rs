//! Frame field layout per FORMAT.md §1
//!
//! Each frame is four consecutive little-endian fields:
//! length (u64), masked length checksum (u32), payload bytes, masked
//! data checksum (u32). A frame is self-contained; no cross-frame state
//! is needed to validate or decode it.

use crate::checksum::masked_crc32c;

/// Size of the length field in bytes.
pub const LENGTH_SIZE: usize = 8;

/// Size of each checksum field in bytes.
pub const CHECKSUM_SIZE: usize = 4;

/// Size of the frame header (length + length checksum).
pub const HEADER_SIZE: usize = LENGTH_SIZE + CHECKSUM_SIZE;

/// Size of the frame footer (data checksum).
pub const FOOTER_SIZE: usize = CHECKSUM_SIZE;

/// Total frame overhead beyond the payload bytes.
pub const FRAME_OVERHEAD: usize = HEADER_SIZE + FOOTER_SIZE;

/// Returns the total on-disk size of a frame for a payload of
/// `payload_len` bytes.
pub fn frame_size(payload_len: usize) -> usize {
    FRAME_OVERHEAD + payload_len
}

/// Encodes a payload length as its on-disk little-endian bytes.
///
/// These are also the exact bytes the length checksum is computed over,
/// per FORMAT.md §1.
pub fn encode_length(length: u64) -> [u8; LENGTH_SIZE] {
    length.to_le_bytes()
}

/// Computes the masked checksum stored alongside a length field.
pub fn length_checksum(length: u64) -> u32 {
    masked_crc32c(&encode_length(length))
}

/// Computes the masked checksum stored alongside payload bytes.
pub fn data_checksum(payload: &[u8]) -> u32 {
    masked_crc32c(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_overhead_is_sixteen_bytes() {
        assert_eq!(FRAME_OVERHEAD, 16);
        assert_eq!(frame_size(0), 16);
        assert_eq!(frame_size(100), 116);
    }

    #[test]
    fn test_encode_length_is_little_endian() {
        assert_eq!(encode_length(1), [1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(
            encode_length(0x0102_0304_0506_0708),
            [0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]
        );
    }

    #[test]
    fn test_length_checksum_depends_on_length() {
        assert_ne!(length_checksum(0), length_checksum(1));
    }
}
