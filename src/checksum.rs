//! Masked CRC-32C checksums for record frames
//!
//! Per FORMAT.md §2:
//! - Checksums use CRC-32C (the Castagnoli polynomial)
//! - Stored checksums are always masked; raw CRCs are never persisted
//! - Verification recomputes the masked value, never inverts the mask

/// Additive constant of the masking transform, per FORMAT.md §2.
/// A fixed protocol constant, not configurable.
const MASK_DELTA: u32 = 0xa282_ead8;

/// Computes the raw CRC-32C checksum over the provided bytes.
///
/// Deterministic: the same input always produces the same output.
pub fn crc32c(data: &[u8]) -> u32 {
    crc32c::crc32c(data)
}

/// Applies the masking transform to a raw CRC.
///
/// Per FORMAT.md §2: rotate the CRC right by 15 bits, then wrapping-add
/// `MASK_DELTA`. Masking distinguishes stored checksums from raw CRC
/// values of the same bytes appearing elsewhere in a stream.
pub fn mask(crc: u32) -> u32 {
    ((crc >> 15) | (crc << 17)).wrapping_add(MASK_DELTA)
}

/// Computes the masked CRC-32C of the provided bytes.
///
/// This is the value stored on disk for both the length and data
/// checksum fields.
pub fn masked_crc32c(data: &[u8]) -> u32 {
    mask(crc32c(data))
}

/// Verifies that the masked CRC-32C of `data` matches `expected`.
pub fn verify_masked_crc32c(data: &[u8], expected: u32) -> bool {
    masked_crc32c(data) == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc32c_is_castagnoli() {
        // Published CRC-32C check value for the nine bytes "123456789".
        assert_eq!(crc32c(b"123456789"), 0xe306_9283);
    }

    #[test]
    fn test_mask_known_value() {
        // Reference vector: crc32c("abc") = 0x364b3fb7, and its masked
        // form under the rotate-plus-0xa282ead8 transform.
        let crc = crc32c(b"abc");
        assert_eq!(crc, 0x364b_3fb7);
        assert_eq!(mask(crc), 0x21f1_576e);
        assert_eq!(masked_crc32c(b"abc"), 0x21f1_576e);
    }

    #[test]
    fn test_mask_differs_from_raw_crc() {
        let crc = crc32c(b"payload");
        assert_ne!(mask(crc), crc, "Masked value must differ from raw CRC");
    }

    #[test]
    fn test_masked_checksum_deterministic() {
        let data = b"record payload bytes";
        assert_eq!(masked_crc32c(data), masked_crc32c(data));
    }

    #[test]
    fn test_different_data_different_checksums() {
        // Equal-length payloads must still checksum differently.
        assert_ne!(masked_crc32c(b"first payload"), masked_crc32c(b"other payload"));
    }

    #[test]
    fn test_checksum_detects_single_bit_flip() {
        let mut data = vec![0x00, 0x01, 0x02, 0x03, 0x04];
        let original = masked_crc32c(&data);

        data[2] ^= 0x01;
        assert_ne!(original, masked_crc32c(&data));
    }

    #[test]
    fn test_verify_masked_crc32c() {
        let data = b"payload to verify";
        let checksum = masked_crc32c(data);
        assert!(verify_masked_crc32c(data, checksum));
        assert!(!verify_masked_crc32c(data, checksum ^ 0x1));
    }

    #[test]
    fn test_empty_data_has_consistent_checksum() {
        let empty: &[u8] = &[];
        assert_eq!(masked_crc32c(empty), masked_crc32c(empty));
    }
}
