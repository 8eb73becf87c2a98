//! Fixed-width name encoding for container headers.
//!
//! Container and bundle headers store identifiers in fixed-width,
//! NUL-padded UTF-8 fields. Encoding is total: over-length names are
//! truncated with a warning rather than rejected, so a build never fails
//! on a long file name. Decoding is partial and rejects invalid UTF-8.

use crate::bundler::error::Result;

/// Width of every name field in the container and bundle formats.
pub const NAME_WIDTH: usize = 32;

/// Encodes `name` into exactly `width` bytes, NUL-padded on the right.
///
/// If the UTF-8 encoding of `name` is longer than `width`, the name is
/// truncated to the largest prefix that fits on a character boundary and a
/// warning is logged. Two distinct names sharing a `width`-byte prefix
/// therefore collide in the output; callers that need stronger guarantees
/// must keep names short.
pub fn encode(name: &str, width: usize) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(width);

    if name.len() > width {
        log::warn!(
            "name \"{}\" exceeds {} bytes and will be truncated",
            name,
            width
        );
        // Back off to a char boundary so the stored bytes stay valid UTF-8.
        let mut end = width;
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        encoded.extend_from_slice(name[..end].as_bytes());
    } else {
        encoded.extend_from_slice(name.as_bytes());
    }

    encoded.resize(width, 0);
    encoded
}

/// Decodes a fixed-width name field back into a string.
///
/// Strips trailing NUL padding and validates the remaining bytes as UTF-8.
///
/// # Errors
///
/// Returns [`Error::InvalidName`](crate::bundler::Error::InvalidName) if
/// the non-padding bytes are not valid UTF-8.
pub fn decode(bytes: &[u8]) -> Result<String> {
    let end = bytes
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |pos| pos + 1);
    Ok(std::str::from_utf8(&bytes[..end])?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_pads_to_width() {
        let encoded = encode("mn6_cn", NAME_WIDTH);
        assert_eq!(encoded.len(), NAME_WIDTH);
        assert_eq!(&encoded[..6], b"mn6_cn");
        assert!(encoded[6..].iter().all(|&b| b == 0));
    }

    #[test]
    fn round_trip_short_name() {
        let encoded = encode("model.bin", NAME_WIDTH);
        assert_eq!(decode(&encoded).unwrap(), "model.bin");
    }

    #[test]
    fn overlong_name_truncates_deterministically() {
        let long = "a".repeat(40);
        let encoded = encode(&long, NAME_WIDTH);
        assert_eq!(encoded.len(), NAME_WIDTH);
        // Lossy: decodes to the truncated form, not the original.
        assert_eq!(decode(&encoded).unwrap(), "a".repeat(NAME_WIDTH));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // 3-byte characters: 31 bytes fit, the 11th char would straddle
        // the boundary and must be dropped entirely.
        let name = "\u{4e2d}".repeat(11); // 33 bytes
        let encoded = encode(&name, NAME_WIDTH);
        assert_eq!(encoded.len(), NAME_WIDTH);
        assert_eq!(decode(&encoded).unwrap(), "\u{4e2d}".repeat(10));
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        let mut bytes = vec![0u8; NAME_WIDTH];
        bytes[0] = 0xFF;
        bytes[1] = 0xFE;
        assert!(decode(&bytes).is_err());
    }

    #[test]
    fn decode_empty_field() {
        let bytes = vec![0u8; NAME_WIDTH];
        assert_eq!(decode(&bytes).unwrap(), "");
    }
}
