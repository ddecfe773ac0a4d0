//! Unpadded base64url, as PASETO uses for every token segment.
//!
//! <https://github.com/paseto-standard/paseto-spec/blob/master/docs/01-Protocol-Versions/Common.md#base64-encoding>.
//!
//! Backed by [`base64ct`], which is constant-time and rejects non-canonical input.

use core::fmt;

use base64ct::{Base64UrlUnpadded, Encoding};

use crate::PasetoError;

// A multiple of 3 bytes, so every chunk but the last encodes without a partial block.
const CHUNK: usize = 3 * 256;

/// Encode `bytes` as unpadded base64url.
pub fn encode(bytes: &[u8]) -> String {
    Base64UrlUnpadded::encode_string(bytes)
}

/// Stream the encoding of `bytes` into a formatter without allocating.
pub fn write_to_fmt(bytes: &[u8], f: &mut fmt::Formatter) -> fmt::Result {
    let mut buf = [0; CHUNK / 3 * 4];
    for chunk in bytes.chunks(CHUNK) {
        let encoded = Base64UrlUnpadded::encode(chunk, &mut buf).map_err(|_| fmt::Error)?;
        f.write_str(encoded)?;
    }
    Ok(())
}

/// Decode unpadded base64url.
///
/// Padding characters, the standard alphabet's `+` and `/`, a dangling
/// single character and non-canonical trailing bits are all rejected.
pub fn decode_vec(src: &str) -> Result<Vec<u8>, PasetoError> {
    Base64UrlUnpadded::decode_vec(src).map_err(|_| PasetoError::Base64DecodeError)
}

#[cfg(test)]
mod tests {
    use core::fmt;

    use super::{CHUNK, decode_vec, encode, write_to_fmt};
    use crate::PasetoError;

    struct Streamed<'a>(&'a [u8]);

    impl fmt::Display for Streamed<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write_to_fmt(self.0, f)
        }
    }

    #[test]
    fn encodes_url_safe_without_padding() {
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "Zg");
        assert_eq!(encode(b"fo"), "Zm8");
        assert_eq!(encode(b"foo"), "Zm9v");
        assert_eq!(encode(&[0xfb, 0xff]), "-_8");
        assert_eq!(encode(b"Cuon Alpinus"), "Q3VvbiBBbHBpbnVz");
    }

    #[test]
    fn streaming_matches_one_shot() {
        for len in [0, 1, 2, CHUNK - 1, CHUNK, CHUNK + 1, 2 * CHUNK + 2] {
            let bytes: Vec<u8> = (0..len).map(|i| (i * 37 + 250) as u8).collect();
            assert_eq!(Streamed(&bytes).to_string(), encode(&bytes), "{len} bytes");
        }
    }

    #[test]
    fn decodes_what_it_encodes() {
        for len in 0..16 {
            let bytes: Vec<u8> = (0..len).map(|i| (i * 37 + 250) as u8).collect();
            assert_eq!(decode_vec(&encode(&bytes)).unwrap(), bytes);
        }
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["Zg==", "Zm9v+", "Zm9v/A", "Z", "Zm9vY", "Zh", "Zm9v Zm9v", "é"] {
            assert!(
                matches!(decode_vec(bad), Err(PasetoError::Base64DecodeError)),
                "{bad:?} should not decode"
            );
        }
    }
}
