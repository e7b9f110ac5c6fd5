//! Round-trip verification
//!
//! Decodes an encoded byte sequence with the subject decoder and compares
//! it byte-for-byte against the canonical header text. Applied twice per
//! test case: once to the subject encoder's own output (self-consistency)
//! and once to the best reference's bytes (cross-implementation
//! interoperability, proving the decoder understands bytes it did not
//! itself produce).

use crate::codec::SubjectCodec;
use crate::error::{Error, Result};

/// Verify that `encoded` decodes exactly to `expected`.
///
/// A mismatch is fatal for the whole run; the returned error carries the
/// context label, a hex dump of the offending bytes, and both text forms.
pub fn verify(
    codec: &SubjectCodec,
    encoded: &[u8],
    expected: &str,
    context: &str,
) -> Result<()> {
    let actual = codec.decode(encoded)?;
    if actual == expected {
        return Ok(());
    }

    Err(Error::RoundTrip {
        context: context.to_string(),
        encoded_hex: hex::encode(encoded),
        actual,
        expected: expected.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn identity_codec() -> Option<SubjectCodec> {
        let cat = PathBuf::from("/bin/cat");
        if !cat.exists() {
            eprintln!("Skipping: /bin/cat not found");
            return None;
        }
        Some(SubjectCodec::new(cat.clone(), Some(cat)))
    }

    #[test]
    fn test_matching_round_trip_passes() {
        let Some(codec) = identity_codec() else { return };
        verify(&codec, b"a: 1\n", "a: 1\n", "t: self").unwrap();
    }

    #[test]
    fn test_mismatch_carries_full_diagnostics() {
        let Some(codec) = identity_codec() else { return };
        let err = verify(&codec, b"a: 2\n", "a: 1\n", "t: reference from x")
            .unwrap_err();
        match err {
            Error::RoundTrip {
                context,
                encoded_hex,
                actual,
                expected,
            } => {
                assert_eq!(context, "t: reference from x");
                assert_eq!(encoded_hex, hex::encode(b"a: 2\n"));
                assert_eq!(actual, "a: 2\n");
                assert_eq!(expected, "a: 1\n");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_mismatch_renders_hex_and_both_texts() {
        let err = Error::RoundTrip {
            context: "t: self".into(),
            encoded_hex: "82".into(),
            actual: "b\n".into(),
            expected: "a\n".into(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("t: self"));
        assert!(rendered.contains("82"));
        assert!(rendered.contains("b\\n"));
        assert!(rendered.contains("a\\n"));
    }
}
