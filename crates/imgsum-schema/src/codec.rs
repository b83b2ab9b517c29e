//! Hex encoding of computed digests.

/// Encode bytes as lowercase hex, two characters per byte, high nibble first.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(bytes)
}

/// A computed digest rendered as lowercase hex.
///
/// Only built from raw digest bytes. Expected values supplied by callers stay
/// plain strings and are compared against [`HexDigest::as_str`] as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexDigest(String);

impl HexDigest {
    /// Encode raw digest bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(encode(bytes))
    }

    /// Get the digest as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HexDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for HexDigest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Algorithm;
    use proptest::prelude::*;

    #[test]
    fn encode_is_lowercase_high_nibble_first() {
        assert_eq!(encode([0x00u8, 0x0f, 0xa5, 0xff]), "000fa5ff");
        assert_eq!(encode(b""), "");
    }

    #[test]
    fn from_bytes_renders_lowercase() {
        let raw = Algorithm::Sha1.digest(b"abc");
        let d = HexDigest::from_bytes(&raw);
        assert_eq!(d.as_str(), "a9993e364706816aba3e25717850c26c9cd0d89d");
        assert_eq!(d.to_string(), d.as_str());
        assert_ne!(d.as_str(), "A9993E364706816ABA3E25717850C26C9CD0D89D");
    }

    proptest! {
        #[test]
        fn encode_shape(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
            let s = encode(&bytes);
            prop_assert_eq!(s.len(), bytes.len() * 2);
            prop_assert!(s.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        }

        #[test]
        fn encode_is_injective_for_fixed_length(
            a in proptest::collection::vec(any::<u8>(), 16),
            b in proptest::collection::vec(any::<u8>(), 16),
        ) {
            prop_assert_eq!(a == b, encode(&a) == encode(&b));
        }
    }
}
