//! Printable encoding for binary hash and salt material.
//!
//! Every byte value maps to one of 256 printable characters: the first 256
//! code points, counting up from U+0000, that are not control characters.
//! That is U+0020..=U+007E followed by U+00A0..=U+0140. The table is a stable
//! wire format; stored hashes depend on it never changing.

use std::sync::LazyLock;

use crate::error::{HashError, Result};

/// Number of symbols in the alphabet, one per byte value.
pub const CHARSET_SIZE: usize = 256;

static CHARSET: LazyLock<Charset> = LazyLock::new(Charset::build);

/// Byte to character table.
///
/// Symbols are stored in ascending code point order, so reverse lookups are a
/// binary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
    symbols: [char; CHARSET_SIZE],
}

impl Charset {
    /// Builds the table from scratch.
    ///
    /// Prefer [`Charset::global`], which builds it once per process.
    pub fn build() -> Self {
        let mut symbols = ['\0'; CHARSET_SIZE];
        let candidates = (0..=u32::from(char::MAX))
            .filter_map(char::from_u32)
            .filter(|c| !c.is_control());

        for (slot, c) in symbols.iter_mut().zip(candidates) {
            *slot = c;
        }

        Self { symbols }
    }

    /// Shared process-wide table.
    pub fn global() -> &'static Charset {
        &CHARSET
    }

    pub fn symbols(&self) -> &[char; CHARSET_SIZE] {
        &self.symbols
    }

    pub fn symbol(&self, byte: u8) -> char {
        self.symbols[usize::from(byte)]
    }

    pub fn index_of(&self, c: char) -> Option<u8> {
        self.symbols
            .binary_search(&c)
            .ok()
            .and_then(|i| u8::try_from(i).ok())
    }

    /// Encodes bytes; the result has exactly `bytes.len()` characters.
    pub fn encode(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|&b| self.symbol(b)).collect()
    }

    /// Decodes text produced by [`Charset::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`HashError::InvalidCharacter`] carrying the code point of the
    /// first character that is not part of the alphabet.
    pub fn decode(&self, text: &str) -> Result<Vec<u8>> {
        text.chars()
            .map(|c| {
                self.index_of(c)
                    .ok_or(HashError::InvalidCharacter(u32::from(c)))
            })
            .collect()
    }
}

/// Encodes with the global table.
pub fn encode(bytes: &[u8]) -> String {
    Charset::global().encode(bytes)
}

/// Decodes with the global table.
pub fn decode(text: &str) -> Result<Vec<u8>> {
    Charset::global().decode(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_has_256_distinct_printable_symbols() {
        let charset = Charset::global();
        let unique: HashSet<char> = charset.symbols().iter().copied().collect();

        assert_eq!(unique.len(), CHARSET_SIZE);
        assert!(charset.symbols().iter().all(|c| !c.is_control()));
    }

    #[test]
    fn table_layout_is_stable() {
        let charset = Charset::global();

        assert_eq!(charset.symbol(0), ' ');
        assert_eq!(charset.symbol(94), '~');
        assert_eq!(charset.symbol(95), '\u{A0}');
        assert_eq!(charset.symbol(255), '\u{140}');
    }

    #[test]
    fn build_is_deterministic() {
        assert_eq!(Charset::build(), Charset::build());
        assert_eq!(&Charset::build(), Charset::global());
    }

    #[test]
    fn every_byte_value_survives_encoding() {
        let bytes: Vec<u8> = (0..=255u8).rev().collect();
        let text = encode(&bytes);

        assert_eq!(text.chars().count(), bytes.len());
        assert_eq!(decode(&text).unwrap(), bytes);
    }

    #[test]
    fn empty_input_encodes_to_empty_string() {
        assert_eq!(encode(&[]), "");
        assert!(decode("").unwrap().is_empty());
    }

    #[test]
    fn decode_rejects_control_characters() {
        match decode("ab\u{7F}c") {
            Err(HashError::InvalidCharacter(cp)) => assert_eq!(cp, 0x7F),
            other => panic!("expected InvalidCharacter, got: {other:?}"),
        }

        assert!(matches!(
            decode("\n"),
            Err(HashError::InvalidCharacter(0x0A))
        ));
    }

    #[test]
    fn decode_rejects_characters_past_the_table() {
        assert!(matches!(
            decode("\u{141}"),
            Err(HashError::InvalidCharacter(0x141))
        ));

        let err = decode("foo™").unwrap_err();
        assert_eq!(err.to_string(), "invalid character: 0x2122");
    }
}
