//! Seed normalization.
//!
//! Run seeds reach the engine as nothing, a raw `u32`, or the eight
//! character string shown on the pause screen. Strings are folded into a
//! `u32` with a base-32 positional hash over [`SeedAlphabet`]. When no
//! alphabet is available the additive [`fallback_seed_hash`] is used instead.

use bagcraft_common::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of symbols in a seed alphabet.
pub const SEED_SYMBOLS: usize = 32;

/// Only this many leading characters of a seed string are examined.
pub const SEED_PREFIX_LEN: usize = 8;

/// The standard seed alphabet: digits, then letters without I, L, O and U.
pub const STANDARD_SEED_ALPHABET: &str = "0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// A run seed as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    /// Already-normalized numeric seed.
    Numeric(u32),
    /// Seed string such as `"2LP2D89M"`.
    Text(String),
}

impl Seed {
    /// Normalizes this seed to a `u32`.
    ///
    /// `alphabet` is the catalog's seed alphabet; `None` selects the
    /// fallback hash for string seeds.
    #[must_use]
    pub fn normalize(&self, alphabet: Option<&SeedAlphabet>) -> u32 {
        match self {
            Self::Numeric(value) => *value,
            Self::Text(text) => match alphabet {
                Some(alphabet) => alphabet.hash(text),
                None => fallback_seed_hash(text),
            },
        }
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Self::Numeric(value)
    }
}

impl From<&str> for Seed {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Seed {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(value) => write!(f, "{value}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

/// Normalizes an optional seed. An absent seed is 0.
#[must_use]
pub fn normalize_seed(seed: Option<&Seed>, alphabet: Option<&SeedAlphabet>) -> u32 {
    seed.map_or(0, |seed| seed.normalize(alphabet))
}

/// Ordered 32-symbol alphabet for the positional seed hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedAlphabet {
    symbols: [u8; SEED_SYMBOLS],
}

impl SeedAlphabet {
    /// The standard alphabet ([`STANDARD_SEED_ALPHABET`]).
    pub const STANDARD: Self = Self {
        symbols: *b"0123456789ABCDEFGHJKMNPQRSTVWXYZ",
    };

    /// Builds an alphabet from exactly 32 distinct ASCII alphanumerics.
    ///
    /// Letters are stored upper-case since lookups are case-insensitive.
    pub fn new(symbols: &str) -> CatalogResult<Self> {
        let bytes = symbols.as_bytes();
        if bytes.len() != SEED_SYMBOLS {
            return Err(CatalogError::InvalidAlphabet(format!(
                "expected {SEED_SYMBOLS} symbols, got {}",
                bytes.len()
            )));
        }

        let mut table = [0u8; SEED_SYMBOLS];
        for (slot, &byte) in table.iter_mut().zip(bytes) {
            if !byte.is_ascii_alphanumeric() {
                return Err(CatalogError::InvalidAlphabet(format!(
                    "symbol {:?} is not an ASCII letter or digit",
                    byte as char
                )));
            }
            *slot = byte.to_ascii_uppercase();
        }

        for (i, byte) in table.iter().enumerate() {
            if table[..i].contains(byte) {
                return Err(CatalogError::InvalidAlphabet(format!(
                    "symbol {:?} appears twice",
                    *byte as char
                )));
            }
        }

        Ok(Self { symbols: table })
    }

    /// Position of `unit` in the alphabet after Unicode upper-casing.
    ///
    /// The upper-case form may be several characters (`'ﬆ'` becomes `"ST"`);
    /// it is then located as a substring. Lone surrogates never match.
    #[must_use]
    pub fn index_of(&self, unit: u16) -> Option<u32> {
        let upper: String = char::from_u32(u32::from(unit))?.to_uppercase().collect();
        self.as_str()
            .find(upper.as_str())
            .map(|index| index as u32)
    }

    /// Hashes a seed string.
    ///
    /// Looks at the first [`SEED_PREFIX_LEN`] UTF-16 code units. Units
    /// outside the alphabet are skipped but still use up the prefix, so
    /// `"2LP2 D89M"` only sees `2LP2 D89`.
    #[must_use]
    pub fn hash(&self, text: &str) -> u32 {
        text.encode_utf16()
            .take(SEED_PREFIX_LEN)
            .filter_map(|unit| self.index_of(unit))
            .fold(0u32, |seed, index| seed.wrapping_mul(32).wrapping_add(index))
    }

    /// Returns the alphabet as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Constructors only admit ASCII.
        std::str::from_utf8(&self.symbols).unwrap_or(STANDARD_SEED_ALPHABET)
    }
}

impl Default for SeedAlphabet {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Additive string hash used when no seed alphabet is available.
///
/// `h = h * 31 + unit` over every UTF-16 code unit in wrapping `i32`
/// arithmetic, then the absolute value.
#[must_use]
pub fn fallback_seed_hash(text: &str) -> u32 {
    text.encode_utf16()
        .fold(0i32, |h, unit| {
            h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit))
        })
        .unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_absent_seed_is_zero() {
        assert_eq!(normalize_seed(None, Some(&SeedAlphabet::STANDARD)), 0);
        assert_eq!(normalize_seed(None, None), 0);
    }

    #[test]
    fn test_numeric_seed_passes_through() {
        let seed = Seed::from(123_456_u32);
        assert_eq!(seed.normalize(Some(&SeedAlphabet::STANDARD)), 123_456);
        assert_eq!(seed.normalize(None), 123_456);
    }

    #[test]
    fn test_known_seed_string() {
        assert_eq!(SeedAlphabet::STANDARD.hash("2LP2D89M"), 2_888_212_788);
    }

    #[test]
    fn test_seed_string_is_case_insensitive() {
        let alphabet = SeedAlphabet::STANDARD;
        assert_eq!(alphabet.hash("2lp2d89m"), alphabet.hash("2LP2D89M"));
    }

    #[test]
    fn test_seed_fold_uses_unicode_upper_case() {
        let alphabet = SeedAlphabet::STANDARD;
        // Long s upper-cases to 'S'
        assert_eq!(alphabet.hash("\u{17F}"), alphabet.hash("S"));
        // The "st" ligature upper-cases to "ST", found at 'S'
        assert_eq!(alphabet.hash("\u{FB06}"), alphabet.hash("S"));
        // Dotless i upper-cases to 'I', which is not a symbol
        assert_eq!(alphabet.hash("2\u{131}"), alphabet.hash("2"));
        assert_eq!(alphabet.hash("\u{E9}"), 0);
    }

    #[test]
    fn test_seed_string_truncated_to_prefix() {
        let alphabet = SeedAlphabet::STANDARD;
        assert_eq!(alphabet.hash("2LP2D89MXYZ"), alphabet.hash("2LP2D89M"));
    }

    #[test]
    fn test_seed_skips_symbols_outside_alphabet() {
        let alphabet = SeedAlphabet::STANDARD;
        // 'I' is not a symbol
        assert_eq!(alphabet.hash("1I2"), alphabet.hash("12"));
        // The space still consumes one of the eight positions
        assert_eq!(alphabet.hash("2LP2 D89M"), alphabet.hash("2LP2D89"));
    }

    #[test]
    fn test_empty_seed_string_is_zero() {
        assert_eq!(SeedAlphabet::STANDARD.hash(""), 0);
    }

    #[test]
    fn test_fallback_hash_values() {
        assert_eq!(fallback_seed_hash(""), 0);
        assert_eq!(fallback_seed_hash("a"), 97);
        assert_eq!(fallback_seed_hash("hello"), 99_162_322);
        assert_eq!(fallback_seed_hash("2LP2D89M"), 1_984_403_868);
    }

    #[test]
    fn test_text_seed_without_alphabet_uses_fallback() {
        let seed = Seed::from("hello");
        assert_eq!(seed.normalize(None), fallback_seed_hash("hello"));
    }

    #[test]
    fn test_alphabet_validation() {
        assert!(SeedAlphabet::new(STANDARD_SEED_ALPHABET).is_ok());
        assert!(SeedAlphabet::new("ABC").is_err());
        assert!(SeedAlphabet::new("0023456789ABCDEFGHJKMNPQRSTVWXYZ").is_err());
        assert!(SeedAlphabet::new("0123456789ABCDEFGHJKMNPQRSTVWXY!").is_err());

        let lower = SeedAlphabet::new("0123456789abcdefghjkmnpqrstvwxyz").expect("valid");
        assert_eq!(lower, SeedAlphabet::STANDARD);
        assert_eq!(lower.as_str(), STANDARD_SEED_ALPHABET);
    }

    #[test]
    fn test_seed_deserializes_from_number_or_string() {
        let numeric: Seed = serde_json::from_str("42").expect("number");
        let text: Seed = serde_json::from_str("\"2LP2D89M\"").expect("string");
        assert_eq!(numeric, Seed::Numeric(42));
        assert_eq!(text, Seed::Text("2LP2D89M".to_string()));
    }

    proptest! {
        #[test]
        fn prop_hash_ignores_case(text in "[0-9A-Za-z]{0,12}") {
            let alphabet = SeedAlphabet::STANDARD;
            prop_assert_eq!(
                alphabet.hash(&text.to_lowercase()),
                alphabet.hash(&text.to_uppercase())
            );
        }

        #[test]
        fn prop_fallback_hash_is_stable(text in ".{0,24}") {
            prop_assert_eq!(fallback_seed_hash(&text), fallback_seed_hash(&text));
        }
    }
}
