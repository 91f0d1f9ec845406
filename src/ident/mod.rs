//! Article identifier codec
//!
//! The origin keys every article by an opaque string identifier: a fixed
//! one-character prefix followed by the ordinal zero-padded to a fixed width
//! (observed format: `A` + 11 digits, e.g. `A00000136232`). This module is
//! the only place that knows about that format; everything else in the crate
//! reasons about plain ordinals.

use thiserror::Error;

/// Errors from encoding or decoding article identifiers
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentError {
    #[error("Ordinal {ordinal} does not fit in {width} digits")]
    InvalidOrdinal { ordinal: u64, width: usize },

    #[error("Malformed identifier: {0:?}")]
    MalformedIdentifier(String),
}

/// Result type alias for identifier operations
pub type IdentResult<T> = Result<T, IdentError>;

/// Bidirectional mapping between string identifiers and ordinals
///
/// Pure and total except for the stated failure cases; no side effects.
#[derive(Debug, Clone)]
pub struct IdentCodec {
    prefix: char,
    width: usize,
}

impl IdentCodec {
    pub fn new(prefix: char, width: usize) -> Self {
        Self { prefix, width }
    }

    /// Renders an ordinal in the canonical external string form
    ///
    /// # Errors
    ///
    /// Returns [`IdentError::InvalidOrdinal`] if the ordinal does not fit in
    /// the fixed width.
    pub fn encode(&self, ordinal: u64) -> IdentResult<String> {
        if self.width < 20 && ordinal >= 10u64.pow(self.width as u32) {
            return Err(IdentError::InvalidOrdinal {
                ordinal,
                width: self.width,
            });
        }
        Ok(format!(
            "{}{:0>width$}",
            self.prefix,
            ordinal,
            width = self.width
        ))
    }

    /// Parses a string identifier back to its ordinal
    ///
    /// # Errors
    ///
    /// Returns [`IdentError::MalformedIdentifier`] unless the input is
    /// exactly the fixed prefix followed by `width` decimal digits.
    pub fn decode(&self, ident: &str) -> IdentResult<u64> {
        let malformed = || IdentError::MalformedIdentifier(ident.to_string());

        let digits = ident.strip_prefix(self.prefix).ok_or_else(malformed)?;
        if digits.len() != self.width || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        digits.parse::<u64>().map_err(|_| malformed())
    }
}

impl Default for IdentCodec {
    /// The observed origin format: `A` + 11 digits
    fn default() -> Self {
        Self::new('A', 11)
    }
}
