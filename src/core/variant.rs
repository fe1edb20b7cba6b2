use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::core::iupac::{classify, iupac_to_dntps, AlleleSet, AmbiguityCode, SymbolClass};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VariantParseError {
    #[error("Unexpected '{symbol}' at offset {offset}: brackets must form non-nested [..] pairs")]
    MisplacedBracket { symbol: char, offset: usize },

    #[error("Bracket opened at offset {0} is never closed")]
    UnclosedBracket(usize),
}

/// One variant site in the collapsed ambiguity sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantPosition {
    /// Zero-based offset into the ambiguity sequence
    pub position: usize,

    /// Explicit alleles, in the order written
    pub alleles: AlleleSet,

    /// Canonical code standing in for the alleles
    pub code: AmbiguityCode,
}

/// A sequence with every variant collapsed to a single ambiguity letter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSequence {
    /// Upper-cased, filtered sequence with one letter per variant
    pub ambiguity_sequence: String,

    /// Variant positions in left-to-right order
    pub variants: Vec<VariantPosition>,
}

impl VariantSequence {
    /// Parse a sequence written with bracket notation and/or ambiguity letters.
    ///
    /// Ambiguity letters in the input are first rewritten to their explicit
    /// allele lists, so `M` and `[A/C]` produce identical results. Symbols that
    /// are neither bases, ambiguity letters nor `[ / ] -` are dropped.
    ///
    /// # Errors
    ///
    /// Returns `VariantParseError` if the brackets are not proper, non-nested pairs.
    pub fn parse(raw: &str) -> Result<Self, VariantParseError> {
        let expanded = expand_ambiguity_letters(raw);
        validate_brackets(expanded.as_bytes())?;

        let mut ambiguity_sequence = String::with_capacity(expanded.len());
        let mut variants = Vec::new();
        let mut rest = expanded.as_str();

        while let Some(open) = rest.find('[') {
            ambiguity_sequence.push_str(&rest[..open]);
            let after_open = &rest[open + 1..];
            // validated above, so a closing bracket always follows
            let close = after_open
                .find(']')
                .ok_or(VariantParseError::UnclosedBracket(open))?;

            let alleles = AlleleSet::from_bracket_body(&after_open[..close]);
            let code = alleles.code();
            variants.push(VariantPosition {
                position: ambiguity_sequence.len(),
                alleles,
                code,
            });
            ambiguity_sequence.push(code.as_char());
            rest = &after_open[close + 1..];
        }
        ambiguity_sequence.push_str(rest);

        Ok(Self {
            ambiguity_sequence,
            variants,
        })
    }

    /// Offset of the first variant, if any
    #[must_use]
    pub fn first_position(&self) -> Option<usize> {
        self.variants.first().map(|v| v.position)
    }

    /// The variant recorded at `position`
    #[must_use]
    pub fn variant_at(&self, position: usize) -> Option<&VariantPosition> {
        self.variants.iter().find(|v| v.position == position)
    }
}

/// Classify and validate a raw sequence.
///
/// A sequence is a variant sequence when it contains at least one ambiguity
/// letter or structural symbol and its brackets are well formed.
#[must_use]
pub fn is_variant_sequence(raw: &str) -> bool {
    let filtered: Vec<u8> = raw
        .bytes()
        .map(|b| b.to_ascii_uppercase())
        .filter(|&b| classify(b) != SymbolClass::Other)
        .collect();

    let has_variant_symbol = filtered
        .iter()
        .any(|&b| matches!(classify(b), SymbolClass::Ambiguity | SymbolClass::Structural));
    if !has_variant_symbol {
        return false;
    }

    match validate_brackets(&filtered) {
        Ok(()) => true,
        Err(e) => {
            warn!("Not a variant sequence: {e}");
            false
        }
    }
}

/// Check that `[` and `]` alternate, starting with `[` and ending with `]`.
///
/// # Errors
///
/// Returns the first bracket that breaks the alternation, or the last
/// unclosed `[`.
pub fn validate_brackets(symbols: &[u8]) -> Result<(), VariantParseError> {
    let mut open_at = None;
    for (offset, &symbol) in symbols.iter().enumerate() {
        match (symbol, open_at) {
            (b'[', None) => open_at = Some(offset),
            (b']', Some(_)) => open_at = None,
            (b'[' | b']', _) => {
                return Err(VariantParseError::MisplacedBracket {
                    symbol: char::from(symbol),
                    offset,
                })
            }
            _ => {}
        }
    }
    match open_at {
        Some(offset) => Err(VariantParseError::UnclosedBracket(offset)),
        None => Ok(()),
    }
}

/// Offset of the first ambiguity letter in `sequence`
#[must_use]
pub fn first_ambiguity_position(sequence: &str) -> Option<usize> {
    sequence
        .bytes()
        .position(|b| classify(b) == SymbolClass::Ambiguity)
}

/// Upper-case, drop unknown symbols, and rewrite ambiguity letters as `[x/y]`
fn expand_ambiguity_letters(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for symbol in raw.bytes().map(|b| b.to_ascii_uppercase()) {
        match classify(symbol) {
            SymbolClass::Base | SymbolClass::Structural => out.push(char::from(symbol)),
            SymbolClass::Ambiguity => {
                if let Some(code) = AmbiguityCode::from_byte(symbol) {
                    out.push_str(&iupac_to_dntps(code).to_bracket());
                }
            }
            SymbolClass::Other => {}
        }
    }
    out
}
