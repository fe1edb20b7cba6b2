//! Strand transforms over annotated sequences.
//!
//! All three functions upper-case their input. `complement` and
//! `reverse_complement` drop symbols that have no complement (digits,
//! whitespace, unknown letters).
//!
//! `reverse_complement` walks the input back to front and complements each
//! symbol, leaving `[` and `]` as they are. A bracket group therefore comes
//! out as `]..[`, which no longer parses as a variant; callers that need a
//! parseable opposite strand use `complement`.

use crate::core::iupac::complement_symbol;

/// Reverse the sequence without complementing
#[must_use]
pub fn reverse(sequence: &str) -> String {
    sequence.to_ascii_uppercase().chars().rev().collect()
}

/// Complement every symbol in place; structural symbols pass through
#[must_use]
pub fn complement(sequence: &str) -> String {
    sequence
        .bytes()
        .filter_map(|b| complement_symbol(b.to_ascii_uppercase()))
        .map(char::from)
        .collect()
}

/// Complement while reading back to front; brackets keep their orientation
#[must_use]
pub fn reverse_complement(sequence: &str) -> String {
    sequence
        .bytes()
        .rev()
        .filter_map(|b| complement_symbol(b.to_ascii_uppercase()))
        .map(char::from)
        .collect()
}
