//! Expansion of ambiguity sequences into concrete allele sequences.
//!
//! - [`expand_at`]: one sequence per base of the code at a single position
//! - [`expand_alleles`]: one sequence per explicit allele at a single position
//! - [`Expansions`]: every combination of every ambiguity letter, lazily
//!
//! All functions are pure and return sequences in a fixed order.

use crate::core::iupac::{AlleleSet, AmbiguityCode};

/// Substitute each base of the ambiguity code at `position`.
///
/// If `position` does not hold an ambiguity letter the sequence is returned
/// unchanged as the only element.
#[must_use]
pub fn expand_at(sequence: &str, position: usize) -> Vec<String> {
    let code = sequence
        .as_bytes()
        .get(position)
        .and_then(|&b| AmbiguityCode::from_byte(b));

    match code {
        Some(code) => code
            .bases()
            .iter()
            .map(|&base| splice(sequence, position, &char::from(base).to_string()))
            .collect(),
        None => vec![sequence.to_string()],
    }
}

/// Substitute each explicit allele at `position`, in allele order.
///
/// Gap alleles are substituted literally as `-`; the scanner drops them,
/// which turns the allele into a deletion. An empty allele list or an
/// out-of-range position returns the sequence unchanged.
#[must_use]
pub fn expand_alleles(sequence: &str, position: usize, alleles: &AlleleSet) -> Vec<String> {
    if alleles.is_empty() || position >= sequence.len() {
        return vec![sequence.to_string()];
    }
    alleles
        .alleles()
        .iter()
        .map(|allele| splice(sequence, position, allele))
        .collect()
}

/// Every concrete sequence obtained by resolving all ambiguity letters
#[must_use]
pub fn expand_all(sequence: &str) -> Vec<String> {
    Expansions::new(sequence).collect()
}

/// Number of sequences [`expand_all`] would produce, saturating at `usize::MAX`
#[must_use]
pub fn expansion_count(sequence: &str) -> usize {
    sequence
        .bytes()
        .filter_map(AmbiguityCode::from_byte)
        .fold(1usize, |acc, code| acc.saturating_mul(code.bases().len()))
}

/// Lazy cross-product over all ambiguity letters of a sequence.
///
/// The leftmost ambiguity letter varies slowest, so the order equals a
/// depth-first expansion that resolves letters left to right.
#[derive(Debug, Clone)]
pub struct Expansions {
    template: Vec<u8>,
    slots: Vec<(usize, &'static [u8])>,
    digits: Vec<usize>,
    done: bool,
}

impl Expansions {
    #[must_use]
    pub fn new(sequence: &str) -> Self {
        let template = sequence.as_bytes().to_vec();
        let slots: Vec<(usize, &'static [u8])> = template
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| AmbiguityCode::from_byte(b).map(|code| (i, code.bases())))
            .collect();
        let digits = vec![0; slots.len()];
        Self {
            template,
            slots,
            digits,
            done: false,
        }
    }

    fn advance(&mut self) {
        for k in (0..self.digits.len()).rev() {
            self.digits[k] += 1;
            if self.digits[k] < self.slots[k].1.len() {
                return;
            }
            self.digits[k] = 0;
        }
        self.done = true;
    }
}

impl Iterator for Expansions {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        let mut current = self.template.clone();
        for (&(pos, bases), &digit) in self.slots.iter().zip(&self.digits) {
            current[pos] = bases[digit];
        }
        self.advance();
        Some(String::from_utf8_lossy(&current).into_owned())
    }
}

/// Replace the single character at `position` with `replacement`
fn splice(sequence: &str, position: usize, replacement: &str) -> String {
    let mut out = String::with_capacity(sequence.len() + replacement.len());
    out.push_str(&sequence[..position]);
    out.push_str(replacement);
    out.push_str(&sequence[position + 1..]);
    out
}
