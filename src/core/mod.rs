//! Core sequence types for variant-aware RFLP analysis.
//!
//! - [`AmbiguityCode`]: IUPAC letters standing for 2-4 possible bases
//! - [`AlleleSet`]: explicit allele list written in bracket notation
//! - [`VariantSequence`]: an annotated sequence collapsed to one letter per variant
//! - [`transform`]: reverse, complement and reverse-complement
//!
//! ## Notation
//!
//! | Input            | Ambiguity sequence | Alleles     |
//! |------------------|--------------------|-------------|
//! | `ACG[A/G]T`      | `ACGRT`            | `[A/G]`     |
//! | `ACGRT`          | `ACGRT`            | `[A/G]`     |
//! | `AC[-/GC]T`      | `ACNT`             | `[-/GC]`    |
//!
//! Gap (`-`) and multi-base alleles always collapse to `N`; the explicit
//! allele list is kept alongside so nothing is lost.

pub mod iupac;
pub mod transform;
pub mod variant;

pub use iupac::{AlleleSet, AmbiguityCode};
pub use variant::{VariantPosition, VariantSequence};
