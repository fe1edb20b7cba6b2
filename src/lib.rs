//! # rflp-finder
//!
//! A library for deciding whether a DNA sequence variant can be typed by
//! restriction fragment length polymorphism (RFLP).
//!
//! A variant is RFLP-informative when some restriction enzyme recognizes the
//! sequence around one allele but not around another. Digesting a PCR product
//! with that enzyme then gives different fragment patterns per allele.
//!
//! `rflp-finder` parses variants written in bracket notation (`ACGG[A/C]TTT`)
//! or with IUPAC ambiguity codes (`ACGGMTTT`), builds the concrete sequence of
//! every allele, scans each against a REBASE-format enzyme database, and
//! reports which enzymes distinguish every ordered pair of alleles.
//!
//! ## Features
//!
//! - **Variant notation**: brackets, ambiguity codes, gap alleles, multi-base alleles
//! - **Exact matching**: Boyer-Moore search with a bad-character skip table
//! - **Ambiguous sites**: optional expansion of enzyme sites such as `GTYRAC`
//! - **Pairwise differences**: duplicate-aware, per ordered allele pair
//! - **Concurrent**: every judgment opens its own database stream
//!
//! ## Example
//!
//! ```rust,no_run
//! use rflp_finder::catalog::source::EmbeddedEnzymes;
//! use rflp_finder::{judge, JudgeConfig};
//!
//! let report = judge("CTTGAATT[C/G]AAG", &JudgeConfig::default(), &EmbeddedEnzymes).unwrap();
//!
//! if report.is_informative {
//!     for (i, j, enzymes) in report.pairs() {
//!         println!("{} vs {}: {:?}", report.alleles[i], report.alleles[j], enzymes);
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Enzyme database sources and lookups
//! - [`core`]: IUPAC codes, variant parsing and strand transforms
//! - [`matching`]: Exact matching, expansion, scanning and judging
//! - [`parsing`]: Enzyme record and variant table parsers
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::source::{EmbeddedEnzymes, EnzymeFile, EnzymeSource, InMemoryEnzymes};
pub use catalog::store::EnzymeCatalog;
pub use core::iupac::{AlleleSet, AmbiguityCode};
pub use core::variant::{is_variant_sequence, VariantSequence};
pub use matching::judge::{judge, AlleleMode, Judge, JudgeConfig, JudgeError, JudgmentReport};
pub use parsing::rebase::EnzymeRecord;
