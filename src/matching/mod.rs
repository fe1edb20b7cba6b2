//! Recognition-site matching and differential judging.
//!
//! - [`boyer_moore`]: exact substring search with a bad-character skip table
//! - [`expand`]: concrete sequences from ambiguity letters or allele lists
//! - [`multiset`]: duplicate-aware list algebra over enzyme names
//! - [`scanner`]: enzymes whose site occurs in one concrete sequence
//! - [`judge`]: per-allele scans, pairwise differences and the verdict
//!
//! ## Judging
//!
//! 1. Parse the annotated sequence and pick the target position
//! 2. Produce one concrete sequence per allele at that position
//! 3. Scan the enzyme database once per allele
//! 4. For every ordered allele pair (i, j), list enzymes cutting i but not j
//! 5. Report the variant as informative if allele 0's enzymes differ from any
//!    other allele's
//!
//! ## Example
//!
//! ```rust,no_run
//! use rflp_finder::catalog::source::EmbeddedEnzymes;
//! use rflp_finder::{judge, JudgeConfig};
//!
//! let report = judge("TTGAATTC[A/C]GG", &JudgeConfig::default(), &EmbeddedEnzymes).unwrap();
//! for (i, j, enzymes) in report.pairs() {
//!     println!("{} vs {}: {}", report.alleles[i], report.alleles[j], enzymes.join(","));
//! }
//! ```

pub mod boyer_moore;
pub mod expand;
pub mod judge;
pub mod multiset;
pub mod scanner;

pub use judge::{judge, AlleleMode, Judge, JudgeConfig, JudgeError, JudgmentReport};
pub use scanner::{scan, scan_sites, ScanConfig, ScanError, SiteHit};
