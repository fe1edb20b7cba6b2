//! Parsers for the enzyme database and batch variant tables.
//!
//! - **Enzyme records** ([`rebase`]): the tagged `<1>`..`<8>` line format used
//!   by REBASE `link_parsrefs` style files
//! - **Variant tables** ([`tsv`]): one variant per line as id, 5' flank,
//!   alleles and 3' flank
//!
//! ## Record fields
//!
//! | Tag | Field |
//! |-----|-------|
//! | 1 | Enzyme name |
//! | 2 | Prototype |
//! | 3 | Microorganism |
//! | 4 | Source |
//! | 5 | Recognition sequence |
//! | 6 | Methylation site |
//! | 7 | Commercial availability |
//! | 8 | References |

pub mod rebase;
pub mod tsv;
