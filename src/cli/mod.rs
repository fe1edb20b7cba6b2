//! Command-line interface for rflp-finder.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **judge**: Judge one annotated variant sequence
//! - **batch**: Judge every variant in a table, on both strands, in parallel
//! - **transform**: Reverse, complement or reverse-complement a sequence
//! - **enzymes**: List, show, search or count sites with the enzyme database
//!
//! ## Usage
//!
//! ```text
//! # Can any enzyme tell the alleles apart?
//! rflp-finder judge 'ACGG[A/C]TTTTTT'
//!
//! # Use a full REBASE file and ambiguous recognition sites
//! rflp-finder --database link_parsrefs.gz judge 'GTC[A/G]ACT' --ambiguous-enzymes
//!
//! # Judge a table of variants with 8 threads, JSON output
//! rflp-finder --format json batch variants.tsv --threads 8
//!
//! # Which enzymes recognize GATC?
//! rflp-finder enzymes find GATC
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::catalog::source::{source_for, EnzymeSource};

pub mod batch;
pub mod enzymes;
pub mod judge;
pub mod transform;

#[derive(Parser)]
#[command(name = "rflp-finder")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Find restriction enzymes that distinguish the alleles of a variant")]
#[command(
    long_about = "rflp-finder decides whether a sequence variant can be typed by restriction fragment length polymorphism (RFLP).\n\nVariants are written in bracket notation (ACGG[A/C]TTT) or with IUPAC ambiguity codes (ACGGMTTT). Each allele is scanned against a restriction enzyme database and the enzymes that cut one allele but not another are reported."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enzyme database in REBASE link_parsrefs format, optionally gzipped
    /// (defaults to the embedded subset)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,
}

impl Cli {
    /// The enzyme database selected on the command line
    #[must_use]
    pub fn enzyme_source(&self) -> Box<dyn EnzymeSource> {
        source_for(self.database.as_deref())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Judge whether a variant is RFLP-informative
    Judge(judge::JudgeArgs),

    /// Judge every variant in a TSV/CSV table
    Batch(batch::BatchArgs),

    /// Reverse, complement or reverse-complement a sequence
    Transform(transform::TransformArgs),

    /// Browse the enzyme database
    Enzymes(enzymes::EnzymesArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Render an enzyme list, `-` when empty
pub(crate) fn join_or_dash(names: &[String]) -> String {
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(",")
    }
}
