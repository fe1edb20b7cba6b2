use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use rayon::prelude::*;
use serde::Serialize;
use tracing::warn;

use crate::catalog::source::EnzymeSource;
use crate::cli::{join_or_dash, OutputFormat};
use crate::core::transform::complement;
use crate::matching::judge::{judge, JudgeConfig, JudgmentReport};
use crate::matching::scanner::{DEFAULT_MAX_SITE_LEN, DEFAULT_MIN_SITE_LEN};
use crate::parsing::tsv::{parse_tsv_file, VariantRecord, FLANK_LENGTH};

#[derive(Args)]
pub struct BatchArgs {
    /// Variant table with columns: id, 5' flank, alleles, 3' flank
    /// (.csv files are comma-separated, anything else tab-separated)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Number of worker threads (defaults to one per core)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Flanking bases kept on each side of the variant
    #[arg(long, default_value_t = FLANK_LENGTH)]
    pub flank: usize,

    /// Shortest recognition site to consider
    #[arg(long, default_value_t = DEFAULT_MIN_SITE_LEN)]
    pub min_site_len: usize,

    /// Longest recognition site to consider
    #[arg(long, default_value_t = DEFAULT_MAX_SITE_LEN)]
    pub max_site_len: usize,

    /// Also match recognition sites containing ambiguity codes. Applies to the
    /// given and the complement strand alike; when unset, neither strand
    /// matches ambiguous sites
    #[arg(long)]
    pub ambiguous_enzymes: bool,
}

/// Outcome for one strand of one record
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StrandOutcome {
    Judged(JudgmentReport),
    Failed { error: String },
}

impl StrandOutcome {
    fn from_result(result: anyhow::Result<JudgmentReport>) -> Self {
        match result {
            Ok(report) => Self::Judged(report),
            Err(e) => Self::Failed {
                error: format!("{e:#}"),
            },
        }
    }

    fn is_informative(&self) -> bool {
        matches!(self, Self::Judged(report) if report.is_informative)
    }

    fn summary(&self) -> String {
        match self {
            Self::Judged(report) if !report.is_variant => "not a variant".to_string(),
            Self::Judged(report) => join_or_dash(&report.distinguishing_enzymes()),
            Self::Failed { error } => format!("error: {error}"),
        }
    }
}

/// Both strands of one batch record
#[derive(Debug, Serialize)]
pub struct BatchResult {
    pub id: String,
    pub sequence: String,
    pub given: StrandOutcome,
    pub complement: StrandOutcome,
}

impl BatchResult {
    fn failed(&self) -> bool {
        matches!(self.given, StrandOutcome::Failed { .. })
            || matches!(self.complement, StrandOutcome::Failed { .. })
    }
}

/// Judge one record on the given strand and on its complement strand
#[must_use]
pub fn judge_record(
    record: &VariantRecord,
    flank: usize,
    config: &JudgeConfig,
    source: &dyn EnzymeSource,
) -> BatchResult {
    let sequence = record.sequence(flank);
    let complement_sequence = complement(&sequence);

    let given = judge(&sequence, config, source)
        .with_context(|| format!("Record {} failed", record.id));
    let other = judge(&complement_sequence, config, source)
        .with_context(|| format!("Record {} (complement) failed", record.id));

    BatchResult {
        id: record.id.clone(),
        sequence,
        given: StrandOutcome::from_result(given),
        complement: StrandOutcome::from_result(other),
    }
}

/// Judge all records in parallel, preserving input order
#[must_use]
pub fn judge_records(
    records: &[VariantRecord],
    flank: usize,
    config: &JudgeConfig,
    source: &dyn EnzymeSource,
) -> Vec<BatchResult> {
    records
        .par_iter()
        .map(|record| judge_record(record, flank, config, source))
        .collect()
}

pub fn run(
    args: BatchArgs,
    source: &dyn EnzymeSource,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let delimiter = match args.input.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => ',',
        _ => '\t',
    };
    let records = parse_tsv_file(&args.input, delimiter)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let config = JudgeConfig {
        min_site_len: args.min_site_len,
        max_site_len: args.max_site_len,
        allow_ambiguous_enzymes: args.ambiguous_enzymes,
        ..JudgeConfig::default()
    };

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = args.threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder
        .build()
        .context("Failed to start worker threads")?;

    if verbose {
        eprintln!(
            "Judging {} variants from {} with {} threads against {}",
            records.len(),
            args.input.display(),
            pool.current_num_threads(),
            source.describe()
        );
    }

    let results = pool.install(|| judge_records(&records, args.flank, &config, source));

    let failures = results.iter().filter(|r| r.failed()).count();
    if failures > 0 {
        warn!("{failures} of {} records could not be judged", results.len());
    }

    match format {
        OutputFormat::Text => print_text_results(&results),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
        OutputFormat::Tsv => print_tsv_results(&results),
    }

    Ok(())
}

fn print_text_results(results: &[BatchResult]) {
    let id_width = results.iter().map(|r| r.id.len()).max().unwrap_or(2).max(2);

    println!(
        "{:<id_width$}  {:<11}  {:<11}  Enzymes",
        "ID", "Informative", "Complement"
    );
    println!("{}", "-".repeat(id_width + 40));
    for r in results {
        println!(
            "{:<id_width$}  {:<11}  {:<11}  {}",
            r.id,
            yes_no(r.given.is_informative()),
            yes_no(r.complement.is_informative()),
            r.given.summary()
        );
    }

    let informative = results
        .iter()
        .filter(|r| r.given.is_informative() || r.complement.is_informative())
        .count();
    println!("\n{informative} of {} variants are RFLP-informative", results.len());
}

fn print_tsv_results(results: &[BatchResult]) {
    println!("id\tsequence\tis_informative\tenzymes\tcomplement_is_informative\tcomplement_enzymes");
    for r in results {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            r.id,
            r.sequence,
            r.given.is_informative(),
            r.given.summary(),
            r.complement.is_informative(),
            r.complement.summary()
        );
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
