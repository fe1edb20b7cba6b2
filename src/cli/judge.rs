use clap::Args;

use crate::catalog::source::EnzymeSource;
use crate::cli::{join_or_dash, OutputFormat};
use crate::matching::judge::{judge, AlleleMode, JudgeConfig, JudgmentReport};
use crate::matching::scanner::{DEFAULT_MAX_SITE_LEN, DEFAULT_MIN_SITE_LEN};

#[derive(Args)]
pub struct JudgeArgs {
    /// Annotated sequence, e.g. ACGG[A/C]TTTTTT or ACGGMTTTTTT
    #[arg(required = true)]
    pub sequence: String,

    /// Zero-based position in the collapsed sequence (first variant by default)
    #[arg(short, long)]
    pub position: Option<usize>,

    /// Shortest recognition site to consider
    #[arg(long, default_value_t = DEFAULT_MIN_SITE_LEN)]
    pub min_site_len: usize,

    /// Longest recognition site to consider
    #[arg(long, default_value_t = DEFAULT_MAX_SITE_LEN)]
    pub max_site_len: usize,

    /// Also match recognition sites containing ambiguity codes
    #[arg(long)]
    pub ambiguous_enzymes: bool,

    /// How alleles are derived at the target position
    #[arg(long, value_enum, default_value = "alleles")]
    pub mode: AlleleMode,
}

impl JudgeArgs {
    #[must_use]
    pub fn config(&self) -> JudgeConfig {
        JudgeConfig {
            target_position: self.position,
            min_site_len: self.min_site_len,
            max_site_len: self.max_site_len,
            allow_ambiguous_enzymes: self.ambiguous_enzymes,
            mode: self.mode,
        }
    }
}

pub fn run(
    args: JudgeArgs,
    source: &dyn EnzymeSource,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    if verbose {
        eprintln!("Using enzyme database: {}", source.describe());
    }

    let report = judge(&args.sequence, &args.config(), source)?;

    match format {
        OutputFormat::Text => print_text_report(&report),
        OutputFormat::Json => print_json_report(&args.sequence, source, &report)?,
        OutputFormat::Tsv => print_tsv_report(&report),
    }

    Ok(())
}

fn print_text_report(report: &JudgmentReport) {
    if !report.is_variant {
        println!("Not a variant sequence (no ambiguity codes, or malformed brackets)");
        return;
    }

    println!("Sequence:    {}", report.ambiguity_sequence);
    if let Some(position) = report.target_position {
        println!("Position:    {position}");
    }
    println!("Alleles:     {}", report.alleles.join("/"));
    println!(
        "Informative: {}",
        if report.is_informative { "yes" } else { "no" }
    );

    let width = report.alleles.iter().map(String::len).max().unwrap_or(1).max(6);

    println!("\nEnzymes per allele:");
    for (i, allele) in report.alleles.iter().enumerate() {
        println!(
            "  {allele:<width$}  {}",
            join_or_dash(&report.enzyme_sets[i])
        );
    }

    if report.allele_count() > 1 {
        println!("\nCut only this allele:");
        for (i, allele) in report.alleles.iter().enumerate() {
            println!(
                "  {allele:<width$}  {}",
                join_or_dash(&report.exclusive_enzymes(i))
            );
        }

        println!("\nDistinguishing enzymes (cuts first, not second):");
        for (i, j, enzymes) in report.pairs() {
            println!(
                "  {} vs {}: {}",
                report.alleles[i],
                report.alleles[j],
                join_or_dash(enzymes)
            );
        }
    }
}

fn print_json_report(
    sequence: &str,
    source: &dyn EnzymeSource,
    report: &JudgmentReport,
) -> anyhow::Result<()> {
    let pairs: Vec<serde_json::Value> = report
        .pairs()
        .map(|(i, j, enzymes)| {
            serde_json::json!({
                "allele": report.alleles[i],
                "versus": report.alleles[j],
                "enzymes": enzymes,
            })
        })
        .collect();
    let exclusive: Vec<Vec<String>> = (0..report.allele_count())
        .map(|i| report.exclusive_enzymes(i))
        .collect();

    let output = serde_json::json!({
        "input": sequence,
        "database": source.describe(),
        "is_variant": report.is_variant,
        "is_informative": report.is_informative,
        "target_position": report.target_position,
        "ambiguity_sequence": report.ambiguity_sequence,
        "alleles": report.alleles,
        "allele_sequences": report.allele_sequences,
        "enzyme_sets": report.enzyme_sets,
        "exclusive_enzymes": exclusive,
        "pairwise_distinguishing_enzymes": report.pairwise_distinguishing_enzymes,
        "pairs": pairs,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_report(report: &JudgmentReport) {
    println!("allele\tversus\tis_informative\tenzymes");
    for (i, j, enzymes) in report.pairs() {
        println!(
            "{}\t{}\t{}\t{}",
            report.alleles[i],
            report.alleles[j],
            report.is_informative,
            enzymes.join(",")
        );
    }
}
