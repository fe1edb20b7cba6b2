use clap::{Args, Subcommand};

use crate::catalog::source::EnzymeSource;
use crate::catalog::store::EnzymeCatalog;
use crate::cli::OutputFormat;
use crate::matching::scanner::{
    scan_sites, ScanConfig, SiteHit, DEFAULT_MAX_SITE_LEN, DEFAULT_MIN_SITE_LEN,
};
use crate::parsing::rebase::EnzymeRecord;

#[derive(Args)]
pub struct EnzymesArgs {
    #[command(subcommand)]
    pub command: EnzymesCommands,
}

#[derive(Subcommand)]
pub enum EnzymesCommands {
    /// List enzymes in the database
    List {
        /// Only enzymes with at least one supplier
        #[arg(long)]
        commercial: bool,

        /// Only enzymes whose cleaned site length is at least this
        #[arg(long)]
        min_site_len: Option<usize>,

        /// Only enzymes whose cleaned site length is at most this
        #[arg(long)]
        max_site_len: Option<usize>,
    },

    /// Show one enzyme and its isoschizomers
    Show {
        /// Enzyme name (case-insensitive)
        #[arg(required = true)]
        name: String,
    },

    /// Find enzymes recognizing a site
    Find {
        /// Recognition site; cut markers and offsets are ignored
        #[arg(required = true)]
        site: String,
    },

    /// Count the sites of every enzyme cutting a plain sequence
    Scan {
        /// Sequence to digest; symbols other than bases and ambiguity codes are dropped
        #[arg(required = true)]
        sequence: String,

        /// Shortest recognition site to consider
        #[arg(long, default_value_t = DEFAULT_MIN_SITE_LEN)]
        min_site_len: usize,

        /// Longest recognition site to consider
        #[arg(long, default_value_t = DEFAULT_MAX_SITE_LEN)]
        max_site_len: usize,

        /// Also match recognition sites containing ambiguity codes
        #[arg(long)]
        ambiguous_enzymes: bool,

        /// Only report single cutters
        #[arg(long)]
        unique: bool,
    },
}

pub fn run(
    args: EnzymesArgs,
    source: &dyn EnzymeSource,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = EnzymeCatalog::load(source)?;

    if verbose {
        eprintln!(
            "Loaded {} enzymes from {}",
            catalog.len(),
            source.describe()
        );
    }

    match args.command {
        EnzymesCommands::List {
            commercial,
            min_site_len,
            max_site_len,
        } => {
            let filtered: Vec<&EnzymeRecord> = catalog
                .enzymes
                .iter()
                .filter(|e| !commercial || e.is_commercially_available())
                .filter(|e| {
                    let len = e.cleaned_site().len();
                    min_site_len.map_or(true, |min| len >= min)
                        && max_site_len.map_or(true, |max| len <= max)
                })
                .collect();
            print_enzymes(&filtered, format)
        }
        EnzymesCommands::Show { name } => {
            let enzyme = catalog
                .get(&name)
                .ok_or_else(|| anyhow::anyhow!("Enzyme '{}' not found", name))?;
            let isoschizomers = catalog.isoschizomers(&enzyme.name);
            print_enzyme_detail(enzyme, &isoschizomers, format)
        }
        EnzymesCommands::Scan {
            sequence,
            min_site_len,
            max_site_len,
            ambiguous_enzymes,
            unique,
        } => {
            let config = ScanConfig {
                min_site_len,
                max_site_len,
                allow_ambiguous_enzymes: ambiguous_enzymes,
            };
            let hits: Vec<SiteHit> = scan_sites(&sequence, &config, source)?
                .into_iter()
                .filter(|hit| !unique || hit.unique)
                .collect();
            print_site_hits(&hits, format)
        }
        EnzymesCommands::Find { site } => {
            let found = catalog.find_by_site(&site);
            if found.is_empty() && matches!(format, OutputFormat::Text) {
                println!("No enzymes recognize {site}");
                return Ok(());
            }
            print_enzymes(&found, format)
        }
    }
}

fn print_enzymes(enzymes: &[&EnzymeRecord], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let name_width = enzymes
                .iter()
                .map(|e| e.name.len())
                .max()
                .unwrap_or(4)
                .max(4);
            let site_width = enzymes
                .iter()
                .map(|e| e.recognition_site.len())
                .max()
                .unwrap_or(4)
                .max(4);

            println!(
                "{:<name_width$}  {:<site_width$}  {:<name_width$}  Suppliers",
                "Name", "Site", "Prototype"
            );
            println!("{}", "-".repeat(name_width * 2 + site_width + 17));
            for e in enzymes {
                println!(
                    "{:<name_width$}  {:<site_width$}  {:<name_width$}  {}",
                    e.name,
                    e.recognition_site,
                    e.prototype,
                    if e.commercial_availability.is_empty() {
                        "-"
                    } else {
                        e.commercial_availability.as_str()
                    }
                );
            }
            println!("\n{} enzymes", enzymes.len());
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(enzymes)?);
        }
        OutputFormat::Tsv => {
            println!("name\tprototype\tsite\tcleaned_site\tsuppliers");
            for e in enzymes {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    e.name,
                    e.prototype,
                    e.recognition_site,
                    e.cleaned_site(),
                    e.commercial_availability
                );
            }
        }
    }
    Ok(())
}

fn print_site_hits(hits: &[SiteHit], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            if hits.is_empty() {
                println!("No enzymes cut");
                return Ok(());
            }
            let name_width = hits.iter().map(|h| h.name.len()).max().unwrap_or(4).max(4);
            let site_width = hits.iter().map(|h| h.site.len()).max().unwrap_or(4).max(4);
            println!("{:<name_width$}  {:<site_width$}  Sites", "Name", "Site");
            for hit in hits {
                println!(
                    "{:<name_width$}  {:<site_width$}  {}{}",
                    hit.name,
                    hit.site,
                    hit.count,
                    if hit.unique { " (single cutter)" } else { "" }
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(hits)?);
        }
        OutputFormat::Tsv => {
            println!("name\tsite\tcount\tunique");
            for hit in hits {
                println!("{}\t{}\t{}\t{}", hit.name, hit.site, hit.count, hit.unique);
            }
        }
    }
    Ok(())
}

fn print_enzyme_detail(
    enzyme: &EnzymeRecord,
    isoschizomers: &[&EnzymeRecord],
    format: OutputFormat,
) -> anyhow::Result<()> {
    let iso_names: Vec<&str> = isoschizomers.iter().map(|e| e.name.as_str()).collect();

    match format {
        OutputFormat::Text => {
            println!("Enzyme: {}\n", enzyme.name);
            println!("Prototype:     {}", enzyme.prototype);
            println!("Microorganism: {}", enzyme.microorganism);
            println!("Source:        {}", enzyme.source);
            println!("Site:          {}", enzyme.recognition_site);
            println!("Cleaned site:  {}", enzyme.cleaned_site());
            if !enzyme.methylation_site.is_empty() {
                println!("Methylation:   {}", enzyme.methylation_site);
            }
            println!(
                "Commercial:    {}",
                if enzyme.is_commercially_available() {
                    enzyme.commercial_availability.as_str()
                } else {
                    "no"
                }
            );
            if !enzyme.references.is_empty() {
                println!("References:    {}", enzyme.references);
            }
            if !iso_names.is_empty() {
                println!("\nIsoschizomers: {}", iso_names.join(", "));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "enzyme": enzyme,
                "cleaned_site": enzyme.cleaned_site(),
                "suppliers": enzyme.suppliers(),
                "reference_indices": enzyme.reference_indices(),
                "isoschizomers": iso_names,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Tsv => {
            println!("field\tvalue");
            println!("name\t{}", enzyme.name);
            println!("prototype\t{}", enzyme.prototype);
            println!("microorganism\t{}", enzyme.microorganism);
            println!("source\t{}", enzyme.source);
            println!("site\t{}", enzyme.recognition_site);
            println!("methylation_site\t{}", enzyme.methylation_site);
            println!("commercial_availability\t{}", enzyme.commercial_availability);
            println!("references\t{}", enzyme.references);
            println!("isoschizomers\t{}", iso_names.join(","));
        }
    }
    Ok(())
}
