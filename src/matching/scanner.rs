use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::source::{EnzymeSource, SourceError};
use crate::core::iupac::{clean_sequence, AmbiguityCode};
use crate::matching::boyer_moore::{contains, count_matches, has_unique_match};
use crate::matching::expand::{expansion_count, Expansions};
use crate::parsing::rebase::RecordError;
use crate::utils::validation::check_expansion_limit;

/// Default shortest recognition site considered
pub const DEFAULT_MIN_SITE_LEN: usize = 4;

/// Default longest recognition site considered
pub const DEFAULT_MAX_SITE_LEN: usize = 10;

/// The enzyme database could not be opened or read
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Enzyme database unavailable: {0}")]
    Source(#[from] SourceError),

    #[error("Enzyme database unreadable: {0}")]
    Read(#[from] RecordError),
}

/// Configuration for one scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Sites shorter than this are skipped
    pub min_site_len: usize,
    /// Sites longer than this are skipped
    pub max_site_len: usize,
    /// Also test every concrete expansion of ambiguous sites
    pub allow_ambiguous_enzymes: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_site_len: DEFAULT_MIN_SITE_LEN,
            max_site_len: DEFAULT_MAX_SITE_LEN,
            allow_ambiguous_enzymes: false,
        }
    }
}

impl ScanConfig {
    fn accepts_length(&self, len: usize) -> bool {
        len > 0 && (self.min_site_len..=self.max_site_len).contains(&len)
    }
}

/// Names of all enzymes whose recognition site occurs in `sequence`.
///
/// Names are returned in database order. The database is opened fresh for
/// this call and read to the end. Symbols other than bases and ambiguity
/// letters are stripped from `sequence` first, so a gap allele becomes a
/// deletion.
///
/// # Errors
///
/// Returns `ScanError` if the database cannot be opened or a read fails part
/// way through. A failed scan is never reported as an empty result.
pub fn scan(
    sequence: &str,
    config: &ScanConfig,
    source: &dyn EnzymeSource,
) -> Result<Vec<String>, ScanError> {
    let text = clean_sequence(sequence);
    let mut found = Vec::new();
    let mut considered = 0usize;

    for record in source.records()? {
        let record = record?;
        let site = record.cleaned_site();
        if !config.accepts_length(site.len()) {
            continue;
        }
        considered += 1;

        if contains(&text, &site) {
            found.push(record.name);
            continue;
        }

        if config.allow_ambiguous_enzymes && has_ambiguity(&site) {
            if let Some(msg) = check_expansion_limit(expansion_count(&site)) {
                warn!("Skipping {}: {msg}", record.name);
                continue;
            }
            if Expansions::new(&site).any(|candidate| contains(&text, &candidate)) {
                found.push(record.name);
            }
        }
    }

    debug!(
        "Scanned {} for {text}: {} of {considered} enzymes cut",
        source.describe(),
        found.len()
    );
    Ok(found)
}

/// An enzyme cutting a sequence, with how often its site occurs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteHit {
    pub name: String,
    /// Cleaned recognition site
    pub site: String,
    /// Non-overlapping occurrences, summed over expansions of an ambiguous site
    pub count: usize,
    /// True for a single cutter
    pub unique: bool,
}

/// Like [`scan`], but counts the occurrences of each site.
///
/// Single cutters are the enzymes that give a clean two-fragment digest, so
/// `unique` is reported alongside the count.
///
/// # Errors
///
/// Returns `ScanError` if the database cannot be opened or read.
pub fn scan_sites(
    sequence: &str,
    config: &ScanConfig,
    source: &dyn EnzymeSource,
) -> Result<Vec<SiteHit>, ScanError> {
    let text = clean_sequence(sequence);
    let mut hits = Vec::new();

    for record in source.records()? {
        let record = record?;
        let site = record.cleaned_site();
        if !config.accepts_length(site.len()) {
            continue;
        }

        let (count, unique) = match count_matches(&text, &site) {
            0 if config.allow_ambiguous_enzymes && has_ambiguity(&site) => {
                if let Some(msg) = check_expansion_limit(expansion_count(&site)) {
                    warn!("Skipping {}: {msg}", record.name);
                    continue;
                }
                let count = Expansions::new(&site)
                    .map(|candidate| count_matches(&text, &candidate))
                    .fold(0usize, usize::saturating_add);
                (count, count == 1)
            }
            0 => continue,
            count => (count, has_unique_match(&text, &site)),
        };
        if count > 0 {
            hits.push(SiteHit {
                name: record.name,
                site,
                count,
                unique,
            });
        }
    }

    debug!("Counted sites of {} enzymes in {text}", hits.len());
    Ok(hits)
}

fn has_ambiguity(site: &str) -> bool {
    site.bytes().any(|b| AmbiguityCode::from_byte(b).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::source::{EnzymeFile, InMemoryEnzymes};

    fn record(name: &str, site: &str) -> String {
        format!("<1>{name}\n<2>{name}\n<3>x\n<4>y\n<5>{site}\n<6>\n<7>N\n<8>1\n\n")
    }

    fn database(entries: &[(&str, &str)]) -> InMemoryEnzymes {
        InMemoryEnzymes::new(
            entries
                .iter()
                .map(|(name, site)| record(name, site))
                .collect::<String>(),
        )
    }

    #[test]
    fn test_exact_sites_in_database_order() {
        let db = database(&[("TaqI", "T^CGA"), ("EcoRI", "G^AATTC"), ("Fake", "ACGGA")]);
        let found = scan("ACGGAATTCC", &ScanConfig::default(), &db).unwrap();
        assert_eq!(found, vec!["EcoRI", "Fake"]);

        let found = scan("TCGATT", &ScanConfig::default(), &db).unwrap();
        assert_eq!(found, vec!["TaqI"]);
    }

    #[test]
    fn test_length_bounds() {
        let db = database(&[("Short", "GAT"), ("Long", "GGCCNNNNNGGCC"), ("Ok", "GATC")]);
        let found = scan("AAGATCGGCCAAAAAGGCC", &ScanConfig::default(), &db).unwrap();
        assert_eq!(found, vec!["Ok"]);

        let config = ScanConfig {
            min_site_len: 3,
            max_site_len: 4,
            allow_ambiguous_enzymes: false,
        };
        let found = scan("AAGATCGG", &config, &db).unwrap();
        assert_eq!(found, vec!["Short", "Ok"]);
    }

    #[test]
    fn test_cut_markers_and_offsets_are_ignored() {
        let db = database(&[("BsaI", "GGTCTC(1/5)"), ("AbaSI", "(11/9)C")]);
        let found = scan("TTGGTCTCTT", &ScanConfig::default(), &db).unwrap();
        assert_eq!(found, vec!["BsaI"]);
    }

    #[test]
    fn test_ambiguous_sites_need_flag() {
        let db = database(&[("HincII", "GTY^RAC")]);
        let sequence = "AAGTCAACAA";

        assert!(scan(sequence, &ScanConfig::default(), &db).unwrap().is_empty());

        let config = ScanConfig {
            allow_ambiguous_enzymes: true,
            ..ScanConfig::default()
        };
        assert_eq!(scan(sequence, &config, &db).unwrap(), vec!["HincII"]);
        assert!(scan("AAGTCTACAA", &config, &db).unwrap().is_empty());
    }

    #[test]
    fn test_ambiguity_in_sequence_matches_literally() {
        // a site written with N matches an N in the sequence without expansion
        let db = database(&[("HinfI", "G^ANTC")]);
        let found = scan("TTGANTCTT", &ScanConfig::default(), &db).unwrap();
        assert_eq!(found, vec!["HinfI"]);
    }

    #[test]
    fn test_gap_is_a_deletion() {
        let db = database(&[("Fake", "ACGGT")]);
        let found = scan("ACGG-TTT", &ScanConfig::default(), &db).unwrap();
        assert_eq!(found, vec!["Fake"]);
    }

    #[test]
    fn test_duplicate_database_names_are_kept() {
        let db = database(&[("Dup", "GATC"), ("Dup", "GATC")]);
        let found = scan("GATC", &ScanConfig::default(), &db).unwrap();
        assert_eq!(found, vec!["Dup", "Dup"]);
    }

    #[test]
    fn test_site_counts() {
        let db = database(&[("MboI", "^GATC"), ("EcoRI", "G^AATTC"), ("TaqI", "T^CGA")]);
        let hits = scan_sites("GATCAAGATCAGAATTC", &ScanConfig::default(), &db).unwrap();
        assert_eq!(
            hits,
            vec![
                SiteHit {
                    name: "MboI".to_string(),
                    site: "GATC".to_string(),
                    count: 2,
                    unique: false,
                },
                SiteHit {
                    name: "EcoRI".to_string(),
                    site: "GAATTC".to_string(),
                    count: 1,
                    unique: true,
                },
            ]
        );
        let names: Vec<String> = hits.into_iter().map(|h| h.name).collect();
        assert_eq!(names, scan("GATCAAGATCAGAATTC", &ScanConfig::default(), &db).unwrap());
    }

    #[test]
    fn test_ambiguous_site_counts_sum_expansions() {
        let db = database(&[("HincII", "GTY^RAC")]);
        let config = ScanConfig {
            allow_ambiguous_enzymes: true,
            ..ScanConfig::default()
        };
        // GTCAAC and GTTGAC are both HincII sites
        let hits = scan_sites("GTCAACTTGTTGAC", &config, &db).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].count, 2);
        assert!(!hits[0].unique);

        assert!(scan_sites("GTCAACTTGTTGAC", &ScanConfig::default(), &db)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_missing_database_is_an_error() {
        let db = EnzymeFile::new("/nonexistent/enzymes.txt");
        let result = scan("ACGT", &ScanConfig::default(), &db);
        assert!(matches!(result, Err(ScanError::Source(_))));
    }

    #[test]
    fn test_read_failure_is_an_error() {
        let mut bytes = record("Ok", "GATC").into_bytes();
        bytes.extend_from_slice(b"<1>Bad\xff\n");
        let db = InMemoryEnzymes::from_bytes(bytes);
        let result = scan("GATC", &ScanConfig::default(), &db);
        assert!(matches!(result, Err(ScanError::Read(_))));
    }
}
