use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::utils::validation::check_batch_limit;

/// Bases of flanking sequence kept on each side of the variant
pub const FLANK_LENGTH: usize = 20;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid variant table: {0}")]
    InvalidFormat(String),

    #[error("{0}")]
    TooManyRecords(String),
}

/// One row of a batch variant table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRecord {
    pub id: String,
    pub five_prime: String,
    /// Allele column, normalized to bracket notation
    pub alleles: String,
    pub three_prime: String,
}

impl VariantRecord {
    /// Annotated sequence with each flank trimmed to `flank` bases next to the
    /// variant
    #[must_use]
    pub fn sequence(&self, flank: usize) -> String {
        let five = trim_five_prime(&self.five_prime, flank);
        let three = trim_three_prime(&self.three_prime, flank);
        format!("{five}{}{three}", self.alleles)
    }
}

/// Last `flank` characters of a 5' flank
fn trim_five_prime(flank_seq: &str, flank: usize) -> &str {
    let start = flank_seq.len().saturating_sub(flank);
    flank_seq.get(start..).unwrap_or(flank_seq)
}

/// First `flank` characters of a 3' flank
fn trim_three_prime(flank_seq: &str, flank: usize) -> &str {
    flank_seq.get(..flank).unwrap_or(flank_seq)
}

/// Wrap a bare `A/C` allele list in brackets
fn normalize_alleles(alleles: &str) -> String {
    let alleles = alleles.trim();
    if alleles.starts_with('[') {
        alleles.to_string()
    } else {
        format!("[{alleles}]")
    }
}

/// Parse a variant table file with columns: id, 5' flank, alleles, 3' flank
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_tsv_file(path: &Path, delimiter: char) -> Result<Vec<VariantRecord>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_tsv_text(&content, delimiter)
}

/// Parse variant table text with columns: id, 5' flank, alleles, 3' flank
///
/// Blank lines and `#` comments are skipped, as is a header line starting
/// with `id`. The allele column may be written `[A/C]` or `A/C`.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a line has fewer than 4 fields, an
/// empty id or allele column, or no records are found, or
/// `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_tsv_text(text: &str, delimiter: char) -> Result<Vec<VariantRecord>, ParseError> {
    let mut records = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();

        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.to_lowercase()).unwrap_or_default();
            if first == "id" || first == "name" || first == "snp" {
                continue;
            }
        }

        // Line numbers in errors are 1-based
        let line_num = i + 1;

        if fields.len() < 4 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has fewer than 4 fields"
            )));
        }
        if fields[0].is_empty() {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has an empty id"
            )));
        }
        if fields[2].is_empty() {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has an empty allele column"
            )));
        }

        if let Some(msg) = check_batch_limit(records.len()) {
            return Err(ParseError::TooManyRecords(msg));
        }

        records.push(VariantRecord {
            id: fields[0].to_string(),
            five_prime: fields[1].to_string(),
            alleles: normalize_alleles(fields[2]),
            three_prime: fields[3].to_string(),
        });
    }

    if records.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No variant records found".to_string(),
        ));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tsv_text() {
        let tsv = r"id	five_prime	alleles	three_prime
8152226	TATTCAAGTGCACGAGACCAATGAC	[G/T]	GGACCTCTGGTGAGGCCCTGGTGAG
rs2	ACGG	A/C	TTTTTT
";

        let records = parse_tsv_text(tsv, '\t').unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "8152226");
        assert_eq!(records[0].alleles, "[G/T]");
        assert_eq!(records[1].alleles, "[A/C]");
    }

    #[test]
    fn test_flanks_are_trimmed_next_to_the_variant() {
        let record = VariantRecord {
            id: "8152226".to_string(),
            five_prime: "TATTCAAGTGCACGAGACCAATGAC".to_string(),
            alleles: "[G/T]".to_string(),
            three_prime: "GGACCTCTGGTGAGGCCCTGGTGAG".to_string(),
        };
        assert_eq!(
            record.sequence(FLANK_LENGTH),
            "AAGTGCACGAGACCAATGAC[G/T]GGACCTCTGGTGAGGCCCTG"
        );
        assert_eq!(record.sequence(3), "GAC[G/T]GGA");
    }

    #[test]
    fn test_short_flanks_are_kept() {
        let record = VariantRecord {
            id: "x".to_string(),
            five_prime: "AC".to_string(),
            alleles: "[A/C]".to_string(),
            three_prime: String::new(),
        };
        assert_eq!(record.sequence(FLANK_LENGTH), "AC[A/C]");
    }

    #[test]
    fn test_parse_csv_no_header_with_comments() {
        let csv = "# exported variants\n\nv1,ACGG,A/C,TTTT\n";
        let records = parse_tsv_text(csv, ',').unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sequence(FLANK_LENGTH), "ACGG[A/C]TTTT");
    }

    #[test]
    fn test_too_few_fields() {
        let err = parse_tsv_text("v1\tACGG\t[A/C]\n", '\t').unwrap_err();
        assert!(err.to_string().contains("Line 1 has fewer than 4 fields"));
    }

    #[test]
    fn test_empty_alleles() {
        let err = parse_tsv_text("v1\tACGG\t\tTT\n", '\t').unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(_)));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_tsv_text("# nothing\n", '\t').is_err());
    }
}
