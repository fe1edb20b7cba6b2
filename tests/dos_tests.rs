//! Input limit tests.
//!
//! Oversized inputs must be rejected up front instead of exhausting memory
//! or time.

use rflp_finder::catalog::source::{EnzymeFile, InMemoryEnzymes};
use rflp_finder::matching::expand::expansion_count;
use rflp_finder::matching::scanner::{scan, ScanConfig};
use rflp_finder::parsing::tsv::parse_tsv_text;
use rflp_finder::utils::validation::{
    check_expansion_limit, MAX_ALLELES, MAX_EXPANSIONS, MAX_SEQUENCE_LENGTH,
};
use rflp_finder::{judge, JudgeConfig, JudgeError};

#[test]
fn test_oversized_sequence_is_rejected() {
    let sequence = format!("{}[A/C]", "A".repeat(MAX_SEQUENCE_LENGTH));
    let db = InMemoryEnzymes::new("");
    let result = judge(&sequence, &JudgeConfig::default(), &db);
    assert!(matches!(result, Err(JudgeError::SequenceTooLong(_))));
}

#[test]
fn test_oversized_allele_list_is_rejected_before_scanning() {
    // a database that cannot be opened shows no scan was attempted
    let db = EnzymeFile::new("/nonexistent/enzymes.txt");
    let alleles = vec!["A"; 300].join("/");
    let result = judge(&format!("ACGG[{alleles}]TT"), &JudgeConfig::default(), &db);
    assert!(matches!(result, Err(JudgeError::TooManyAlleles(_))));

    let alleles = vec!["C"; MAX_ALLELES + 1].join("/");
    let result = judge(&format!("ACGG[{alleles}]TT"), &JudgeConfig::default(), &db);
    assert!(matches!(result, Err(JudgeError::TooManyAlleles(_))));
}

#[test]
fn test_longest_default_site_fits_expansion_limit() {
    // ten N's is the worst case under the default site length bounds
    let count = expansion_count(&"N".repeat(ScanConfig::default().max_site_len));
    assert_eq!(count, 1 << 20);
    assert!(check_expansion_limit(count).is_none());
    assert!(count <= MAX_EXPANSIONS);
}

#[test]
fn test_oversized_ambiguous_site_is_skipped() {
    let site = "N".repeat(12);
    assert!(check_expansion_limit(expansion_count(&site)).is_some());

    let db = InMemoryEnzymes::new(format!(
        "<1>WideI\n<2>WideI\n<3>x\n<4>y\n<5>{site}\n<6>\n<7>\n<8>\n"
    ));
    let config = ScanConfig {
        min_site_len: 4,
        max_site_len: 12,
        allow_ambiguous_enzymes: true,
    };
    let found = scan(&"A".repeat(20), &config, &db).unwrap();
    assert!(found.is_empty());
}

#[test]
fn test_expansion_count_saturates() {
    let count = expansion_count(&"N".repeat(100));
    assert_eq!(count, usize::MAX);
}

#[test]
fn test_malformed_table_reports_line() {
    let text = "v1\tACGG\t[A/C]\tTT\nv2\tACGG\n";
    let err = parse_tsv_text(text, '\t').unwrap_err();
    assert!(err.to_string().contains("Line 2"));
}
