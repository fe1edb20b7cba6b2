use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::source::EnzymeSource;
use crate::core::variant::{first_ambiguity_position, is_variant_sequence, VariantSequence};
use crate::matching::expand::{expand_alleles, expand_at};
use crate::matching::multiset::{
    dedupe_stable, diff_one_sided, intersect_one_sided, symmetric_diff_sorted,
};
use crate::matching::scanner::{scan, ScanConfig, ScanError};
use crate::utils::validation::{check_allele_count, check_sequence_length, valid_length_bounds};

#[derive(Error, Debug)]
pub enum JudgeError {
    #[error(transparent)]
    DatabaseUnavailable(#[from] ScanError),

    #[error("Target position {position} is outside the sequence (length {length})")]
    PositionOutOfRange { position: usize, length: usize },

    #[error("Invalid site length bounds: min {min}, max {max}")]
    InvalidLengthBounds { min: usize, max: usize },

    #[error("{0}")]
    SequenceTooLong(String),

    #[error("{0}")]
    TooManyAlleles(String),
}

/// How the alleles at the target position are produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AlleleMode {
    /// The explicit allele list from bracket notation (gaps and multi-base
    /// alleles included)
    #[default]
    Alleles,
    /// One allele per base of the ambiguity letter
    AmbiguityCode,
}

/// Configuration for the judge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JudgeConfig {
    /// Position in the collapsed ambiguity sequence; first variant if unset
    pub target_position: Option<usize>,
    pub min_site_len: usize,
    pub max_site_len: usize,
    pub allow_ambiguous_enzymes: bool,
    pub mode: AlleleMode,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        let scan = ScanConfig::default();
        Self {
            target_position: None,
            min_site_len: scan.min_site_len,
            max_site_len: scan.max_site_len,
            allow_ambiguous_enzymes: scan.allow_ambiguous_enzymes,
            mode: AlleleMode::default(),
        }
    }
}

impl JudgeConfig {
    #[must_use]
    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            min_site_len: self.min_site_len,
            max_site_len: self.max_site_len,
            allow_ambiguous_enzymes: self.allow_ambiguous_enzymes,
        }
    }
}

/// Outcome of judging one variant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgmentReport {
    /// False when the input has no variant notation or malformed brackets
    pub is_variant: bool,

    /// True when allele 0 and some other allele are cut by different enzymes
    pub is_informative: bool,

    /// Judged position in the ambiguity sequence, unset when there was none
    pub target_position: Option<usize>,

    /// Collapsed sequence with one ambiguity letter per variant
    pub ambiguity_sequence: String,

    /// Allele labels, in judging order
    pub alleles: Vec<String>,

    /// Concrete sequence scanned for each allele
    pub allele_sequences: Vec<String>,

    /// Enzymes cutting each allele, in database order
    pub enzyme_sets: Vec<Vec<String>>,

    /// One list per ordered pair (i, j), i != j, i ascending then j ascending
    pub pairwise_distinguishing_enzymes: Vec<Vec<String>>,
}

impl JudgmentReport {
    /// Report for input that is not a variant sequence
    #[must_use]
    pub fn non_variant() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn allele_count(&self) -> usize {
        self.alleles.len()
    }

    /// Ordered allele pairs with their distinguishing enzymes
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize, &[String])> + '_ {
        let n = self.allele_count();
        (0..n)
            .flat_map(move |i| (0..n).filter(move |&j| j != i).map(move |j| (i, j)))
            .zip(&self.pairwise_distinguishing_enzymes)
            .map(|((i, j), enzymes)| (i, j, enzymes.as_slice()))
    }

    /// Enzymes cutting allele `i` but not allele `j`
    #[must_use]
    pub fn distinguishing(&self, i: usize, j: usize) -> Option<&[String]> {
        let n = self.allele_count();
        if i == j || i >= n || j >= n {
            return None;
        }
        let index = i * (n - 1) + if j < i { j } else { j - 1 };
        self.pairwise_distinguishing_enzymes
            .get(index)
            .map(Vec::as_slice)
    }

    /// Enzymes cutting allele `i` and none of the other alleles
    #[must_use]
    pub fn exclusive_enzymes(&self, i: usize) -> Vec<String> {
        let mut lists = self
            .pairs()
            .filter(|&(a, _, _)| a == i)
            .map(|(_, _, enzymes)| enzymes);
        let Some(first) = lists.next() else {
            return Vec::new();
        };
        lists.fold(first.to_vec(), |acc, next| intersect_one_sided(&acc, next))
    }

    /// Every enzyme appearing in any pairwise list, first occurrence order
    #[must_use]
    pub fn distinguishing_enzymes(&self) -> Vec<String> {
        let all: Vec<String> = self
            .pairwise_distinguishing_enzymes
            .iter()
            .flatten()
            .cloned()
            .collect();
        dedupe_stable(&all)
    }
}

/// Judges variants against one enzyme database
pub struct Judge<'a> {
    source: &'a dyn EnzymeSource,
    config: JudgeConfig,
}

impl<'a> Judge<'a> {
    pub fn new(source: &'a dyn EnzymeSource) -> Self {
        Self::with_config(source, JudgeConfig::default())
    }

    pub fn with_config(source: &'a dyn EnzymeSource, config: JudgeConfig) -> Self {
        Self { source, config }
    }

    #[must_use]
    pub fn config(&self) -> &JudgeConfig {
        &self.config
    }

    /// Judge one annotated sequence
    ///
    /// # Errors
    ///
    /// See [`judge`].
    pub fn judge(&self, sequence: &str) -> Result<JudgmentReport, JudgeError> {
        judge(sequence, &self.config, self.source)
    }
}

/// Decide whether the variant in `sequence` can be told apart by an enzyme.
///
/// Malformed or non-variant input is not an error: it yields a report with
/// `is_variant == false`. Each call opens its own database streams, so calls
/// may run concurrently.
///
/// # Errors
///
/// Returns `JudgeError::DatabaseUnavailable` if any allele scan fails,
/// `PositionOutOfRange` for a target past the end of the sequence,
/// `InvalidLengthBounds` for unusable site bounds, and `SequenceTooLong` or
/// `TooManyAlleles` for oversized input.
///
/// Variant notation with no ambiguity letter to target (`ACGT-ACGT`) is
/// judged as a single allele and is never informative.
pub fn judge(
    sequence: &str,
    config: &JudgeConfig,
    source: &dyn EnzymeSource,
) -> Result<JudgmentReport, JudgeError> {
    if !valid_length_bounds(config.min_site_len, config.max_site_len) {
        return Err(JudgeError::InvalidLengthBounds {
            min: config.min_site_len,
            max: config.max_site_len,
        });
    }
    if let Some(msg) = check_sequence_length(sequence.len()) {
        return Err(JudgeError::SequenceTooLong(msg));
    }

    if !is_variant_sequence(sequence) {
        return Ok(JudgmentReport::non_variant());
    }
    let parsed = match VariantSequence::parse(sequence) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Not a variant sequence: {e}");
            return Ok(JudgmentReport::non_variant());
        }
    };
    let ambiguity_sequence = parsed.ambiguity_sequence.as_str();

    let position = match config.target_position {
        Some(position) if position >= ambiguity_sequence.len() => {
            return Err(JudgeError::PositionOutOfRange {
                position,
                length: ambiguity_sequence.len(),
            });
        }
        Some(position) => Some(position),
        None => first_ambiguity_position(ambiguity_sequence),
    };

    let (alleles, allele_sequences) = match position {
        // whole sequence as the only allele
        None => (
            vec![ambiguity_sequence.to_string()],
            vec![ambiguity_sequence.to_string()],
        ),
        Some(position) => match (config.mode, parsed.variant_at(position)) {
            (AlleleMode::Alleles, Some(variant)) => (
                variant.alleles.alleles().to_vec(),
                expand_alleles(ambiguity_sequence, position, &variant.alleles),
            ),
            _ => {
                let sequences = expand_at(ambiguity_sequence, position);
                let labels: Vec<String> = sequences
                    .iter()
                    .map(|s| s[position..=position].to_string())
                    .collect();
                (labels, sequences)
            }
        },
    };
    if let Some(msg) = check_allele_count(alleles.len()) {
        return Err(JudgeError::TooManyAlleles(msg));
    }
    debug!(
        "Judging position {position:?} of {ambiguity_sequence} with alleles {}",
        alleles.join("/")
    );

    let scan_config = config.scan_config();
    let enzyme_sets = allele_sequences
        .iter()
        .map(|allele_sequence| scan(allele_sequence, &scan_config, source))
        .collect::<Result<Vec<_>, _>>()?;

    let is_informative = enzyme_sets
        .iter()
        .skip(1)
        .any(|other| !symmetric_diff_sorted(&enzyme_sets[0], other).is_empty());

    let pairwise_distinguishing_enzymes = pairwise_diffs(&enzyme_sets);

    Ok(JudgmentReport {
        is_variant: true,
        is_informative,
        target_position: position,
        ambiguity_sequence: parsed.ambiguity_sequence.clone(),
        alleles,
        allele_sequences,
        enzyme_sets,
        pairwise_distinguishing_enzymes,
    })
}

/// Judge with the parameters spelled out rather than bundled in a config
///
/// # Errors
///
/// See [`judge`].
pub fn judge_variant(
    sequence: &str,
    target_position: Option<usize>,
    site_length_bounds: (usize, usize),
    allow_ambiguous_enzymes: bool,
    source: &dyn EnzymeSource,
) -> Result<JudgmentReport, JudgeError> {
    let config = JudgeConfig {
        target_position,
        min_site_len: site_length_bounds.0,
        max_site_len: site_length_bounds.1,
        allow_ambiguous_enzymes,
        mode: AlleleMode::Alleles,
    };
    judge(sequence, &config, source)
}

/// `diff_one_sided` for every ordered pair (i, j), i != j
fn pairwise_diffs(enzyme_sets: &[Vec<String>]) -> Vec<Vec<String>> {
    let n = enzyme_sets.len();
    let mut diffs = Vec::with_capacity(n * n.saturating_sub(1));
    for (i, a) in enzyme_sets.iter().enumerate() {
        for (j, b) in enzyme_sets.iter().enumerate() {
            if i != j {
                diffs.push(diff_one_sided(a, b));
            }
        }
    }
    diffs
}
