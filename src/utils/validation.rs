//! Centralized input limits and validation helpers.

/// Maximum length of a raw annotated sequence (DOS protection)
pub const MAX_SEQUENCE_LENGTH: usize = 100_000;

/// Maximum number of concrete patterns a whole-sequence expansion may produce
pub const MAX_EXPANSIONS: usize = 1 << 20;

/// Maximum number of records in one batch table
pub const MAX_BATCH_RECORDS: usize = 1_000_000;

/// Maximum number of alleles at a single variant position
pub const MAX_ALLELES: usize = 64;

/// Check a raw sequence against [`MAX_SEQUENCE_LENGTH`].
///
/// Returns an error message if the sequence is too long, None if it is safe
/// to process.
#[must_use]
pub fn check_sequence_length(len: usize) -> Option<String> {
    if len > MAX_SEQUENCE_LENGTH {
        Some(format!(
            "Sequence too long: {len} characters exceeds maximum of {MAX_SEQUENCE_LENGTH}"
        ))
    } else {
        None
    }
}

/// Check if a whole-sequence expansion of `count` patterns is allowed
#[must_use]
pub fn check_expansion_limit(count: usize) -> Option<String> {
    if count > MAX_EXPANSIONS {
        Some(format!(
            "Too many expansions: {count} exceeds maximum of {MAX_EXPANSIONS}"
        ))
    } else {
        None
    }
}

/// Check if adding another batch record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new record.
///
/// # Example
/// ```ignore
/// if let Some(msg) = check_batch_limit(records.len()) {
///     return Err(ParseError::TooManyRecords(msg));
/// }
/// records.push(record);
/// ```
#[must_use]
pub fn check_batch_limit(count: usize) -> Option<String> {
    if count >= MAX_BATCH_RECORDS {
        Some(format!(
            "Too many records: adding another would exceed maximum of {MAX_BATCH_RECORDS}"
        ))
    } else {
        None
    }
}

/// Check if an allele list fits under [`MAX_ALLELES`]
#[must_use]
pub fn check_allele_count(count: usize) -> Option<String> {
    if count > MAX_ALLELES {
        Some(format!(
            "Too many alleles: {count} exceeds maximum of {MAX_ALLELES}"
        ))
    } else {
        None
    }
}

/// Validate enzyme recognition-site length bounds
///
/// # Examples
///
/// ```
/// use rflp_finder::utils::validation::valid_length_bounds;
///
/// assert!(valid_length_bounds(4, 10));
/// assert!(valid_length_bounds(6, 6));
/// assert!(!valid_length_bounds(8, 4));
/// assert!(!valid_length_bounds(0, 4));
/// ```
#[must_use]
pub fn valid_length_bounds(min: usize, max: usize) -> bool {
    min >= 1 && min <= max
}
