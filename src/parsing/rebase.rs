use serde::{Deserialize, Serialize};
use std::io::{BufRead, Lines};
use thiserror::Error;
use tracing::debug;

use crate::core::iupac::clean_sequence;

/// Number of tagged fields per record
pub const FIELDS_PER_RECORD: usize = 8;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Failed to read enzyme database: {0}")]
    Io(#[from] std::io::Error),
}

/// One restriction enzyme entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnzymeRecord {
    /// `<1>` enzyme name
    pub name: String,

    /// `<2>` prototype (first enzyme found with this site)
    pub prototype: String,

    /// `<3>` source organism
    pub microorganism: String,

    /// `<4>` strain or culture collection
    pub source: String,

    /// `<5>` recognition sequence as written, with cut markers
    pub recognition_site: String,

    /// `<6>` methylation site
    pub methylation_site: String,

    /// `<7>` supplier codes; empty when not commercially available
    pub commercial_availability: String,

    /// `<8>` comma-separated reference indices
    pub references: String,
}

impl EnzymeRecord {
    /// Recognition site reduced to bases and ambiguity letters
    #[must_use]
    pub fn cleaned_site(&self) -> String {
        clean_sequence(&self.recognition_site)
    }

    #[must_use]
    pub fn is_commercially_available(&self) -> bool {
        !self.commercial_availability.trim().is_empty()
    }

    /// Supplier codes, one letter each
    #[must_use]
    pub fn suppliers(&self) -> Vec<char> {
        self.commercial_availability
            .chars()
            .filter(char::is_ascii_alphabetic)
            .collect()
    }

    /// Reference indices; entries that are not numbers are skipped
    #[must_use]
    pub fn reference_indices(&self) -> Vec<u32> {
        self.references
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect()
    }

    fn set_field(&mut self, tag: u8, value: String) -> bool {
        let slot = match tag {
            b'1' => &mut self.name,
            b'2' => &mut self.prototype,
            b'3' => &mut self.microorganism,
            b'4' => &mut self.source,
            b'5' => &mut self.recognition_site,
            b'6' => &mut self.methylation_site,
            b'7' => &mut self.commercial_availability,
            b'8' => &mut self.references,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// Streaming reader over tagged enzyme records.
///
/// Lines look like `<5>GAATTC`. Lines that do not start with `<` (file
/// headers, the reference list) are ignored, as are unknown tags. A record
/// is emitted once eight tagged lines have been read; a blank line discards
/// any partially read record.
pub struct RecordReader<R: BufRead> {
    lines: Lines<R>,
    current: EnzymeRecord,
    fields_seen: usize,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            current: EnzymeRecord::default(),
            fields_seen: 0,
        }
    }

    fn reset(&mut self) {
        if self.fields_seen > 0 {
            debug!(
                "Discarding incomplete enzyme record '{}' ({} of {FIELDS_PER_RECORD} fields)",
                self.current.name, self.fields_seen
            );
        }
        self.current = EnzymeRecord::default();
        self.fields_seen = 0;
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<EnzymeRecord, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(RecordError::Io(e))),
            };
            let line = line.trim_end_matches('\r');

            if line.is_empty() {
                self.reset();
                continue;
            }

            let bytes = line.as_bytes();
            if bytes.len() < 3 || bytes[0] != b'<' || bytes[2] != b'>' {
                continue;
            }

            if self.current.set_field(bytes[1], line[3..].to_string()) {
                self.fields_seen += 1;
            }

            if self.fields_seen == FIELDS_PER_RECORD {
                let record = std::mem::take(&mut self.current);
                self.fields_seen = 0;
                return Some(Ok(record));
            }
        }
    }
}

/// Read every complete record from `reader`
///
/// # Errors
///
/// Returns `RecordError::Io` on the first read failure.
pub fn parse_records<R: BufRead>(reader: R) -> Result<Vec<EnzymeRecord>, RecordError> {
    RecordReader::new(reader).collect()
}
