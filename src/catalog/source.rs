use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::parsing::rebase::RecordReader;

/// Enzyme records compiled into the binary; validated by build.rs
const EMBEDDED_DATABASE: &str = include_str!("../../data/rebase_enzymes.txt");

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to open enzyme database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Stream over enzyme records, one stream per `open()` call
pub type RecordStream<'a> = RecordReader<Box<dyn BufRead + Send + 'a>>;

/// A read-only enzyme database that can be opened any number of times.
///
/// Every call to [`EnzymeSource::open`] returns a new stream positioned at the
/// start of the data, so concurrent scans never share a read position.
pub trait EnzymeSource: Send + Sync {
    /// Open a fresh stream over the raw database text
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Open` if the underlying data cannot be opened.
    fn open(&self) -> Result<Box<dyn BufRead + Send + '_>, SourceError>;

    /// Human-readable description for logs and reports
    fn describe(&self) -> String;

    /// Open a fresh stream of parsed records
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Open` if the underlying data cannot be opened.
    fn records(&self) -> Result<RecordStream<'_>, SourceError> {
        Ok(RecordReader::new(self.open()?))
    }
}

/// Database file on disk; `.gz` files are decompressed transparently
#[derive(Debug, Clone)]
pub struct EnzymeFile {
    path: PathBuf,
}

impl EnzymeFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_gzipped(&self) -> bool {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("gz"))
    }
}

impl EnzymeSource for EnzymeFile {
    fn open(&self) -> Result<Box<dyn BufRead + Send + '_>, SourceError> {
        let file = File::open(&self.path).map_err(|source| SourceError::Open {
            path: self.path.clone(),
            source,
        })?;

        if self.is_gzipped() {
            Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
        } else {
            Ok(Box::new(BufReader::new(file)))
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// The database subset bundled with the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedEnzymes;

impl EnzymeSource for EmbeddedEnzymes {
    fn open(&self) -> Result<Box<dyn BufRead + Send + '_>, SourceError> {
        Ok(Box::new(Cursor::new(EMBEDDED_DATABASE.as_bytes())))
    }

    fn describe(&self) -> String {
        "embedded".to_string()
    }
}

/// Database held in memory
#[derive(Debug, Clone)]
pub struct InMemoryEnzymes {
    data: Vec<u8>,
}

impl InMemoryEnzymes {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            data: text.into().into_bytes(),
        }
    }

    /// Raw bytes, not required to be valid UTF-8
    #[must_use]
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl EnzymeSource for InMemoryEnzymes {
    fn open(&self) -> Result<Box<dyn BufRead + Send + '_>, SourceError> {
        Ok(Box::new(Cursor::new(self.data.as_slice())))
    }

    fn describe(&self) -> String {
        format!("in-memory ({} bytes)", self.data.len())
    }
}

/// Pick a file source if a path is given, otherwise the embedded database
#[must_use]
pub fn source_for(path: Option<&Path>) -> Box<dyn EnzymeSource> {
    match path {
        Some(path) => Box::new(EnzymeFile::new(path)),
        None => Box::new(EmbeddedEnzymes),
    }
}
