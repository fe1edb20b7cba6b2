use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::catalog::source::{EmbeddedEnzymes, EnzymeSource, SourceError};
use crate::core::iupac::clean_sequence;
use crate::parsing::rebase::{EnzymeRecord, RecordError};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Read(#[from] RecordError),

    #[error("Failed to serialize catalog: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// In-memory enzyme catalog with lookup indexes.
///
/// Used for browsing the database. Judging never goes through the catalog;
/// the scanner streams records from an [`EnzymeSource`] on every call.
#[derive(Debug, Default)]
pub struct EnzymeCatalog {
    /// All records, in database order
    pub enzymes: Vec<EnzymeRecord>,

    /// Index: enzyme name -> index in enzymes vec
    name_to_index: HashMap<String, usize>,

    /// Index: cleaned recognition site -> indices of enzymes with that site
    site_to_enzymes: HashMap<String, Vec<usize>>,

    /// Index: prototype name -> indices of enzymes sharing that prototype
    prototype_to_enzymes: HashMap<String, Vec<usize>>,
}

#[derive(Serialize)]
struct CatalogExport<'a> {
    source: String,
    enzymes: &'a [EnzymeRecord],
}

impl EnzymeCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the embedded database subset
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded records cannot be read.
    pub fn load_embedded() -> Result<Self, CatalogError> {
        Self::load(&EmbeddedEnzymes)
    }

    /// Read every record from `source`
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be opened or a read fails.
    pub fn load(source: &dyn EnzymeSource) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for record in source.records()? {
            catalog.add_enzyme(record?);
        }
        Ok(catalog)
    }

    pub fn add_enzyme(&mut self, enzyme: EnzymeRecord) {
        let index = self.enzymes.len();

        // First entry wins for duplicate names
        self.name_to_index
            .entry(enzyme.name.clone())
            .or_insert(index);

        let site = enzyme.cleaned_site();
        if !site.is_empty() {
            self.site_to_enzymes.entry(site).or_default().push(index);
        }

        if !enzyme.prototype.is_empty() {
            self.prototype_to_enzymes
                .entry(enzyme.prototype.clone())
                .or_default()
                .push(index);
        }

        self.enzymes.push(enzyme);
    }

    /// Look up an enzyme by name, exact first, then ignoring case
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EnzymeRecord> {
        if let Some(&idx) = self.name_to_index.get(name) {
            return Some(&self.enzymes[idx]);
        }
        self.enzymes
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// All enzymes whose cleaned recognition site equals `site`
    #[must_use]
    pub fn find_by_site(&self, site: &str) -> Vec<&EnzymeRecord> {
        self.site_to_enzymes
            .get(&clean_sequence(site))
            .map(|indices| indices.iter().map(|&i| &self.enzymes[i]).collect())
            .unwrap_or_default()
    }

    /// Enzymes recognizing the same site as `name`, excluding `name` itself.
    ///
    /// Enzymes listed under the same prototype are included even when their
    /// recorded site notation differs.
    #[must_use]
    pub fn isoschizomers(&self, name: &str) -> Vec<&EnzymeRecord> {
        let Some(enzyme) = self.get(name) else {
            return Vec::new();
        };

        let mut indices: Vec<usize> = Vec::new();
        if let Some(same_site) = self.site_to_enzymes.get(&enzyme.cleaned_site()) {
            indices.extend(same_site);
        }
        if let Some(same_proto) = self.prototype_to_enzymes.get(&enzyme.prototype) {
            indices.extend(same_proto);
        }
        indices.sort_unstable();
        indices.dedup();

        indices
            .into_iter()
            .map(|i| &self.enzymes[i])
            .filter(|e| e.name != enzyme.name)
            .collect()
    }

    /// Enzymes with at least one supplier
    pub fn commercially_available(&self) -> impl Iterator<Item = &EnzymeRecord> {
        self.enzymes.iter().filter(|e| e.is_commercially_available())
    }

    /// Export catalog to JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self, source: &dyn EnzymeSource) -> Result<String, CatalogError> {
        let export = CatalogExport {
            source: source.describe(),
            enzymes: &self.enzymes,
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.enzymes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enzymes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::source::{EnzymeFile, InMemoryEnzymes};

    #[test]
    fn test_load_embedded_catalog() {
        let catalog = EnzymeCatalog::load_embedded().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.commercially_available().count() > 0);
    }

    #[test]
    fn test_get_by_name() {
        let catalog = EnzymeCatalog::load_embedded().unwrap();

        let eco = catalog.get("EcoRI").unwrap();
        assert_eq!(eco.cleaned_site(), "GAATTC");
        assert_eq!(catalog.get("ecori").unwrap().name, "EcoRI");
        assert!(catalog.get("NotAnEnzyme").is_none());
    }

    #[test]
    fn test_find_by_site() {
        let catalog = EnzymeCatalog::load_embedded().unwrap();

        let names: Vec<&str> = catalog
            .find_by_site("^gatc")
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["DpnII", "MboI", "Sau3AI"]);
        assert!(catalog.find_by_site("TTTTTTTT").is_empty());
    }

    #[test]
    fn test_isoschizomers() {
        let catalog = EnzymeCatalog::load_embedded().unwrap();

        let names: Vec<&str> = catalog
            .isoschizomers("MspI")
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["HpaII"]);
        assert!(catalog.isoschizomers("missing").is_empty());
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let text = "<1>X\n<2>X\n<3>a\n<4>b\n<5>GAATTC\n<6>\n<7>\n<8>\n\n\
                    <1>X\n<2>X\n<3>a\n<4>b\n<5>TTAA\n<6>\n<7>\n<8>\n";
        let catalog = EnzymeCatalog::load(&InMemoryEnzymes::new(text)).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("X").unwrap().cleaned_site(), "GAATTC");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = EnzymeCatalog::load(&EnzymeFile::new("/nonexistent/db.txt"));
        assert!(matches!(result, Err(CatalogError::Source(_))));
    }

    #[test]
    fn test_to_json() {
        let catalog = EnzymeCatalog::load_embedded().unwrap();
        let json = catalog.to_json(&EmbeddedEnzymes).unwrap();
        assert!(json.contains("\"enzymes\""));
        assert!(json.contains("\"recognition_site\": \"G^AATTC\""));
    }
}
