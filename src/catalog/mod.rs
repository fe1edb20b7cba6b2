//! Restriction enzyme database access.
//!
//! The database is a read-only stream of tagged records. An [`source::EnzymeSource`]
//! hands out a fresh stream on every `open()`, which is what the scanner uses:
//! each scan re-reads the database, so concurrent judgments never share a read
//! position. [`store::EnzymeCatalog`] loads everything once for lookups.
//!
//! ## Sources
//!
//! - **Embedded**: a subset of common enzymes compiled into the binary
//! - **File**: any file in the same format, plain or gzip-compressed
//! - **In memory**: a string or byte buffer
//!
//! ## Example
//!
//! ```rust,no_run
//! use rflp_finder::catalog::source::EnzymeFile;
//! use rflp_finder::EnzymeCatalog;
//!
//! let catalog = EnzymeCatalog::load(&EnzymeFile::new("link_parsrefs.txt")).unwrap();
//! for enzyme in catalog.find_by_site("GAATTC") {
//!     println!("{}", enzyme.name);
//! }
//! ```

pub mod source;
pub mod store;
