//! Catalog engine.
//!
//! - `catalog`: in-memory catalogs and the PO/MO formats
//! - `scan`: message extraction from pod content
//! - `merge`: reconciling existing catalogs with fresh extractions
//! - `filter`: missing-translation subsets
//! - `importer`: translations from external PO data
//! - `catalogs`: the per-operation facade the CLI drives

pub mod catalog;
pub mod catalogs;
pub mod filter;
pub mod importer;
pub mod merge;
pub mod scan;

pub use catalogs::{
    Catalogs, CompileReport, ExtractOptions, Extracted, FilterReport, ImportReport, InitReport,
    LocaleStats, Outcome, UpdateOptions,
};
pub use filter::FilterOptions;
pub use importer::ImportSource;
