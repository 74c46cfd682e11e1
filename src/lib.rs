//! Podcat - translation catalog pipeline for static-site pods
//!
//! Podcat extracts translatable messages from a pod's content, views and
//! podspec, and keeps gettext catalogs in step with them: a locale-less
//! template, one catalog per locale, missing-translation subsets for
//! translators, and compiled binary catalogs.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Catalog engine (scan, merge, filter, PO/MO formats)
//! - `error`: Engine error types
//! - `logging`: Diagnostic logging setup
//! - `pod`: Content tree and storage collaborator
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod pod;
pub mod utils;
