//! Error types for the catalog pipeline.
//!
//! The engine distinguishes four failure kinds:
//!
//! - `Usage`: an invalid combination of caller options, raised before any storage access
//! - `Extraction`: a malformed token in template source; aborts the whole run
//! - `Parse`: an existing catalog whose overall structure cannot be read
//! - `Storage`: whatever the pod collaborator reported, passed through untouched
//!
//! Malformed individual catalog records are not errors; they surface as
//! [`ParseWarning`](crate::core::catalog::ParseWarning) values.

use thiserror::Error;

use crate::core::scan::TokenError;
use crate::pod::StorageError;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// Caller options that cannot work together.
    #[error("{0}")]
    Usage(String),

    /// Template source contained a token the extraction grammar could not read.
    #[error("Problem extracting messages from {path}: {source}")]
    Extraction {
        path: String,
        #[source]
        source: TokenError,
    },

    /// An existing catalog could not be read at all.
    #[error("Unable to parse catalog {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl CatalogError {
    pub fn usage(message: impl Into<String>) -> Self {
        CatalogError::Usage(message.into())
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, CatalogError::Usage(_))
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
