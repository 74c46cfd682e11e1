//! Content tree and storage collaborator.
//!
//! The catalog engine never touches the filesystem directly. Everything it
//! needs from a pod (collections, documents, data rows, views, podspec and
//! plain file access) goes through the [`Pod`] trait. [`FsPod`] is the
//! implementation backed by a pod directory on disk.
//!
//! All paths exchanged through this trait are pod paths: `/`-separated and
//! rooted at the pod directory (e.g. `/content/pages/home.yaml`).

mod document;
mod fs;
mod node;
mod podspec;

use std::{io, time::SystemTime};

use thiserror::Error;

pub use document::{Document, DocumentFormat, SourceText, parse_document, parse_fields, split_parts};
pub use fs::FsPod;
pub use node::{Node, NodeKey, Visit, walk};
pub use podspec::{PODSPEC_PATH, PodMetadata, Podspec};

pub const CONTENT_ROOT: &str = "/content";
pub const VIEWS_ROOT: &str = "/views";
pub const BLUEPRINT_NAME: &str = "_blueprint.yaml";

/// Failure reported by the storage collaborator.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse YAML in {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("Failed to read CSV {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

impl StorageError {
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

/// A directory of documents under `/content/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub pod_path: String,
    /// Locales configured in the collection's blueprint.
    pub locales: Vec<String>,
}

/// One row of tabular data, as a field -> value object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Line of the record in its file (1-indexed).
    pub line: usize,
    pub fields: Node,
}

pub trait Pod: Sync {
    fn list_collections(&self) -> Result<Vec<Collection>, StorageError>;

    /// Documents of a collection, base documents followed by their parts.
    fn list_docs(
        &self,
        collection: &Collection,
        include_hidden: bool,
    ) -> Result<Vec<Document>, StorageError>;

    /// Pod paths of the files below `pod_path`, sorted. A missing directory is empty.
    fn list_dir(&self, pod_path: &str, recursive: bool) -> Result<Vec<String>, StorageError>;

    fn read_csv(&self, pod_path: &str) -> Result<Vec<Row>, StorageError>;

    /// Parse a single structured-data file outside of any collection.
    fn get_doc(&self, pod_path: &str) -> Result<Vec<Document>, StorageError>;

    fn podspec(&self) -> &Podspec;

    /// Every locale known to the pod.
    fn list_locales(&self) -> Vec<String> {
        self.podspec().locales.clone()
    }

    fn read_file(&self, pod_path: &str) -> Result<Vec<u8>, StorageError>;

    /// Write a file, creating parent directories as needed.
    fn write_file(&self, pod_path: &str, content: &[u8]) -> Result<(), StorageError>;

    fn file_exists(&self, pod_path: &str) -> bool;

    /// Modification time, or `None` when the file does not exist.
    fn modified(&self, pod_path: &str) -> Result<Option<SystemTime>, StorageError>;
}

/// Join pod path segments with single `/` separators.
pub fn join_pod_path(base: &str, rest: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        rest.trim_start_matches('/')
    )
}
