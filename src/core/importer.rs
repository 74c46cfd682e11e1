//! Importing translations from PO data produced outside the pod.

use std::{
    fs,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::core::catalog::{Catalog, Message};
use crate::error::{CatalogError, CatalogResult};
use crate::pod::StorageError;

const CATALOG_FILE_NAME: &str = "messages.po";

/// Where imported translations come from.
#[derive(Debug, Clone)]
pub enum ImportSource {
    /// A PO file, or a directory of `<locale>/messages.po` or `<locale>.po` files.
    Path(PathBuf),
    /// PO text given inline.
    Content(String),
}

/// PO data for one target locale.
#[derive(Debug, Clone)]
pub struct ImportBatch {
    pub locale: String,
    /// Where the data came from, for messages.
    pub label: String,
    pub content: Vec<u8>,
}

fn read_external(path: &Path) -> Result<Vec<u8>, StorageError> {
    fs::read(path).map_err(|e| StorageError::io(path.display().to_string(), e))
}

/// Fail when `source` names a single catalog and no locale was given.
///
/// Directories carry their locales in the layout, so they pass without one.
pub fn require_locale(source: &ImportSource, locale: Option<&str>) -> CatalogResult<()> {
    if locale.is_some() {
        return Ok(());
    }
    match source {
        ImportSource::Content(_) => Err(CatalogError::usage(
            "Must specify a locale when importing inline content.",
        )),
        ImportSource::Path(path) if path.is_dir() => Ok(()),
        ImportSource::Path(path) => Err(CatalogError::usage(format!(
            "Must specify a locale when importing a single file: {}",
            path.display()
        ))),
    }
}

/// Resolve an import source into per-locale batches.
///
/// A single file or inline content needs an explicit locale. For a directory
/// the locale is taken from the layout; an explicit locale restricts the
/// import to that locale.
pub fn collect_batches(source: &ImportSource, locale: Option<&str>) -> CatalogResult<Vec<ImportBatch>> {
    require_locale(source, locale)?;
    match (source, locale) {
        (ImportSource::Path(path), _) if path.is_dir() => {
            let mut batches = directory_batches(path)?;
            if let Some(locale) = locale {
                batches.retain(|batch| batch.locale == locale);
            }
            Ok(batches)
        }
        (ImportSource::Content(content), Some(locale)) => Ok(vec![ImportBatch {
            locale: locale.to_string(),
            label: "<content>".to_string(),
            content: content.as_bytes().to_vec(),
        }]),
        (ImportSource::Path(path), Some(locale)) => Ok(vec![ImportBatch {
            locale: locale.to_string(),
            label: path.display().to_string(),
            content: read_external(path)?,
        }]),
        (_, None) => Ok(Vec::new()),
    }
}

fn directory_batches(dir: &Path) -> Result<Vec<ImportBatch>, StorageError> {
    let mut batches = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(2).sort_by_file_name() {
        let entry =
            entry.map_err(|e| StorageError::io(dir.display().to_string(), e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy();

        let locale = if entry.depth() == 2 && file_name == CATALOG_FILE_NAME {
            path.parent()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().to_string())
        } else if entry.depth() == 1 {
            file_name.strip_suffix(".po").map(str::to_string)
        } else {
            None
        };

        if let Some(locale) = locale.filter(|l| !l.is_empty()) {
            batches.push(ImportBatch {
                locale,
                label: path.display().to_string(),
                content: read_external(path)?,
            });
        }
    }

    batches.sort_by(|a, b| a.locale.cmp(&b.locale).then(a.label.cmp(&b.label)));
    Ok(batches)
}

/// Copy every non-empty translation of `imported` into `target`.
///
/// Messages missing from `target` are created. Imported translations are
/// considered reviewed, so the fuzzy flag is cleared. Returns how many
/// translations were copied.
pub fn apply_translations(target: &mut Catalog, imported: &Catalog) -> usize {
    let mut count = 0;
    for message in imported.iter() {
        if message.obsolete || !message.is_translated() {
            continue;
        }
        match target.get_mut(&message.id) {
            Some(existing) => {
                existing.translation = message.translation.clone();
                existing.fuzzy = false;
                existing.obsolete = false;
            }
            None => target.insert(Message {
                fuzzy: false,
                ..message.clone()
            }),
        }
        count += 1;
    }
    count
}
