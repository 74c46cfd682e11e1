//! Content scanning.
//!
//! - `unit`: content units and their locale scope
//! - `tagged`: `@`-tagged structured-data fields
//! - `template`: message-function calls in template source
//!
//! Units are read from the pod sequentially, extracted in parallel, and then
//! accumulated in unit order so the resulting catalogs are deterministic.

mod tagged;
mod template;
mod unit;

use std::collections::BTreeMap;

use rayon::prelude::*;

pub use tagged::{COMMENT_SUFFIX, FieldLines, TAG_SUFFIX, TaggedFields, extract_tagged};
pub use template::{DEFAULT_FUNCTION_NAMES, TemplateGrammar, TokenError};
pub use unit::{
    BaseDocumentUnit, ContentUnit, DocumentPartUnit, LocaleSet, PodConfigUnit, RootDataUnit,
    ScopedUnit, TableRowUnit, ViewUnit,
};

use crate::core::catalog::{Catalog, Location, Message};
use crate::error::CatalogError;
use crate::pod::{
    CONTENT_ROOT, DocumentFormat, PODSPEC_PATH, Pod, SourceText, StorageError, VIEWS_ROOT,
};
use crate::utils::PathFilter;

/// A message found in a unit, before it is attached to the unit's path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub line: Option<usize>,
    pub id: String,
    pub comments: Vec<String>,
}

/// Freshly extracted catalogs: one per locale plus the locale-less aggregate.
///
/// Locale catalogs start empty; existing translations are never pre-loaded.
#[derive(Debug, Clone, Default)]
pub struct ExtractedCatalogs {
    pub localized: BTreeMap<String, Catalog>,
    pub unlocalized: Catalog,
}

impl ExtractedCatalogs {
    /// Route a message to every locale of `scope` and to the aggregate.
    ///
    /// A message id seen earlier in the run is overwritten (last write wins).
    pub fn add(&mut self, message: Message, scope: &LocaleSet) {
        for locale in scope.locales() {
            self.localized
                .entry(locale.clone())
                .or_insert_with(|| Catalog::new(Some(locale.as_str())))
                .insert(message.clone());
        }
        self.unlocalized.insert(message);
    }
}

/// Which units a scan visits.
#[derive(Debug, Clone, Default)]
pub struct ScanFilter {
    /// Units never scanned.
    pub ignores: PathFilter,
    /// When set, only units matching it are scanned.
    pub paths: Option<PathFilter>,
}

impl ScanFilter {
    pub fn includes(&self, pod_path: &str) -> bool {
        if self.ignores.matches(pod_path) {
            return false;
        }
        self.paths.as_ref().is_none_or(|paths| paths.matches(pod_path))
    }
}

/// Read every content unit of a pod, in scan order.
///
/// Order: per collection its documents (base document followed by its parts)
/// and then its tabular data; root-level data; views; the podspec.
pub fn collect_units<P: Pod + ?Sized>(pod: &P) -> Result<Vec<ContentUnit>, StorageError> {
    let mut units = Vec::new();

    for collection in pod.list_collections()? {
        for doc in pod.list_docs(&collection, true)? {
            units.push(ContentUnit::from_document(doc));
        }
        for pod_path in pod.list_dir(&collection.pod_path, true)? {
            if !pod_path.ends_with(".csv") {
                continue;
            }
            for row in pod.read_csv(&pod_path)? {
                units.push(
                    TableRowUnit {
                        pod_path: pod_path.clone(),
                        row,
                        collection_locales: collection.locales.clone(),
                    }
                    .into(),
                );
            }
        }
    }

    for pod_path in pod.list_dir(CONTENT_ROOT, false)? {
        if DocumentFormat::from_path(&pod_path) != Some(DocumentFormat::Yaml) {
            continue;
        }
        for doc in pod.get_doc(&pod_path)? {
            units.push(RootDataUnit(doc).into());
        }
    }

    for pod_path in pod.list_dir(VIEWS_ROOT, true)? {
        let bytes = pod.read_file(&pod_path)?;
        units.push(
            ViewUnit {
                source: SourceText::new(String::from_utf8_lossy(&bytes), 1),
                pod_path,
            }
            .into(),
        );
    }

    if pod.file_exists(PODSPEC_PATH) {
        let podspec = pod.podspec();
        units.push(
            PodConfigUnit {
                pod_path: PODSPEC_PATH.to_string(),
                config: podspec.config.clone(),
                source: podspec.source.clone(),
            }
            .into(),
        );
    }

    Ok(units)
}

/// Extract all messages of one unit: tagged fields first, then template calls.
pub fn extract_unit(
    unit: &ContentUnit,
    grammar: &TemplateGrammar,
) -> Result<Vec<Message>, TokenError> {
    let path = unit.pod_path();
    let mut candidates = Vec::new();

    if let Some(tagged) = unit.tagged_fields() {
        candidates.extend(extract_tagged(tagged));
    }
    if let Some(source) = unit.template_source() {
        candidates.extend(grammar.extract(source)?);
    }

    Ok(candidates
        .into_iter()
        .map(|c| {
            Message::new(c.id)
                .with_location(Location::new(path, c.line))
                .with_auto_comments(c.comments)
        })
        .collect())
}

/// Scan the pod and accumulate per-locale and aggregate catalogs.
///
/// A malformed template token aborts the whole scan; nothing is returned for
/// the units already processed.
pub fn scan_pod<P: Pod + ?Sized>(
    pod: &P,
    grammar: &TemplateGrammar,
    filter: &ScanFilter,
) -> Result<ExtractedCatalogs, CatalogError> {
    let pod_locales = pod.list_locales();
    let units: Vec<ContentUnit> = collect_units(pod)?
        .into_iter()
        .filter(|unit| filter.includes(unit.pod_path()))
        .collect();

    // Parallel extraction per unit, then sequential accumulation in unit order
    let results: Vec<Result<Vec<Message>, TokenError>> = units
        .par_iter()
        .map(|unit| extract_unit(unit, grammar))
        .collect();

    let mut extracted = ExtractedCatalogs::default();
    let mut last_path: Option<&str> = None;

    for (unit, result) in units.iter().zip(results) {
        let path = unit.pod_path();
        let scope = unit.locale_scope(&pod_locales);

        if last_path != Some(path) {
            match &scope {
                LocaleSet::Locales(locales) if !locales.is_empty() => {
                    tracing::info!("Extracting: {} ({} locales)", path, locales.len())
                }
                _ => tracing::info!("Extracting: {}", path),
            }
            last_path = Some(path);
        }

        let messages = result.map_err(|source| {
            tracing::error!("Problem extracting messages from {}", path);
            CatalogError::Extraction {
                path: path.to_string(),
                source,
            }
        })?;
        for message in messages {
            extracted.add(message, &scope);
        }
    }

    Ok(extracted)
}
