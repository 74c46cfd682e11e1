//! Per-operation facade over a pod's catalogs.
//!
//! A `Catalogs` value is built for one operation from the pod and the tool
//! configuration. It owns no long-lived catalog state: every operation loads
//! what it needs, transforms it, and saves the result.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::catalog::{
    Catalog, LoadedCatalog, Message, ParseWarning, SortOrder, WriteOptions, build_header,
    compile_mo, needs_compilation, read_po, write_po,
};
use crate::core::filter::{FilterOptions, MissingSubset, missing_subset, union_missing};
use crate::core::importer::{ImportSource, apply_translations, collect_batches};
use crate::core::merge::{FuzzyMatching, MergeOptions, merge_with_stats};
use crate::core::scan::{ScanFilter, TemplateGrammar, scan_pod};
use crate::error::{CatalogError, CatalogResult};
use crate::pod::{Pod, join_pod_path};
use crate::utils::PathFilter;

const CATALOG_FILE_NAME: &str = "messages.po";
const BINARY_FILE_NAME: &str = "messages.mo";

/// An operation result together with the parse warnings met on the way.
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub value: T,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub include_obsolete: bool,
    /// Update locale catalogs instead of the template.
    pub localized: bool,
    /// Only scan units matching these patterns.
    pub paths: Vec<String>,
    pub include_header: bool,
    /// In localized mode, only update these locales. Empty means all.
    pub locales: Vec<String>,
    pub use_fuzzy_matching: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    pub use_fuzzy_matching: bool,
    pub include_obsolete: bool,
    pub include_header: bool,
}

#[derive(Debug, Clone)]
pub enum Extracted {
    Template(Catalog),
    Localized(Vec<Catalog>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    pub created: Vec<String>,
    pub skipped: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileReport {
    pub compiled: Vec<String>,
    pub up_to_date: Vec<String>,
    /// Known locales without a text catalog.
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub locale: String,
    pub source: String,
    pub imported: usize,
}

/// What a filter run produced.
#[derive(Debug, Clone)]
pub struct FilterReport {
    /// Per requested locale, with the output path in localized mode.
    pub subsets: Vec<(MissingSubset, Option<String>)>,
    /// The union template in unlocalized mode.
    pub template: Option<(Catalog, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleStats {
    pub locale: String,
    pub total: usize,
    pub translated: usize,
    pub fuzzy: usize,
    pub untranslated: usize,
}

pub struct Catalogs<'a> {
    pod: &'a dyn Pod,
    config: &'a Config,
    grammar: TemplateGrammar,
}

impl<'a> Catalogs<'a> {
    pub fn new(pod: &'a dyn Pod, config: &'a Config) -> CatalogResult<Self> {
        let grammar = TemplateGrammar::new(&config.function_names)
            .map_err(|e| CatalogError::usage(format!("Invalid 'functionNames': {}", e)))?;
        Ok(Self {
            pod,
            config,
            grammar,
        })
    }

    // ============================================================
    // Paths and locales
    // ============================================================

    pub fn template_path(&self) -> &str {
        &self.config.template_path
    }

    pub fn catalog_path(&self, locale: &str) -> String {
        locale_file(&self.config.translations_root, locale, CATALOG_FILE_NAME)
    }

    pub fn binary_path(&self, locale: &str) -> String {
        locale_file(&self.config.translations_root, locale, BINARY_FILE_NAME)
    }

    /// Locales with a catalog on disk, sorted.
    pub fn list_locales(&self) -> CatalogResult<Vec<String>> {
        let root = self.config.translations_root.trim_end_matches('/');
        let mut locales = BTreeSet::new();
        for pod_path in self.pod.list_dir(root, true)? {
            let Some(relative) = pod_path
                .strip_prefix(root)
                .and_then(|rest| rest.strip_prefix('/'))
            else {
                continue;
            };
            if let Some((locale, CATALOG_FILE_NAME)) = relative.split_once('/') {
                locales.insert(locale.to_string());
            }
        }
        Ok(locales.into_iter().collect())
    }

    /// Pod locales plus locales with a catalog on disk, sorted.
    pub fn known_locales(&self) -> CatalogResult<Vec<String>> {
        let mut locales: BTreeSet<String> = self.pod.list_locales().into_iter().collect();
        locales.extend(self.list_locales()?);
        Ok(locales.into_iter().collect())
    }

    /// Warn about locales whose territory is not upper case. Returns the
    /// warnings as `(locale, corrected)` pairs.
    pub fn validate_locales(&self, locales: &[String]) -> Vec<(String, String)> {
        let mut problems = Vec::new();
        for locale in locales {
            let Some((language, territory)) = locale.rsplit_once('_') else {
                continue;
            };
            if territory != territory.to_uppercase() {
                let corrected = format!("{}_{}", language, territory.to_uppercase());
                warn!(
                    "Translation directories are case sensitive (move {} -> {}).",
                    locale, corrected
                );
                problems.push((locale.clone(), corrected));
            }
        }
        problems
    }

    // ============================================================
    // Load and save
    // ============================================================

    fn load_path(&self, pod_path: &str, locale: Option<&str>) -> CatalogResult<Option<LoadedCatalog>> {
        if !self.pod.file_exists(pod_path) {
            return Ok(None);
        }
        let content = self.pod.read_file(pod_path)?;
        let loaded = read_po(pod_path, &content, locale)?;
        for warning in &loaded.warnings {
            warn!("{}", warning);
        }
        Ok(Some(loaded))
    }

    fn load_or_empty(
        &self,
        pod_path: &str,
        locale: Option<&str>,
        warnings: &mut Vec<ParseWarning>,
    ) -> CatalogResult<Catalog> {
        match self.load_path(pod_path, locale)? {
            Some(loaded) => {
                warnings.extend(loaded.warnings);
                Ok(loaded.catalog)
            }
            None => Ok(Catalog::new(locale).with_path(pod_path)),
        }
    }

    /// Load a locale catalog, or the template for `None`.
    pub fn load(&self, locale: Option<&str>) -> CatalogResult<Option<LoadedCatalog>> {
        match locale {
            Some(locale) => self.load_path(&self.catalog_path(locale), Some(locale)),
            None => self.load_path(self.template_path(), None),
        }
    }

    fn load_template(&self, warnings: &mut Vec<ParseWarning>) -> CatalogResult<Catalog> {
        match self.load(None)? {
            Some(loaded) => {
                warnings.extend(loaded.warnings);
                Ok(loaded.catalog)
            }
            None => Err(CatalogError::usage(format!(
                "Template catalog {} does not exist. Run extract first.",
                self.template_path()
            ))),
        }
    }

    /// Write `catalog` to `pod_path`, regenerating its header.
    pub fn save(
        &self,
        catalog: &mut Catalog,
        pod_path: &str,
        options: &WriteOptions,
    ) -> CatalogResult<()> {
        catalog.header = Some(build_header(catalog, &self.pod.podspec().metadata));
        catalog.pod_path = Some(pod_path.to_string());
        let text = write_po(catalog, options);
        self.pod.write_file(pod_path, text.as_bytes())?;
        Ok(())
    }

    fn fuzzy(&self, enabled: bool) -> Option<FuzzyMatching<'static>> {
        enabled.then(FuzzyMatching::sequence_ratio)
    }

    // ============================================================
    // Operations
    // ============================================================

    /// Create catalogs for `locales` from the template. Existing catalogs are
    /// left untouched.
    pub fn init(&self, locales: &[String], include_header: bool) -> CatalogResult<Outcome<InitReport>> {
        let mut warnings = Vec::new();
        let template = self.load_template(&mut warnings)?;
        let options = self.config.write_options(include_header);
        let mut report = InitReport::default();

        for locale in locales {
            let pod_path = self.catalog_path(locale);
            if self.pod.file_exists(&pod_path) {
                info!("Skipping: {} (already exists)", pod_path);
                report.skipped.push(locale.clone());
                continue;
            }

            let mut catalog = Catalog::new(Some(locale.as_str()));
            for message in template.iter().filter(|m| !m.obsolete) {
                catalog.insert(Message {
                    translation: None,
                    fuzzy: false,
                    ..message.clone()
                });
            }
            self.save(&mut catalog, &pod_path, &options)?;
            info!("Saved: {} ({} messages)", pod_path, catalog.len());
            report.created.push(locale.clone());
        }

        Ok(Outcome {
            value: report,
            warnings,
        })
    }

    /// Merge each locale catalog against the template and save it.
    pub fn update(&self, locales: &[String], options: &UpdateOptions) -> CatalogResult<Outcome<Vec<Catalog>>> {
        let mut warnings = Vec::new();
        let template = self.load_template(&mut warnings)?;
        let write = WriteOptions {
            include_obsolete: options.include_obsolete,
            ..self.config.write_options(options.include_header)
        };
        let merge_options = MergeOptions {
            include_obsolete: options.include_obsolete,
            fuzzy: self.fuzzy(options.use_fuzzy_matching),
            scope: None,
        };

        let mut updated = Vec::new();
        for locale in locales {
            info!("Updating: {}", locale);
            let pod_path = self.catalog_path(locale);
            let existing = self.load_or_empty(&pod_path, Some(locale.as_str()), &mut warnings)?;
            let (mut merged, stats) = merge_with_stats(&existing, &template, &merge_options);
            debug!("Merged {}: {:?}", locale, stats);
            self.save(&mut merged, &pod_path, &write)?;
            log_saved(&merged, &pod_path);
            updated.push(merged);
        }

        Ok(Outcome {
            value: updated,
            warnings,
        })
    }

    /// Scan the pod and merge the result into the template or into the
    /// locale catalogs.
    ///
    /// Nothing is saved when scanning fails.
    pub fn extract(&self, options: &ExtractOptions) -> CatalogResult<Outcome<Extracted>> {
        let ignores = PathFilter::new(&self.config.ignores)
            .map_err(|e| CatalogError::usage(format!("Invalid pattern in 'ignores': {}", e)))?;
        let paths = if options.paths.is_empty() {
            None
        } else {
            Some(
                PathFilter::new(&options.paths)
                    .map_err(|e| CatalogError::usage(format!("Invalid path pattern: {}", e)))?,
            )
        };

        let filter = ScanFilter {
            ignores,
            paths: paths.clone(),
        };
        let extracted = scan_pod(self.pod, &self.grammar, &filter)?;

        let mut warnings = Vec::new();
        let merge_options = MergeOptions {
            include_obsolete: options.include_obsolete,
            fuzzy: self.fuzzy(options.use_fuzzy_matching),
            scope: paths.as_ref(),
        };
        let write = WriteOptions {
            include_obsolete: options.include_obsolete,
            ..self.config.write_options(options.include_header)
        };

        if !options.localized {
            let pod_path = self.template_path();
            let existing = self.load_or_empty(pod_path, None, &mut warnings)?;
            let (mut template, stats) =
                merge_with_stats(&existing, &extracted.unlocalized, &merge_options);
            debug!("Merged template: {:?}", stats);
            self.save(&mut template, pod_path, &write)?;
            info!("Saved: {} ({} messages)", pod_path, template.count_live());
            return Ok(Outcome {
                value: Extracted::Template(template),
                warnings,
            });
        }

        let mut catalogs = Vec::new();
        for (locale, fresh) in &extracted.localized {
            if !options.locales.is_empty() && !options.locales.contains(locale) {
                continue;
            }
            let pod_path = self.catalog_path(locale);
            let existing = self.load_or_empty(&pod_path, Some(locale.as_str()), &mut warnings)?;
            let (mut merged, stats) = merge_with_stats(&existing, fresh, &merge_options);
            debug!("Merged {}: {:?}", locale, stats);
            self.save(&mut merged, &pod_path, &write)?;
            log_saved(&merged, &pod_path);
            catalogs.push(merged);
        }

        Ok(Outcome {
            value: Extracted::Localized(catalogs),
            warnings,
        })
    }

    /// Build binary catalogs for every known locale whose text form is newer,
    /// or for all of them when forced.
    pub fn compile(&self, force: bool) -> CatalogResult<Outcome<CompileReport>> {
        let locales = self.known_locales()?;
        self.validate_locales(&locales);
        let mut warnings = Vec::new();
        let mut report = CompileReport::default();

        for locale in locales {
            let text_path = self.catalog_path(&locale);
            let binary_path = self.binary_path(&locale);
            let text_modified = self.pod.modified(&text_path)?;
            if text_modified.is_none() {
                info!("Does not exist: {}", text_path);
                report.missing.push(locale);
                continue;
            }
            if !force && !needs_compilation(text_modified, self.pod.modified(&binary_path)?) {
                debug!("Up to date: {}", binary_path);
                report.up_to_date.push(locale);
                continue;
            }

            let catalog = self.load_or_empty(&text_path, Some(locale.as_str()), &mut warnings)?;
            self.pod.write_file(&binary_path, &compile_mo(&catalog))?;
            info!("Compiled: {}", binary_path);
            report.compiled.push(locale);
        }

        Ok(Outcome {
            value: report,
            warnings,
        })
    }

    /// Copy translations from external PO data into locale catalogs.
    pub fn import_translations(
        &self,
        source: &ImportSource,
        locale: Option<&str>,
        include_header: bool,
    ) -> CatalogResult<Outcome<Vec<ImportReport>>> {
        let batches = collect_batches(source, locale)?;
        // Importing only fills in translations; `#~` records stay.
        let options = WriteOptions {
            include_obsolete: true,
            ..self.config.write_options(include_header)
        };
        let mut warnings = Vec::new();
        let mut reports = Vec::new();

        for batch in batches {
            let imported = read_po(&batch.label, &batch.content, Some(batch.locale.as_str()))?;
            for warning in &imported.warnings {
                warn!("{}", warning);
            }
            warnings.extend(imported.warnings);

            let pod_path = self.catalog_path(&batch.locale);
            let mut target = self.load_or_empty(&pod_path, Some(batch.locale.as_str()), &mut warnings)?;
            let count = apply_translations(&mut target, &imported.catalog);
            self.save(&mut target, &pod_path, &options)?;
            info!("Imported {} translations: {} -> {}", count, batch.label, pod_path);
            reports.push(ImportReport {
                locale: batch.locale,
                source: batch.label,
                imported: count,
            });
        }

        Ok(Outcome {
            value: reports,
            warnings,
        })
    }

    /// Write the missing-translation subsets of locale catalogs.
    pub fn filter(&self, options: &FilterOptions) -> CatalogResult<Outcome<FilterReport>> {
        options.validate()?;
        let paths = options.path_filter()?;

        let locales = if options.locales.is_empty() {
            self.known_locales()?
        } else {
            options.locales.clone()
        };
        let write = WriteOptions {
            include_obsolete: options.include_obsolete,
            ..self.config.write_options(options.include_header)
        };
        let mut warnings = Vec::new();
        let mut report = FilterReport {
            subsets: Vec::new(),
            template: None,
        };

        for locale in &locales {
            let source_path = self.catalog_path(locale);
            let catalog = self.load_or_empty(&source_path, Some(locale.as_str()), &mut warnings)?;
            let mut subset = missing_subset(&catalog, paths.as_ref());

            let out_path = match (&options.out_dir, options.localized) {
                (Some(out_dir), true) => Some(locale_file(out_dir, locale, CATALOG_FILE_NAME)),
                _ => None,
            };
            if let Some(out_path) = &out_path {
                if subset.missing() == 0 {
                    info!("Skipping: {} (0 missing of {})", out_path, subset.total);
                } else {
                    info!(
                        "Saving: {} ({} missing of {})",
                        out_path,
                        subset.missing(),
                        subset.total
                    );
                    self.save(&mut subset.catalog, out_path, &write)?;
                }
            }
            report.subsets.push((subset, out_path));
        }

        if !options.localized
            && let Some(out_path) = &options.out_path
        {
            let subsets: Vec<MissingSubset> =
                report.subsets.iter().map(|(subset, _)| subset.clone()).collect();
            let mut template = union_missing(&subsets);
            let write = WriteOptions {
                sort: SortOrder::ByFile,
                ..write
            };
            self.save(&mut template, out_path, &write)?;
            info!("Saved: {} ({} messages)", out_path, template.len());
            report.template = Some((template, out_path.clone()));
        }

        Ok(Outcome {
            value: report,
            warnings,
        })
    }

    /// Message counts per known locale.
    pub fn stats(&self) -> CatalogResult<Outcome<Vec<LocaleStats>>> {
        let mut warnings = Vec::new();
        let mut stats = Vec::new();
        for locale in self.known_locales()? {
            let pod_path = self.catalog_path(&locale);
            let catalog = self.load_or_empty(&pod_path, Some(locale.as_str()), &mut warnings)?;
            let total = catalog.count_live();
            let translated = catalog.count_translated();
            stats.push(LocaleStats {
                locale,
                total,
                translated,
                fuzzy: catalog.count_fuzzy(),
                untranslated: total - translated,
            });
        }
        Ok(Outcome {
            value: stats,
            warnings,
        })
    }
}

fn locale_file(root: &str, locale: &str, file_name: &str) -> String {
    join_pod_path(root, &format!("{}/{}", locale, file_name))
}

fn log_saved(catalog: &Catalog, pod_path: &str) {
    info!(
        "Saved: {} ({}/{})",
        pod_path,
        catalog.count_translated(),
        catalog.count_live()
    );
}
