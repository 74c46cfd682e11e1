//! Missing-translation subsets for translator hand-off.

use crate::core::catalog::{Catalog, Message};
use crate::error::{CatalogError, CatalogResult};
use crate::utils::PathFilter;

/// Options of a filter run. Output paths are pod paths.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Single output catalog for unlocalized mode.
    pub out_path: Option<String>,
    /// Directory receiving `<locale>/messages.po` in localized mode.
    pub out_dir: Option<String>,
    pub include_obsolete: bool,
    pub localized: bool,
    /// Only messages with a location matching these patterns count as missing.
    pub paths: Vec<String>,
    pub include_header: bool,
    /// Locales to filter; empty means every known locale.
    pub locales: Vec<String>,
}

impl FilterOptions {
    /// Check the option combination. Runs before any storage access.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.localized && self.out_dir.is_none() {
            return Err(CatalogError::usage(
                "Must specify --out-dir when using --localized in order to generate localized catalogs.",
            ));
        }
        if !self.localized && self.out_path.is_none() {
            return Err(CatalogError::usage(
                "Must specify --out-path when not using --localized.",
            ));
        }
        Ok(())
    }

    pub fn path_filter(&self) -> CatalogResult<Option<PathFilter>> {
        if self.paths.is_empty() {
            return Ok(None);
        }
        PathFilter::new(&self.paths)
            .map(Some)
            .map_err(|e| CatalogError::usage(format!("Invalid path pattern: {}", e)))
    }
}

/// The missing subset of one locale catalog.
#[derive(Debug, Clone)]
pub struct MissingSubset {
    pub locale: String,
    /// Live messages in the source catalog.
    pub total: usize,
    pub catalog: Catalog,
}

impl MissingSubset {
    pub fn missing(&self) -> usize {
        self.catalog.len()
    }
}

/// Messages of `catalog` that still need a translation.
pub fn missing_subset(catalog: &Catalog, paths: Option<&PathFilter>) -> MissingSubset {
    let mut subset = Catalog::new(catalog.locale.as_deref());
    for message in catalog.list_untranslated(paths) {
        subset.insert(message.clone());
    }
    MissingSubset {
        locale: catalog.locale.clone().unwrap_or_default(),
        total: catalog.count_live(),
        catalog: subset,
    }
}

/// Locale-less union of every subset's missing messages, first-seen order.
///
/// Translations are dropped; a template carries ids only.
pub fn union_missing(subsets: &[MissingSubset]) -> Catalog {
    let mut union = Catalog::template();
    for subset in subsets {
        for message in subset.catalog.iter() {
            if union.contains(&message.id) {
                continue;
            }
            union.insert(Message {
                translation: None,
                fuzzy: false,
                ..message.clone()
            });
        }
    }
    union
}

#[cfg(test)]
mod tests {
    use crate::core::catalog::Location;
    use crate::core::filter::*;
    use pretty_assertions::assert_eq;

    fn catalog(locale: &str, entries: &[(&str, Option<&str>)]) -> Catalog {
        let mut catalog = Catalog::new(Some(locale));
        for (id, translation) in entries {
            let mut message =
                Message::new(*id).with_location(Location::with_line("/views/base.html", 1));
            message.translation = translation.map(str::to_string);
            catalog.insert(message);
        }
        catalog
    }

    #[test]
    fn test_validate_localized_requires_out_dir() {
        let options = FilterOptions {
            localized: true,
            out_path: Some("/out.po".to_string()),
            ..Default::default()
        };
        let err = options.validate().unwrap_err();
        assert!(err.is_usage());
        assert!(err.to_string().contains("--out-dir"));
    }

    #[test]
    fn test_validate_unlocalized_requires_out_path() {
        let options = FilterOptions {
            out_dir: Some("/out".to_string()),
            ..Default::default()
        };
        assert!(options.validate().unwrap_err().is_usage());
        let options = FilterOptions {
            out_path: Some("/out.po".to_string()),
            ..Default::default()
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_missing_subset_counts() {
        let mut fr = catalog(
            "fr",
            &[
                ("a", Some("A")),
                ("b", None),
                ("c", Some("")),
                ("d", Some("D")),
            ],
        );
        let mut old = Message::new("gone");
        old.obsolete = true;
        fr.insert(old);

        let subset = missing_subset(&fr, None);
        assert_eq!(subset.locale, "fr");
        assert_eq!(subset.total, 4);
        assert_eq!(subset.missing(), 2);
        assert_eq!(subset.catalog.ids().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn test_union_missing() {
        let fr = catalog("fr", &[("a", None), ("b", Some("B")), ("c", None)]);
        let de = catalog("de", &[("a", Some("")), ("b", None), ("d", Some("D"))]);
        let subsets = [missing_subset(&fr, None), missing_subset(&de, None)];

        let union = union_missing(&subsets);
        assert!(union.locale.is_none());
        assert_eq!(union.ids().collect::<Vec<_>>(), vec!["a", "c", "b"]);
        assert!(union.iter().all(|m| m.translation.is_none()));
    }

    #[test]
    fn test_invalid_path_pattern_is_usage_error() {
        let options = FilterOptions {
            paths: vec!["/views/[oops*".to_string()],
            ..Default::default()
        };
        assert!(options.path_filter().unwrap_err().is_usage());
    }
}
