//! Three-way update of an existing catalog against a fresh extraction.

mod similarity;

pub use similarity::{DEFAULT_FUZZY_THRESHOLD, FuzzyMatching, SequenceRatio, Similarity};

use crate::core::catalog::{Catalog, Message};
use crate::utils::PathFilter;

#[derive(Clone, Copy, Default)]
pub struct MergeOptions<'a> {
    /// Keep messages that disappeared from the extraction, marked obsolete.
    pub include_obsolete: bool,
    /// Carry translations over from near-identical ids.
    pub fuzzy: Option<FuzzyMatching<'a>>,
    /// When set, only messages located under these paths were re-extracted;
    /// existing messages located entirely elsewhere are kept as they are.
    pub scope: Option<&'a PathFilter>,
}

/// Counts of what a merge did, for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    pub kept: usize,
    pub fuzzy: usize,
    pub obsolete: usize,
}

/// Merge `extracted` into `existing`, producing a new catalog.
///
/// - ids in both keep the existing translation and translator comments, take
///   locations and auto comments from `extracted`, and are no longer fuzzy
/// - ids only in `extracted` are added untranslated, unless fuzzy matching
///   finds a close existing translation, which is copied and flagged fuzzy
/// - ids only in `existing` become obsolete and are kept only when
///   `include_obsolete` is set
///
/// Output order is the extraction's order, then out-of-scope messages, then
/// obsolete ones.
pub fn merge(existing: &Catalog, extracted: &Catalog, options: &MergeOptions<'_>) -> Catalog {
    merge_with_stats(existing, extracted, options).0
}

pub fn merge_with_stats(
    existing: &Catalog,
    extracted: &Catalog,
    options: &MergeOptions<'_>,
) -> (Catalog, MergeStats) {
    let mut merged = Catalog::new(extracted.locale.as_deref().or(existing.locale.as_deref()));
    merged.pod_path = existing.pod_path.clone();
    merged.header = existing.header.clone();
    let mut stats = MergeStats::default();

    // Fuzzy candidates: every live translated id, including ones still extracted
    let candidates: Vec<&str> = match options.fuzzy {
        Some(_) => existing
            .iter()
            .filter(|m| !m.obsolete && !m.id.is_empty() && m.is_translated())
            .map(|m| m.id.as_str())
            .collect(),
        None => Vec::new(),
    };

    for new in extracted.iter() {
        let mut message = Message {
            obsolete: false,
            fuzzy: false,
            ..new.clone()
        };

        if let Some(old) = existing.get(&new.id) {
            message.translation = old.translation.clone();
            message.user_comments = old.user_comments.clone();
            stats.kept += 1;
        } else if let Some(old) = options
            .fuzzy
            .and_then(|fuzzy| fuzzy.best_match(&new.id, candidates.iter().copied()))
            .and_then(|id| existing.get(id))
        {
            message.translation = old.translation.clone();
            message.user_comments = old.user_comments.clone();
            message.fuzzy = true;
            stats.fuzzy += 1;
        } else {
            stats.added += 1;
        }

        merged.insert(message);
    }

    let mut obsolete = Vec::new();
    for old in existing.iter() {
        if extracted.contains(&old.id) {
            continue;
        }
        if let Some(scope) = options.scope {
            let in_scope = old.locations.iter().any(|loc| scope.matches(&loc.path));
            if !old.obsolete && !in_scope {
                merged.insert(old.clone());
                continue;
            }
        }
        if options.include_obsolete {
            obsolete.push(Message {
                obsolete: true,
                ..old.clone()
            });
        }
        stats.obsolete += 1;
    }
    for message in obsolete {
        merged.insert(message);
    }

    (merged, stats)
}
