//! Content units and the locale scope of the strings they contain.

use enum_dispatch::enum_dispatch;

use super::tagged::{FieldLines, TaggedFields};
use crate::pod::{Document, Node, Row, SourceText};

/// Locales a unit's messages are routed to, besides the template aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleSet {
    /// Only the locale-less aggregate receives the messages.
    TemplateOnly,
    Locales(Vec<String>),
}

impl LocaleSet {
    pub fn locales(&self) -> &[String] {
        match self {
            LocaleSet::TemplateOnly => &[],
            LocaleSet::Locales(locales) => locales,
        }
    }
}

/// A source of translatable strings with a known locale scope.
#[enum_dispatch]
pub trait ScopedUnit {
    fn pod_path(&self) -> &str;

    /// Resolve the locales this unit's strings apply to.
    fn locale_scope(&self, pod_locales: &[String]) -> LocaleSet;

    fn tagged_fields(&self) -> Option<TaggedFields<'_>> {
        None
    }

    fn template_source(&self) -> Option<&SourceText> {
        None
    }
}

fn document_fields(doc: &Document) -> TaggedFields<'_> {
    TaggedFields {
        fields: &doc.fields,
        lines: match &doc.fields_source {
            Some(source) => FieldLines::Source(source),
            None => FieldLines::Unknown,
        },
    }
}

/// A localized part of a document, carrying its own `$locale`.
#[derive(Debug, Clone)]
pub struct DocumentPartUnit(pub Document);

impl ScopedUnit for DocumentPartUnit {
    fn pod_path(&self) -> &str {
        &self.0.pod_path
    }

    fn locale_scope(&self, _pod_locales: &[String]) -> LocaleSet {
        LocaleSet::Locales(self.0.locale.iter().cloned().collect())
    }

    fn tagged_fields(&self) -> Option<TaggedFields<'_>> {
        Some(document_fields(&self.0))
    }

    fn template_source(&self) -> Option<&SourceText> {
        self.0.body.as_ref()
    }
}

/// The base rendition of a document.
#[derive(Debug, Clone)]
pub struct BaseDocumentUnit(pub Document);

impl ScopedUnit for BaseDocumentUnit {
    fn pod_path(&self) -> &str {
        &self.0.pod_path
    }

    fn locale_scope(&self, _pod_locales: &[String]) -> LocaleSet {
        if self.0.locales.is_empty() {
            LocaleSet::TemplateOnly
        } else {
            LocaleSet::Locales(self.0.locales.clone())
        }
    }

    fn tagged_fields(&self) -> Option<TaggedFields<'_>> {
        Some(document_fields(&self.0))
    }

    fn template_source(&self) -> Option<&SourceText> {
        self.0.body.as_ref()
    }
}

/// One record of a collection's tabular data.
#[derive(Debug, Clone)]
pub struct TableRowUnit {
    pub pod_path: String,
    pub row: Row,
    pub collection_locales: Vec<String>,
}

impl ScopedUnit for TableRowUnit {
    fn pod_path(&self) -> &str {
        &self.pod_path
    }

    fn locale_scope(&self, _pod_locales: &[String]) -> LocaleSet {
        LocaleSet::Locales(self.collection_locales.clone())
    }

    fn tagged_fields(&self) -> Option<TaggedFields<'_>> {
        Some(TaggedFields {
            fields: &self.row.fields,
            lines: FieldLines::Fixed(self.row.line),
        })
    }
}

/// Structured data stored directly under `/content/`.
#[derive(Debug, Clone)]
pub struct RootDataUnit(pub Document);

impl ScopedUnit for RootDataUnit {
    fn pod_path(&self) -> &str {
        &self.0.pod_path
    }

    fn locale_scope(&self, pod_locales: &[String]) -> LocaleSet {
        LocaleSet::Locales(pod_locales.to_vec())
    }

    fn tagged_fields(&self) -> Option<TaggedFields<'_>> {
        Some(document_fields(&self.0))
    }
}

/// The podspec itself.
#[derive(Debug, Clone)]
pub struct PodConfigUnit {
    pub pod_path: String,
    pub config: Node,
    pub source: SourceText,
}

impl ScopedUnit for PodConfigUnit {
    fn pod_path(&self) -> &str {
        &self.pod_path
    }

    fn locale_scope(&self, pod_locales: &[String]) -> LocaleSet {
        LocaleSet::Locales(pod_locales.to_vec())
    }

    fn tagged_fields(&self) -> Option<TaggedFields<'_>> {
        Some(TaggedFields {
            fields: &self.config,
            lines: FieldLines::Source(&self.source),
        })
    }
}

/// A template file under `/views/`.
#[derive(Debug, Clone)]
pub struct ViewUnit {
    pub pod_path: String,
    pub source: SourceText,
}

impl ScopedUnit for ViewUnit {
    fn pod_path(&self) -> &str {
        &self.pod_path
    }

    fn locale_scope(&self, pod_locales: &[String]) -> LocaleSet {
        LocaleSet::Locales(pod_locales.to_vec())
    }

    fn template_source(&self) -> Option<&SourceText> {
        Some(&self.source)
    }
}

#[enum_dispatch(ScopedUnit)]
#[derive(Debug, Clone)]
pub enum ContentUnit {
    DocumentPart(DocumentPartUnit),
    BaseDocument(BaseDocumentUnit),
    TableRow(TableRowUnit),
    RootData(RootDataUnit),
    PodConfig(PodConfigUnit),
    View(ViewUnit),
}

impl ContentUnit {
    pub fn from_document(doc: Document) -> Self {
        if doc.is_part() {
            DocumentPartUnit(doc).into()
        } else {
            BaseDocumentUnit(doc).into()
        }
    }
}
