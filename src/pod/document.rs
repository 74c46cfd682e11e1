use serde_yaml_ng::Value as YamlValue;

use super::{Node, StorageError};

/// Raw text of one section of a file, with the line it starts on (1-indexed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    pub text: String,
    pub first_line: usize,
}

impl SourceText {
    pub fn new(text: impl Into<String>, first_line: usize) -> Self {
        Self {
            text: text.into(),
            first_line,
        }
    }
}

/// A base document or one of its localized parts.
#[derive(Debug, Clone)]
pub struct Document {
    pub pod_path: String,
    /// Set only for document parts carrying their own `$locale`.
    pub locale: Option<String>,
    /// Locales declared for a base document (own or inherited from the collection).
    pub locales: Vec<String>,
    pub hidden: bool,
    /// Structured fields, still carrying their `@` tags.
    pub fields: Node,
    pub fields_source: Option<SourceText>,
    pub body: Option<SourceText>,
}

impl Document {
    pub fn is_part(&self) -> bool {
        self.locale.is_some()
    }
}

/// How a document file separates structured fields from its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Only field blocks, separated by `---`.
    Yaml,
    /// Front matter followed by a template body.
    FrontMatter,
}

impl DocumentFormat {
    pub fn from_path(pod_path: &str) -> Option<Self> {
        let ext = pod_path.rsplit_once('.').map(|(_, ext)| ext)?;
        match ext {
            "yaml" | "yml" => Some(DocumentFormat::Yaml),
            "md" | "html" => Some(DocumentFormat::FrontMatter),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawPart {
    pub fields: Option<SourceText>,
    pub body: Option<SourceText>,
}

/// Split file content on lines consisting of exactly `---`.
fn split_sections(content: &str) -> Vec<SourceText> {
    let mut sections = Vec::new();
    let mut current = String::new();
    let mut first_line = 1;

    for (index, line) in content.lines().enumerate() {
        if line.trim_end() == "---" {
            sections.push(SourceText::new(std::mem::take(&mut current), first_line));
            first_line = index + 2;
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    sections.push(SourceText::new(current, first_line));
    sections
}

fn is_blank(section: &SourceText) -> bool {
    section.text.trim().is_empty()
}

/// Split a document file into its parts.
pub fn split_parts(content: &str, format: DocumentFormat) -> Vec<RawPart> {
    let mut sections = split_sections(content);
    let has_front_matter = content
        .lines()
        .next()
        .is_some_and(|line| line.trim_end() == "---");
    if has_front_matter {
        sections.remove(0);
    }

    match format {
        DocumentFormat::Yaml => sections
            .into_iter()
            .filter(|section| !is_blank(section))
            .map(|section| RawPart {
                fields: Some(section),
                body: None,
            })
            .collect(),
        DocumentFormat::FrontMatter if !has_front_matter => vec![RawPart {
            fields: None,
            body: Some(sections.remove(0)),
        }],
        DocumentFormat::FrontMatter => {
            let mut parts = Vec::new();
            let mut iter = sections.into_iter();
            while let Some(fields) = iter.next() {
                let body = iter.next().filter(|body| !is_blank(body));
                if is_blank(&fields) && body.is_none() {
                    continue;
                }
                parts.push(RawPart {
                    fields: Some(fields),
                    body,
                });
            }
            parts
        }
    }
}

/// Parse a block of YAML into a node tree. Blank input is an empty object.
pub fn parse_fields(pod_path: &str, source: &str) -> Result<Node, StorageError> {
    if source.trim().is_empty() {
        return Ok(Node::empty_object());
    }
    let value: YamlValue =
        serde_yaml_ng::from_str(source).map_err(|source| StorageError::Yaml {
            path: pod_path.to_string(),
            source,
        })?;
    Ok(match Node::from_yaml(&value) {
        Node::Null => Node::empty_object(),
        node => node,
    })
}

/// Parse every part of a document file.
///
/// `inherited_locales` applies to a base document that does not declare
/// `$localization.locales` itself.
pub fn parse_document(
    pod_path: &str,
    content: &str,
    format: DocumentFormat,
    inherited_locales: &[String],
) -> Result<Vec<Document>, StorageError> {
    let mut documents = Vec::new();

    for part in split_parts(content, format) {
        let fields = match &part.fields {
            Some(source) => parse_fields(pod_path, &source.text)?,
            None => Node::empty_object(),
        };

        let locale = fields.get("$locale").and_then(Node::as_str).map(str::to_string);
        let locales = match fields.get_path("$localization.locales") {
            Some(declared) => declared.string_list(),
            None => inherited_locales.to_vec(),
        };
        let hidden = fields.get("$hidden").and_then(Node::as_bool).unwrap_or(false);

        documents.push(Document {
            pod_path: pod_path.to_string(),
            locales: if locale.is_some() { Vec::new() } else { locales },
            locale,
            hidden,
            fields,
            fields_source: part.fields,
            body: part.body,
        });
    }

    Ok(documents)
}
