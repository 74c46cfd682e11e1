use super::{Node, SourceText, StorageError, document::parse_fields};

pub const PODSPEC_PATH: &str = "/podspec.yaml";

/// Pod-level facts used when generating catalog headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PodMetadata {
    pub project: String,
    pub header_comment: Option<String>,
}

/// The parsed `/podspec.yaml`.
#[derive(Debug, Clone)]
pub struct Podspec {
    pub config: Node,
    pub source: SourceText,
    pub locales: Vec<String>,
    pub metadata: PodMetadata,
}

impl Podspec {
    /// Parse podspec text. `fallback_project` names the project when the
    /// podspec has no `title`.
    pub fn parse(content: &str, fallback_project: &str) -> Result<Self, StorageError> {
        let config = parse_fields(PODSPEC_PATH, content)?;
        let locales = config
            .get_path("localization.locales")
            .map(Node::string_list)
            .unwrap_or_default();
        let project = config
            .get("title")
            .and_then(Node::as_str)
            .unwrap_or(fallback_project)
            .to_string();
        let header_comment = config
            .get_path("localization.header_comment")
            .and_then(Node::as_str)
            .map(|s| s.trim_end().to_string());

        Ok(Self {
            config,
            source: SourceText::new(content, 1),
            locales,
            metadata: PodMetadata {
                project,
                header_comment,
            },
        })
    }

    pub fn empty(fallback_project: &str) -> Self {
        Self {
            config: Node::empty_object(),
            source: SourceText::new("", 1),
            locales: Vec::new(),
            metadata: PodMetadata {
                project: fallback_project.to_string(),
                header_comment: None,
            },
        }
    }
}
