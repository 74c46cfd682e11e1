use super::Catalog;
use crate::pod::PodMetadata;

const GENERATED_BY: &str = concat!("podcat ", env!("CARGO_PKG_VERSION"));

/// Catalog header: notice comment lines plus `Name: value` metadata fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub notice: Vec<String>,
    pub fields: Vec<(String, String)>,
}

impl Header {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Header fields as stored in the `msgstr` of the header record.
    pub fn to_msgstr(&self) -> String {
        self.fields
            .iter()
            .map(|(name, value)| format!("{}: {}\n", name, value))
            .collect()
    }

    /// Parse the `msgstr` of a header record.
    pub fn from_msgstr(notice: Vec<String>, msgstr: &str) -> Result<Self, String> {
        let mut fields = Vec::new();
        for line in msgstr.lines().filter(|line| !line.trim().is_empty()) {
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| format!("malformed header field \"{}\"", line))?;
            fields.push((name.trim().to_string(), value.trim().to_string()));
        }
        Ok(Self { notice, fields })
    }
}

/// Build the header for `catalog`.
///
/// Depends only on the catalog's locale and the pod metadata, so the same
/// inputs always give the same header.
pub fn build_header(catalog: &Catalog, metadata: &PodMetadata) -> Header {
    let notice = match &metadata.header_comment {
        Some(comment) => comment.lines().map(str::to_string).collect(),
        None => match &catalog.locale {
            Some(locale) => vec![format!(
                "{} translations for {}.",
                locale, metadata.project
            )],
            None => vec![format!("Translations template for {}.", metadata.project)],
        },
    };

    let mut fields = vec![(
        "Project-Id-Version".to_string(),
        metadata.project.clone(),
    )];
    if let Some(locale) = &catalog.locale {
        fields.push(("Language".to_string(), locale.clone()));
    }
    fields.extend(
        [
            ("MIME-Version", "1.0"),
            ("Content-Type", "text/plain; charset=utf-8"),
            ("Content-Transfer-Encoding", "8bit"),
            ("Generated-By", GENERATED_BY),
        ]
        .map(|(name, value)| (name.to_string(), value.to_string())),
    );

    Header { notice, fields }
}
