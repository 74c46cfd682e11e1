use std::collections::HashMap;

use super::Candidate;
use crate::pod::{Node, SourceText, walk};
use crate::utils::{build_line_index, offset_to_line};

/// Suffix marking a translatable field key.
pub const TAG_SUFFIX: char = '@';
/// Appended to a tagged key to name its comment sibling (`title@#`).
pub const COMMENT_SUFFIX: char = '#';

/// Where the lines of tagged fields come from.
#[derive(Debug, Clone, Copy)]
pub enum FieldLines<'a> {
    /// Look keys up in the raw text the fields were parsed from.
    Source(&'a SourceText),
    /// Every field sits on one known line (a CSV record).
    Fixed(usize),
    Unknown,
}

/// Tagged fields of a unit together with their line source.
#[derive(Debug, Clone, Copy)]
pub struct TaggedFields<'a> {
    pub fields: &'a Node,
    pub lines: FieldLines<'a>,
}

/// Finds the line of each successive occurrence of a key in raw YAML text.
struct KeyLocator<'a> {
    source: &'a SourceText,
    line_index: Vec<usize>,
    cursors: HashMap<String, usize>,
}

impl<'a> KeyLocator<'a> {
    fn new(source: &'a SourceText) -> Self {
        Self {
            source,
            line_index: build_line_index(&source.text),
            cursors: HashMap::new(),
        }
    }

    fn locate(&mut self, key: &str) -> Option<usize> {
        let text = self.source.text.as_str();
        let mut pos = self.cursors.get(key).copied().unwrap_or(0);

        while let Some(relative) = text[pos..].find(key) {
            let start = pos + relative;
            let end = start + key.len();
            let at_key_start = text[..start].chars().next_back().is_none_or(|c| {
                c.is_whitespace() || matches!(c, '-' | '{' | ',' | '"' | '\'')
            });
            let followed_by_colon = text[end..]
                .trim_start_matches(['"', '\'', ' '])
                .starts_with(':');

            if at_key_start && followed_by_colon {
                self.cursors.insert(key.to_string(), end);
                let line = offset_to_line(&self.line_index, start);
                return Some(line + self.source.first_line - 1);
            }
            pos = end;
        }
        None
    }
}

/// Extract every tagged string field, at any depth, in document order.
pub fn extract_tagged(tagged: TaggedFields<'_>) -> Vec<Candidate> {
    let mut locator = match tagged.lines {
        FieldLines::Source(source) => Some(KeyLocator::new(source)),
        _ => None,
    };
    let mut candidates = Vec::new();

    walk(tagged.fields, &mut |visit| {
        let Some(key) = visit.key.as_field() else {
            return;
        };
        if !key.ends_with(TAG_SUFFIX) {
            return;
        }
        let Some(id) = visit.value.as_str() else {
            return;
        };

        let comment_key = format!("{key}{COMMENT_SUFFIX}");
        let comments = visit
            .parent
            .get(&comment_key)
            .and_then(Node::as_str)
            .filter(|c| !c.is_empty())
            .map(|c| vec![c.to_string()])
            .unwrap_or_default();

        let line = match (tagged.lines, locator.as_mut()) {
            (FieldLines::Fixed(line), _) => Some(line),
            (_, Some(locator)) => locator.locate(key),
            _ => None,
        };
        // An empty id would collide with the catalog header. The key is still
        // located so later fields with the same key keep their lines.
        if id.is_empty() {
            return;
        }

        candidates.push(Candidate {
            line,
            id: id.to_string(),
            comments,
        });
    });

    candidates
}
