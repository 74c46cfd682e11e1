use regex::Regex;
use thiserror::Error;

use super::Candidate;
use crate::pod::SourceText;
use crate::utils::{build_line_index, offset_to_line};

pub const DEFAULT_FUNCTION_NAMES: &[&str] = &["_", "gettext", "ngettext"];

/// Marker that turns a template comment into an extracted comment: `{#: text #}`.
const COMMENT_TAG: char = ':';

/// Template source contained a token the grammar could not read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct TokenError {
    pub line: usize,
    pub message: String,
}

/// Finds message-function call sites and `{% trans %}` blocks in template source.
///
/// Calls are only recognized inside `{{ ... }}` and `{% ... %}` tags, and only
/// when the first argument is a string literal.
#[derive(Debug, Clone)]
pub struct TemplateGrammar {
    call_re: Regex,
}

struct PendingComments {
    end_line: usize,
    comments: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Expression,
    Statement,
    Comment,
}

impl TagKind {
    fn closer(self) -> &'static str {
        match self {
            TagKind::Expression => "}}",
            TagKind::Statement => "%}",
            TagKind::Comment => "#}",
        }
    }
}

/// One delimited tag. `inner` excludes the delimiters.
struct Tag<'t> {
    kind: TagKind,
    start: usize,
    inner_start: usize,
    inner: &'t str,
    end: usize,
}

/// Body of a `{% trans %}` block, up to `{% pluralize %}` or `{% endtrans %}`.
struct TransBlock<'t> {
    body: &'t str,
    trimmed: bool,
    /// Offset just past `{% endtrans %}`.
    end: usize,
}

impl TemplateGrammar {
    pub fn new(function_names: &[String]) -> Result<Self, regex::Error> {
        let names: Vec<String> = function_names.iter().map(|n| regex::escape(n)).collect();
        let call_re = Regex::new(&format!(r"(?:^|[^\w.])({})\s*\(\s*", names.join("|")))?;
        Ok(Self { call_re })
    }

    pub fn with_defaults() -> Result<Self, regex::Error> {
        let names: Vec<String> = DEFAULT_FUNCTION_NAMES.iter().map(|s| s.to_string()).collect();
        Self::new(&names)
    }

    /// Extract `(line, id, comments)` for every literal message call and
    /// trans block in `source`.
    ///
    /// Lines are reported relative to the file, using `source.first_line`.
    /// Empty ids are skipped.
    pub fn extract(&self, source: &SourceText) -> Result<Vec<Candidate>, TokenError> {
        let text = source.text.as_str();
        let line_index = build_line_index(text);
        let file_line = |offset: usize| offset_to_line(&line_index, offset) + source.first_line - 1;

        let mut candidates = Vec::new();
        let mut pending: Option<PendingComments> = None;
        let mut pos = 0;

        while let Some(tag) = next_tag(text, pos) {
            pos = tag.end;
            match tag.kind {
                TagKind::Comment => {
                    let Some(comment) = tag.inner.trim().strip_prefix(COMMENT_TAG) else {
                        continue;
                    };
                    let start_line = file_line(tag.start);
                    let end_line = file_line(tag.end.saturating_sub(1));
                    let comment = comment.trim().to_string();
                    match pending.as_mut() {
                        Some(p) if start_line <= p.end_line + 1 => {
                            p.comments.push(comment);
                            p.end_line = end_line;
                        }
                        _ => {
                            pending = Some(PendingComments {
                                end_line,
                                comments: vec![comment],
                            })
                        }
                    }
                }
                TagKind::Statement if statement(tag.inner).0 == "trans" => {
                    let line = file_line(tag.start);
                    let block = trans_block(text, &tag).ok_or_else(|| TokenError {
                        line,
                        message: "trans block without endtrans".to_string(),
                    })?;
                    pos = block.end;
                    push_candidate(&mut candidates, &mut pending, line, trans_id(&block));
                }
                _ => {
                    for call in self.call_re.captures_iter(tag.inner) {
                        let (Some(whole), Some(name)) = (call.get(0), call.get(1)) else {
                            continue;
                        };
                        let line = file_line(tag.inner_start + name.start());
                        let args = &tag.inner[whole.end()..];

                        let Some(id) =
                            parse_literal(args).map_err(|message| TokenError { line, message })?
                        else {
                            continue;
                        };
                        push_candidate(&mut candidates, &mut pending, line, id);
                    }
                }
            }
        }

        Ok(candidates)
    }
}

fn push_candidate(
    candidates: &mut Vec<Candidate>,
    pending: &mut Option<PendingComments>,
    line: usize,
    id: String,
) {
    // An empty id would collide with the catalog header.
    if id.is_empty() {
        return;
    }
    let comments = match pending.take() {
        Some(p) if p.end_line == line || p.end_line + 1 == line => p.comments,
        _ => Vec::new(),
    };
    candidates.push(Candidate {
        line: Some(line),
        id,
        comments,
    });
}

/// Find the first tag opening at or after `from`.
///
/// A tag opener with no closer is skipped.
fn next_tag(text: &str, from: usize) -> Option<Tag<'_>> {
    let mut search = from;
    loop {
        let open = search + text.get(search..)?.find('{')?;
        search = open + 1;
        let kind = match text.as_bytes().get(open + 1) {
            Some(b'{') => TagKind::Expression,
            Some(b'%') => TagKind::Statement,
            Some(b'#') => TagKind::Comment,
            _ => continue,
        };
        let inner_start = open + 2;
        let Some(close) = find_closer(&text[inner_start..], kind) else {
            continue;
        };
        let inner_end = inner_start + close;
        return Some(Tag {
            kind,
            start: open,
            inner_start,
            inner: &text[inner_start..inner_end],
            end: inner_end + 2,
        });
    }
}

/// Offset of the closing delimiter in `body`, skipping quoted strings in
/// expression and statement tags.
fn find_closer(body: &str, kind: TagKind) -> Option<usize> {
    let closer = kind.closer();
    if kind == TagKind::Comment {
        return body.find(closer);
    }

    let mut quote = None;
    let mut chars = body.char_indices();
    while let Some((i, c)) = chars.next() {
        match quote {
            Some(_) if c == '\\' => {
                chars.next();
            }
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if body[i..].starts_with(closer) => return Some(i),
            None => {}
        }
    }
    // Unterminated literal: close at the first delimiter so the call reports it.
    body.find(closer)
}

/// Keyword and arguments of a statement tag, without whitespace-control marks.
fn statement(inner: &str) -> (&str, &str) {
    let inner = inner
        .trim()
        .trim_start_matches(['-', '+'])
        .trim_end_matches(['-', '+'])
        .trim();
    match inner.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (inner, ""),
    }
}

fn trans_block<'t>(text: &'t str, open: &Tag<'t>) -> Option<TransBlock<'t>> {
    let (_, params) = statement(open.inner);
    let trimmed = params
        .split(|c: char| c.is_whitespace() || c == ',')
        .any(|param| param == "trimmed");

    let mut singular_end = None;
    let mut pos = open.end;
    while let Some(tag) = next_tag(text, pos) {
        pos = tag.end;
        if tag.kind != TagKind::Statement {
            continue;
        }
        match statement(tag.inner).0 {
            "pluralize" => {
                singular_end.get_or_insert(tag.start);
            }
            "endtrans" => {
                let mut body = &text[open.end..singular_end.unwrap_or(tag.start)];
                // `-%}` and `{%-` eat the whitespace next to them.
                if open.inner.ends_with('-') {
                    body = body.trim_start();
                }
                if singular_end.is_none() && tag.inner.starts_with('-') {
                    body = body.trim_end();
                }
                return Some(TransBlock {
                    body,
                    trimmed,
                    end: tag.end,
                });
            }
            _ => {}
        }
    }
    None
}

/// Message id of a trans block: `{{ name }}` becomes `%(name)s`.
///
/// Literal `%` is doubled only when the id has placeholders.
fn trans_id(block: &TransBlock<'_>) -> String {
    let body = block.body;
    let mut id = String::new();
    let mut has_placeholders = false;
    let mut pos = 0;

    while let Some(tag) = next_tag(body, pos) {
        id.push_str(&body[pos..tag.start].replace('%', "%%"));
        if tag.kind == TagKind::Expression {
            let name = tag.inner.trim().trim_matches(['-', '+']).trim();
            id.push_str(&format!("%({})s", name));
            has_placeholders = true;
        }
        pos = tag.end;
    }
    id.push_str(&body[pos..].replace('%', "%%"));

    if !has_placeholders {
        id = id.replace("%%", "%");
    }
    if block.trimmed {
        id = id
            .trim()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
    }
    id
}

/// Parse a string literal at the start of `text`.
///
/// Returns `Ok(None)` when `text` does not start with a quote (a call with a
/// non-literal argument), and an error when the literal is never closed.
fn parse_literal(text: &str) -> Result<Option<String>, String> {
    let mut chars = text.chars();
    let quote = match chars.next() {
        Some(q @ ('\'' | '"')) => q,
        _ => return Ok(None),
    };

    let mut value = String::new();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n') => value.push('\n'),
                Some('t') => value.push('\t'),
                Some(escaped @ ('\\' | '\'' | '"')) => value.push(escaped),
                Some(other) => {
                    value.push('\\');
                    value.push(other);
                }
                None => break,
            },
            c if c == quote => return Ok(Some(value)),
            _ => value.push(c),
        }
    }
    Err("unterminated string literal".to_string())
}
