use std::fmt;

use super::{Catalog, Header, Location, Message};
use crate::error::CatalogError;

/// A malformed record that was skipped while loading a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub path: String,
    pub line: usize,
    pub reason: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.path, self.line, self.reason)
    }
}

/// A catalog read from disk, plus the records that had to be skipped.
#[derive(Debug, Default)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Str,
}

#[derive(Debug, Default)]
struct Record {
    start_line: usize,
    user_comments: Vec<String>,
    auto_comments: Vec<String>,
    locations: Vec<Location>,
    fuzzy: bool,
    obsolete: bool,
    msgid: Option<String>,
    msgstr: Option<String>,
    field: Option<Field>,
    error: Option<(usize, String)>,
}

impl Record {
    fn is_started(&self) -> bool {
        self.start_line > 0
    }

    fn begin(&mut self, line: usize) {
        if self.start_line == 0 {
            self.start_line = line;
        }
    }

    fn fail(&mut self, line: usize, reason: impl Into<String>) {
        self.begin(line);
        if self.error.is_none() {
            self.error = Some((line, reason.into()));
        }
    }

    fn append(&mut self, text: String) -> bool {
        let target = match self.field {
            Some(Field::Id) => self.msgid.as_mut(),
            Some(Field::Str) => self.msgstr.as_mut(),
            None => None,
        };
        match target {
            Some(value) => {
                value.push_str(&text);
                true
            }
            None => false,
        }
    }
}

struct Parser<'a> {
    path: &'a str,
    catalog: Catalog,
    warnings: Vec<ParseWarning>,
    record: Record,
}

impl<'a> Parser<'a> {
    fn warn(&mut self, line: usize, reason: impl Into<String>) {
        self.warnings.push(ParseWarning {
            path: self.path.to_string(),
            line,
            reason: reason.into(),
        });
    }

    fn fatal(&self, reason: impl Into<String>) -> CatalogError {
        CatalogError::Parse {
            path: self.path.to_string(),
            reason: reason.into(),
        }
    }

    /// Finish the current record and start a fresh one.
    fn flush(&mut self) -> Result<(), CatalogError> {
        let record = std::mem::take(&mut self.record);
        if !record.is_started() {
            return Ok(());
        }

        let is_header = !record.obsolete && record.msgid.as_deref() == Some("");

        if let Some((line, reason)) = record.error {
            if is_header {
                return Err(self.fatal(format!("malformed header at line {}: {}", line, reason)));
            }
            self.warn(line, reason);
            return Ok(());
        }

        let Some(msgid) = record.msgid else {
            self.warn(record.start_line, "comment block without a message");
            return Ok(());
        };
        let Some(msgstr) = record.msgstr else {
            self.warn(record.start_line, "msgid without msgstr");
            return Ok(());
        };

        if is_header {
            if self.catalog.header.is_some() {
                self.warn(record.start_line, "duplicate header");
                return Ok(());
            }
            let header = Header::from_msgstr(record.user_comments, &msgstr)
                .map_err(|reason| self.fatal(reason))?;
            self.catalog.header = Some(header);
            return Ok(());
        }

        if self.catalog.contains(&msgid) {
            self.warn(
                record.start_line,
                format!("duplicate message id \"{}\"", msgid),
            );
            return Ok(());
        }

        self.catalog.insert(Message {
            id: msgid,
            translation: Some(msgstr).filter(|s| !s.is_empty()),
            auto_comments: record.auto_comments,
            user_comments: record.user_comments,
            locations: record.locations,
            fuzzy: record.fuzzy,
            obsolete: record.obsolete,
        });
        Ok(())
    }

    fn comment(&mut self, line_no: usize, body: &str) -> Result<(), CatalogError> {
        if self.record.msgstr.is_some() {
            self.flush()?;
        }
        self.record.begin(line_no);

        if let Some(rest) = body.strip_prefix("#.") {
            self.record.auto_comments.push(rest.trim().to_string());
        } else if let Some(rest) = body.strip_prefix("#:") {
            self.record
                .locations
                .extend(rest.split_whitespace().map(Location::parse));
        } else if let Some(rest) = body.strip_prefix("#,") {
            if rest.split(',').any(|flag| flag.trim() == "fuzzy") {
                self.record.fuzzy = true;
            }
        } else if body.starts_with("#|") {
            // Previous-msgid hints are not kept.
        } else {
            let rest = &body[1..];
            let rest = rest.strip_prefix(' ').unwrap_or(rest);
            self.record.user_comments.push(rest.to_string());
        }
        Ok(())
    }

    fn keyword(&mut self, line_no: usize, body: &str, obsolete: bool) -> Result<(), CatalogError> {
        if body.starts_with('"') {
            match unquote(body) {
                Ok(text) => {
                    if !self.record.append(text) {
                        self.record
                            .fail(line_no, "continuation line without a keyword");
                    }
                }
                Err(reason) => self.record.fail(line_no, reason),
            }
        } else if let Some(rest) = body.strip_prefix("msgid ") {
            if self.record.msgstr.is_some() {
                self.flush()?;
            }
            self.record.begin(line_no);
            if self.record.msgid.is_some() {
                self.record.fail(line_no, "msgid without msgstr");
                return Ok(());
            }
            match unquote(rest) {
                Ok(text) => {
                    self.record.msgid = Some(text);
                    self.record.obsolete = obsolete;
                    self.record.field = Some(Field::Id);
                }
                Err(reason) => self.record.fail(line_no, reason),
            }
        } else if let Some(rest) = body.strip_prefix("msgstr ") {
            if self.record.msgid.is_none() {
                self.record.fail(line_no, "msgstr without msgid");
            } else if self.record.msgstr.is_some() {
                self.record.fail(line_no, "duplicate msgstr");
            } else {
                match unquote(rest) {
                    Ok(text) => {
                        self.record.msgstr = Some(text);
                        self.record.field = Some(Field::Str);
                    }
                    Err(reason) => self.record.fail(line_no, reason),
                }
            }
        } else if body.starts_with("msgctxt") {
            self.record
                .fail(line_no, "message contexts are not supported");
        } else if body.starts_with("msgid_plural") || body.starts_with("msgstr[") {
            self.record.fail(line_no, "plural forms are not supported");
        } else {
            self.record
                .fail(line_no, format!("unexpected line \"{}\"", body));
        }
        Ok(())
    }

    fn line(&mut self, line_no: usize, line: &str) -> Result<(), CatalogError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return self.flush();
        }
        // The rest of a malformed record is skipped up to the next blank line.
        if self.record.error.is_some() {
            return Ok(());
        }

        match trimmed.strip_prefix("#~") {
            Some(rest) => {
                let rest = rest.trim_start();
                if rest.is_empty() {
                    return Ok(());
                }
                self.keyword(line_no, rest, true)
            }
            None if trimmed.starts_with('#') => self.comment(line_no, trimmed),
            None => self.keyword(line_no, trimmed, false),
        }
    }
}

/// Parse a quoted PO string, resolving backslash escapes.
fn unquote(text: &str) -> Result<String, String> {
    let text = text.trim();
    let Some(inner) = text.strip_prefix('"') else {
        return Err(format!("expected a quoted string, found \"{}\"", text));
    };

    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.char_indices();
    while let Some((index, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, 'n')) => result.push('\n'),
                Some((_, 't')) => result.push('\t'),
                Some((_, 'r')) => result.push('\r'),
                Some((_, '"')) => result.push('"'),
                Some((_, '\\')) => result.push('\\'),
                Some((_, other)) => {
                    result.push('\\');
                    result.push(other);
                }
                None => return Err("unterminated string".to_string()),
            },
            '"' => {
                let rest = &inner[index + 1..];
                if !rest.trim().is_empty() {
                    return Err(format!("unexpected text after string: \"{}\"", rest.trim()));
                }
                return Ok(result);
            }
            _ => result.push(c),
        }
    }
    Err("unterminated string".to_string())
}

/// Parse PO text. Malformed records become warnings; undecodable content or a
/// malformed header is fatal.
pub fn read_po(
    pod_path: &str,
    content: &[u8],
    locale: Option<&str>,
) -> Result<LoadedCatalog, CatalogError> {
    let text = std::str::from_utf8(content).map_err(|e| CatalogError::Parse {
        path: pod_path.to_string(),
        reason: format!("not valid UTF-8: {}", e),
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut parser = Parser {
        path: pod_path,
        catalog: Catalog::new(locale).with_path(pod_path),
        warnings: Vec::new(),
        record: Record::default(),
    };
    for (index, line) in text.lines().enumerate() {
        parser.line(index + 1, line)?;
    }
    parser.flush()?;

    Ok(LoadedCatalog {
        catalog: parser.catalog,
        warnings: parser.warnings,
    })
}
