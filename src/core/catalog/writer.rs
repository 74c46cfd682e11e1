use unicode_width::UnicodeWidthStr;

use super::{Catalog, Header, Message, SortOrder};

pub const DEFAULT_LINE_WIDTH: usize = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    pub include_header: bool,
    pub include_obsolete: bool,
    pub sort: SortOrder,
    /// Strings longer than this are wrapped onto continuation lines.
    pub width: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            include_header: false,
            include_obsolete: false,
            sort: SortOrder::Insertion,
            width: DEFAULT_LINE_WIDTH,
        }
    }
}

/// Serialize a catalog to gettext PO text.
pub fn write_po(catalog: &Catalog, options: &WriteOptions) -> String {
    let mut records = Vec::new();

    if options.include_header
        && let Some(header) = &catalog.header
    {
        records.push(header_record(header, options.width));
    }

    for message in catalog.sorted(options.sort) {
        if message.obsolete && !options.include_obsolete {
            continue;
        }
        records.push(message_record(message, options.width));
    }

    records.join("\n")
}

fn header_record(header: &Header, width: usize) -> String {
    let mut out = String::new();
    for line in &header.notice {
        push_comment(&mut out, "#", line);
    }
    push_string(&mut out, "", "msgid", "", width);
    push_string(&mut out, "", "msgstr", &header.to_msgstr(), width);
    out
}

fn message_record(message: &Message, width: usize) -> String {
    let mut out = String::new();

    for comment in &message.user_comments {
        push_comment(&mut out, "#", comment);
    }

    let prefix = if message.obsolete {
        "#~ "
    } else {
        for comment in &message.auto_comments {
            for line in comment.lines() {
                push_comment(&mut out, "#.", line);
            }
        }
        for location in &message.locations {
            push_comment(&mut out, "#:", &location.to_string());
        }
        if message.fuzzy {
            out.push_str("#, fuzzy\n");
        }
        ""
    };

    push_string(&mut out, prefix, "msgid", &message.id, width);
    push_string(
        &mut out,
        prefix,
        "msgstr",
        message.translation.as_deref().unwrap_or(""),
        width,
    );
    out
}

fn push_comment(out: &mut String, marker: &str, text: &str) {
    out.push_str(marker);
    if !text.is_empty() {
        out.push(' ');
        out.push_str(text);
    }
    out.push('\n');
}

fn push_string(out: &mut String, prefix: &str, keyword: &str, value: &str, width: usize) {
    for line in quoted_lines(keyword, value, width) {
        out.push_str(prefix);
        out.push_str(&line);
        out.push('\n');
    }
}

/// Render `keyword "value"`, wrapping onto continuation lines when the value
/// contains inner newlines or does not fit in `width` columns.
fn quoted_lines(keyword: &str, value: &str, width: usize) -> Vec<String> {
    let single = format!("{} \"{}\"", keyword, escape(value));
    let has_inner_newline = value.trim_end_matches('\n').contains('\n');
    if !has_inner_newline && UnicodeWidthStr::width(single.as_str()) <= width {
        return vec![single];
    }

    let mut lines = vec![format!("{} \"\"", keyword)];
    for chunk in wrap(value, width.saturating_sub(2).max(1)) {
        lines.push(format!("\"{}\"", escape(&chunk)));
    }
    lines
}

/// Split `value` into chunks that end at newlines and, where possible, fit
/// `limit` columns once escaped. Long runs without spaces are not broken.
fn wrap(value: &str, limit: usize) -> Vec<String> {
    let fits = |text: &str| UnicodeWidthStr::width(escape(text).as_str()) <= limit;
    let mut chunks = Vec::new();

    for segment in value.split_inclusive('\n') {
        if fits(segment) {
            chunks.push(segment.to_string());
            continue;
        }
        let mut current = String::new();
        for word in segment.split_inclusive(' ') {
            if !current.is_empty() && !fits(&format!("{}{}", current, word)) {
                chunks.push(std::mem::take(&mut current));
            }
            current.push_str(word);
        }
        if !current.is_empty() {
            chunks.push(current);
        }
    }
    chunks
}

pub(crate) fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    escaped
}
