use std::fmt;

/// Where a message was found: a pod path and, when known, a line (1-indexed).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub path: String,
    pub line: Option<usize>,
}

impl Location {
    pub fn new(path: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            path: path.into(),
            line: line.filter(|&l| l > 0),
        }
    }

    pub fn with_line(path: impl Into<String>, line: usize) -> Self {
        Self::new(path, Some(line))
    }

    /// Parse the `path[:line]` form used in catalog location comments.
    pub fn parse(token: &str) -> Self {
        match token.rsplit_once(':') {
            Some((path, line))
                if !path.is_empty() && !line.is_empty() && line.bytes().all(|b| b.is_ascii_digit()) =>
            {
                Self::new(path, line.parse().ok())
            }
            _ => Self::new(token, None),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.path, line),
            None => write!(f, "{}", self.path),
        }
    }
}

/// A translatable unit, keyed by its source-language string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    /// `None` (or an empty string) means untranslated.
    pub translation: Option<String>,
    /// Comments produced by extraction (`#.`).
    pub auto_comments: Vec<String>,
    /// Comments written by translators (`# `); never produced by extraction.
    pub user_comments: Vec<String>,
    pub locations: Vec<Location>,
    pub fuzzy: bool,
    pub obsolete: bool,
}

impl Message {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_translation(mut self, translation: impl Into<String>) -> Self {
        self.translation = Some(translation.into());
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    pub fn with_auto_comments(mut self, comments: Vec<String>) -> Self {
        self.auto_comments = comments;
        self
    }

    pub fn is_translated(&self) -> bool {
        self.translation.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Untranslated and still live; what translators need to work on.
    pub fn is_missing(&self) -> bool {
        !self.obsolete && !self.is_translated()
    }
}
