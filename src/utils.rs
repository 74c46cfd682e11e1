//! Common utility functions shared across the codebase.

use glob::{Pattern, PatternError};

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal path prefixes.
pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

fn normalize(pattern: &str) -> String {
    if pattern.starts_with('/') || pattern.starts_with('*') {
        pattern.to_string()
    } else {
        format!("/{}", pattern)
    }
}

/// Selects pod paths by glob pattern or literal prefix.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    prefixes: Vec<String>,
    patterns: Vec<Pattern>,
}

impl PathFilter {
    pub fn new(patterns: &[String]) -> Result<Self, PatternError> {
        let mut filter = PathFilter::default();
        for raw in patterns {
            let pattern = normalize(raw);
            if is_glob_pattern(&pattern) {
                filter.patterns.push(Pattern::new(&pattern)?);
            } else {
                filter.prefixes.push(pattern);
            }
        }
        Ok(filter)
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty() && self.patterns.is_empty()
    }

    pub fn matches(&self, pod_path: &str) -> bool {
        let prefix_match = self.prefixes.iter().any(|prefix| {
            let dir = prefix.trim_end_matches('/');
            pod_path == dir || pod_path.starts_with(&format!("{}/", dir))
        });
        prefix_match || self.patterns.iter().any(|p| p.matches(pod_path))
    }
}

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// The returned vector contains byte offsets where each line starts.
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
pub fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find line number for a byte offset using binary search.
///
/// Returns 1-based line number.
pub fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}
