/// Minimum score for a fuzzy match to carry a translation over.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.6;

/// Closeness of two message ids, from 0.0 (unrelated) to 1.0 (identical).
pub trait Similarity: Send + Sync {
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Ratcliff/Obershelp ratio: `2 * M / T`, where `M` counts characters in
/// recursively found longest common blocks and `T` is the total length.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceRatio;

impl Similarity for SequenceRatio {
    fn score(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let total = a.len() + b.len();
        if total == 0 {
            return 1.0;
        }
        2.0 * matching_chars(&a, &b) as f64 / total as f64
    }
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + len..], &b[j + len..])
}

/// Start in `a`, start in `b` and length of the longest common substring.
/// The earliest block wins ties.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for i in 0..a.len() {
        for j in 0..b.len() {
            current[j + 1] = if a[i] == b[j] { previous[j] + 1 } else { 0 };
            let len = current[j + 1];
            if len > best.2 {
                best = (i + 1 - len, j + 1 - len, len);
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }
    best
}

/// A similarity function paired with its acceptance threshold.
#[derive(Clone, Copy)]
pub struct FuzzyMatching<'a> {
    pub similarity: &'a dyn Similarity,
    pub threshold: f64,
}

impl FuzzyMatching<'static> {
    pub fn sequence_ratio() -> Self {
        Self {
            similarity: &SequenceRatio,
            threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }
}

/// Ids are compared lowercased with surrounding whitespace removed.
fn match_key(id: &str) -> String {
    id.trim().to_lowercase()
}

impl<'a> FuzzyMatching<'a> {
    /// The best candidate at or above the threshold; earlier candidates win ties.
    pub fn best_match<'m, I>(&self, id: &str, candidates: I) -> Option<&'m str>
    where
        I: IntoIterator<Item = &'m str>,
    {
        let key = match_key(id);
        let mut best: Option<(&'m str, f64)> = None;
        for candidate in candidates {
            let score = self.similarity.score(&key, &match_key(candidate));
            if score < self.threshold {
                continue;
            }
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((candidate, score));
            }
        }
        best.map(|(candidate, _)| candidate)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::merge::similarity::*;

    #[test]
    fn test_sequence_ratio() {
        let ratio = SequenceRatio;
        assert_eq!(ratio.score("", ""), 1.0);
        assert_eq!(ratio.score("Hello", "Hello"), 1.0);
        assert_eq!(ratio.score("abc", "xyz"), 0.0);
        // "abcd" vs "bcde": common block "bcd" -> 2 * 3 / 8
        assert_eq!(ratio.score("abcd", "bcde"), 0.75);
    }

    #[test]
    fn test_best_match_respects_threshold() {
        let fuzzy = FuzzyMatching::sequence_ratio();
        let candidates = ["Goodbye", "Hello world!", "Hello world"];
        assert_eq!(
            fuzzy.best_match("Hello, world", candidates),
            Some("Hello world")
        );
        assert_eq!(fuzzy.best_match("Completely different", candidates), None);
    }

    #[test]
    fn test_best_match_ignores_case_and_padding() {
        let fuzzy = FuzzyMatching::sequence_ratio();
        assert_eq!(
            fuzzy.best_match("  WELCOME BACK ", ["Goodbye", "Welcome back!"]),
            Some("Welcome back!")
        );
    }

    struct Exact;

    impl Similarity for Exact {
        fn score(&self, a: &str, b: &str) -> f64 {
            if a.eq_ignore_ascii_case(b) { 1.0 } else { 0.0 }
        }
    }

    #[test]
    fn test_custom_similarity() {
        let fuzzy = FuzzyMatching {
            similarity: &Exact,
            threshold: 0.5,
        };
        assert_eq!(fuzzy.best_match("HELLO", ["hello", "help"]), Some("hello"));
        assert_eq!(fuzzy.best_match("hel", ["hello"]), None);
    }
}
