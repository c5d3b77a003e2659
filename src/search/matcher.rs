use std::ops::Range;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// How the query text is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The query is a literal substring; pattern syntax has no meaning.
    #[default]
    Literal,
    /// The query is a regular expression. An invalid pattern matches nothing.
    Pattern,
}

/// Case-insensitive matcher for a single query.
#[derive(Debug, Clone)]
pub struct QueryMatcher {
    query: String,
    regex: Option<Regex>,
}

impl QueryMatcher {
    pub fn new(query: &str, mode: MatchMode) -> Self {
        if query.is_empty() {
            return Self {
                query: String::new(),
                regex: None,
            };
        }

        let source = match mode {
            MatchMode::Literal => regex::escape(query),
            MatchMode::Pattern => query.to_string(),
        };

        let regex = match RegexBuilder::new(&source).case_insensitive(true).build() {
            Ok(regex) => Some(regex),
            Err(e) => {
                log::debug!("Query {query:?} does not compile, nothing will match: {e}");
                None
            }
        };

        Self {
            query: query.to_string(),
            regex,
        }
    }

    pub fn literal(query: &str) -> Self {
        Self::new(query, MatchMode::Literal)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Whether a section with this text stays visible.
    ///
    /// An empty query keeps everything visible.
    pub fn is_match(&self, text: &str) -> bool {
        self.is_empty() || !self.find_ranges(text).is_empty()
    }

    /// Byte ranges of every match in `text`, left to right and
    /// non-overlapping. Empty matches are skipped.
    pub fn find_ranges(&self, text: &str) -> Vec<Range<usize>> {
        let Some(ref regex) = self.regex else {
            return Vec::new();
        };

        regex
            .find_iter(text)
            .filter(|m| !m.is_empty())
            .map(|m| m.range())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_matches_everything() {
        let matcher = QueryMatcher::literal("");
        assert!(matcher.is_match("apa saja"));
        assert!(matcher.is_match(""));
        assert!(matcher.find_ranges("apa saja").is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let matcher = QueryMatcher::literal("jagung");
        assert!(matcher.is_match("Jagung Hibrida"));
        assert_eq!(matcher.find_ranges("Jagung Hibrida"), vec![0..6]);
        assert_eq!(QueryMatcher::literal("JAGUNG").find_ranges("jagung"), vec![0..6]);
    }

    #[test]
    fn test_multiple_non_overlapping_matches() {
        let matcher = QueryMatcher::literal("aa");
        assert_eq!(matcher.find_ranges("aaaaa"), vec![0..2, 2..4]);
    }

    #[test]
    fn test_literal_mode_escapes_pattern_characters() {
        let matcher = QueryMatcher::literal("5.8 (t/ha)");
        assert!(matcher.is_match("Tanah baik: 5.8 (t/ha)"));
        assert!(!matcher.is_match("Tanah baik: 508 t/ha"));

        let star = QueryMatcher::literal("a*");
        assert!(!star.is_match("aaa"));
        assert_eq!(star.find_ranges("a* b"), vec![0..2]);
    }

    #[test]
    fn test_unclosed_group_is_literal_in_literal_mode() {
        let matcher = QueryMatcher::literal("(hibrida");
        assert!(matcher.is_match("jagung (Hibrida"));
    }

    #[test]
    fn test_pattern_mode() {
        let matcher = QueryMatcher::new("hib.ida", MatchMode::Pattern);
        assert!(matcher.is_match("Jagung HIBRIDA"));
    }

    #[test]
    fn test_invalid_pattern_matches_nothing() {
        let matcher = QueryMatcher::new("(hibrida", MatchMode::Pattern);
        assert!(!matcher.is_match("jagung (hibrida"));
        assert!(matcher.find_ranges("jagung (hibrida").is_empty());
    }

    #[test]
    fn test_pattern_mode_skips_empty_matches() {
        let matcher = QueryMatcher::new("x*", MatchMode::Pattern);
        assert!(!matcher.is_match("jagung"));
        assert_eq!(matcher.find_ranges("axxb"), vec![1..3]);
    }

    #[test]
    fn test_unicode_ranges_are_byte_offsets() {
        let matcher = QueryMatcher::literal("pérsil");
        let text = "Lahan PÉRSIL";
        let ranges = matcher.find_ranges(text);
        assert_eq!(ranges.len(), 1);
        assert_eq!(&text[ranges[0].clone()], "PÉRSIL");
    }
}
