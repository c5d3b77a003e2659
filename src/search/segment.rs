use serde::Serialize;

use super::matcher::QueryMatcher;

/// A run of text that is either plain or wrapped in a highlight marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum Segment {
    Plain(String),
    Highlighted(String),
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain(text) | Segment::Highlighted(text) => text,
        }
    }

    pub fn is_highlighted(&self) -> bool {
        matches!(self, Segment::Highlighted(_))
    }
}

/// Split `original_text` into plain and highlighted segments for a literal,
/// case-insensitive `query`.
///
/// The segments concatenate back to `original_text` exactly and never
/// contain empty text.
///
/// # Examples
///
/// ```
/// use jagung::search::{Segment, render_section};
///
/// let segments = render_section("Jagung Hibrida", "hibrida");
/// assert_eq!(
///     segments,
///     vec![
///         Segment::Plain("Jagung ".to_string()),
///         Segment::Highlighted("Hibrida".to_string()),
///     ]
/// );
/// ```
pub fn render_section(original_text: &str, query: &str) -> Vec<Segment> {
    render_with(original_text, &QueryMatcher::literal(query))
}

/// Same as [`render_section`] with an explicit matcher.
pub fn render_with(original_text: &str, matcher: &QueryMatcher) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last_end = 0;

    for range in matcher.find_ranges(original_text) {
        if range.start > last_end {
            segments.push(Segment::Plain(original_text[last_end..range.start].to_string()));
        }
        segments.push(Segment::Highlighted(original_text[range.clone()].to_string()));
        last_end = range.end;
    }

    if last_end < original_text.len() {
        segments.push(Segment::Plain(original_text[last_end..].to_string()));
    }

    segments
}

/// Concatenate segment text.
pub fn join_segments(segments: &[Segment]) -> String {
    segments.iter().map(Segment::text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn plain(text: &str) -> Segment {
        Segment::Plain(text.to_string())
    }

    fn marked(text: &str) -> Segment {
        Segment::Highlighted(text.to_string())
    }

    #[test]
    fn test_no_match_is_single_plain_segment() {
        assert_eq!(render_section("Jagung manis", "padi"), vec![plain("Jagung manis")]);
    }

    #[test]
    fn test_empty_query_is_plain() {
        assert_eq!(render_section("Jagung", ""), vec![plain("Jagung")]);
    }

    #[test]
    fn test_empty_text_has_no_segments() {
        assert!(render_section("", "jagung").is_empty());
    }

    #[test]
    fn test_match_at_start_and_end() {
        assert_eq!(
            render_section("jagung dan JAGUNG", "Jagung"),
            vec![marked("jagung"), plain(" dan "), marked("JAGUNG")]
        );
    }

    #[test]
    fn test_adjacent_matches() {
        assert_eq!(
            render_section("abab", "ab"),
            vec![marked("ab"), marked("ab")]
        );
    }

    #[test]
    fn test_preserves_original_case() {
        let segments = render_section("Panen RAYA", "raya");
        assert_eq!(segments[1], marked("RAYA"));
    }

    #[test]
    fn test_special_characters_are_literal() {
        assert_eq!(
            render_section("hasil 5.75 t/ha (rata-rata)", "(rata-rata)"),
            vec![plain("hasil 5.75 t/ha "), marked("(rata-rata)")]
        );
        assert_eq!(render_section("hasil 5x75", "5.75"), vec![plain("hasil 5x75")]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_segments_concatenate_to_original(
            text in "[a-zA-Z .()*+?éÉ]{0,60}",
            query in "[a-zA-Z .()*+?éÉ]{0,4}",
        ) {
            let segments = render_section(&text, &query);
            prop_assert_eq!(join_segments(&segments), text);
            prop_assert!(segments.iter().all(|s| !s.text().is_empty()));
        }

        #[test]
        fn prop_highlighted_segments_equal_query_ignoring_case(
            text in "[a-cA-C ]{0,40}",
            query in "[a-cA-C]{1,3}",
        ) {
            for segment in render_section(&text, &query) {
                if segment.is_highlighted() {
                    prop_assert_eq!(segment.text().to_lowercase(), query.to_lowercase());
                }
            }
        }

        #[test]
        fn prop_no_two_plain_segments_in_a_row(
            text in "[a-c ]{0,40}",
            query in "[a-c]{1,2}",
        ) {
            let segments = render_section(&text, &query);
            for pair in segments.windows(2) {
                prop_assert!(pair[0].is_highlighted() || pair[1].is_highlighted());
            }
        }
    }
}
