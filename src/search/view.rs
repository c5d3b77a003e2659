//! Read-only views of filtered sections, laid out as lines of segments.

use indextree::NodeId;
use serde::Serialize;

use super::filter::SearchFilter;
use super::segment::Segment;
use crate::dom::{Document, NodeData};

/// One content section as the front ends display it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub id: Option<String>,
    pub title: String,
    pub visible: bool,
    /// One entry per block of text; highlighted runs are the ones inside
    /// markers.
    pub lines: Vec<Vec<Segment>>,
}

impl SectionView {
    pub fn marker_count(&self) -> usize {
        self.lines
            .iter()
            .flatten()
            .filter(|s| s.is_highlighted())
            .count()
    }
}

/// Views of every section the filter is bound to, in page order.
pub fn section_views(doc: &Document, filter: &SearchFilter) -> Vec<SectionView> {
    let marker_class = filter.options().marker_class.as_str();
    filter
        .sections()
        .iter()
        .map(|&section| section_view(doc, section, marker_class))
        .collect()
}

pub fn section_view(doc: &Document, section: NodeId, marker_class: &str) -> SectionView {
    let mut builder = LineBuilder {
        doc,
        marker_class,
        lines: Vec::new(),
        current: Vec::new(),
    };
    builder.walk(section);
    builder.flush();

    SectionView {
        id: doc.element(section).and_then(|e| e.id.clone()),
        title: section_title(doc, section),
        visible: !doc.is_hidden(section),
        lines: builder.lines,
    }
}

/// Text of the first heading inside `section`.
fn section_title(doc: &Document, section: NodeId) -> String {
    doc.children(section)
        .find(|id| {
            doc.element(*id)
                .is_some_and(|e| matches!(e.tag.as_str(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6"))
        })
        .map(|heading| doc.text_content(heading))
        .unwrap_or_default()
}

struct LineBuilder<'a> {
    doc: &'a Document,
    marker_class: &'a str,
    lines: Vec<Vec<Segment>>,
    current: Vec<Segment>,
}

impl LineBuilder<'_> {
    fn walk(&mut self, node: NodeId) {
        let doc = self.doc;
        for child in doc.children(node) {
            match doc.data(child) {
                NodeData::Text(text) => self.push(text, doc.within_class(child, self.marker_class)),
                NodeData::Element(element) if element.is_block() => {
                    self.flush();
                    self.walk(child);
                    self.flush();
                }
                NodeData::Element(_) => self.walk(child),
            }
        }
    }

    fn push(&mut self, text: &str, highlighted: bool) {
        // Adjacent runs of the same kind come from sibling inline elements.
        if let Some(last) = self.current.last_mut() {
            match (last, highlighted) {
                (Segment::Plain(run), false) | (Segment::Highlighted(run), true) => {
                    run.push_str(text);
                    return;
                }
                _ => {}
            }
        }

        let segment = if highlighted {
            Segment::Highlighted(text.to_string())
        } else {
            Segment::Plain(text.to_string())
        };
        self.current.push(segment);
    }

    fn flush(&mut self) {
        let line = std::mem::take(&mut self.current);
        if line.iter().any(|s| !s.text().trim().is_empty()) {
            self.lines.push(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{PageOptions, build_page};
    use crate::search::filter::FilterOptions;

    const PAGE: &str = r#"## Jenis Jagung
Jagung **Hibrida** unggul.

- Jagung manis
- Jagung pulut

## Pupuk
Urea dan SP-36.
"#;

    #[test]
    fn test_views_lay_out_blocks_as_lines() {
        let doc = build_page(PAGE, &PageOptions::default());
        let filter = SearchFilter::attach(&doc, FilterOptions::default()).unwrap();
        let views = section_views(&doc, &filter);

        assert_eq!(views.len(), 2);
        assert_eq!(views[0].title, "Jenis Jagung");
        assert_eq!(views[0].id.as_deref(), Some("jenis-jagung"));
        assert_eq!(
            views[0].lines,
            vec![
                vec![Segment::Plain("Jenis Jagung".to_string())],
                vec![Segment::Plain("Jagung Hibrida unggul.".to_string())],
                vec![Segment::Plain("Jagung manis".to_string())],
                vec![Segment::Plain("Jagung pulut".to_string())],
            ]
        );
    }

    #[test]
    fn test_views_reflect_filter_state() {
        let mut doc = build_page(PAGE, &PageOptions::default());
        let mut filter = SearchFilter::attach(&doc, FilterOptions::default()).unwrap();
        filter.set_query(&mut doc, "hibrida");

        let views = section_views(&doc, &filter);
        assert!(views[0].visible);
        assert!(!views[1].visible);
        assert_eq!(views[0].marker_count(), 1);
        assert_eq!(
            views[0].lines[1],
            vec![
                Segment::Plain("Jagung ".to_string()),
                Segment::Highlighted("Hibrida".to_string()),
                Segment::Plain(" unggul.".to_string()),
            ]
        );
    }

    #[test]
    fn test_view_serializes_segments() {
        let mut doc = build_page(PAGE, &PageOptions::default());
        let mut filter = SearchFilter::attach(&doc, FilterOptions::default()).unwrap();
        filter.set_query(&mut doc, "urea");

        let json = serde_json::to_value(&section_views(&doc, &filter)[1]).unwrap();
        assert_eq!(json["title"], "Pupuk");
        assert_eq!(json["visible"], true);
        assert_eq!(json["lines"][1][0]["kind"], "highlighted");
        assert_eq!(json["lines"][1][0]["text"], "Urea");
    }
}
