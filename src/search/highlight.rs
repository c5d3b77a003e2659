//! Applying and removing highlight markers on a live document.

use indextree::NodeId;

use super::matcher::QueryMatcher;
use super::segment::{Segment, render_with};
use crate::dom::{Document, Element};

pub const MARKER_TAG: &str = "span";
pub const MARKER_CLASS: &str = "highlight";

/// Wrap every match of `matcher` in the text under `section` with a marker
/// element. Returns the number of markers created.
///
/// Text nodes are visited in document order and text already inside a
/// marker is left alone.
pub fn highlight(
    doc: &mut Document,
    section: NodeId,
    matcher: &QueryMatcher,
    marker_class: &str,
) -> usize {
    if matcher.is_empty() {
        return 0;
    }

    let candidates: Vec<NodeId> = doc
        .text_nodes(section)
        .into_iter()
        .filter(|id| !doc.within_class(*id, marker_class))
        .collect();

    let mut created = 0;
    for text_node in candidates {
        let Some(text) = doc.text(text_node) else {
            continue;
        };
        let segments = render_with(text, matcher);
        if !segments.iter().any(Segment::is_highlighted) {
            continue;
        }

        let mut replacements = Vec::with_capacity(segments.len());
        for segment in segments {
            match segment {
                Segment::Plain(text) => replacements.push(doc.create_text(text)),
                Segment::Highlighted(text) => {
                    let marker = doc.create_element(
                        Element::new(MARKER_TAG).with_class(marker_class.to_string()),
                    );
                    let inner = doc.create_text(text);
                    doc.append(marker, inner);
                    replacements.push(marker);
                    created += 1;
                }
            }
        }
        doc.replace_with(text_node, &replacements);
    }

    created
}

/// Replace every marker under `section` with its plain text, then merge the
/// text siblings around each removed marker. Returns the number of markers
/// removed.
pub fn unhighlight(doc: &mut Document, section: NodeId, marker_class: &str) -> usize {
    let markers: Vec<NodeId> = doc
        .elements_with_class(section, marker_class)
        .into_iter()
        .filter(|id| *id != section)
        .collect();

    let mut parents: Vec<NodeId> = Vec::new();
    let mut removed = 0;

    for marker in markers {
        if doc.is_removed(marker) {
            continue;
        }
        let Some(parent) = doc.parent(marker) else {
            continue;
        };
        let text = doc.text_content(marker);
        let plain = doc.create_text(text);
        doc.replace_with(marker, &[plain]);
        removed += 1;

        if !parents.contains(&parent) {
            parents.push(parent);
        }
    }

    for parent in parents {
        doc.normalize(parent);
    }

    removed
}

/// Whether any marker remains under `section`.
pub fn has_markers(doc: &Document, section: NodeId, marker_class: &str) -> bool {
    doc.elements_with_class(section, marker_class)
        .into_iter()
        .any(|id| id != section)
}
