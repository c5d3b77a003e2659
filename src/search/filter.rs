use indextree::NodeId;

use super::highlight::{MARKER_CLASS, highlight, unhighlight};
use super::matcher::{MatchMode, QueryMatcher};
use crate::dom::Document;
use crate::parser::{CONTAINER_CLASS, SECTION_CLASS};

/// Where the filter finds its sections and how it matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    pub container_class: String,
    pub section_class: String,
    pub marker_class: String,
    pub match_mode: MatchMode,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            container_class: CONTAINER_CLASS.to_string(),
            section_class: SECTION_CLASS.to_string(),
            marker_class: MARKER_CLASS.to_string(),
            match_mode: MatchMode::default(),
        }
    }
}

/// Result of one filter pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub visible: usize,
    pub hidden: usize,
    pub markers: usize,
}

/// Search filter bound to the content sections of one page.
///
/// Holds the live query. Every [`SearchFilter::set_query`] call runs a full
/// pass: markers from the previous query are removed from all sections,
/// each section's visibility is recomputed from its plain text, and the
/// visible sections get fresh markers.
#[derive(Debug, Clone)]
pub struct SearchFilter {
    sections: Vec<NodeId>,
    query: String,
    options: FilterOptions,
}

impl SearchFilter {
    /// Bind to the sections of `doc`.
    ///
    /// Returns `None` when the page has no container or no sections; the
    /// caller treats that as "no search on this page".
    pub fn attach(doc: &Document, options: FilterOptions) -> Option<Self> {
        if doc.first_with_class(&options.container_class).is_none() {
            log::debug!("No .{} element, search disabled", options.container_class);
            return None;
        }

        // Sections are looked up page-wide; the container only gates search
        let sections = doc.elements_with_class(doc.root(), &options.section_class);
        if sections.is_empty() {
            log::debug!("No .{} elements, search disabled", options.section_class);
            return None;
        }

        log::debug!("Search filter attached to {} sections", sections.len());
        Some(Self {
            sections,
            query: String::new(),
            options,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn sections(&self) -> &[NodeId] {
        &self.sections
    }

    /// The clear control is shown while there is something to clear.
    pub fn clear_control_visible(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn set_query(&mut self, doc: &mut Document, query: &str) -> FilterSummary {
        self.query = query.to_string();
        let matcher = QueryMatcher::new(query, self.options.match_mode);
        let marker_class = self.options.marker_class.as_str();

        let mut summary = FilterSummary::default();
        for &section in &self.sections {
            unhighlight(doc, section, marker_class);

            let visible = matcher.is_match(&doc.block_text(section));
            doc.set_hidden(section, !visible);

            if visible {
                summary.visible += 1;
                summary.markers += highlight(doc, section, &matcher, marker_class);
            } else {
                summary.hidden += 1;
            }
        }

        log::debug!(
            "Query {:?}: {} visible, {} hidden, {} markers",
            self.query,
            summary.visible,
            summary.hidden,
            summary.markers
        );
        summary
    }

    /// Reset the query to empty, showing every section without markers.
    pub fn clear(&mut self, doc: &mut Document) -> FilterSummary {
        self.set_query(doc, "")
    }

    pub fn visible_sections(&self, doc: &Document) -> Vec<NodeId> {
        self.sections
            .iter()
            .copied()
            .filter(|id| !doc.is_hidden(*id))
            .collect()
    }
}
