//! Markdown page parsing.
//!
//! Turns a markdown page into a [`Document`] laid out the way the corn
//! information site is: a `header`, then a `container` element holding one
//! `content-section` per section heading.
//!
//! All markdown parsing is delegated to `turbovault-parser`.

pub mod content;

use std::io::Read;
use std::path::Path;

use indextree::NodeId;

use crate::dom::{Document, Element};
use crate::error::InputError;

pub const HEADER_CLASS: &str = "header";
pub const CONTAINER_CLASS: &str = "container";
pub const SECTION_CLASS: &str = "content-section";

/// Options controlling how a page is split into sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    /// Heading level that opens a content section.
    pub section_level: usize,
    pub container_class: String,
    pub section_class: String,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            section_level: 2,
            container_class: CONTAINER_CLASS.to_string(),
            section_class: SECTION_CLASS.to_string(),
        }
    }
}

/// A heading that splits the page.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Boundary {
    level: usize,
    text: String,
    offset: usize,
}

/// Read page content from a file, or from stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String, InputError> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(InputError::Stdin)?;
        return Ok(content);
    }

    std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a markdown file into a page document.
pub fn parse_file(path: &Path, options: &PageOptions) -> Result<Document, InputError> {
    let content = read_input(path)?;
    Ok(build_page(&content, options))
}

/// Build the page document for `markdown`.
///
/// Headings at `options.section_level` open a content section that runs
/// until the next heading at that level or above. Headings above the section
/// level close the current section; what follows them is container content
/// that the search filter never hides. Anything before the first section
/// heading goes into the page header.
pub fn build_page(markdown: &str, options: &PageOptions) -> Document {
    let mut doc = Document::new();
    let root = doc.root();

    let boundaries: Vec<Boundary> = turbovault_parser::parse_headings(markdown)
        .into_iter()
        .map(|h| Boundary {
            level: h.level as usize,
            text: h.text,
            offset: h.position.offset,
        })
        .filter(|b| b.level <= options.section_level)
        .collect();

    let first_section = boundaries
        .iter()
        .position(|b| b.level == options.section_level);

    let header_end = first_section
        .map(|i| boundaries[i].offset)
        .unwrap_or(markdown.len());
    let header = doc.append_element(root, Element::new("header").with_class(HEADER_CLASS));
    append_chunk(&mut doc, header, markdown, 0, header_end);

    let Some(first_section) = first_section else {
        log::debug!("No level {} headings; page has no sections", options.section_level);
        return doc;
    };

    let container = doc.append_element(
        root,
        Element::new("main").with_class(options.container_class.clone()),
    );

    let chunks = &boundaries[first_section..];
    for (i, boundary) in chunks.iter().enumerate() {
        let end = chunks.get(i + 1).map(|b| b.offset).unwrap_or(markdown.len());

        let parent = if boundary.level == options.section_level {
            let section = Element::new("section")
                .with_class(options.section_class.clone())
                .with_id(content::slugify(&boundary.text));
            doc.append_element(container, section)
        } else {
            container
        };

        append_chunk(&mut doc, parent, markdown, boundary.offset, end);
    }

    log::debug!(
        "Built page with {} sections",
        doc.elements_with_class(container, &options.section_class).len()
    );

    doc
}

fn append_chunk(doc: &mut Document, parent: NodeId, markdown: &str, start: usize, end: usize) {
    let Some(chunk) = markdown.get(start..end) else {
        return;
    };
    if chunk.trim().is_empty() {
        return;
    }
    let start_line = markdown[..start].matches('\n').count();
    content::append_blocks(doc, parent, &content::parse_content(chunk, start_line));
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"# Informasi Umum Jagung
Halaman ini membahas budidaya jagung.

## Jenis Jagung
Jagung Hibrida memiliki hasil panen tinggi.

### Jagung Manis
Cocok untuk konsumsi segar.

## Hama dan Penyakit
Ulat grayak menyerang daun.

# Penutup
Terima kasih.
"#;

    #[test]
    fn test_sections_are_split_at_level_two() {
        let doc = build_page(PAGE, &PageOptions::default());
        let sections = doc.elements_with_class(doc.root(), SECTION_CLASS);
        assert_eq!(sections.len(), 2);

        let first = doc.element(sections[0]).unwrap();
        assert_eq!(first.id.as_deref(), Some("jenis-jagung"));
        assert_eq!(first.tag, "section");

        let first_text = doc.text_content(sections[0]);
        assert!(first_text.contains("Jagung Hibrida"));
        assert!(first_text.contains("Jagung Manis"));
        assert!(!first_text.contains("Ulat grayak"));

        let second_text = doc.text_content(sections[1]);
        assert!(second_text.contains("Ulat grayak"));
        assert!(!second_text.contains("Terima kasih"));
    }

    #[test]
    fn test_preamble_goes_to_header() {
        let doc = build_page(PAGE, &PageOptions::default());
        let header = doc.first_with_class(HEADER_CLASS).unwrap();
        let text = doc.text_content(header);
        assert!(text.contains("Informasi Umum Jagung"));
        assert!(text.contains("budidaya jagung"));
    }

    #[test]
    fn test_higher_heading_closes_section() {
        let doc = build_page(PAGE, &PageOptions::default());
        let container = doc.first_with_class(CONTAINER_CLASS).unwrap();
        assert!(doc.text_content(container).contains("Terima kasih"));
        for section in doc.elements_with_class(container, SECTION_CLASS) {
            assert!(!doc.text_content(section).contains("Terima kasih"));
        }
    }

    #[test]
    fn test_custom_section_level() {
        let options = PageOptions {
            section_level: 3,
            ..PageOptions::default()
        };
        let doc = build_page(PAGE, &options);
        let sections = doc.elements_with_class(doc.root(), SECTION_CLASS);
        assert_eq!(sections.len(), 1);
        assert_eq!(
            doc.element(sections[0]).unwrap().id.as_deref(),
            Some("jagung-manis")
        );
    }

    #[test]
    fn test_page_without_sections_has_no_container() {
        let doc = build_page("# Judul\nHanya pengantar.", &PageOptions::default());
        assert!(doc.first_with_class(CONTAINER_CLASS).is_none());
        assert!(doc.elements_with_class(doc.root(), SECTION_CLASS).is_empty());
    }

    #[test]
    fn test_built_page_is_normalized() {
        let doc = build_page(PAGE, &PageOptions::default());
        let mut normalized = doc.clone();
        normalized.normalize(normalized.root());
        assert_eq!(doc.to_html(doc.root()), normalized.to_html(normalized.root()));
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Path::new("/nonexistent/jagung.md")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/jagung.md"));
    }
}
