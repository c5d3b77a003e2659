//! Conversion of parsed markdown blocks into document nodes.
//!
//! Block parsing is delegated to turbovault-parser, which is code-block aware
//! (headings or links inside fenced code are not treated as structure).

use indextree::NodeId;
use turbovault_parser::{ContentBlock as Block, InlineElement, ListItem};

use crate::dom::{Document, Element};

/// Parse markdown content into structured blocks.
///
/// `start_line` is the line of `markdown` within the whole page.
pub fn parse_content(markdown: &str, start_line: usize) -> Vec<Block> {
    turbovault_parser::parse_blocks_from_line(markdown, start_line)
}

/// Generate URL-friendly slug from heading text.
///
/// # Examples
///
/// ```
/// use jagung::parser::content::slugify;
///
/// assert_eq!(slugify("Hama dan Penyakit"), "hama-dan-penyakit");
/// ```
pub fn slugify(text: &str) -> String {
    turbovault_parser::slugify(text)
}

/// Append the document nodes for `blocks` under `parent`.
pub fn append_blocks(doc: &mut Document, parent: NodeId, blocks: &[Block]) {
    for block in blocks {
        append_block(doc, parent, block);
    }
}

fn append_block(doc: &mut Document, parent: NodeId, block: &Block) {
    match block {
        Block::Heading { level, content, .. } => {
            let heading = doc.append_element(parent, Element::new(format!("h{level}")));
            doc.append_text(heading, content);
        }
        Block::Paragraph { content, inline } => {
            let p = doc.append_element(parent, Element::new("p"));
            if inline.is_empty() {
                doc.append_text(p, content);
            } else {
                append_inline(doc, p, inline);
            }
        }
        Block::Code { content, .. } => {
            let pre = doc.append_element(parent, Element::new("pre"));
            let code = doc.append_element(pre, Element::new("code"));
            doc.append_text(code, content);
        }
        Block::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            let list = doc.append_element(parent, Element::new(tag));
            for item in items {
                append_list_item(doc, list, item);
            }
        }
        Block::Blockquote { blocks, .. } => {
            let quote = doc.append_element(parent, Element::new("blockquote"));
            append_blocks(doc, quote, blocks);
        }
        Block::Details { blocks, .. } => {
            let details = doc.append_element(parent, Element::new("details"));
            append_blocks(doc, details, blocks);
        }
        // Images, tables and rules carry no searchable prose.
        _ => {}
    }
}

fn append_list_item(doc: &mut Document, list: NodeId, item: &ListItem) {
    let li = doc.append_element(list, Element::new("li"));
    if item.inline.is_empty() {
        doc.append_text(li, &item.content);
    } else {
        append_inline(doc, li, &item.inline);
    }
    append_blocks(doc, li, &item.blocks);
}

fn append_inline(doc: &mut Document, parent: NodeId, elements: &[InlineElement]) {
    for element in elements {
        match element {
            InlineElement::Text { value } => {
                doc.append_text(parent, value);
            }
            InlineElement::Strong { value } => wrap_text(doc, parent, "strong", value),
            InlineElement::Emphasis { value } => wrap_text(doc, parent, "em", value),
            InlineElement::Code { value } => wrap_text(doc, parent, "code", value),
            InlineElement::Strikethrough { value } => wrap_text(doc, parent, "del", value),
            InlineElement::Link { text, .. } => wrap_text(doc, parent, "a", text),
            _ => {}
        }
    }
}

fn wrap_text(doc: &mut Document, parent: NodeId, tag: &str, text: &str) {
    if text.is_empty() {
        return;
    }
    let element = doc.append_element(parent, Element::new(tag));
    doc.append_text(element, text);
}
