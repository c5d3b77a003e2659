//! In-memory page document.
//!
//! A small DOM-like tree of element and text nodes backed by an
//! [`indextree`] arena. It supports the operations the search filter needs:
//! document-order traversal of text nodes, class lookup, replacing a node
//! with a sequence of nodes, unwrapping and normalizing text, and toggling
//! element visibility.

mod node;

pub use node::{Element, NodeData};

use indextree::{Arena, NodeEdge, NodeId};

/// A page document rooted at a `body` element.
#[derive(Debug, Clone)]
pub struct Document {
    arena: Arena<NodeData>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(NodeData::Element(Element::new("body")));
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn create_element(&mut self, element: Element) -> NodeId {
        self.arena.new_node(NodeData::Element(element))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.arena.new_node(NodeData::Text(text.into()))
    }

    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        parent.append(child, &mut self.arena);
    }

    pub fn append_element(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = self.create_element(element);
        self.append(parent, id);
        id
    }

    /// Append text to `parent`.
    ///
    /// Empty text is dropped and text following a text node is merged into
    /// it, so trees built with this method are always normalized.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Option<NodeId> {
        if text.is_empty() {
            return None;
        }

        if let Some(last) = self.arena[parent].last_child() {
            if let NodeData::Text(existing) = self.arena[last].get_mut() {
                existing.push_str(text);
                return Some(last);
            }
        }

        let id = self.create_text(text);
        self.append(parent, id);
        Some(id)
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        self.arena[id].get()
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.arena[id].get().as_element()
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.arena[id].get_mut() {
            NodeData::Element(element) => Some(element),
            NodeData::Text(_) => None,
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.arena[id].get().as_text()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id].parent()
    }

    /// Whether `id` was removed from the tree by a replace or normalize.
    pub fn is_removed(&self, id: NodeId) -> bool {
        id.is_removed(&self.arena)
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    /// Text nodes under `scope`, in document order.
    pub fn text_nodes(&self, scope: NodeId) -> Vec<NodeId> {
        scope
            .descendants(&self.arena)
            .filter(|id| self.text(*id).is_some())
            .collect()
    }

    /// Concatenated text of every text node under `scope`.
    pub fn text_content(&self, scope: NodeId) -> String {
        scope
            .descendants(&self.arena)
            .filter_map(|id| self.text(id))
            .collect()
    }

    /// Text under `scope` with a line break at every block element boundary.
    ///
    /// Unlike [`Document::text_content`], text from two sibling blocks never
    /// runs together, so a search cannot match across a block boundary.
    pub fn block_text(&self, scope: NodeId) -> String {
        let mut out = String::new();
        for edge in scope.traverse(&self.arena) {
            let (NodeEdge::Start(id) | NodeEdge::End(id)) = edge;
            match self.data(id) {
                NodeData::Text(text) => {
                    if matches!(edge, NodeEdge::Start(_)) {
                        out.push_str(text);
                    }
                }
                NodeData::Element(element) => {
                    if element.is_block() && !out.is_empty() && !out.ends_with('\n') {
                        out.push('\n');
                    }
                }
            }
        }
        out
    }

    /// Elements under `scope` (inclusive) carrying `class`, in document order.
    pub fn elements_with_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        scope
            .descendants(&self.arena)
            .filter(|id| self.element(*id).is_some_and(|e| e.has_class(class)))
            .collect()
    }

    pub fn first_with_class(&self, class: &str) -> Option<NodeId> {
        self.root
            .descendants(&self.arena)
            .find(|id| self.element(*id).is_some_and(|e| e.has_class(class)))
    }

    /// Whether `id` or one of its ancestors is an element carrying `class`.
    pub fn within_class(&self, id: NodeId, class: &str) -> bool {
        id.ancestors(&self.arena)
            .any(|a| self.element(a).is_some_and(|e| e.has_class(class)))
    }

    /// Replace `target` (and its subtree) with `replacements`, in order.
    pub fn replace_with(&mut self, target: NodeId, replacements: &[NodeId]) {
        for replacement in replacements {
            target.insert_before(*replacement, &mut self.arena);
        }
        target.remove_subtree(&mut self.arena);
    }

    /// Merge adjacent text siblings and drop empty text nodes under `scope`.
    pub fn normalize(&mut self, scope: NodeId) {
        let elements: Vec<NodeId> = scope
            .descendants(&self.arena)
            .filter(|id| self.element(*id).is_some())
            .collect();

        for element in elements {
            let children: Vec<NodeId> = element.children(&self.arena).collect();
            let mut previous_text: Option<NodeId> = None;

            for child in children {
                let Some(text) = self.text(child).map(str::to_string) else {
                    previous_text = None;
                    continue;
                };

                if text.is_empty() {
                    child.remove(&mut self.arena);
                    continue;
                }

                match previous_text {
                    Some(previous) => {
                        if let NodeData::Text(merged) = self.arena[previous].get_mut() {
                            merged.push_str(&text);
                        }
                        child.remove(&mut self.arena);
                    }
                    None => previous_text = Some(child),
                }
            }
        }
    }

    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) {
        if let Some(element) = self.element_mut(id) {
            element.hidden = hidden;
        }
    }

    pub fn is_hidden(&self, id: NodeId) -> bool {
        self.element(id).is_some_and(|e| e.hidden)
    }

    /// Serialize the subtree at `id` as HTML.
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        match self.data(id) {
            NodeData::Text(text) => out.push_str(&escape_html(text)),
            NodeData::Element(element) => {
                out.push('<');
                out.push_str(&element.tag);
                if let Some(ref el_id) = element.id {
                    out.push_str(&format!(" id=\"{}\"", escape_html(el_id)));
                }
                if !element.classes.is_empty() {
                    out.push_str(&format!(
                        " class=\"{}\"",
                        escape_html(&element.classes.join(" "))
                    ));
                }
                if element.hidden {
                    out.push_str(" hidden");
                }
                out.push('>');
                for child in id.children(&self.arena) {
                    self.write_html(child, out);
                }
                out.push_str("</");
                out.push_str(&element.tag);
                out.push('>');
            }
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph_doc() -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.append_element(root, Element::new("p").with_class("content-section"));
        doc.append_text(p, "Jagung ");
        let strong = doc.append_element(p, Element::new("strong"));
        doc.append_text(strong, "Hibrida");
        doc.append_text(p, " unggul");
        (doc, p)
    }

    #[test]
    fn test_text_content_is_document_order() {
        let (doc, p) = paragraph_doc();
        assert_eq!(doc.text_content(p), "Jagung Hibrida unggul");

        let texts: Vec<_> = doc
            .text_nodes(p)
            .into_iter()
            .filter_map(|id| doc.text(id))
            .collect();
        assert_eq!(texts, vec!["Jagung ", "Hibrida", " unggul"]);
    }

    #[test]
    fn test_block_text_separates_blocks() {
        let mut doc = Document::new();
        let root = doc.root();
        let section = doc.append_element(root, Element::new("section"));
        let h2 = doc.append_element(section, Element::new("h2"));
        doc.append_text(h2, "Pupuk");
        let ul = doc.append_element(section, Element::new("ul"));
        for item in ["Urea", "KCl"] {
            let li = doc.append_element(ul, Element::new("li"));
            doc.append_text(li, item);
        }
        let p = doc.append_element(section, Element::new("p"));
        doc.append_text(p, "Dosis ");
        let strong = doc.append_element(p, Element::new("strong"));
        doc.append_text(strong, "tepat");

        assert_eq!(doc.text_content(section), "PupukUreaKClDosis tepat");
        assert_eq!(doc.block_text(section), "Pupuk\nUrea\nKCl\nDosis tepat\n");
    }

    #[test]
    fn test_append_text_merges_and_skips_empty() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.append_element(root, Element::new("p"));
        doc.append_text(p, "a");
        doc.append_text(p, "");
        doc.append_text(p, "b");
        assert_eq!(doc.children(p).count(), 1);
        assert_eq!(doc.to_html(p), "<p>ab</p>");
    }

    #[test]
    fn test_replace_with_sequence() {
        let (mut doc, p) = paragraph_doc();
        let first = doc.text_nodes(p)[0];
        let a = doc.create_text("Jag");
        let b = doc.create_text("ung ");
        doc.replace_with(first, &[a, b]);
        assert_eq!(doc.text_content(p), "Jagung Hibrida unggul");
        assert_eq!(doc.text_nodes(p).len(), 4);
    }

    #[test]
    fn test_normalize_merges_adjacent_text() {
        let (mut doc, p) = paragraph_doc();
        let first = doc.text_nodes(p)[0];
        let a = doc.create_text("Jag");
        let empty = doc.create_text("");
        let b = doc.create_text("ung ");
        doc.replace_with(first, &[a, empty, b]);

        doc.normalize(p);
        assert_eq!(
            doc.to_html(p),
            "<p class=\"content-section\">Jagung <strong>Hibrida</strong> unggul</p>"
        );
    }

    #[test]
    fn test_class_lookup_and_visibility() {
        let (mut doc, p) = paragraph_doc();
        assert_eq!(doc.first_with_class("content-section"), Some(p));
        assert_eq!(doc.elements_with_class(doc.root(), "content-section"), vec![p]);
        assert!(doc.first_with_class("missing").is_none());

        let strong_text = doc.text_nodes(p)[1];
        assert!(doc.within_class(strong_text, "content-section"));

        doc.set_hidden(p, true);
        assert!(doc.is_hidden(p));
        assert!(doc.to_html(p).starts_with("<p class=\"content-section\" hidden>"));
    }

    #[test]
    fn test_html_escaping() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.append_element(root, Element::new("p"));
        doc.append_text(p, "5 < 6 & \"ton\"");
        assert_eq!(doc.to_html(p), "<p>5 &lt; 6 &amp; &quot;ton&quot;</p>");
    }
}
