//! An arena-backed element tree that the search engine can read and rewrite.
//!
//! Nodes are either elements or text. An element's [`Display`] decides how its content reads:
//! blocks and void elements break text apart, inline elements are transparent, hidden
//! elements are skipped entirely. The document also keeps a selection, bookmarked as flat
//! text offsets so it survives fragments being split and wrapped.

use crate::error::TreeError;
use crate::tree::{ContentTree, Leaf, Selection, TextPoint, TextRange};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Handle to a node in a [`Document`].
pub struct NodeId(usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How an element's content participates in the flow of text.
pub enum Display {
    /// Starts and ends a run of text (paragraphs, headings, cells).
    Block,
    /// Sits inside a run of text without interrupting it (emphasis, links, markers).
    Inline,
    /// Has no content of its own but interrupts the text around it (line breaks, images).
    Void,
    /// Not part of the readable text at all (scripts, styles).
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// An element node.
pub struct Element {
    /// Tag name.
    pub tag: String,
    /// Attributes in insertion order.
    pub attributes: Vec<(String, String)>,
    /// How the element's content reads.
    pub display: Display,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// What a node holds.
pub enum NodeKind {
    /// An element with children.
    Element(Element),
    /// A run of text.
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Shape of the inline element wrapped around matched text.
pub struct ElementTemplate {
    /// Tag name of each wrapper.
    pub tag: String,
    /// Attributes copied onto each wrapper.
    pub attributes: Vec<(String, String)>,
}

impl ElementTemplate {
    #[must_use]
    /// Template for a bare `<tag>` wrapper.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
        }
    }

    #[must_use]
    /// Add an attribute every wrapper receives.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One end of a selection as a flat offset into the text under the root.
pub struct Anchor {
    /// Flat offset of the endpoint.
    pub offset: usize,
    /// Whether the endpoint sat at the end of a non-empty fragment, so it resolves to
    /// the fragment ending there rather than the one starting there.
    pub trailing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Snapshot of a selection that survives fragments being split and wrapped.
pub enum Bookmark {
    /// Both ends recorded as flat offsets.
    Flat {
        /// Where the selection starts.
        start: Anchor,
        /// Where the selection ends.
        end: Anchor,
    },
    /// An endpoint was not under the root, so the range is kept as it was.
    Unresolved(TextRange<NodeId>),
}

#[derive(Clone, Copy)]
enum Affinity {
    /// Prefer the fragment that starts at an ambiguous offset.
    Forward,
    /// Prefer the fragment that ends at an ambiguous offset.
    Backward,
}

#[derive(Debug, Clone)]
/// A tree of elements and text with an optional selection.
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    selection: Option<TextRange<NodeId>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    #[must_use]
    /// Empty document with a `body` block as its root.
    pub fn new() -> Self {
        let body = Node {
            kind: NodeKind::Element(Element {
                tag: "body".to_string(),
                attributes: Vec::new(),
                display: Display::Block,
            }),
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![body],
            root: NodeId(0),
            selection: None,
        }
    }

    #[must_use]
    /// The `body` element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn push_node(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    /// Append a new element as the last child of `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str, display: Display) -> NodeId {
        let element = Element {
            tag: tag.to_string(),
            attributes: Vec::new(),
            display,
        };
        self.push_node(NodeKind::Element(element), Some(parent))
    }

    /// Append a new text node as the last child of `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push_node(NodeKind::Text(text.to_string()), Some(parent))
    }

    /// Set an attribute, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if `node` is a text node.
    pub fn set_attribute(&mut self, node: NodeId, key: &str, value: &str) -> Result<(), TreeError> {
        let NodeKind::Element(element) = &mut self.nodes[node.0].kind else {
            return Err(TreeError::NotElement(node.to_string()));
        };
        match element.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => element.attributes.push((key.to_string(), value.to_string())),
        }
        Ok(())
    }

    #[must_use]
    /// What `node` holds.
    pub fn kind(&self, node: NodeId) -> &NodeKind {
        &self.node(node).kind
    }

    #[must_use]
    /// Children of `node` in order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    #[must_use]
    /// Parent of `node`, if it is attached.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    #[must_use]
    /// Text of a text node.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element(_) => None,
        }
    }

    #[must_use]
    /// Value of an element attribute.
    pub fn attribute(&self, node: NodeId, key: &str) -> Option<&str> {
        match &self.node(node).kind {
            NodeKind::Element(element) => element
                .attributes
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    /// `node` and everything below it, in document order.
    pub fn descendants(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![node];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(self.node(next).children.iter().rev().copied());
            Some(next)
        })
    }

    fn text_nodes(&self, node: NodeId) -> impl Iterator<Item = (NodeId, &str)> + '_ {
        self.descendants(node)
            .filter_map(|id| self.text(id).map(|text| (id, text)))
    }

    #[must_use]
    /// All text below `node`, joined in document order, markup ignored.
    pub fn text_content(&self, node: NodeId) -> String {
        self.text_nodes(node).map(|(_, text)| text).collect()
    }

    #[must_use]
    /// Elements with the given tag, in document order.
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.descendants(self.root)
            .filter(|&id| matches!(&self.node(id).kind, NodeKind::Element(e) if e.tag == tag))
            .collect()
    }

    #[must_use]
    /// Elements whose attribute `key` equals `value`, in document order.
    pub fn elements_with_attribute(&self, key: &str, value: &str) -> Vec<NodeId> {
        self.descendants(self.root)
            .filter(|&id| self.attribute(id, key) == Some(value))
            .collect()
    }

    #[must_use]
    /// Render the children of the root as HTML.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for &child in self.children(self.root) {
            self.render(child, &mut html);
        }
        html
    }

    fn render(&self, node: NodeId, html: &mut String) {
        match &self.node(node).kind {
            NodeKind::Text(text) => escape_into(text, false, html),
            NodeKind::Element(element) => {
                html.push('<');
                html.push_str(&element.tag);
                for (key, value) in &element.attributes {
                    html.push(' ');
                    html.push_str(key);
                    html.push_str("=\"");
                    escape_into(value, true, html);
                    html.push('"');
                }
                html.push('>');
                if element.display == Display::Void {
                    return;
                }
                for &child in self.children(node) {
                    self.render(child, html);
                }
                html.push_str("</");
                html.push_str(&element.tag);
                html.push('>');
                if element.display == Display::Block {
                    html.push('\n');
                }
            }
        }
    }

    /// Select `range`, or clear the selection with `None`.
    pub fn select(&mut self, range: Option<TextRange<NodeId>>) {
        self.selection = range;
    }

    /// Select the text between two flat offsets into the text under the root.
    ///
    /// # Errors
    ///
    /// Returns an error if an offset is past the end of the text, splits a character, or
    /// the end precedes the start.
    pub fn select_offsets(&mut self, start: usize, end: usize) -> Result<(), TreeError> {
        self.selection = Some(self.range_at(start, end)?);
        Ok(())
    }

    #[must_use]
    /// The current selection.
    pub fn selection(&self) -> Option<TextRange<NodeId>> {
        self.selection
    }

    /// Flat offset of a text position, if its node is under the root.
    fn offset_of(&self, point: TextPoint<NodeId>) -> Option<usize> {
        let mut consumed = 0;
        for (id, text) in self.text_nodes(self.root) {
            if id == point.node {
                return Some(consumed + point.offset);
            }
            consumed += text.len();
        }
        None
    }

    fn point_at(&self, offset: usize, affinity: Affinity) -> Result<TextPoint<NodeId>, TreeError> {
        let mut consumed = 0;
        let mut fallback = None;
        for (node, text) in self.text_nodes(self.root) {
            let end = consumed + text.len();
            let inside = match affinity {
                Affinity::Forward => consumed <= offset && offset < end,
                Affinity::Backward => consumed < offset && offset <= end,
            };
            if inside {
                let local = offset - consumed;
                if !text.is_char_boundary(local) {
                    return Err(TreeError::NotCharBoundary(offset));
                }
                return Ok(TextPoint { node, offset: local });
            }
            match affinity {
                Affinity::Forward if offset == end => {
                    fallback = Some(TextPoint {
                        node,
                        offset: text.len(),
                    });
                }
                Affinity::Backward if offset == consumed && fallback.is_none() => {
                    fallback = Some(TextPoint { node, offset: 0 });
                }
                _ => {}
            }
            consumed = end;
        }
        fallback.ok_or(TreeError::OffsetOutOfBounds {
            offset,
            len: consumed,
        })
    }

    fn range_at(&self, start: usize, end: usize) -> Result<TextRange<NodeId>, TreeError> {
        if end < start {
            return Err(TreeError::InvertedRange { start, end });
        }
        let start_point = self.point_at(start, Affinity::Forward)?;
        let end_point = if end == start {
            start_point
        } else {
            self.point_at(end, Affinity::Backward)?
        };
        Ok(TextRange {
            start: start_point,
            end: end_point,
        })
    }

    fn anchor_of(&self, point: TextPoint<NodeId>) -> Option<Anchor> {
        let offset = self.offset_of(point)?;
        let trailing = point.offset > 0 && self.text(point.node)?.len() == point.offset;
        Some(Anchor { offset, trailing })
    }

    fn resolve(&self, anchor: Anchor) -> Result<TextPoint<NodeId>, TreeError> {
        let affinity = if anchor.trailing {
            Affinity::Backward
        } else {
            Affinity::Forward
        };
        self.point_at(anchor.offset, affinity)
    }

    fn text_mut(&mut self, node: NodeId) -> Result<&mut String, TreeError> {
        match &mut self.nodes[node.0].kind {
            NodeKind::Text(text) => Ok(text),
            NodeKind::Element(_) => Err(TreeError::NotText(node.to_string())),
        }
    }
}

fn escape_into(text: &str, attribute: bool, html: &mut String) {
    for c in text.chars() {
        match c {
            '&' => html.push_str("&amp;"),
            '<' => html.push_str("&lt;"),
            '>' => html.push_str("&gt;"),
            '"' if attribute => html.push_str("&quot;"),
            _ => html.push(c),
        }
    }
}

enum Step {
    Enter(NodeId),
    Leave,
}

/// Document-order walk classifying every position as a [`Leaf`].
struct Leaves<'a> {
    document: &'a Document,
    stack: Vec<Step>,
}

impl Iterator for Leaves<'_> {
    type Item = Leaf<NodeId>;

    fn next(&mut self) -> Option<Self::Item> {
        let document = self.document;
        while let Some(step) = self.stack.pop() {
            let Step::Enter(id) = step else {
                return Some(Leaf::Boundary);
            };
            let node = document.node(id);
            let children = node.children.iter().rev().map(|&child| Step::Enter(child));
            match &node.kind {
                NodeKind::Text(_) => return Some(Leaf::Text(id)),
                NodeKind::Element(element) => match element.display {
                    Display::Hidden => return Some(Leaf::Ignored),
                    Display::Void => return Some(Leaf::Boundary),
                    Display::Inline => self.stack.extend(children),
                    Display::Block => {
                        self.stack.push(Step::Leave);
                        self.stack.extend(children);
                        return Some(Leaf::Boundary);
                    }
                },
            }
        }
        None
    }
}

impl ContentTree for Document {
    type Node = NodeId;
    type Template = ElementTemplate;

    fn root(&self) -> NodeId {
        self.root
    }

    fn leaves(&self, root: NodeId) -> impl Iterator<Item = Leaf<NodeId>> + '_ {
        Leaves {
            document: self,
            stack: vec![Step::Enter(root)],
        }
    }

    fn text_of(&self, fragment: NodeId) -> Result<&str, TreeError> {
        self.text(fragment)
            .ok_or_else(|| TreeError::NotText(fragment.to_string()))
    }

    fn split_at(&mut self, fragment: NodeId, offset: usize) -> Result<(NodeId, NodeId), TreeError> {
        let text = self.text_mut(fragment)?;
        if offset > text.len() {
            return Err(TreeError::OffsetOutOfBounds {
                offset,
                len: text.len(),
            });
        }
        if !text.is_char_boundary(offset) {
            return Err(TreeError::NotCharBoundary(offset));
        }
        let tail = text.split_off(offset);

        let parent = self.node(fragment).parent;
        let after = self.push_node(NodeKind::Text(tail), None);
        self.nodes[after.0].parent = parent;
        if let Some(parent) = parent {
            let siblings = &mut self.nodes[parent.0].children;
            let at = siblings
                .iter()
                .position(|&id| id == fragment)
                .map_or(siblings.len(), |i| i + 1);
            siblings.insert(at, after);
        }
        Ok((fragment, after))
    }

    fn clone_template(&mut self, template: &ElementTemplate) -> NodeId {
        let element = Element {
            tag: template.tag.clone(),
            attributes: template.attributes.clone(),
            display: Display::Inline,
        };
        self.push_node(NodeKind::Element(element), None)
    }

    fn wrap(&mut self, fragment: NodeId, wrapper: NodeId) -> Result<(), TreeError> {
        let parent = self
            .node(fragment)
            .parent
            .ok_or_else(|| TreeError::Detached(fragment.to_string()))?;
        let siblings = &mut self.nodes[parent.0].children;
        let at = siblings
            .iter()
            .position(|&id| id == fragment)
            .ok_or_else(|| TreeError::Detached(fragment.to_string()))?;
        siblings[at] = wrapper;
        self.nodes[wrapper.0].parent = Some(parent);
        self.nodes[wrapper.0].children.push(fragment);
        self.nodes[fragment.0].parent = Some(wrapper);
        Ok(())
    }

    fn set_tag(&mut self, wrapper: NodeId, key: &str, value: &str) -> Result<(), TreeError> {
        self.set_attribute(wrapper, key, value)
    }
}

impl Selection for Document {
    type Bookmark = Option<Bookmark>;

    fn capture_bookmark(&self) -> Option<Bookmark> {
        let range = self.selection?;
        let flat = self.anchor_of(range.start).zip(self.anchor_of(range.end));
        Some(match flat {
            Some((start, end)) => Bookmark::Flat { start, end },
            None => Bookmark::Unresolved(range),
        })
    }

    fn restore_bookmark(&mut self, bookmark: Option<Bookmark>) -> Result<(), TreeError> {
        self.selection = match bookmark {
            None => None,
            Some(Bookmark::Unresolved(range)) => Some(range),
            Some(Bookmark::Flat { start, end }) => Some(TextRange {
                start: self.resolve(start)?,
                end: self.resolve(end)?,
            }),
        };
        Ok(())
    }

    fn current_range(&self) -> Option<TextRange<NodeId>> {
        self.selection
    }
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
