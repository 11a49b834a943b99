//! Collaborator interfaces through which the engine reads and rewrites a content tree.
//!
//! The engine never inspects node types itself. A tree adapter walks its own structure and
//! reports every position as a [`Leaf`], and exposes the handful of primitives marking needs:
//! reading fragment text, splitting a fragment, and wrapping a fragment in a fresh marker.

use crate::error::TreeError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Classification of a position met while walking a tree in document order.
pub enum Leaf<N> {
    /// A node carrying a run of text.
    Text(N),
    /// A block-level edge (start or end of a block, or a void element such as a line break).
    ///
    /// Text on either side of a boundary never belongs to the same section.
    Boundary,
    /// Content that neither carries searchable text nor interrupts it.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A position inside a text fragment.
pub struct TextPoint<N> {
    /// Fragment holding the position.
    pub node: N,
    /// Byte offset within the fragment's text.
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A range between two text positions, start inclusive and end exclusive.
pub struct TextRange<N> {
    /// Where the range begins.
    pub start: TextPoint<N>,
    /// Where the range ends.
    pub end: TextPoint<N>,
}

impl<N: Copy + Eq> TextRange<N> {
    #[must_use]
    /// Whether the range covers no text at all.
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Tree operations the engine relies on.
///
/// Offsets are UTF-8 byte offsets into a fragment's text.
pub trait ContentTree {
    /// Handle to a node. Text fragments and marker wrappers are both nodes.
    type Node: Copy + Eq + fmt::Debug;
    /// Caller-supplied shape of the marker wrapped around each matched piece.
    type Template;

    /// The editable root, used when searching the current selection.
    fn root(&self) -> Self::Node;

    /// Every position under `root`, in document order.
    fn leaves(&self, root: Self::Node) -> impl Iterator<Item = Leaf<Self::Node>> + '_;

    /// Text of a fragment.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not a text fragment.
    fn text_of(&self, fragment: Self::Node) -> Result<&str, TreeError>;

    /// Length in bytes of a fragment's text.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not a text fragment.
    fn length_of(&self, fragment: Self::Node) -> Result<usize, TreeError> {
        self.text_of(fragment).map(str::len)
    }

    /// Split a fragment at `offset`, returning the part before and the new part after.
    ///
    /// The original handle keeps denoting the part before the split.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not text or the offset is not a valid split point.
    fn split_at(
        &mut self,
        fragment: Self::Node,
        offset: usize,
    ) -> Result<(Self::Node, Self::Node), TreeError>;

    /// Create a fresh, detached wrapper from the template.
    fn clone_template(&mut self, template: &Self::Template) -> Self::Node;

    /// Put `wrapper` where `fragment` is and move `fragment` inside it.
    ///
    /// # Errors
    ///
    /// Returns an error if the fragment has no parent.
    fn wrap(&mut self, fragment: Self::Node, wrapper: Self::Node) -> Result<(), TreeError>;

    /// Record `key = value` on a wrapper.
    ///
    /// # Errors
    ///
    /// Returns an error if the node cannot carry attributes.
    fn set_tag(&mut self, wrapper: Self::Node, key: &str, value: &str) -> Result<(), TreeError>;
}

/// Selection state that survives the tree being restructured underneath it.
///
/// Bookmarks must not hold raw node handles: marking splits and wraps fragments, so a
/// handle captured beforehand may point at the wrong text afterwards.
pub trait Selection: ContentTree {
    /// Position-independent snapshot of the selection.
    type Bookmark;

    /// Snapshot the current selection.
    fn capture_bookmark(&self) -> Self::Bookmark;

    /// Move the selection back to where a bookmark says it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the bookmark no longer resolves against the tree.
    fn restore_bookmark(&mut self, bookmark: Self::Bookmark) -> Result<(), TreeError>;

    /// The selected range, if there is one.
    fn current_range(&self) -> Option<TextRange<Self::Node>>;
}
