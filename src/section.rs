//! Section representation for text collected out of a content tree.
//!
//! A section is a run of text fragments that reads as contiguous text: no block boundary
//! falls between any two of its fragments. Sections track the window of their flat text
//! that is open to searching, which is narrower than the whole run only at the edges of a
//! range search.

use crate::error::TreeError;
use crate::tree::ContentTree;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Contiguous run of text fragments with the searchable window of their joined text.
pub struct Section<N> {
    /// Fragments in document order.
    pub fragments: Vec<N>,
    /// Flat offset where searching starts (nonzero only when a range begins mid-fragment).
    pub start_offset: usize,
    /// Flat offset where searching stops (short of the total only when a range ends early).
    pub end_offset: usize,
}

impl<N: Copy> Section<N> {
    /// Concatenated text of all fragments.
    ///
    /// # Errors
    ///
    /// Returns an error if a fragment is no longer a text node.
    pub fn text<T>(&self, tree: &T) -> Result<String, TreeError>
    where
        T: ContentTree<Node = N>,
    {
        let mut text = String::new();
        for &fragment in &self.fragments {
            text.push_str(tree.text_of(fragment)?);
        }
        Ok(text)
    }

    #[must_use]
    /// Length of the searchable window.
    pub fn search_length(&self) -> usize {
        self.end_offset.saturating_sub(self.start_offset)
    }
}
