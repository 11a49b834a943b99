//! Format trait and implementations for different document types.
//!
//! This module defines the `Format` trait which abstracts over the document formats findmark
//! can load into a searchable tree, by providing the tree-sitter grammars and the mapping
//! from syntax nodes to elements specific to each format.

pub mod markdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What an inline syntax node becomes in the loaded document.
pub enum InlineRole {
    /// An inline element. With `content`, only the named child's text goes inside it.
    Element {
        /// Tag of the element.
        tag: &'static str,
        /// Kind of the single child that holds the element's text, if not all of them.
        content: Option<&'static str>,
    },
    /// A void element that breaks the text around it.
    Void(&'static str),
    /// Markup with no readable text, dropped entirely.
    Skip,
    /// No element of its own; its text and children are kept in place.
    Transparent,
}

/// Grammars and node mappings for one document format.
pub trait Format {
    /// Grammar for the block structure.
    fn language(&self) -> tree_sitter::Language;
    /// Grammar for the text inside a block.
    fn inline_language(&self) -> tree_sitter::Language;
    /// Query capturing every node whose text forms one block of the document.
    fn block_query(&self) -> &str;
    /// Tag for the block element built around a captured node.
    fn block_tag(&self, inline: tree_sitter::Node<'_>) -> String;
    /// How an inline node of the given kind is represented.
    fn inline_role(&self, kind: &str) -> InlineRole;
}
