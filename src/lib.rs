//! findmark: find and mark text that is fragmented across the leaves of a tree.
//!
//! Text in a structured document is rarely one string. A word can be split between a plain
//! run and an emphasised one, and a paragraph break can sit between two words that happen to
//! spell the search term. findmark collects block-delimited runs of text fragments into
//! [`Section`](section::Section)s, matches a [`Pattern`](pattern::Pattern) against each run's
//! joined text, maps every match back onto the fragments it touches, and wraps the matched
//! pieces in marker elements tagged with the match's ordinal.
//!
//! The engine reaches the tree only through [`ContentTree`](tree::ContentTree) and
//! [`Selection`](tree::Selection); [`Document`](document::Document) is the bundled
//! implementation.

pub mod collect;
pub mod config;
pub mod document;
pub mod error;
pub mod formats;
pub mod input;
pub mod mark;
pub mod pattern;
pub mod position;
pub mod report;
pub mod search;
pub mod section;
pub mod tree;

pub use error::{SearchError, TreeError};
pub use mark::Marker;
pub use search::{find_and_mark, find_and_mark_in_selection, find_matches};

#[cfg(test)]
#[path = "tests/properties.rs"]
mod properties;
