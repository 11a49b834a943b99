//! Error types for collection, matching and marking.
//!
//! Range problems are caught while collecting, which never touches the tree, so an
//! `InvalidRange` always means nothing was mutated. Pattern errors are passed through
//! untouched since the engine has no idea what syntax the caller's pattern speaks.

use thiserror::Error;

/// Error raised by a [`Pattern`](crate::pattern::Pattern) while matching.
pub type PatternError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
/// Failure of a search-and-mark call.
pub enum SearchError {
    /// The supplied range does not lie within the searched root.
    #[error("invalid range: {0}")]
    InvalidRange(&'static str),
    /// The pattern adapter failed while matching.
    #[error(transparent)]
    Pattern(PatternError),
    /// The pattern adapter reported a match outside the text it was given.
    #[error("pattern reported match {start}..{finish} outside text of length {len}")]
    MatchOutOfBounds {
        /// Reported start of the match.
        start: usize,
        /// Reported end of the match.
        finish: usize,
        /// Length of the searched text.
        len: usize,
    },
    /// A tree adapter operation failed.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Failure of a tree or selection adapter operation.
pub enum TreeError {
    /// The node does not carry text.
    #[error("node {0} is not a text fragment")]
    NotText(String),
    /// The node cannot carry attributes.
    #[error("node {0} is not an element")]
    NotElement(String),
    /// An offset lies past the end of the text it indexes.
    #[error("offset {offset} is out of bounds for text of length {len}")]
    OffsetOutOfBounds {
        /// Requested offset.
        offset: usize,
        /// Length of the text.
        len: usize,
    },
    /// An offset falls inside a multi-byte character.
    #[error("offset {0} is not on a character boundary")]
    NotCharBoundary(usize),
    /// The node has no parent to be wrapped within.
    #[error("node {0} is detached from the tree")]
    Detached(String),
    /// A range ends before it starts.
    #[error("range end {end} precedes its start {start}")]
    InvertedRange {
        /// Flat offset of the range start.
        start: usize,
        /// Flat offset of the range end.
        end: usize,
    },
}

#[derive(Debug, Error)]
/// Failure to build a [`RegexPattern`](crate::pattern::RegexPattern).
pub enum PatternBuildError {
    /// The regular expression did not compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),
    /// The requested capture group does not exist in the expression.
    #[error("pattern has no capture group {0}")]
    MissingGroup(usize),
}
