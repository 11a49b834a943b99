//! The report summarises what a run marked, for display or for other tools to consume.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
/// Serialisable outcome of marking a set of documents.
pub struct Report {
    /// One entry per searched document, in search order.
    pub files: Vec<FileReport>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// What was marked in one document.
pub struct FileReport {
    /// Path of the searched document.
    pub path: String,
    /// Number of matches marked.
    pub matches: usize,
    /// The document rendered as HTML with markers in place.
    pub html: String,
}

impl Report {
    #[must_use]
    /// Total number of matches across all documents.
    pub fn total(&self) -> usize {
        self.files.iter().map(|file| file.matches).sum()
    }
}

#[cfg(test)]
#[path = "tests/report.rs"]
mod tests;
