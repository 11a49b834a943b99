//! Entry points tying collection, matching and marking together.
//!
//! Nothing here suspends or yields: a call owns the tree from the first read to the last
//! write, which is what keeps the offsets computed during collection meaningful when the
//! marking pass applies them.

use crate::collect::collect;
use crate::error::SearchError;
use crate::mark::{mark, Marker};
use crate::pattern::Pattern;
use crate::position::{extract, find, Match};
use crate::section::Section;
use crate::tree::{ContentTree, Selection, TextRange};
use log::{debug, warn};

/// Match `pattern` against every section and number the results in document order.
///
/// The tree is not modified.
///
/// # Errors
///
/// Returns an error if the pattern fails or a fragment cannot be read.
pub fn find_matches<T, P>(
    tree: &T,
    sections: &[Section<T::Node>],
    pattern: &P,
) -> Result<Vec<Match<T::Node>>, SearchError>
where
    T: ContentTree,
    P: Pattern + ?Sized,
{
    let mut matches = Vec::new();
    for section in sections {
        let text = section.text(tree)?;
        let positions = find(
            &text,
            pattern,
            section.start_offset,
            section.search_length(),
        )?;
        matches.extend(extract(tree, &section.fragments, &positions)?);
    }
    debug!(
        "found {} match(es) across {} section(s)",
        matches.len(),
        sections.len()
    );
    Ok(matches)
}

/// Find and mark every match of `pattern` under `root`, returning how many were marked.
///
/// # Errors
///
/// Returns an error if the pattern fails or the tree adapter rejects an operation.
pub fn find_and_mark<T, P>(
    tree: &mut T,
    root: T::Node,
    pattern: &P,
    marker: &Marker<T::Template>,
) -> Result<usize, SearchError>
where
    T: ContentTree,
    P: Pattern + ?Sized,
{
    search_and_mark(tree, root, None, pattern, marker)
}

/// Find and mark every match of `pattern` inside the current selection.
///
/// The selection is bookmarked before anything else happens and restored after marking,
/// even when the search itself failed. Without a selection nothing is searched.
///
/// # Errors
///
/// Returns [`SearchError::InvalidRange`] if the selection lies outside the tree's root,
/// any error from matching or marking, or the restore failure if only that step failed.
pub fn find_and_mark_in_selection<T, P>(
    tree: &mut T,
    pattern: &P,
    marker: &Marker<T::Template>,
) -> Result<usize, SearchError>
where
    T: Selection,
    P: Pattern + ?Sized,
{
    let bookmark = tree.capture_bookmark();

    let outcome = match tree.current_range() {
        Some(range) => {
            let root = tree.root();
            search_and_mark(tree, root, Some(&range), pattern, marker)
        }
        None => Ok(0),
    };

    match tree.restore_bookmark(bookmark) {
        Ok(()) => outcome,
        Err(err) => {
            warn!("could not restore the selection after searching: {err}");
            outcome.and(Err(err.into()))
        }
    }
}

fn search_and_mark<T, P>(
    tree: &mut T,
    root: T::Node,
    range: Option<&TextRange<T::Node>>,
    pattern: &P,
    marker: &Marker<T::Template>,
) -> Result<usize, SearchError>
where
    T: ContentTree,
    P: Pattern + ?Sized,
{
    let sections = collect(tree, root, range)?;
    let matches = find_matches(tree, &sections, pattern)?;
    mark(tree, &matches, marker)?;
    Ok(matches.len())
}

#[cfg(test)]
#[path = "tests/search.rs"]
mod tests;
