//! Collection of searchable sections from a subtree or a range within it.
//!
//! The walk is read-only, so every range problem is reported before the tree is touched.

use crate::error::SearchError;
use crate::section::Section;
use crate::tree::{ContentTree, Leaf, TextRange};
use log::debug;

/// Accumulates the fragments of the section currently being built.
struct Builder<N> {
    fragments: Vec<N>,
    start_offset: usize,
    length: usize,
}

impl<N> Builder<N> {
    fn new() -> Self {
        Self {
            fragments: Vec::new(),
            start_offset: 0,
            length: 0,
        }
    }

    fn push(&mut self, fragment: N, length: usize) {
        self.fragments.push(fragment);
        self.length += length;
    }

    /// Finish the section, searchable up to `end_offset`, and start an empty one.
    fn close(&mut self, end_offset: usize, sections: &mut Vec<Section<N>>) {
        let builder = std::mem::replace(self, Self::new());
        if end_offset > builder.start_offset {
            sections.push(Section {
                fragments: builder.fragments,
                start_offset: builder.start_offset,
                end_offset,
            });
        }
    }

    fn close_all(&mut self, sections: &mut Vec<Section<N>>) {
        let end = self.length;
        self.close(end, sections);
    }
}

#[derive(PartialEq)]
enum Phase {
    Before,
    Inside,
    After,
}

/// Collect the sections under `root`, optionally bounded by `range`.
///
/// Consecutive text leaves form one section; a block boundary closes it. With a range, text
/// before the start point and after the end point is left out, and the first and last
/// sections record where the range begins and ends inside their flat text.
///
/// # Errors
///
/// Returns [`SearchError::InvalidRange`] if either end of the range is not reached from
/// `root`, the end is reached first, or an offset lies outside its fragment. A fragment
/// that cannot be read surfaces as [`SearchError::Tree`].
pub fn collect<T: ContentTree>(
    tree: &T,
    root: T::Node,
    range: Option<&TextRange<T::Node>>,
) -> Result<Vec<Section<T::Node>>, SearchError> {
    let sections = match range {
        None => collect_all(tree, root)?,
        Some(range) => collect_range(tree, root, range)?,
    };
    debug!(
        "collected {} section(s) holding {} fragment(s)",
        sections.len(),
        sections.iter().map(|s| s.fragments.len()).sum::<usize>()
    );
    Ok(sections)
}

fn collect_all<T: ContentTree>(
    tree: &T,
    root: T::Node,
) -> Result<Vec<Section<T::Node>>, SearchError> {
    let mut sections = Vec::new();
    let mut current = Builder::new();
    for leaf in tree.leaves(root) {
        match leaf {
            Leaf::Text(fragment) => current.push(fragment, tree.length_of(fragment)?),
            Leaf::Boundary => current.close_all(&mut sections),
            Leaf::Ignored => {}
        }
    }
    current.close_all(&mut sections);
    Ok(sections)
}

fn collect_range<T: ContentTree>(
    tree: &T,
    root: T::Node,
    range: &TextRange<T::Node>,
) -> Result<Vec<Section<T::Node>>, SearchError> {
    let mut sections = Vec::new();
    let mut current = Builder::new();
    let mut phase = Phase::Before;

    for leaf in tree.leaves(root) {
        match leaf {
            Leaf::Text(fragment) => {
                let length = tree.length_of(fragment)?;
                if phase == Phase::Before {
                    if fragment == range.end.node && fragment != range.start.node {
                        return Err(SearchError::InvalidRange("range ends before it starts"));
                    }
                    if fragment != range.start.node {
                        continue;
                    }
                    if !tree.text_of(fragment)?.is_char_boundary(range.start.offset) {
                        return Err(SearchError::InvalidRange(
                            "range start is not a character position of its fragment",
                        ));
                    }
                    phase = Phase::Inside;
                    current.start_offset = range.start.offset;
                }
                let fragment_start = current.length;
                current.push(fragment, length);
                if fragment == range.end.node {
                    if !tree.text_of(fragment)?.is_char_boundary(range.end.offset) {
                        return Err(SearchError::InvalidRange(
                            "range end is not a character position of its fragment",
                        ));
                    }
                    let end_offset = fragment_start + range.end.offset;
                    if end_offset < current.start_offset {
                        return Err(SearchError::InvalidRange("range ends before it starts"));
                    }
                    current.close(end_offset, &mut sections);
                    phase = Phase::After;
                    break;
                }
            }
            Leaf::Boundary if phase == Phase::Inside => current.close_all(&mut sections),
            Leaf::Boundary | Leaf::Ignored => {}
        }
    }

    match phase {
        Phase::Before => Err(SearchError::InvalidRange(
            "range start is not inside the searched root",
        )),
        Phase::Inside => Err(SearchError::InvalidRange(
            "range end is not inside the searched root",
        )),
        Phase::After => Ok(sections),
    }
}

#[cfg(test)]
#[path = "tests/collect.rs"]
mod tests;
