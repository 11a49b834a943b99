//! Rewriting the tree so every matched piece of text sits inside a marker.
//!
//! Splitting a fragment only disturbs offsets after the split point, and only within that
//! fragment. Working from the last span of the last match back to the first span of the
//! first match therefore keeps every offset still to be applied valid without recomputing
//! anything. The loops below are the only place that order is enforced.

use crate::error::{SearchError, TreeError};
use crate::position::Match;
use crate::tree::ContentTree;
use log::{debug, trace};

/// Attribute key wrappers carry their match ordinal under unless told otherwise.
pub const DEFAULT_INDEX_KEY: &str = "data-match-index";

#[derive(Debug, Clone, PartialEq, Eq)]
/// What to wrap matched text in, and where to record which match a wrapper belongs to.
pub struct Marker<Tpl> {
    /// Template cloned once per wrapped piece.
    pub template: Tpl,
    /// Attribute key holding the 0-based match ordinal.
    pub index_key: String,
}

impl<Tpl> Marker<Tpl> {
    #[must_use]
    /// Marker recording ordinals under [`DEFAULT_INDEX_KEY`].
    pub fn new(template: Tpl) -> Self {
        Self {
            template,
            index_key: DEFAULT_INDEX_KEY.to_string(),
        }
    }

    #[must_use]
    /// Record ordinals under `key` instead.
    pub fn with_index_key(self, key: impl Into<String>) -> Self {
        Self {
            index_key: key.into(),
            ..self
        }
    }
}

/// Wrap every span of every match in a fresh clone of the marker template.
///
/// All wrappers of the k-th match (counting forwards from 0) are tagged `k`. Spans are
/// checked against their fragments before anything is touched; if the tree adapter fails
/// after that, wrappers already placed for later matches stay in place.
///
/// # Errors
///
/// Returns [`TreeError::OffsetOutOfBounds`] for a span that does not fit its fragment, or
/// any error raised by the tree adapter while splitting and wrapping.
pub fn mark<T: ContentTree>(
    tree: &mut T,
    matches: &[Match<T::Node>],
    marker: &Marker<T::Template>,
) -> Result<(), SearchError> {
    for span in matches.iter().flat_map(|m| &m.spans) {
        let len = tree.length_of(span.fragment)?;
        if span.start > span.finish || span.finish > len {
            return Err(TreeError::OffsetOutOfBounds {
                offset: span.finish.max(span.start),
                len,
            }
            .into());
        }
    }

    for (index, found) in matches.iter().enumerate().rev() {
        let ordinal = index.to_string();
        for span in found.spans.iter().rev() {
            let len = tree.length_of(span.fragment)?;
            if span.finish != len {
                tree.split_at(span.fragment, span.finish)?;
            }
            let target = if span.start == 0 {
                span.fragment
            } else {
                tree.split_at(span.fragment, span.start)?.1
            };
            let wrapper = tree.clone_template(&marker.template);
            tree.set_tag(wrapper, &marker.index_key, &ordinal)?;
            tree.wrap(target, wrapper)?;
            trace!(
                "wrapped {:?} [{}..{}] for match {ordinal}",
                span.fragment,
                span.start,
                span.finish
            );
        }
    }

    debug!("marked {} match(es)", matches.len());
    Ok(())
}

#[cfg(test)]
#[path = "tests/mark.rs"]
mod tests;
