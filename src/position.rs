//! Matching over flat section text and mapping matches back onto fragments.
//!
//! A section's fragments are joined into one string so the pattern sees the text the way a
//! reader does. Each match found there is then cut back into per-fragment spans by walking
//! the fragments with a running offset.

use crate::error::SearchError;
use crate::pattern::Pattern;
use crate::tree::ContentTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A match in flat text, start inclusive and finish exclusive.
pub struct Position {
    /// Flat offset of the first matched byte.
    pub start: usize,
    /// Flat offset just past the last matched byte.
    pub finish: usize,
}

impl Position {
    #[must_use]
    /// Whether the match covers no text.
    pub fn is_empty(&self) -> bool {
        self.start == self.finish
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The part of a match that falls inside one fragment, in fragment-local offsets.
pub struct Span<N> {
    /// Fragment the span lies in.
    pub fragment: N,
    /// Local offset of the first matched byte.
    pub start: usize,
    /// Local offset just past the last matched byte.
    pub finish: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One match, as the spans it covers in document order.
pub struct Match<N> {
    /// One span per fragment the match overlaps.
    pub spans: Vec<Span<N>>,
}

impl<N: Copy> Match<N> {
    /// The matched text, read back from the spans.
    ///
    /// # Errors
    ///
    /// Returns an error if a span's fragment can no longer be read.
    pub fn text<T>(&self, tree: &T) -> Result<String, SearchError>
    where
        T: ContentTree<Node = N>,
    {
        let mut text = String::new();
        for span in &self.spans {
            let fragment = tree.text_of(span.fragment)?;
            let piece = fragment
                .get(span.start..span.finish)
                .ok_or(SearchError::MatchOutOfBounds {
                    start: span.start,
                    finish: span.finish,
                    len: fragment.len(),
                })?;
            text.push_str(piece);
        }
        Ok(text)
    }
}

/// Find every non-overlapping match within `[search_start, search_start + search_length)`.
///
/// Each search resumes where the previous match ended. A zero-length match moves the cursor
/// on by one character, so the loop always terminates: `"aa"` searched with an empty
/// pattern gives three empty positions.
///
/// # Errors
///
/// Passes on any pattern error, and reports [`SearchError::MatchOutOfBounds`] if the pattern
/// returns a match that starts before the cursor or runs past the text.
pub fn find<P: Pattern + ?Sized>(
    text: &str,
    pattern: &P,
    search_start: usize,
    search_length: usize,
) -> Result<Vec<Position>, SearchError> {
    let end = search_start.saturating_add(search_length).min(text.len());
    let mut positions = Vec::new();
    let mut from = search_start;

    while from <= end {
        let Some(found) = pattern
            .find_at(text, from)
            .map_err(SearchError::Pattern)?
        else {
            break;
        };
        if found.start < from || found.end < found.start || found.end > text.len() {
            return Err(SearchError::MatchOutOfBounds {
                start: found.start,
                finish: found.end,
                len: text.len(),
            });
        }
        if found.end > end {
            break;
        }
        positions.push(Position {
            start: found.start,
            finish: found.end,
        });
        from = if found.is_empty() {
            next_char(text, found.end)
        } else {
            found.end
        };
    }

    Ok(positions)
}

fn next_char(text: &str, at: usize) -> usize {
    at + text
        .get(at..)
        .and_then(|rest| rest.chars().next())
        .map_or(1, char::len_utf8)
}

/// Cut flat positions into per-fragment spans.
///
/// A position overlaps a fragment occupying `[lo, hi)` of the flat text when
/// `start < hi && finish > lo`, so empty fragments never receive a span and a match ending
/// exactly at a fragment's end stays with that fragment. Empty positions produce no match.
///
/// # Errors
///
/// Returns an error if a fragment's length cannot be read.
pub fn extract<T: ContentTree>(
    tree: &T,
    fragments: &[T::Node],
    positions: &[Position],
) -> Result<Vec<Match<T::Node>>, SearchError> {
    let positions: Vec<Position> = positions.iter().copied().filter(|p| !p.is_empty()).collect();
    let mut matches: Vec<Match<T::Node>> = positions
        .iter()
        .map(|_| Match { spans: Vec::new() })
        .collect();

    let mut first = 0;
    let mut lo = 0;
    for &fragment in fragments {
        let hi = lo + tree.length_of(fragment)?;
        while first < positions.len() && positions[first].finish <= lo {
            first += 1;
        }
        if hi > lo {
            for (position, found) in positions[first..].iter().zip(&mut matches[first..]) {
                if position.start >= hi {
                    break;
                }
                found.spans.push(Span {
                    fragment,
                    start: position.start.max(lo) - lo,
                    finish: position.finish.min(hi) - lo,
                });
            }
        }
        lo = hi;
    }

    Ok(matches)
}

#[cfg(test)]
#[path = "tests/position.rs"]
mod tests;
