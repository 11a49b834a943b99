use super::{extract, find, Position, Span};
use crate::document::{Display, Document, NodeId};
use crate::error::{PatternError, SearchError};
use crate::pattern::RegexPattern;
use std::ops::Range;

fn paragraph(fragments: &[&str]) -> (Document, Vec<NodeId>) {
    let mut doc = Document::new();
    let root = doc.root();
    let p = doc.append_element(root, "p", Display::Block);
    let ids = fragments.iter().map(|text| doc.append_text(p, text)).collect();
    (doc, ids)
}

fn pos(start: usize, finish: usize) -> Position {
    Position { start, finish }
}

#[test]
fn test_find_single_match() {
    let pattern = RegexPattern::literal("world").unwrap();
    let positions = find("hello world", &pattern, 0, 11).unwrap();
    assert_eq!(positions, vec![pos(6, 11)]);
}

#[test]
fn test_find_is_non_overlapping() {
    let pattern = RegexPattern::literal("aa").unwrap();
    let positions = find("aaaaa", &pattern, 0, 5).unwrap();
    assert_eq!(positions, vec![pos(0, 2), pos(2, 4)]);
}

#[test]
fn test_find_empty_pattern_terminates() {
    let pattern = RegexPattern::new("").unwrap();
    let positions = find("aa", &pattern, 0, 2).unwrap();
    assert_eq!(positions, vec![pos(0, 0), pos(1, 1), pos(2, 2)]);
}

#[test]
fn test_find_empty_match_advances_whole_characters() {
    let pattern = RegexPattern::new("x*").unwrap();
    let positions = find("éx", &pattern, 0, 3).unwrap();
    assert_eq!(positions, vec![pos(0, 0), pos(2, 3), pos(3, 3)]);
}

#[test]
fn test_find_respects_search_window() {
    let pattern = RegexPattern::literal("ab").unwrap();
    let text = "ab ab ab";
    assert_eq!(find(text, &pattern, 1, 7).unwrap(), vec![pos(3, 5), pos(6, 8)]);
    // A match straddling the end of the window is not taken.
    assert_eq!(find(text, &pattern, 0, 4).unwrap(), vec![pos(0, 2)]);
}

#[test]
fn test_find_sees_context_before_window() {
    let pattern = RegexPattern::new(r"\bcat").unwrap();
    assert!(find("concat", &pattern, 3, 3).unwrap().is_empty());
}

#[test]
fn test_find_passes_pattern_errors_through() {
    let failing = |_: &str, _: usize| -> Result<Option<Range<usize>>, PatternError> {
        Err("pattern exploded".into())
    };
    let err = find("text", &failing, 0, 4).unwrap_err();
    assert!(matches!(err, SearchError::Pattern(_)));
    assert_eq!(err.to_string(), "pattern exploded");
}

#[test]
fn test_find_rejects_matches_behind_the_cursor() {
    let backwards =
        |_: &str, _: usize| -> Result<Option<Range<usize>>, PatternError> { Ok(Some(0..1)) };
    let err = find("text", &backwards, 2, 2).unwrap_err();
    assert!(matches!(err, SearchError::MatchOutOfBounds { .. }));
}

#[test]
fn test_extract_single_fragment() {
    let (doc, ids) = paragraph(&["hello world"]);
    let matches = extract(&doc, &ids, &[pos(6, 11)]).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(
        matches[0].spans,
        vec![Span {
            fragment: ids[0],
            start: 6,
            finish: 11
        }]
    );
}

#[test]
fn test_extract_across_fragments() {
    let (doc, ids) = paragraph(&["hel", "lo"]);
    let matches = extract(&doc, &ids, &[pos(0, 5)]).unwrap();
    assert_eq!(
        matches[0].spans,
        vec![
            Span {
                fragment: ids[0],
                start: 0,
                finish: 3
            },
            Span {
                fragment: ids[1],
                start: 0,
                finish: 2
            },
        ]
    );
    assert_eq!(matches[0].text(&doc).unwrap(), "hello");
}

#[test]
fn test_extract_match_ending_at_fragment_end() {
    let (doc, ids) = paragraph(&["ab", "cd"]);
    let matches = extract(&doc, &ids, &[pos(0, 2), pos(2, 4)]).unwrap();
    assert_eq!(matches[0].spans.len(), 1);
    assert_eq!(matches[0].spans[0].fragment, ids[0]);
    assert_eq!(matches[1].spans.len(), 1);
    assert_eq!(matches[1].spans[0].fragment, ids[1]);
}

#[test]
fn test_extract_skips_empty_fragments() {
    let (doc, ids) = paragraph(&["ab", "", "cd"]);
    let matches = extract(&doc, &ids, &[pos(1, 3), pos(2, 3)]).unwrap();
    let fragments: Vec<_> = matches[0].spans.iter().map(|s| s.fragment).collect();
    assert_eq!(fragments, vec![ids[0], ids[2]]);
    assert_eq!(matches[0].text(&doc).unwrap(), "bc");
    assert_eq!(
        matches[1].spans,
        vec![Span {
            fragment: ids[2],
            start: 0,
            finish: 1
        }]
    );
}

#[test]
fn test_extract_drops_empty_positions() {
    let (doc, ids) = paragraph(&["aa"]);
    let matches = extract(&doc, &ids, &[pos(0, 0), pos(0, 1), pos(2, 2)]).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].spans[0].start, 0);
    assert_eq!(matches[0].spans[0].finish, 1);
}

#[test]
fn test_extract_many_matches_in_one_fragment() {
    let (doc, ids) = paragraph(&["x", "abcabc", "y"]);
    let matches = extract(&doc, &ids, &[pos(2, 3), pos(5, 6)]).unwrap();
    let local: Vec<_> = matches
        .iter()
        .flat_map(|m| m.spans.iter().map(|s| (s.fragment, s.start, s.finish)))
        .collect();
    assert_eq!(local, vec![(ids[1], 1, 2), (ids[1], 4, 5)]);
}
