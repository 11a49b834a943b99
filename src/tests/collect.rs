use super::collect;
use crate::document::{Display, Document};
use crate::error::SearchError;
use crate::tree::{TextPoint, TextRange};

#[test]
fn test_inline_elements_stay_in_one_section() {
    let mut doc = Document::new();
    let root = doc.root();
    let p = doc.append_element(root, "p", Display::Block);
    let a = doc.append_text(p, "hel");
    let em = doc.append_element(p, "em", Display::Inline);
    let b = doc.append_text(em, "lo");

    let sections = collect(&doc, root, None).unwrap();

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].fragments, vec![a, b]);
    assert_eq!(sections[0].start_offset, 0);
    assert_eq!(sections[0].end_offset, 5);
}

#[test]
fn test_blocks_and_breaks_split_sections() {
    let mut doc = Document::new();
    let root = doc.root();
    let first = doc.append_element(root, "p", Display::Block);
    let a = doc.append_text(first, "one");
    doc.append_element(first, "br", Display::Void);
    let b = doc.append_text(first, "two");
    let second = doc.append_element(root, "p", Display::Block);
    let c = doc.append_text(second, "three");

    let sections = collect(&doc, root, None).unwrap();

    let fragments: Vec<_> = sections.iter().map(|s| s.fragments.clone()).collect();
    assert_eq!(fragments, vec![vec![a], vec![b], vec![c]]);
}

#[test]
fn test_hidden_content_is_skipped_without_splitting() {
    let mut doc = Document::new();
    let root = doc.root();
    let p = doc.append_element(root, "p", Display::Block);
    let a = doc.append_text(p, "ca");
    let script = doc.append_element(p, "script", Display::Hidden);
    doc.append_text(script, "ignored");
    let b = doc.append_text(p, "t");

    let sections = collect(&doc, root, None).unwrap();

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].fragments, vec![a, b]);
}

#[test]
fn test_empty_input_has_no_sections() {
    let mut doc = Document::new();
    let root = doc.root();
    assert!(collect(&doc, root, None).unwrap().is_empty());

    let p = doc.append_element(root, "p", Display::Block);
    doc.append_text(p, "");
    assert!(collect(&doc, root, None).unwrap().is_empty());
}

#[test]
fn test_range_records_start_and_end_offsets() {
    let mut doc = Document::new();
    let root = doc.root();
    let first = doc.append_element(root, "p", Display::Block);
    let outside = doc.append_text(first, "before");
    let second = doc.append_element(root, "p", Display::Block);
    let a = doc.append_text(second, "abcdefghij");
    let third = doc.append_element(root, "p", Display::Block);
    let b = doc.append_text(third, "xy");
    let c = doc.append_text(third, "zzz");

    let range = TextRange {
        start: TextPoint { node: a, offset: 3 },
        end: TextPoint { node: c, offset: 1 },
    };
    let sections = collect(&doc, root, Some(&range)).unwrap();

    assert_eq!(sections.len(), 2);
    assert!(!sections[0].fragments.contains(&outside));
    assert_eq!(sections[0].fragments, vec![a]);
    assert_eq!(sections[0].start_offset, 3);
    assert_eq!(sections[0].end_offset, 10);
    assert_eq!(sections[1].fragments, vec![b, c]);
    assert_eq!(sections[1].start_offset, 0);
    assert_eq!(sections[1].end_offset, 3);
}

#[test]
fn test_range_within_one_fragment() {
    let mut doc = Document::new();
    let root = doc.root();
    let p = doc.append_element(root, "p", Display::Block);
    let a = doc.append_text(p, "abcdefghij");

    let range = TextRange {
        start: TextPoint { node: a, offset: 2 },
        end: TextPoint { node: a, offset: 7 },
    };
    let sections = collect(&doc, root, Some(&range)).unwrap();

    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].start_offset, 2);
    assert_eq!(sections[0].end_offset, 7);
    assert_eq!(sections[0].search_length(), 5);
}

#[test]
fn test_collapsed_range_has_no_sections() {
    let mut doc = Document::new();
    let root = doc.root();
    let p = doc.append_element(root, "p", Display::Block);
    let a = doc.append_text(p, "abc");

    let caret = TextPoint { node: a, offset: 1 };
    let range = TextRange {
        start: caret,
        end: caret,
    };
    assert!(range.is_collapsed());
    assert!(collect(&doc, root, Some(&range)).unwrap().is_empty());
}

#[test]
fn test_range_outside_root_is_rejected() {
    let mut doc = Document::new();
    let root = doc.root();
    let first = doc.append_element(root, "p", Display::Block);
    let a = doc.append_text(first, "inside");
    let second = doc.append_element(root, "p", Display::Block);
    let b = doc.append_text(second, "elsewhere");

    let range = TextRange {
        start: TextPoint { node: b, offset: 0 },
        end: TextPoint { node: b, offset: 4 },
    };
    let err = collect(&doc, first, Some(&range)).unwrap_err();
    assert!(matches!(err, SearchError::InvalidRange(_)), "{err:?}");

    let half_out = TextRange {
        start: TextPoint { node: a, offset: 0 },
        end: TextPoint { node: b, offset: 4 },
    };
    let err = collect(&doc, first, Some(&half_out)).unwrap_err();
    assert!(matches!(err, SearchError::InvalidRange(_)), "{err:?}");
}

#[test]
fn test_inverted_range_is_rejected() {
    let mut doc = Document::new();
    let root = doc.root();
    let p = doc.append_element(root, "p", Display::Block);
    let a = doc.append_text(p, "first");
    let b = doc.append_text(p, "second");

    let across = TextRange {
        start: TextPoint { node: b, offset: 0 },
        end: TextPoint { node: a, offset: 2 },
    };
    assert!(matches!(
        collect(&doc, root, Some(&across)),
        Err(SearchError::InvalidRange(_))
    ));

    let within = TextRange {
        start: TextPoint { node: a, offset: 4 },
        end: TextPoint { node: a, offset: 1 },
    };
    assert!(matches!(
        collect(&doc, root, Some(&within)),
        Err(SearchError::InvalidRange(_))
    ));
}

#[test]
fn test_range_offset_past_fragment_is_rejected() {
    let mut doc = Document::new();
    let root = doc.root();
    let p = doc.append_element(root, "p", Display::Block);
    let a = doc.append_text(p, "abc");

    let range = TextRange {
        start: TextPoint { node: a, offset: 0 },
        end: TextPoint { node: a, offset: 9 },
    };
    assert!(matches!(
        collect(&doc, root, Some(&range)),
        Err(SearchError::InvalidRange(_))
    ));
}
