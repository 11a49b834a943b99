use super::{mark, Marker, DEFAULT_INDEX_KEY};
use crate::document::{Display, Document, ElementTemplate, NodeId};
use crate::error::{SearchError, TreeError};
use crate::position::{Match, Span};

fn paragraph(fragments: &[&str]) -> (Document, Vec<NodeId>) {
    let mut doc = Document::new();
    let root = doc.root();
    let p = doc.append_element(root, "p", Display::Block);
    let ids = fragments.iter().map(|text| doc.append_text(p, text)).collect();
    (doc, ids)
}

fn one(fragment: NodeId, start: usize, finish: usize) -> Match<NodeId> {
    Match {
        spans: vec![Span {
            fragment,
            start,
            finish,
        }],
    }
}

fn marker() -> Marker<ElementTemplate> {
    Marker::new(ElementTemplate::new("mark"))
}

#[test]
fn test_mark_middle_of_fragment() {
    let (mut doc, ids) = paragraph(&["hello world"]);
    mark(&mut doc, &[one(ids[0], 6, 11)], &marker()).unwrap();

    assert_eq!(
        doc.to_html(),
        "<p>hello <mark data-match-index=\"0\">world</mark></p>\n"
    );
    assert_eq!(doc.text(ids[0]), Some("hello "));
}

#[test]
fn test_mark_whole_fragment_wraps_without_splitting() {
    let (mut doc, ids) = paragraph(&["cat"]);
    mark(&mut doc, &[one(ids[0], 0, 3)], &marker()).unwrap();

    let marks = doc.elements_by_tag("mark");
    assert_eq!(marks.len(), 1);
    assert_eq!(doc.children(marks[0]), &[ids[0]]);
    assert_eq!(doc.text(ids[0]), Some("cat"));
}

#[test]
fn test_mark_match_spanning_fragments() {
    let (mut doc, ids) = paragraph(&["hel", "lo"]);
    let found = Match {
        spans: vec![
            Span {
                fragment: ids[0],
                start: 0,
                finish: 3,
            },
            Span {
                fragment: ids[1],
                start: 0,
                finish: 2,
            },
        ],
    };
    mark(&mut doc, &[found], &marker()).unwrap();

    let tagged = doc.elements_with_attribute(DEFAULT_INDEX_KEY, "0");
    assert_eq!(tagged.len(), 2);
    assert_ne!(tagged[0], tagged[1]);
    assert_eq!(
        doc.to_html(),
        "<p><mark data-match-index=\"0\">hel</mark><mark data-match-index=\"0\">lo</mark></p>\n"
    );
}

#[test]
fn test_mark_several_matches_in_one_fragment() {
    let (mut doc, ids) = paragraph(&["abcabc"]);
    let matches = [one(ids[0], 1, 2), one(ids[0], 4, 5)];
    mark(&mut doc, &matches, &marker()).unwrap();

    assert_eq!(
        doc.to_html(),
        "<p>a<mark data-match-index=\"0\">b</mark>ca<mark data-match-index=\"1\">b</mark>c</p>\n"
    );
}

#[test]
fn test_mark_adjacent_matches() {
    let (mut doc, ids) = paragraph(&["aaaa"]);
    let matches = [one(ids[0], 0, 2), one(ids[0], 2, 4)];
    mark(&mut doc, &matches, &marker()).unwrap();

    assert_eq!(doc.elements_with_attribute(DEFAULT_INDEX_KEY, "0").len(), 1);
    assert_eq!(doc.elements_with_attribute(DEFAULT_INDEX_KEY, "1").len(), 1);
    assert_eq!(doc.text_content(doc.root()), "aaaa");
}

#[test]
fn test_mark_uses_template_and_custom_key() {
    let (mut doc, ids) = paragraph(&["find me"]);
    let marker = Marker::new(ElementTemplate::new("span").with_attribute("class", "hit"))
        .with_index_key("data-hit");
    mark(&mut doc, &[one(ids[0], 5, 7)], &marker).unwrap();

    assert_eq!(
        doc.to_html(),
        "<p>find <span class=\"hit\" data-hit=\"0\">me</span></p>\n"
    );
}

#[test]
fn test_mark_rejects_out_of_bounds_span_before_mutating() {
    let (mut doc, ids) = paragraph(&["short", "text"]);
    let matches = [one(ids[0], 0, 2), one(ids[1], 2, 9)];
    let before = doc.to_html();

    let err = mark(&mut doc, &matches, &marker()).unwrap_err();

    assert!(matches!(
        err,
        SearchError::Tree(TreeError::OffsetOutOfBounds { len: 4, .. })
    ));
    assert_eq!(doc.to_html(), before);
}
