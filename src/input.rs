//! Finding documents on disk and loading them into searchable trees.
//!
//! Files are parsed with tree-sitter and rebuilt as a [`Document`]: each block of text gets
//! its own block element, and the markup inside a block becomes inline elements. The result
//! is text split across many nodes, which is exactly what the search engine works on.

use crate::document::{Display, Document, NodeId};
use crate::formats::{Format, InlineRole};
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};
use walkdir::WalkDir;

/// Expand the given paths into the files to search.
///
/// Files are taken as given; directories are walked recursively for files whose extension
/// is in `extensions`. Symbolic links inside a directory are not followed. The result is
/// sorted.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn find_documents(paths: Vec<PathBuf>, extensions: &[String]) -> io::Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(&path) {
                let entry = entry?;
                if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
                    documents.push(entry.into_path());
                }
            }
        } else if path.is_file() {
            documents.push(path);
        } else {
            warn!("skipping {}: no such file or directory", path.display());
        }
    }
    documents.sort();
    Ok(documents)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}

/// Read and parse a document from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_document(path: &Path, format: &dyn Format) -> io::Result<Document> {
    let source = fs::read_to_string(path)?;
    parse_document(&source, format)
}

/// Parse source text into a document.
///
/// # Errors
///
/// Returns an error if the format's grammars or block query cannot be loaded, or parsing
/// fails outright.
pub fn parse_document(source: &str, format: &dyn Format) -> io::Result<Document> {
    let language = format.language();
    let mut parser = Parser::new();
    parser.set_language(&language).map_err(io::Error::other)?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| io::Error::other("tree-sitter failed to parse the document"))?;

    let mut inline_parser = Parser::new();
    inline_parser
        .set_language(&format.inline_language())
        .map_err(io::Error::other)?;

    let query = Query::new(&language, format.block_query()).map_err(io::Error::other)?;
    let mut cursor = QueryCursor::new();
    let mut blocks = cursor.matches(&query, tree.root_node(), source.as_bytes());

    let mut document = Document::new();
    let root = document.root();
    while let Some(block) = blocks.next() {
        for capture in block.captures {
            let node = capture.node;
            let Some(text) = source.get(node.byte_range()) else {
                continue;
            };
            let element = document.append_element(root, &format.block_tag(node), Display::Block);
            match inline_parser.parse(text, None) {
                Some(inline) => {
                    append_inline(&mut document, element, inline.root_node(), text, format);
                }
                None => {
                    document.append_text(element, text);
                }
            }
        }
    }

    debug!("loaded {} block(s)", document.children(root).len());
    Ok(document)
}

/// Append the content of `node` to `parent`: gaps between children become text nodes and
/// each child is mapped through the format's inline roles.
fn append_inline(
    document: &mut Document,
    parent: NodeId,
    node: Node<'_>,
    text: &str,
    format: &dyn Format,
) {
    let mut at = node.start_byte();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        append_gap(document, parent, text, at, child.start_byte());
        match format.inline_role(child.kind()) {
            InlineRole::Element { tag, content } => {
                let element = document.append_element(parent, tag, Display::Inline);
                match content {
                    Some(kind) => {
                        let mut inner = child.walk();
                        let holder = child.children(&mut inner).find(|c| c.kind() == kind);
                        if let Some(holder) = holder {
                            append_inline(document, element, holder, text, format);
                        }
                    }
                    None => append_inline(document, element, child, text, format),
                }
            }
            InlineRole::Void(tag) => {
                document.append_element(parent, tag, Display::Void);
            }
            InlineRole::Skip => {}
            InlineRole::Transparent => append_inline(document, parent, child, text, format),
        }
        at = at.max(child.end_byte());
    }
    append_gap(document, parent, text, at, node.end_byte());
}

fn append_gap(document: &mut Document, parent: NodeId, text: &str, start: usize, end: usize) {
    if let Some(gap) = text.get(start..end).filter(|gap| !gap.is_empty()) {
        document.append_text(parent, gap);
    }
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
