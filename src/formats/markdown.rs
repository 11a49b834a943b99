//! Markdown format implementation using tree-sitter-md.
//!
//! Blocks come from the block grammar: every `inline` node is the text of a paragraph,
//! heading or table cell. That text is then parsed with the inline grammar, so emphasis,
//! code spans and links become inline elements and their delimiters disappear.

use crate::formats::{Format, InlineRole};

/// Tree-sitter grammars and mappings for markdown documents.
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn inline_language(&self) -> tree_sitter::Language {
        tree_sitter_md::INLINE_LANGUAGE.into()
    }

    fn block_query(&self) -> &'static str {
        "(inline) @inline"
    }

    fn block_tag(&self, inline: tree_sitter::Node<'_>) -> String {
        let Some(block) = inline.parent() else {
            return "p".to_string();
        };
        match block.kind() {
            "atx_heading" => {
                let mut cursor = block.walk();
                let level = block.children(&mut cursor).find_map(|child| {
                    child
                        .kind()
                        .strip_prefix("atx_")
                        .and_then(|kind| kind.strip_suffix("_marker"))
                        .map(str::to_string)
                });
                level.unwrap_or_else(|| "h1".to_string())
            }
            "setext_heading" => {
                let mut cursor = block.walk();
                let second = block
                    .children(&mut cursor)
                    .any(|child| child.kind() == "setext_h2_underline");
                if second { "h2" } else { "h1" }.to_string()
            }
            "pipe_table_cell" => "td".to_string(),
            _ => "p".to_string(),
        }
    }

    fn inline_role(&self, kind: &str) -> InlineRole {
        match kind {
            "emphasis" => InlineRole::Element {
                tag: "em",
                content: None,
            },
            "strong_emphasis" => InlineRole::Element {
                tag: "strong",
                content: None,
            },
            "code_span" => InlineRole::Element {
                tag: "code",
                content: None,
            },
            "strikethrough" => InlineRole::Element {
                tag: "del",
                content: None,
            },
            "inline_link" | "full_reference_link" | "collapsed_reference_link"
            | "shortcut_link" => InlineRole::Element {
                tag: "a",
                content: Some("link_text"),
            },
            "image" => InlineRole::Void("img"),
            "hard_line_break" => InlineRole::Void("br"),
            "emphasis_delimiter" | "code_span_delimiter" | "html_tag" | "link_destination"
            | "link_title" | "link_label" => InlineRole::Skip,
            _ => InlineRole::Transparent,
        }
    }
}
