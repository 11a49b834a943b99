//! Pattern adapters: whatever the caller searches with, seen by the engine as a predicate.
//!
//! The engine only ever asks "where is the next match at or after this offset?". Literal,
//! case-insensitive, whole-word and regular-expression searches are all expressed as a
//! [`RegexPattern`]; anything else can implement [`Pattern`] directly, and plain closures
//! do so already.

use crate::error::{PatternBuildError, PatternError};
use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// Finds the next match in a text.
pub trait Pattern {
    /// Locate the first match starting at or after byte offset `from`.
    ///
    /// The whole `text` is passed so that patterns can look at context before `from`.
    ///
    /// # Errors
    ///
    /// Returns whatever error the pattern raises; the engine passes it on unchanged.
    fn find_at(&self, text: &str, from: usize) -> Result<Option<Range<usize>>, PatternError>;
}

impl<F> Pattern for F
where
    F: Fn(&str, usize) -> Result<Option<Range<usize>>, PatternError>,
{
    fn find_at(&self, text: &str, from: usize) -> Result<Option<Range<usize>>, PatternError> {
        self(text, from)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// How a search string should be interpreted.
pub struct PatternOptions {
    /// Treat the search string as a regular expression rather than literal text.
    pub regex: bool,
    /// Ignore letter case.
    pub case_insensitive: bool,
    /// Only match whole words.
    pub whole_word: bool,
}

#[derive(Debug, Clone)]
/// Pattern backed by a compiled regular expression.
pub struct RegexPattern {
    regex: Regex,
    group: usize,
}

impl RegexPattern {
    /// Compile a regular expression.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression does not compile.
    pub fn new(source: &str) -> Result<Self, PatternBuildError> {
        Self::build(
            source,
            PatternOptions {
                regex: true,
                ..PatternOptions::default()
            },
        )
    }

    /// Match `text` literally.
    ///
    /// # Errors
    ///
    /// Returns an error if the escaped text exceeds the regex size limits.
    pub fn literal(text: &str) -> Result<Self, PatternBuildError> {
        Self::build(text, PatternOptions::default())
    }

    /// Compile a search string under the given options.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting expression does not compile.
    pub fn build(source: &str, options: PatternOptions) -> Result<Self, PatternBuildError> {
        let body = if options.regex {
            source.to_string()
        } else {
            regex::escape(source)
        };
        let body = if options.whole_word {
            format!(r"\b(?:{body})\b")
        } else {
            body
        };
        let regex = RegexBuilder::new(&body)
            .case_insensitive(options.case_insensitive)
            .build()?;
        Ok(Self { regex, group: 0 })
    }

    /// Mark only capture group `group` of each match instead of the whole match.
    ///
    /// Matches in which the group does not participate are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression has no such group.
    pub fn with_group(self, group: usize) -> Result<Self, PatternBuildError> {
        if group >= self.regex.captures_len() {
            return Err(PatternBuildError::MissingGroup(group));
        }
        Ok(Self { group, ..self })
    }

    #[must_use]
    /// The compiled expression.
    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }
}

impl Pattern for RegexPattern {
    fn find_at(&self, text: &str, from: usize) -> Result<Option<Range<usize>>, PatternError> {
        if self.group == 0 {
            return Ok(self.regex.find_at(text, from).map(|m| m.range()));
        }
        let mut at = from;
        while at <= text.len() {
            let Some(captures) = self.regex.captures_at(text, at) else {
                return Ok(None);
            };
            if let Some(group) = captures.get(self.group) {
                return Ok(Some(group.range()));
            }
            let whole = captures.get(0).map_or(at, |m| m.end());
            at = if whole > at {
                whole
            } else {
                at + text[at..].chars().next().map_or(1, char::len_utf8)
            };
        }
        Ok(None)
    }
}

#[cfg(test)]
#[path = "tests/pattern.rs"]
mod tests;
