//! # Class Value Splitting
//!
//! Splits a raw attribute value into its leading whitespace, the class tokens and the
//! whitespace runs between them, and joins those parts back together. The two operations
//! are exact inverses: `join_class_value_parts(&split_class_value(v)) == v` for every `v`,
//! which is what lets rules rewrite single tokens without disturbing the surrounding layout.

use std::ops::Range;

/// A raw attribute value decomposed into tokens and whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassValueParts {
    /// The whitespace before the first token. For a value without tokens this holds
    /// the entire value.
    pub leading: String,
    /// The class tokens in their original surface form.
    pub classnames: Vec<String>,
    /// `whitespaces[i]` is the run following `classnames[i]`. The list is one shorter than
    /// `classnames` unless the value ends in whitespace, in which case the trailing run is
    /// stored aligned to the last token.
    pub whitespaces: Vec<String>,
}

impl ClassValueParts {
    /// The whitespace run after the last token, if any.
    pub fn trailing(&self) -> Option<&str> {
        if !self.classnames.is_empty() && self.whitespaces.len() == self.classnames.len() {
            self.whitespaces.last().map(String::as_str)
        } else {
            None
        }
    }

    /// Byte ranges of every token within the original value.
    pub fn class_ranges(&self) -> Vec<Range<usize>> {
        let mut position = self.leading.len();
        let mut ranges = Vec::with_capacity(self.classnames.len());
        for (index, classname) in self.classnames.iter().enumerate() {
            let end = position + classname.len();
            ranges.push(position..end);
            position = end + self.whitespaces.get(index).map_or(0, String::len);
        }
        ranges
    }

    /// Joins `tokens` in place of the original tokens, keeping every whitespace run at its
    /// original position. `tokens` must have as many entries as `classnames`.
    pub fn reassemble_with<S: AsRef<str>>(&self, tokens: &[S]) -> String {
        debug_assert_eq!(tokens.len(), self.classnames.len());
        let mut output = String::with_capacity(self.leading.len() + self.content_len());
        output.push_str(&self.leading);
        for (index, token) in tokens.iter().enumerate() {
            output.push_str(token.as_ref());
            if let Some(whitespace) = self.whitespaces.get(index) {
                output.push_str(whitespace);
            }
        }
        output
    }

    fn content_len(&self) -> usize {
        self.classnames.iter().map(String::len).sum::<usize>()
            + self.whitespaces.iter().map(String::len).sum::<usize>()
    }
}

/// Splits `value` on runs of whitespace (any Unicode whitespace, not just spaces).
pub fn split_class_value(value: &str) -> ClassValueParts {
    let mut parts = ClassValueParts::default();
    let mut run_start = 0;
    let mut in_whitespace = true;

    for (index, character) in value.char_indices() {
        let is_whitespace = character.is_whitespace();
        if is_whitespace == in_whitespace {
            continue;
        }
        let run = &value[run_start..index];
        if is_whitespace {
            parts.classnames.push(run.to_string());
        } else if parts.classnames.is_empty() {
            parts.leading = run.to_string();
        } else {
            parts.whitespaces.push(run.to_string());
        }
        run_start = index;
        in_whitespace = is_whitespace;
    }

    let tail = &value[run_start..];
    if !in_whitespace {
        parts.classnames.push(tail.to_string());
    } else if parts.classnames.is_empty() {
        parts.leading = tail.to_string();
    } else if !tail.is_empty() {
        parts.whitespaces.push(tail.to_string());
    }

    parts
}

/// Reassembles the value `parts` was split from.
pub fn join_class_value_parts(parts: &ClassValueParts) -> String {
    parts.reassemble_with(&parts.classnames)
}
