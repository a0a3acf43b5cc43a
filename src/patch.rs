use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// One proposed text substitution.
///
/// `start..end` is a half-open byte range into the *original* string; `before` is the
/// original text in that range and `after` its replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringChange {
    pub start: usize,
    pub end: usize,
    pub before: String,
    pub after: String,
}

impl StringChange {
    pub fn new(start: usize, end: usize, before: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            start,
            end,
            before: before.into(),
            after: after.into(),
        }
    }

    /// Builds a change replacing `range` of `original`, capturing `before` from it.
    pub fn replacing(original: &str, range: std::ops::Range<usize>, after: impl Into<String>) -> Self {
        Self::new(range.start, range.end, &original[range], after)
    }

    /// A change whose replacement equals the text it replaces.
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }

    pub fn overlaps(&self, other: &StringChange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Applies a batch of non-overlapping changes to `original` in a single pass.
///
/// Changes may be given in any order. `before` is not compared against the original text.
///
/// ### Preconditions
/// Ranges must lie within `original`, on `char` boundaries, and must not overlap. Violations
/// are rejected with an error instead of producing corrupted output.
pub fn apply_changes(original: &str, changes: &[StringChange]) -> Result<String> {
    let mut sorted: Vec<&StringChange> = changes.iter().collect();
    sorted.sort_by_key(|change| change.start);

    let replaced_len: usize = sorted.iter().map(|change| change.after.len()).sum();
    let mut output = String::with_capacity(original.len() + replaced_len);
    let mut cursor = 0;

    for change in sorted {
        if change.start > change.end || change.end > original.len() {
            bail!(
                "Change {}..{} is out of bounds for a string of length {}",
                change.start,
                change.end,
                original.len()
            );
        }
        if !original.is_char_boundary(change.start) || !original.is_char_boundary(change.end) {
            bail!(
                "Change {}..{} does not fall on character boundaries",
                change.start,
                change.end
            );
        }
        if change.start < cursor {
            bail!(
                "Change {}..{} overlaps a previous change ending at {cursor}",
                change.start,
                change.end
            );
        }

        output.push_str(&original[cursor..change.start]);
        output.push_str(&change.after);
        cursor = change.end;
    }

    output.push_str(&original[cursor..]);
    Ok(output)
}
