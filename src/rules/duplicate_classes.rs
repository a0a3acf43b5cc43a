use super::{Diagnostic, Rule, RuleContext};
use crate::class_value::split_class_value;
use crate::duplicates::find_duplicates;
use crate::patch::StringChange;

/// Reports classes repeated verbatim. The fix removes the repetition together with the
/// whitespace in front of it.
pub struct DuplicateClassesRule;

impl Rule for DuplicateClassesRule {
    fn name(&self) -> &'static str {
        "no-duplicate-classes"
    }

    fn description(&self) -> &'static str {
        "Disallow repeating the same class"
    }

    fn check(&self, value: &str, _context: &RuleContext) -> Vec<Diagnostic> {
        let parts = split_class_value(value);
        let ranges = parts.class_ranges();

        find_duplicates(&parts.classnames)
            .into_iter()
            .map(|duplicate| {
                let range = ranges[duplicate.later].clone();
                // `later` is never the first token.
                let removal = ranges[duplicate.later - 1].end..range.end;
                Diagnostic {
                    rule: self.name(),
                    message: format!("Duplicate class `{}`", parts.classnames[duplicate.later]),
                    range,
                    fix: Some(StringChange::replacing(value, removal, "")),
                }
            })
            .collect()
    }
}
