use super::{Diagnostic, Rule, RuleContext};
use crate::class_value::split_class_value;
use crate::patch::StringChange;
use crate::shorthand::find_shorthand_opportunities;

/// Reports pairs like `w-4 h-4` that one shorthand class (`size-4`) expresses.
pub struct ShorthandClassesRule;

impl Rule for ShorthandClassesRule {
    fn name(&self) -> &'static str {
        "enforce-shorthand-classes"
    }

    fn description(&self) -> &'static str {
        "Enforce shorthand classes where a pair of classes can be merged"
    }

    fn check(&self, value: &str, context: &RuleContext) -> Vec<Diagnostic> {
        let parts = split_class_value(value);
        let ranges = parts.class_ranges();

        find_shorthand_opportunities(&parts.classnames, context.design_system)
            .into_iter()
            .map(|edit| {
                let span = ranges[edit.first].start..ranges[edit.second].end;
                // Everything between the two halves stays; the second half and the
                // whitespace in front of it go.
                let between = &value[ranges[edit.first].end..ranges[edit.second - 1].end];
                let message = format!(
                    "`{}` and `{}` can be written as `{}`",
                    parts.classnames[edit.first], parts.classnames[edit.second], edit.replacement
                );
                Diagnostic {
                    rule: self.name(),
                    message,
                    fix: Some(StringChange::replacing(
                        value,
                        span.clone(),
                        format!("{}{between}", edit.replacement),
                    )),
                    range: span,
                }
            })
            .collect()
    }
}
