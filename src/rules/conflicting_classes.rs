use super::{Diagnostic, Rule, RuleContext};
use crate::class_value::split_class_value;
use crate::conflicts::find_conflicts;

/// Reports classes that override an earlier class. Which one the author meant is unknown,
/// so there is no fix.
pub struct ConflictingClassesRule;

impl Rule for ConflictingClassesRule {
    fn name(&self) -> &'static str {
        "no-conflicting-classes"
    }

    fn description(&self) -> &'static str {
        "Disallow classes that set the same property under the same variants"
    }

    fn check(&self, value: &str, context: &RuleContext) -> Vec<Diagnostic> {
        let parts = split_class_value(value);
        let ranges = parts.class_ranges();

        find_conflicts(&parts.classnames, context.design_system)
            .into_iter()
            .map(|conflict| Diagnostic {
                rule: self.name(),
                message: format!(
                    "`{}` conflicts with `{}`",
                    parts.classnames[conflict.later], parts.classnames[conflict.earlier]
                ),
                range: ranges[conflict.later].clone(),
                fix: None,
            })
            .collect()
    }
}
