use super::unnecessary_arbitrary_value::class_edit_diagnostic;
use super::{Diagnostic, Rule, RuleContext};
use crate::arbitrary::find_unnecessary_negative_arbitrary_values_with;
use crate::class_value::split_class_value;

/// Reports `m-[-10px]`, which is canonically written `-m-[10px]`.
pub struct NegativeArbitraryValueRule;

impl Rule for NegativeArbitraryValueRule {
    fn name(&self) -> &'static str {
        "no-unnecessary-negative-arbitrary-value"
    }

    fn description(&self) -> &'static str {
        "Move the sign of negative arbitrary lengths in front of the utility"
    }

    fn check(&self, value: &str, context: &RuleContext) -> Vec<Diagnostic> {
        let parts = split_class_value(value);
        let ranges = parts.class_ranges();
        let prefix = context.design_system.required_prefix();

        find_unnecessary_negative_arbitrary_values_with(&parts.classnames, prefix)
            .into_iter()
            .map(|edit| {
                let classname = &parts.classnames[edit.index];
                class_edit_diagnostic(self.name(), value, &ranges[edit.index], classname, &edit)
            })
            .collect()
    }
}
