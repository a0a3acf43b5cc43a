use super::{Diagnostic, Rule, RuleContext};
use crate::class_value::split_class_value;
use crate::oracle::sort_classes;
use crate::patch::StringChange;

/// Reports classes that are not in the design system's canonical order.
pub struct ClassOrderRule;

impl Rule for ClassOrderRule {
    fn name(&self) -> &'static str {
        "enforce-consistent-class-order"
    }

    fn description(&self) -> &'static str {
        "Enforce the canonical class order of the design system"
    }

    fn check(&self, value: &str, context: &RuleContext) -> Vec<Diagnostic> {
        let parts = split_class_value(value);
        if parts.classnames.len() < 2 {
            return Vec::new();
        }

        let sorted = sort_classes(&parts.classnames, context.design_system);
        if sorted == parts.classnames {
            return Vec::new();
        }

        // The fix spans the first to the last token and leaves the outer whitespace alone.
        let ranges = parts.class_ranges();
        let span = ranges[0].start..ranges[ranges.len() - 1].end;
        let reordered = parts.reassemble_with(&sorted);
        let replacement = &reordered[span.clone()];

        vec![Diagnostic {
            rule: self.name(),
            message: format!("Classes are out of order, expected `{}`", sorted.join(" ")),
            fix: Some(StringChange::replacing(value, span.clone(), replacement)),
            range: span,
        }]
    }
}
