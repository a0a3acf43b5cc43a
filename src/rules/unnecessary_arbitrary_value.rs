use super::{Diagnostic, Rule, RuleContext};
use crate::arbitrary::{ClassEdit, find_unnecessary_arbitrary_values_with};
use crate::class_value::split_class_value;
use crate::patch::StringChange;
use std::ops::Range;

/// Reports arbitrary values like `w-[100%]` that a preset (`w-full`) expresses.
pub struct UnnecessaryArbitraryValueRule;

impl Rule for UnnecessaryArbitraryValueRule {
    fn name(&self) -> &'static str {
        "no-unnecessary-arbitrary-value"
    }

    fn description(&self) -> &'static str {
        "Disallow arbitrary values that have a preset equivalent"
    }

    fn check(&self, value: &str, context: &RuleContext) -> Vec<Diagnostic> {
        let parts = split_class_value(value);
        let ranges = parts.class_ranges();
        let prefix = context.design_system.required_prefix();

        find_unnecessary_arbitrary_values_with(&parts.classnames, &context.presets, prefix)
            .into_iter()
            .map(|edit| {
                let classname = &parts.classnames[edit.index];
                class_edit_diagnostic(self.name(), value, &ranges[edit.index], classname, &edit)
            })
            .collect()
    }
}

/// A diagnostic spanning the whole class whose fix replaces only the edited part of it.
pub(super) fn class_edit_diagnostic(
    rule: &'static str,
    value: &str,
    class_range: &Range<usize>,
    classname: &str,
    edit: &ClassEdit,
) -> Diagnostic {
    let edit_range = class_range.start + edit.range.start..class_range.start + edit.range.end;
    Diagnostic {
        rule,
        message: format!("`{classname}` can be written as `{}`", edit.apply(classname)),
        range: class_range.clone(),
        fix: Some(StringChange::replacing(
            value,
            edit_range,
            edit.replacement.as_str(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbitrary::ArbitraryPreset;
    use crate::catalog::CatalogDesignSystem;
    use crate::config::Config;

    #[test]
    fn test_fix_replaces_brackets_only() {
        let design_system = CatalogDesignSystem::builtin().unwrap();
        let context = RuleContext::new(&design_system, &Config::default());
        let diagnostics = UnnecessaryArbitraryValueRule.check("flex hover:w-[100%]!", &context);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].range, 5..20);
        assert_eq!(
            diagnostics[0].message,
            "`hover:w-[100%]!` can be written as `hover:w-full!`"
        );
        assert_eq!(
            diagnostics[0].fix,
            Some(StringChange::new(13, 19, "[100%]", "full"))
        );
    }

    #[test]
    fn test_configured_presets() {
        let design_system = CatalogDesignSystem::builtin().unwrap();
        let config = Config {
            arbitrary_presets: vec![ArbitraryPreset::new("p", "16px", "4")],
            ..Default::default()
        };
        let context = RuleContext::new(&design_system, &config);
        let diagnostics = UnnecessaryArbitraryValueRule.check("p-[16px]", &context);
        assert_eq!(diagnostics[0].message, "`p-[16px]` can be written as `p-4`");
    }

    #[test]
    fn test_prefix_from_design_system() {
        let design_system = CatalogDesignSystem::builtin()
            .unwrap()
            .with_prefix(Some("tw".to_string()));
        let context = RuleContext::new(&design_system, &Config::default());
        assert!(UnnecessaryArbitraryValueRule.check("w-[100%]", &context).is_empty());
        assert_eq!(
            UnnecessaryArbitraryValueRule.check("tw:w-[100%]", &context).len(),
            1
        );
    }
}
