use super::{Diagnostic, Rule, RuleContext};
use crate::class_value::split_class_value;
use crate::patch::StringChange;
use std::ops::Range;

/// Reports whitespace other than single spaces between classes. Runs containing a line
/// break are left alone when multiline values are allowed.
pub struct WhitespaceRule;

impl Rule for WhitespaceRule {
    fn name(&self) -> &'static str {
        "no-unnecessary-whitespace"
    }

    fn description(&self) -> &'static str {
        "Disallow extra whitespace around and between classes"
    }

    fn check(&self, value: &str, context: &RuleContext) -> Vec<Diagnostic> {
        let parts = split_class_value(value);
        let ranges = parts.class_ranges();

        // (run, whether the run sits between two classes)
        let mut runs: Vec<(Range<usize>, bool)> = Vec::new();
        match (ranges.first(), ranges.last()) {
            (Some(first), Some(last)) => {
                runs.push((0..first.start, false));
                runs.extend(ranges.windows(2).map(|pair| (pair[0].end..pair[1].start, true)));
                runs.push((last.end..value.len(), false));
            }
            _ => runs.push((0..value.len(), false)),
        }

        runs.into_iter()
            .filter(|(run, _)| !run.is_empty())
            .filter_map(|(run, between)| {
                let text = &value[run.clone()];
                if context.allow_multiline && text.contains('\n') {
                    return None;
                }
                let expected = if between { " " } else { "" };
                if text == expected {
                    return None;
                }
                let message = if between {
                    "Classes should be separated by a single space"
                } else {
                    "Unnecessary whitespace around classes"
                };
                Some(Diagnostic {
                    rule: self.name(),
                    message: message.to_string(),
                    fix: Some(StringChange::replacing(value, run.clone(), expected)),
                    range: run,
                })
            })
            .collect()
    }
}
