//! # Rule Collection
//!
//! The `RuleCollection` holds the registered rules, runs them over a value and applies their
//! fixes. Fixing is iterative: one pass applies a non-overlapping subset of the proposed
//! changes, and the value is linted again until nothing is left to fix.

use super::{
    ClassOrderRule, ConflictingClassesRule, Diagnostic, DuplicateClassesRule,
    NegativeArbitraryValueRule, Rule, RuleContext, ShorthandClassesRule,
    UnnecessaryArbitraryValueRule, WhitespaceRule,
};
use crate::patch::{StringChange, apply_changes};
use anyhow::Result;

/// The result of [`RuleCollection::fix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutcome {
    pub output: String,
    /// How many passes changed the value.
    pub passes: usize,
    /// Diagnostics still reported for `output`.
    pub remaining: Vec<Diagnostic>,
}

/// An ordered set of rules. Registration order decides the order of diagnostics that start
/// at the same offset.
pub struct RuleCollection {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleCollection {
    /// Creates a new, empty `RuleCollection`.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// All built-in rules.
    pub fn with_default_rules() -> Self {
        let mut collection = Self::new();
        collection.register(Box::new(ClassOrderRule));
        collection.register(Box::new(DuplicateClassesRule));
        collection.register(Box::new(ConflictingClassesRule));
        collection.register(Box::new(ShorthandClassesRule));
        collection.register(Box::new(UnnecessaryArbitraryValueRule));
        collection.register(Box::new(NegativeArbitraryValueRule));
        collection.register(Box::new(WhitespaceRule));
        collection
    }

    /// Registers a rule, replacing any rule with the same name.
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        match self.rules.iter().position(|existing| existing.name() == rule.name()) {
            Some(index) => self.rules[index] = rule,
            None => self.rules.push(rule),
        }
    }

    /// Drops the named rules. Unknown names are logged and ignored.
    pub fn without(mut self, disabled: &[String]) -> Self {
        for name in disabled {
            if !self.rules.iter().any(|rule| rule.name() == name) {
                log::warn!("Cannot disable unknown rule '{name}'");
            }
        }
        self.rules
            .retain(|rule| !disabled.iter().any(|name| name == rule.name()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|rule| rule.name() == name)
            .map(|rule| rule.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Runs every rule over `value`. Diagnostics are ordered by range start.
    pub fn lint(&self, value: &str, context: &RuleContext) -> Vec<Diagnostic> {
        let mut diagnostics: Vec<Diagnostic> = self
            .rules
            .iter()
            .flat_map(|rule| {
                let found = rule.check(value, context);
                if !found.is_empty() {
                    log::debug!("{} reported {} diagnostic(s)", rule.name(), found.len());
                }
                found
            })
            .collect();
        diagnostics.sort_by_key(|diagnostic| diagnostic.range.start);
        diagnostics
    }

    /// Applies fixes until none is left or `max_fix_passes` passes have run.
    ///
    /// Within one pass fixes are picked by start offset and a fix overlapping an already
    /// picked one waits for the next pass, where it is recomputed against the new value.
    pub fn fix(&self, value: &str, context: &RuleContext) -> Result<FixOutcome> {
        let mut output = value.to_string();
        let mut passes = 0;

        while passes < context.max_fix_passes {
            let diagnostics = self.lint(&output, context);
            let changes = pick_non_overlapping(&diagnostics);
            if changes.is_empty() {
                break;
            }
            output = apply_changes(&output, &changes)?;
            passes += 1;
            log::debug!("Fix pass {passes} applied {} change(s)", changes.len());
        }

        let remaining = self.lint(&output, context);
        Ok(FixOutcome {
            output,
            passes,
            remaining,
        })
    }
}

impl Default for RuleCollection {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

fn pick_non_overlapping(diagnostics: &[Diagnostic]) -> Vec<StringChange> {
    let mut picked: Vec<StringChange> = Vec::new();
    for fix in diagnostics.iter().filter_map(|diagnostic| diagnostic.fix.as_ref()) {
        if fix.is_noop() || picked.iter().any(|other| other.overlaps(fix)) {
            continue;
        }
        picked.push(fix.clone());
    }
    picked
}
