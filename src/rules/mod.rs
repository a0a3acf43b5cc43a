//! # Rule Trait
//!
//! A rule inspects one class attribute value and reports [`Diagnostic`]s, each optionally
//! carrying a [`StringChange`] that fixes it. Rules are thin adapters: the analysis lives in
//! the engine modules, a rule only maps token indices back to byte ranges of the value.

use crate::arbitrary::PresetTable;
use crate::config::Config;
use crate::oracle::DesignSystem;
use crate::patch::StringChange;
use std::ops::Range;

pub mod class_order;
pub mod collection;
pub mod conflicting_classes;
pub mod duplicate_classes;
pub mod negative_arbitrary_value;
pub mod shorthand_classes;
pub mod unnecessary_arbitrary_value;
pub mod whitespace;
pub use self::class_order::ClassOrderRule;
pub use self::collection::{FixOutcome, RuleCollection};
pub use self::conflicting_classes::ConflictingClassesRule;
pub use self::duplicate_classes::DuplicateClassesRule;
pub use self::negative_arbitrary_value::NegativeArbitraryValueRule;
pub use self::shorthand_classes::ShorthandClassesRule;
pub use self::unnecessary_arbitrary_value::UnnecessaryArbitraryValueRule;
pub use self::whitespace::WhitespaceRule;


/// One finding within an attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub rule: &'static str,
    pub message: String,
    /// Byte range into the analyzed value.
    pub range: Range<usize>,
    pub fix: Option<StringChange>,
}

/// Everything a rule may consult besides the value itself.
pub struct RuleContext<'a> {
    pub design_system: &'a dyn DesignSystem,
    pub presets: PresetTable,
    pub allow_multiline: bool,
    pub max_fix_passes: usize,
}

impl<'a> RuleContext<'a> {
    pub fn new(design_system: &'a dyn DesignSystem, config: &Config) -> Self {
        Self {
            design_system,
            presets: PresetTable::with_extra(&config.arbitrary_presets),
            allow_multiline: config.allow_multiline,
            max_fix_passes: config.max_fix_passes,
        }
    }
}

/// A self-contained lint rule, object-safe for `Box<dyn Rule>`.
pub trait Rule: Send + Sync {
    /// The unique, static name used in diagnostics and `disabled_rules`.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Reports every finding in `value`. Must not fail; malformed input yields no findings.
    fn check(&self, value: &str, context: &RuleContext) -> Vec<Diagnostic>;
}
