//! # Conflict Resolution
//!
//! Finds classes that contradict an earlier class in the same value, such as `w-3 w-5`
//! or `w-4 size-8`. Classes are compared by a modifier-qualified key: the canonically
//! sorted variants, the important flag and the class group. Sequence order is conflict
//! order, so the later class is always the one reported.

use crate::oracle::{DesignSystem, resolve_class_group};
use crate::tokenizer::{IMPORTANT_MODIFIER, MODIFIER_SEPARATOR, ParsedClass, parse_class_name};
use std::collections::HashMap;

/// A class at index `later` contradicting the class at index `earlier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict {
    pub later: usize,
    pub earlier: usize,
}

/// Sorts variants into a canonical order so that `hover:md:` and `md:hover:` compare equal.
///
/// Arbitrary variants (`[&>*]`) depend on their position, so they stay where they are and
/// only the runs of regular variants between them are sorted.
pub fn sort_modifiers(modifiers: &[String]) -> Vec<&str> {
    let mut sorted = Vec::with_capacity(modifiers.len());
    let mut run: Vec<&str> = Vec::new();

    for modifier in modifiers {
        if modifier.starts_with('[') {
            run.sort_unstable();
            sorted.append(&mut run);
            sorted.push(modifier.as_str());
        } else {
            run.push(modifier.as_str());
        }
    }
    run.sort_unstable();
    sorted.append(&mut run);
    sorted
}

/// The variant and important-flag part of a class's comparison key, e.g. `hover:md:!`.
fn modifier_qualifier(parsed: &ParsedClass) -> String {
    let mut qualifier = String::new();
    for modifier in sort_modifiers(&parsed.modifiers) {
        qualifier.push_str(modifier);
        qualifier.push(MODIFIER_SEPARATOR);
    }
    if parsed.has_important_modifier {
        qualifier.push(IMPORTANT_MODIFIER);
    }
    qualifier
}

/// Finds every class that contradicts an earlier one.
///
/// External classes and classes without a group are ignored. A class claims its own key and
/// every key of its conflicting groups under the same qualifier; a later class landing on a
/// claimed key is reported against the claimant, and the claim is kept.
pub fn find_conflicts<S: AsRef<str>>(classnames: &[S], design_system: &dyn DesignSystem) -> Vec<Conflict> {
    let prefix = design_system.required_prefix();
    let mut claims: HashMap<String, usize> = HashMap::new();
    let mut conflicts = Vec::new();

    for (index, classname) in classnames.iter().enumerate() {
        let parsed = parse_class_name(classname.as_ref(), prefix);
        let Some(group_id) = resolve_class_group(&parsed, design_system) else {
            continue;
        };

        let qualifier = modifier_qualifier(&parsed);
        let key = format!("{qualifier}{group_id}");

        if let Some(&earlier) = claims.get(&key) {
            log::debug!(
                "'{}' conflicts with '{}' on '{key}'",
                classname.as_ref(),
                classnames[earlier].as_ref()
            );
            conflicts.push(Conflict { later: index, earlier });
            continue;
        }

        claims.insert(key, index);
        for conflicting in design_system.conflicting_group_ids(&group_id, parsed.has_important_modifier) {
            claims.entry(format!("{qualifier}{conflicting}")).or_insert(index);
        }
    }

    conflicts
}
