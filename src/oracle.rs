//! # Design System Oracle
//!
//! The engine never decides on its own which classes exist, how they are grouped or how
//! they sort. Those answers come from a [`DesignSystem`], queried synchronously. How a
//! provider obtains its answers is its own business; see `bridge` for loading one
//! asynchronously behind a blocking interface.

use crate::tokenizer::ParsedClass;

/// A class-group identifier such as `display` or `w`.
pub type GroupId = String;

/// A canonical sort key. Smaller keys sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderKey(pub u64);

/// The questions the engine asks about the utility-class design system.
pub trait DesignSystem: Send + Sync {
    /// The class group of a base class name (modifiers and important marker stripped).
    fn class_group_id(&self, base_class_name: &str) -> Option<GroupId>;

    /// Groups whose members are mutually exclusive with members of `group_id`.
    fn conflicting_group_ids(&self, group_id: &str, important: bool) -> Vec<GroupId>;

    /// Order keys for full class names, in input order. Classes unknown to the design
    /// system get `None`.
    fn canonical_order_keys(&self, classnames: &[&str]) -> Vec<(String, Option<OrderKey>)>;

    /// The prefix every class of this design system must carry, if any.
    fn required_prefix(&self) -> Option<&str>;
}

/// A design system that knows nothing. Used when the real one failed to load, so that
/// every rule degrades to reporting nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct InertDesignSystem;

impl DesignSystem for InertDesignSystem {
    fn class_group_id(&self, _base_class_name: &str) -> Option<GroupId> {
        None
    }

    fn conflicting_group_ids(&self, _group_id: &str, _important: bool) -> Vec<GroupId> {
        Vec::new()
    }

    fn canonical_order_keys(&self, classnames: &[&str]) -> Vec<(String, Option<OrderKey>)> {
        classnames
            .iter()
            .map(|classname| (classname.to_string(), None))
            .collect()
    }

    fn required_prefix(&self) -> Option<&str> {
        None
    }
}

/// The group of a parsed class. A base name with a possible postfix (`bg-red/50`, `w-1/2`)
/// is looked up without the postfix first and, failing that, as a whole.
pub fn resolve_class_group(parsed: &ParsedClass, design_system: &dyn DesignSystem) -> Option<GroupId> {
    if parsed.is_external {
        return None;
    }
    if parsed.maybe_postfix_modifier_position.is_some() {
        if let Some(group_id) = design_system.class_group_id(parsed.base_without_postfix()) {
            return Some(group_id);
        }
    }
    design_system.class_group_id(&parsed.base_class_name)
}

/// Sorts `classnames` canonically.
///
/// Classes without an order key come first in their original relative order, followed by
/// the known classes in ascending key order. The sort is stable, so sorting an already
/// sorted sequence returns it unchanged.
pub fn sort_classes<S: AsRef<str>>(classnames: &[S], design_system: &dyn DesignSystem) -> Vec<String> {
    let names: Vec<&str> = classnames.iter().map(AsRef::as_ref).collect();
    let mut keyed = design_system.canonical_order_keys(&names);

    // A provider that drops or reorders entries is not trusted; fall back to input order.
    let in_order = keyed.len() == names.len()
        && keyed
            .iter()
            .zip(&names)
            .all(|((classname, _), name)| classname == name);
    if !in_order {
        log::warn!(
            "Design system returned {} order keys for {} classes; keeping original order",
            keyed.len(),
            names.len()
        );
        return names.iter().map(|name| name.to_string()).collect();
    }

    // `None < Some(_)`, which puts unknown classes first.
    keyed.sort_by_key(|(_, key)| *key);
    keyed.into_iter().map(|(classname, _)| classname).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LengthOrder;

    impl DesignSystem for LengthOrder {
        fn class_group_id(&self, _base_class_name: &str) -> Option<GroupId> {
            None
        }

        fn conflicting_group_ids(&self, _group_id: &str, _important: bool) -> Vec<GroupId> {
            Vec::new()
        }

        fn canonical_order_keys(&self, classnames: &[&str]) -> Vec<(String, Option<OrderKey>)> {
            classnames
                .iter()
                .map(|name| {
                    let key = (!name.starts_with("custom")).then(|| OrderKey(name.len() as u64));
                    (name.to_string(), key)
                })
                .collect()
        }

        fn required_prefix(&self) -> Option<&str> {
            None
        }
    }

    #[test]
    fn test_unknown_classes_first_in_original_order() {
        let sorted = sort_classes(&["p-10", "custom-b", "w-1", "custom-a"], &LengthOrder);
        assert_eq!(sorted, vec!["custom-b", "custom-a", "w-1", "p-10"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let sorted = sort_classes(&["mt-2", "w-10", "ml-2", "w-1"], &LengthOrder);
        assert_eq!(sorted, vec!["w-1", "mt-2", "w-10", "ml-2"]);
    }

    #[test]
    fn test_sort_is_idempotent() {
        let once = sort_classes(&["p-10", "custom-b", "w-1", "mt-2", "ml-2"], &LengthOrder);
        let twice = sort_classes(&once, &LengthOrder);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_inert_design_system_keeps_order() {
        let sorted = sort_classes(&["b", "a", "c"], &InertDesignSystem);
        assert_eq!(sorted, vec!["b", "a", "c"]);
        assert_eq!(InertDesignSystem.class_group_id("flex"), None);
    }
}
