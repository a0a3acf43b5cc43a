//! # Catalog Design System
//!
//! A [`DesignSystem`] driven by a declarative TOML catalog: class groups given as exact
//! class names or as utility roots with a value pattern, a conflict relation between
//! groups, and a variant ordering. A Tailwind-like catalog is embedded as the default.

use crate::oracle::{DesignSystem, GroupId, OrderKey};
use crate::tokenizer::parse_class_name;
use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

const DEFAULT_CATALOG: &str = include_str!("../data/default_catalog.toml");

/// Prefix of the synthetic group ids given to arbitrary properties (`[mask-type:alpha]`).
pub const ARBITRARY_PROPERTY_GROUP_PREFIX: &str = "arbitrary..";

const GROUP_BITS: u32 = 20;
/// Variant bit 0 is reserved so that a class without variants has a zero mask.
const MAX_VARIANTS: usize = (u64::BITS - GROUP_BITS) as usize - 2;

/// The serialized form of a catalog.
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(default)]
pub struct Catalog {
    pub prefix: Option<String>,
    /// Variants in canonical order. Arbitrary variants (`[&>*]`) sort after all of them.
    pub variants: Vec<String>,
    /// Named value patterns that groups can refer to by name.
    pub patterns: BTreeMap<String, String>,
    pub groups: Vec<GroupSpec>,
    /// `conflicts[a]` lists the groups whose later members contradict an earlier `a`.
    pub conflicts: BTreeMap<String, Vec<String>>,
    /// Extra conflicts that only apply between important classes.
    pub important_conflicts: BTreeMap<String, Vec<String>>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(default)]
pub struct GroupSpec {
    pub id: String,
    /// Exact base class names belonging to the group. Arbitrary properties are listed
    /// by their property in brackets, e.g. `[display]`.
    pub classes: Vec<String>,
    /// Utility roots: `w` matches `w-<value>`.
    pub roots: Vec<String>,
    /// A pattern name from `patterns`, or a regex the value after the root must match.
    /// Without one any non-empty value matches.
    pub values: Option<String>,
    /// Whether `-root-<value>` is accepted.
    pub negative: bool,
}

#[derive(Debug)]
struct Group {
    id: GroupId,
    classes: Vec<String>,
    roots: Vec<String>,
    values: Option<Regex>,
    negative: bool,
}

impl Group {
    fn matches(&self, base_class_name: &str) -> bool {
        if self.classes.iter().any(|class| class == base_class_name) {
            return true;
        }

        let (is_negative, unsigned) = match base_class_name.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, base_class_name),
        };
        if is_negative && !self.negative {
            return false;
        }

        self.roots.iter().any(|root| {
            let Some(value) = unsigned
                .strip_prefix(root.as_str())
                .and_then(|rest| rest.strip_prefix('-'))
            else {
                return false;
            };
            !value.is_empty() && self.values.as_ref().is_none_or(|regex| regex.is_match(value))
        })
    }
}

/// A design system answering from a [`Catalog`].
#[derive(Debug)]
pub struct CatalogDesignSystem {
    prefix: Option<String>,
    variant_positions: HashMap<String, usize>,
    groups: Vec<Group>,
    conflicts: HashMap<GroupId, Vec<GroupId>>,
    important_conflicts: HashMap<GroupId, Vec<GroupId>>,
}

impl CatalogDesignSystem {
    /// Compiles `catalog`, validating its value patterns and size limits.
    pub fn from_catalog(catalog: Catalog) -> Result<Self> {
        if catalog.variants.len() > MAX_VARIANTS {
            bail!(
                "Catalog declares {} variants; at most {MAX_VARIANTS} are supported",
                catalog.variants.len()
            );
        }
        if catalog.groups.len() >= 1 << GROUP_BITS {
            bail!("Catalog declares too many groups ({})", catalog.groups.len());
        }

        let mut groups = Vec::with_capacity(catalog.groups.len());
        for spec in catalog.groups {
            if spec.id.is_empty() {
                bail!("Catalog contains a group without an id");
            }
            let values = match &spec.values {
                Some(values) => {
                    let pattern = catalog.patterns.get(values).unwrap_or(values);
                    let regex = Regex::new(pattern).with_context(|| {
                        format!("Invalid value pattern for group '{}': {pattern}", spec.id)
                    })?;
                    Some(regex)
                }
                None => None,
            };
            groups.push(Group {
                id: spec.id,
                classes: spec.classes,
                roots: spec.roots,
                values,
                negative: spec.negative,
            });
        }

        let variant_positions = catalog
            .variants
            .into_iter()
            .enumerate()
            .map(|(position, variant)| (variant, position))
            .collect();

        Ok(Self {
            prefix: catalog.prefix.filter(|prefix| !prefix.is_empty()),
            variant_positions,
            groups,
            conflicts: catalog.conflicts.into_iter().collect(),
            important_conflicts: catalog.important_conflicts.into_iter().collect(),
        })
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let catalog: Catalog = toml::from_str(source).context("Failed to parse catalog")?;
        Self::from_catalog(catalog)
    }

    /// The embedded default catalog.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CATALOG)
    }

    /// Replaces the catalog's required prefix. An empty prefix removes it.
    pub fn with_prefix(mut self, prefix: Option<String>) -> Self {
        self.prefix = prefix.filter(|prefix| !prefix.is_empty());
        self
    }

    /// The group index for a base class name, or `groups.len()` for an arbitrary property
    /// that no group claims.
    fn group_index(&self, base_class_name: &str) -> Option<usize> {
        if let Some(property) = arbitrary_property(base_class_name) {
            let bracketed = format!("[{property}]");
            return Some(
                self.groups
                    .iter()
                    .position(|group| group.classes.contains(&bracketed))
                    .unwrap_or(self.groups.len()),
            );
        }
        self.groups
            .iter()
            .position(|group| group.matches(base_class_name))
    }

    fn group_id_at(&self, index: usize, base_class_name: &str) -> GroupId {
        match self.groups.get(index) {
            Some(group) => group.id.clone(),
            None => {
                let property = arbitrary_property(base_class_name).unwrap_or(base_class_name);
                format!("{ARBITRARY_PROPERTY_GROUP_PREFIX}{property}")
            }
        }
    }

    fn order_key(&self, classname: &str) -> Option<OrderKey> {
        let parsed = parse_class_name(classname, self.prefix.as_deref());
        if parsed.is_external {
            return None;
        }

        let group_index = self
            .group_index(parsed.base_without_postfix())
            .or_else(|| self.group_index(&parsed.base_class_name))?;

        let mut variant_mask: u64 = 0;
        for modifier in &parsed.modifiers {
            let position = if modifier.starts_with('[') {
                self.variant_positions.len()
            } else {
                *self.variant_positions.get(modifier)?
            };
            variant_mask |= 1 << (position + 1);
        }

        Some(OrderKey((variant_mask << GROUP_BITS) | group_index as u64))
    }
}

impl DesignSystem for CatalogDesignSystem {
    fn class_group_id(&self, base_class_name: &str) -> Option<GroupId> {
        let index = self.group_index(base_class_name)?;
        Some(self.group_id_at(index, base_class_name))
    }

    fn conflicting_group_ids(&self, group_id: &str, important: bool) -> Vec<GroupId> {
        let mut ids = self.conflicts.get(group_id).cloned().unwrap_or_default();
        if important {
            if let Some(extra) = self.important_conflicts.get(group_id) {
                ids.extend(extra.iter().cloned());
            }
        }
        ids
    }

    fn canonical_order_keys(&self, classnames: &[&str]) -> Vec<(String, Option<OrderKey>)> {
        classnames
            .iter()
            .map(|classname| (classname.to_string(), self.order_key(classname)))
            .collect()
    }

    fn required_prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
}

/// The property of an arbitrary property class: `mask-type` for `[mask-type:alpha]`.
fn arbitrary_property(base_class_name: &str) -> Option<&str> {
    let inner = base_class_name.strip_prefix('[')?.strip_suffix(']')?;
    let (property, value) = inner.split_once(':')?;
    (!property.is_empty() && !value.is_empty()).then_some(property)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::sort_classes;

    fn builtin() -> CatalogDesignSystem {
        CatalogDesignSystem::builtin().unwrap()
    }

    #[test]
    fn test_builtin_catalog_compiles() {
        let design_system = builtin();
        assert!(design_system.groups.len() > 50);
        assert_eq!(design_system.required_prefix(), None);
    }

    #[test]
    fn test_group_lookup() {
        let ds = builtin();
        assert_eq!(ds.class_group_id("flex").as_deref(), Some("display"));
        assert_eq!(ds.class_group_id("flex-1").as_deref(), Some("flex"));
        assert_eq!(ds.class_group_id("flex-col").as_deref(), Some("flex-direction"));
        assert_eq!(ds.class_group_id("w-3").as_deref(), Some("w"));
        assert_eq!(ds.class_group_id("w-[50%]").as_deref(), Some("w"));
        assert_eq!(ds.class_group_id("mx-auto").as_deref(), Some("mx"));
        assert_eq!(ds.class_group_id("-mt-2").as_deref(), Some("mt"));
        assert_eq!(ds.class_group_id("inset-x-2").as_deref(), Some("inset-x"));
        assert_eq!(ds.class_group_id("text-lg").as_deref(), Some("font-size"));
        assert_eq!(ds.class_group_id("text-red-500").as_deref(), Some("text-color"));
        assert_eq!(ds.class_group_id("border").as_deref(), Some("border-w"));
        assert_eq!(ds.class_group_id("border-gray-200").as_deref(), Some("border-color"));
        assert_eq!(ds.class_group_id("bg-gray-100").as_deref(), Some("bg-color"));
    }

    #[test]
    fn test_unknown_classes() {
        let ds = builtin();
        assert_eq!(ds.class_group_id("my-custom-class"), None);
        assert_eq!(ds.class_group_id("-flex"), None);
        assert_eq!(ds.class_group_id("-p-4"), None);
        assert_eq!(ds.class_group_id("w-"), None);
        assert_eq!(ds.class_group_id("bg-gray-100/50"), None);
    }

    #[test]
    fn test_arbitrary_property_groups() {
        let ds = builtin();
        assert_eq!(
            ds.class_group_id("[mask-type:alpha]").as_deref(),
            Some("arbitrary..mask-type")
        );
        assert_eq!(ds.class_group_id("[]"), None);
    }

    #[test]
    fn test_conflicting_group_ids() {
        let ds = builtin();
        assert_eq!(ds.conflicting_group_ids("w", false), vec!["size"]);
        assert_eq!(ds.conflicting_group_ids("mt", false), vec!["m", "my"]);
        assert!(ds.conflicting_group_ids("display", false).is_empty());
    }

    #[test]
    fn test_important_conflicts() {
        let ds = CatalogDesignSystem::from_toml_str(
            r#"
            [[groups]]
            id = "a"
            classes = ["a"]
            [conflicts]
            a = ["b"]
            [important_conflicts]
            a = ["c"]
            "#,
        )
        .unwrap();
        assert_eq!(ds.conflicting_group_ids("a", false), vec!["b"]);
        assert_eq!(ds.conflicting_group_ids("a", true), vec!["b", "c"]);
    }

    #[test]
    fn test_order_keys() {
        let ds = builtin();
        let keys = ds.canonical_order_keys(&["flex", "unknown", "hover:flex", "w-4", "nope:flex"]);
        assert_eq!(keys[0].0, "flex");
        assert!(keys[0].1.is_some());
        assert_eq!(keys[1].1, None);
        assert!(keys[2].1 > keys[0].1);
        assert!(keys[3].1 > keys[0].1);
        assert!(keys[2].1 > keys[3].1);
        assert_eq!(keys[4].1, None);
    }

    #[test]
    fn test_order_key_uses_postfix_fallback() {
        let ds = builtin();
        let keys = ds.canonical_order_keys(&["bg-gray-100/50", "w-1/2"]);
        assert!(keys.iter().all(|(_, key)| key.is_some()));
    }

    #[test]
    fn test_sort_with_builtin_catalog() {
        let ds = builtin();
        let sorted = sort_classes(&["md:p-4", "p-2", "custom", "flex", "hover:p-3"], &ds);
        assert_eq!(sorted, vec!["custom", "flex", "p-2", "hover:p-3", "md:p-4"]);
    }

    #[test]
    fn test_prefix() {
        let ds = builtin().with_prefix(Some("tw".to_string()));
        assert_eq!(ds.required_prefix(), Some("tw"));
        let keys = ds.canonical_order_keys(&["tw:flex", "flex"]);
        assert!(keys[0].1.is_some());
        assert_eq!(keys[1].1, None);
        assert_eq!(builtin().with_prefix(Some(String::new())).required_prefix(), None);
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let result = CatalogDesignSystem::from_toml_str(
            r#"
            [[groups]]
            id = "broken"
            roots = ["x"]
            values = "([unclosed"
            "#,
        );
        assert!(result.unwrap_err().to_string().contains("Invalid value pattern"));
    }

    #[test]
    fn test_group_without_id_is_rejected() {
        let result = CatalogDesignSystem::from_toml_str("[[groups]]\nclasses = [\"a\"]\n");
        assert!(result.is_err());
    }
}
