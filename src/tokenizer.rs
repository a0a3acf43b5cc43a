//! # Class Tokenizer
//!
//! Decomposes a single utility class such as `hover:dark:!bg-gray-100/50` into its
//! structured parts: the variant modifiers, the important flag and the base class name.
//!
//! The scan tracks bracket and parenthesis depth independently, so separators inside
//! arbitrary values (`bg-[url(a:b)]`) or arbitrary properties (`[color:red]`) are never
//! mistaken for modifier boundaries.

use std::ops::Range;

pub const MODIFIER_SEPARATOR: char = ':';
pub const IMPORTANT_MODIFIER: char = '!';
pub const POSTFIX_INDICATOR: char = '/';

/// The result of tokenizing one class string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedClass {
    /// Variant modifiers in left-to-right order, e.g. `["hover", "dark"]`.
    pub modifiers: Vec<String>,
    pub has_important_modifier: bool,
    /// The class name with modifiers and the important marker stripped.
    pub base_class_name: String,
    /// Byte offset into `base_class_name` of a possible postfix modifier (`/50`).
    ///
    /// Whether this is a real postfix or part of the base name (`w-1/2`) is left to the
    /// design system, which is asked with and without the postfix.
    pub maybe_postfix_modifier_position: Option<usize>,
    /// Set when a required prefix is configured but missing from the class.
    /// External classes are passed through untouched by every rule.
    pub is_external: bool,
}

impl ParsedClass {
    fn external(class_name: &str) -> Self {
        Self {
            base_class_name: class_name.to_string(),
            is_external: true,
            ..Default::default()
        }
    }

    /// The base name up to the postfix position, or the whole base name if there is none.
    pub fn base_without_postfix(&self) -> &str {
        match self.maybe_postfix_modifier_position {
            Some(position) => &self.base_class_name[..position],
            None => &self.base_class_name,
        }
    }

    /// The postfix text after the indicator, e.g. `50` for `bg-gray-100/50`.
    pub fn postfix(&self) -> Option<&str> {
        self.maybe_postfix_modifier_position
            .map(|position| &self.base_class_name[position + POSTFIX_INDICATOR.len_utf8()..])
    }

    /// The byte range of `base_class_name` within `class_name`, the string this was parsed
    /// from. Everything before it is prefix, modifiers and a leading important marker.
    pub fn base_class_range(&self, class_name: &str) -> Range<usize> {
        let end = if self.has_important_modifier && class_name.ends_with(IMPORTANT_MODIFIER) {
            class_name.len() - IMPORTANT_MODIFIER.len_utf8()
        } else {
            class_name.len()
        };
        end - self.base_class_name.len()..end
    }

    /// Whether the base name is an arbitrary property such as `[color:red]`.
    pub fn is_arbitrary_property(&self) -> bool {
        self.base_class_name.starts_with('[') && self.base_class_name.ends_with(']')
    }
}

/// Tokenizes `class_name`. With a `prefix`, the class must start with `prefix:`; otherwise
/// it is returned as external without any further parsing.
pub fn parse_class_name(class_name: &str, prefix: Option<&str>) -> ParsedClass {
    match prefix {
        Some(prefix) if !prefix.is_empty() => {
            let Some(rest) = class_name
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix(MODIFIER_SEPARATOR))
            else {
                return ParsedClass::external(class_name);
            };
            parse_unprefixed(rest)
        }
        _ => parse_unprefixed(class_name),
    }
}

fn parse_unprefixed(class_name: &str) -> ParsedClass {
    let mut modifiers = Vec::new();
    let mut bracket_depth = 0usize;
    let mut paren_depth = 0usize;
    let mut modifier_start = 0;
    let mut postfix_position: Option<usize> = None;

    for (index, character) in class_name.char_indices() {
        match character {
            '[' => bracket_depth += 1,
            ']' => bracket_depth = bracket_depth.saturating_sub(1),
            '(' => paren_depth += 1,
            ')' => paren_depth = paren_depth.saturating_sub(1),
            _ if bracket_depth > 0 || paren_depth > 0 => {}
            MODIFIER_SEPARATOR => {
                modifiers.push(class_name[modifier_start..index].to_string());
                modifier_start = index + MODIFIER_SEPARATOR.len_utf8();
                // A `/` inside a variant (`group-hover/item:`) is not a postfix of the base.
                postfix_position = None;
            }
            POSTFIX_INDICATOR => {
                if postfix_position.is_none() {
                    postfix_position = Some(index);
                }
            }
            _ => {}
        }
    }

    let rest = &class_name[modifier_start..];
    let mut postfix_position = postfix_position.map(|position| position - modifier_start);

    let (base_class_name, has_important_modifier) =
        if let Some(stripped) = rest.strip_suffix(IMPORTANT_MODIFIER) {
            (stripped, true)
        } else if let Some(stripped) = rest.strip_prefix(IMPORTANT_MODIFIER) {
            postfix_position = postfix_position.and_then(|position| position.checked_sub(1));
            (stripped, true)
        } else {
            (rest, false)
        };

    let maybe_postfix_modifier_position =
        postfix_position.filter(|position| *position < base_class_name.len());

    ParsedClass {
        modifiers,
        has_important_modifier,
        base_class_name: base_class_name.to_string(),
        maybe_postfix_modifier_position,
        is_external: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_and_important() {
        let parsed = parse_class_name("hover:dark:!bg-gray-100", None);
        assert_eq!(parsed.modifiers, vec!["hover", "dark"]);
        assert!(parsed.has_important_modifier);
        assert_eq!(parsed.base_class_name, "bg-gray-100");
        assert_eq!(parsed.maybe_postfix_modifier_position, None);
        assert!(!parsed.is_external);
    }

    #[test]
    fn test_trailing_important() {
        let parsed = parse_class_name("md:p-4!", None);
        assert_eq!(parsed.modifiers, vec!["md"]);
        assert!(parsed.has_important_modifier);
        assert_eq!(parsed.base_class_name, "p-4");
    }

    #[test]
    fn test_only_one_important_marker_is_stripped() {
        let parsed = parse_class_name("!p-4!", None);
        assert!(parsed.has_important_modifier);
        assert_eq!(parsed.base_class_name, "!p-4");
    }

    #[test]
    fn test_no_modifiers() {
        let parsed = parse_class_name("flex", None);
        assert!(parsed.modifiers.is_empty());
        assert!(!parsed.has_important_modifier);
        assert_eq!(parsed.base_class_name, "flex");
    }

    #[test]
    fn test_postfix_position() {
        let parsed = parse_class_name("bg-gray-100/50", None);
        assert_eq!(parsed.maybe_postfix_modifier_position, Some(11));
        assert_eq!(parsed.base_without_postfix(), "bg-gray-100");
        assert_eq!(parsed.postfix(), Some("50"));
    }

    #[test]
    fn test_postfix_position_is_relative_to_base() {
        let parsed = parse_class_name("hover:!bg-gray-100/50", None);
        assert_eq!(parsed.base_class_name, "bg-gray-100/50");
        assert_eq!(parsed.maybe_postfix_modifier_position, Some(11));
    }

    #[test]
    fn test_first_postfix_wins() {
        let parsed = parse_class_name("w-1/2/3", None);
        assert_eq!(parsed.maybe_postfix_modifier_position, Some(3));
    }

    #[test]
    fn test_slash_inside_variant_is_not_a_postfix() {
        let parsed = parse_class_name("group-hover/item:w-4", None);
        assert_eq!(parsed.modifiers, vec!["group-hover/item"]);
        assert_eq!(parsed.maybe_postfix_modifier_position, None);
    }

    #[test]
    fn test_slash_inside_brackets_is_ignored() {
        let parsed = parse_class_name("bg-[url(/img/a.png)]", None);
        assert_eq!(parsed.maybe_postfix_modifier_position, None);
        assert_eq!(parsed.base_class_name, "bg-[url(/img/a.png)]");
    }

    #[test]
    fn test_arbitrary_property_is_not_split() {
        let parsed = parse_class_name("[background-color:red]", None);
        assert!(parsed.modifiers.is_empty());
        assert_eq!(parsed.base_class_name, "[background-color:red]");
        assert!(parsed.is_arbitrary_property());
    }

    #[test]
    fn test_arbitrary_variant_is_one_modifier() {
        let parsed = parse_class_name("[&:nth-child(3)]:underline", None);
        assert_eq!(parsed.modifiers, vec!["[&:nth-child(3)]"]);
        assert_eq!(parsed.base_class_name, "underline");
    }

    #[test]
    fn test_colon_inside_parens_is_ignored() {
        let parsed = parse_class_name("supports-(display:grid):grid", None);
        assert_eq!(parsed.modifiers, vec!["supports-(display:grid)"]);
        assert_eq!(parsed.base_class_name, "grid");
    }

    #[test]
    fn test_prefix_required() {
        let parsed = parse_class_name("tw:hover:flex", Some("tw"));
        assert_eq!(parsed.modifiers, vec!["hover"]);
        assert_eq!(parsed.base_class_name, "flex");
        assert!(!parsed.is_external);
    }

    #[test]
    fn test_missing_prefix_is_external() {
        let parsed = parse_class_name("hover:flex", Some("tw"));
        assert!(parsed.is_external);
        assert!(parsed.modifiers.is_empty());
        assert_eq!(parsed.base_class_name, "hover:flex");
    }

    #[test]
    fn test_prefix_without_separator_is_external() {
        assert!(parse_class_name("twflex", Some("tw")).is_external);
    }

    #[test]
    fn test_base_class_range() {
        for class_name in ["hover:!bg-red-500", "md:p-4!", "!p-4!", "tw:flex", "w-1/2"] {
            let parsed = parse_class_name(class_name, Some("tw"));
            let range = parsed.base_class_range(class_name);
            assert_eq!(&class_name[range], parsed.base_class_name);
        }
        let parsed = parse_class_name("hover:!bg-red-500", None);
        assert_eq!(parsed.base_class_range("hover:!bg-red-500"), 7..17);
    }

    #[test]
    fn test_empty_prefix_is_ignored() {
        assert!(!parse_class_name("flex", Some("")).is_external);
    }
}
