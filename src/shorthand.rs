//! # Shorthand Detection
//!
//! Finds two classes that together say what one shorthand class says, like `w-10 h-10`
//! (`size-10`) or `mt-2 mb-2` (`my-2`). Both halves must carry the same variants, the same
//! important flag, the same sign and the same raw value.

use crate::conflicts::sort_modifiers;
use crate::oracle::DesignSystem;
use crate::tokenizer::{ParsedClass, parse_class_name};

/// `(half, opposite half, shorthand)`. Every half appears once as the first entry.
const SHORTHAND_PAIRS: &[(&str, &str, &str)] = &[
    ("w", "h", "size"),
    ("h", "w", "size"),
    ("mx", "my", "m"),
    ("my", "mx", "m"),
    ("mt", "mb", "my"),
    ("mb", "mt", "my"),
    ("ml", "mr", "mx"),
    ("mr", "ml", "mx"),
    ("ms", "me", "mx"),
    ("me", "ms", "mx"),
    ("px", "py", "p"),
    ("py", "px", "p"),
    ("pt", "pb", "py"),
    ("pb", "pt", "py"),
    ("pl", "pr", "px"),
    ("pr", "pl", "px"),
    ("ps", "pe", "px"),
    ("pe", "ps", "px"),
    ("top", "bottom", "inset-y"),
    ("bottom", "top", "inset-y"),
    ("left", "right", "inset-x"),
    ("right", "left", "inset-x"),
    ("start", "end", "inset-x"),
    ("end", "start", "inset-x"),
    ("inset-x", "inset-y", "inset"),
    ("inset-y", "inset-x", "inset"),
];

/// Replace the class at `first` with `replacement` and drop the class at `second`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShorthandEdit {
    pub first: usize,
    pub second: usize,
    pub replacement: String,
}

#[derive(Debug)]
struct Half<'a> {
    family: &'static str,
    opposite: &'static str,
    shorthand: &'static str,
    value: &'a str,
    negative: bool,
    modifiers: Vec<&'a str>,
    important: bool,
}

impl<'a> Half<'a> {
    fn parse(parsed: &'a ParsedClass) -> Option<Self> {
        if parsed.is_external {
            return None;
        }
        let (negative, unsigned) = match parsed.base_class_name.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, parsed.base_class_name.as_str()),
        };
        SHORTHAND_PAIRS.iter().find_map(|&(family, opposite, shorthand)| {
            let value = unsigned.strip_prefix(family)?.strip_prefix('-')?;
            (!value.is_empty()).then(|| Half {
                family,
                opposite,
                shorthand,
                value,
                negative,
                modifiers: sort_modifiers(&parsed.modifiers),
                important: parsed.has_important_modifier,
            })
        })
    }

    fn pairs_with(&self, other: &Half) -> bool {
        other.family == self.opposite
            && other.value == self.value
            && other.negative == self.negative
            && other.important == self.important
            && other.modifiers == self.modifiers
    }

    fn shorthand_base(&self) -> String {
        let sign = if self.negative { "-" } else { "" };
        format!("{sign}{}-{}", self.shorthand, self.value)
    }
}

/// Finds pairs of classes that can be merged into one shorthand class.
///
/// Each class takes part in at most one pair, matched with the nearest following partner.
/// The replacement keeps the first class's prefix, variants and important marker and swaps
/// its base for the shorthand. Pairs whose shorthand the design system does not know are
/// skipped.
pub fn find_shorthand_opportunities<S: AsRef<str>>(
    classnames: &[S],
    design_system: &dyn DesignSystem,
) -> Vec<ShorthandEdit> {
    let prefix = design_system.required_prefix();
    let parsed: Vec<ParsedClass> = classnames
        .iter()
        .map(|classname| parse_class_name(classname.as_ref(), prefix))
        .collect();
    let halves: Vec<Option<Half>> = parsed.iter().map(Half::parse).collect();

    let mut used = vec![false; classnames.len()];
    let mut edits = Vec::new();

    for first in 0..halves.len() {
        let Some(half) = halves[first].as_ref().filter(|_| !used[first]) else {
            continue;
        };

        let partner = (first + 1..halves.len()).find(|&second| {
            !used[second]
                && halves[second]
                    .as_ref()
                    .is_some_and(|other| half.pairs_with(other))
        });
        let Some(second) = partner else {
            continue;
        };

        let shorthand_base = half.shorthand_base();
        if design_system.class_group_id(&shorthand_base).is_none() {
            log::debug!("Design system has no '{shorthand_base}'; skipping shorthand");
            continue;
        }

        let classname = classnames[first].as_ref();
        let base_range = parsed[first].base_class_range(classname);
        let replacement = format!(
            "{}{shorthand_base}{}",
            &classname[..base_range.start],
            &classname[base_range.end..]
        );

        used[first] = true;
        used[second] = true;
        edits.push(ShorthandEdit {
            first,
            second,
            replacement,
        });
    }

    edits
}
