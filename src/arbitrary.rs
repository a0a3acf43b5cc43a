//! # Arbitrary Value Heuristics
//!
//! Two checks on classes of the form `utility-[value]`:
//!
//! - an arbitrary value that a preset already expresses (`w-[50%]` is `w-1/2`);
//! - a negative arbitrary value on a utility with a negative form (`m-[-10px]` is
//!   `-m-[10px]`).
//!
//! Malformed or unmatched classes simply produce no finding.

use crate::tokenizer::{ParsedClass, parse_class_name};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Range;

static ARBITRARY_VALUE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<utility>[a-z][a-z0-9-]*)-\[(?P<value>[^\[\]]+)\]$").expect("Invalid regex")
});

static NEGATIVE_LENGTH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^-(?:\d+(?:\.\d+)?|\.\d+)(?:px|em|rem|%|vw|vh|dvw|dvh|svw|svh|lvw|lvh|vmin|vmax|ch|ex|cm|mm|in|pt|pc|deg|grad|rad|turn)$",
    )
    .expect("Invalid regex")
});

/// Utilities that have a canonical leading-dash negative form.
const NEGATIVE_UTILITIES: &[&str] = &[
    "m", "mx", "my", "ms", "me", "mt", "mr", "mb", "ml",
    "p", "px", "py", "ps", "pe", "pt", "pr", "pb", "pl",
    "inset", "inset-x", "inset-y", "start", "end", "top", "right", "bottom", "left",
    "translate-x", "translate-y", "translate-z", "rotate", "skew-x", "skew-y",
    "scale", "scale-x", "scale-y",
    "tracking", "indent",
    "scroll-m", "scroll-mx", "scroll-my", "scroll-ms", "scroll-me",
    "scroll-mt", "scroll-mr", "scroll-mb", "scroll-ml",
    "scroll-p", "scroll-px", "scroll-py", "scroll-ps", "scroll-pe",
    "scroll-pt", "scroll-pr", "scroll-pb", "scroll-pl",
];

const SIZING_UTILITIES: &[&str] = &["w", "h", "size", "min-w", "min-h", "max-w", "max-h", "basis"];
const FRACTION_UTILITIES: &[&str] = &["w", "h", "size", "basis", "inset", "inset-x", "inset-y", "top", "right", "bottom", "left", "translate-x", "translate-y"];
const SPACING_UTILITIES: &[&str] = &[
    "m", "mx", "my", "ms", "me", "mt", "mr", "mb", "ml",
    "p", "px", "py", "ps", "pe", "pt", "pr", "pb", "pl",
    "gap", "gap-x", "gap-y", "inset", "inset-x", "inset-y", "top", "right", "bottom", "left",
];
const FRACTIONS: &[(&str, &str)] = &[
    ("50%", "1/2"),
    ("25%", "1/4"),
    ("75%", "3/4"),
    ("20%", "1/5"),
    ("40%", "2/5"),
    ("60%", "3/5"),
    ("80%", "4/5"),
];

/// One `utility-[value]` to `utility-preset` equivalence.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ArbitraryPreset {
    pub utility: String,
    pub value: String,
    pub preset: String,
}

impl ArbitraryPreset {
    pub fn new(utility: &str, value: &str, preset: &str) -> Self {
        Self {
            utility: utility.to_string(),
            value: value.to_string(),
            preset: preset.to_string(),
        }
    }
}

/// Lookup table from `(utility, arbitrary value)` to the preset replacing the brackets.
#[derive(Debug, Clone)]
pub struct PresetTable {
    presets: HashMap<(String, String), String>,
}

impl Default for PresetTable {
    fn default() -> Self {
        let mut table = Self {
            presets: HashMap::new(),
        };
        for utility in SIZING_UTILITIES {
            table.insert(ArbitraryPreset::new(utility, "100%", "full"));
            table.insert(ArbitraryPreset::new(utility, "auto", "auto"));
            table.insert(ArbitraryPreset::new(utility, "1px", "px"));
            table.insert(ArbitraryPreset::new(utility, "min-content", "min"));
            table.insert(ArbitraryPreset::new(utility, "max-content", "max"));
            table.insert(ArbitraryPreset::new(utility, "fit-content", "fit"));
        }
        for utility in FRACTION_UTILITIES {
            for (value, preset) in FRACTIONS {
                table.insert(ArbitraryPreset::new(utility, value, preset));
            }
        }
        for utility in SPACING_UTILITIES {
            table.insert(ArbitraryPreset::new(utility, "0", "0"));
            table.insert(ArbitraryPreset::new(utility, "0px", "0"));
            table.insert(ArbitraryPreset::new(utility, "1px", "px"));
        }
        table.insert(ArbitraryPreset::new("w", "100vw", "screen"));
        table.insert(ArbitraryPreset::new("h", "100vh", "screen"));
        table.insert(ArbitraryPreset::new("min-h", "100vh", "screen"));
        table
    }
}

impl PresetTable {
    /// The default table extended (or overridden) by `extra`.
    pub fn with_extra(extra: &[ArbitraryPreset]) -> Self {
        let mut table = Self::default();
        for preset in extra {
            table.insert(preset.clone());
        }
        table
    }

    pub fn insert(&mut self, preset: ArbitraryPreset) {
        self.presets
            .insert((preset.utility, preset.value), preset.preset);
    }

    pub fn get(&self, utility: &str, value: &str) -> Option<&str> {
        self.presets
            .get(&(utility.to_string(), value.to_string()))
            .map(String::as_str)
    }
}

/// Replace `range` of the class at `index` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEdit {
    pub index: usize,
    /// Byte range within the class string.
    pub range: Range<usize>,
    pub replacement: String,
}

impl ClassEdit {
    /// The class after the edit.
    pub fn apply(&self, classname: &str) -> String {
        format!(
            "{}{}{}",
            &classname[..self.range.start],
            self.replacement,
            &classname[self.range.end..]
        )
    }
}

/// A class of the form `utility-[value]`, located within its class string.
struct ArbitraryClass<'a> {
    utility: &'a str,
    value: &'a str,
    /// Range of the base class name within the class string.
    base: Range<usize>,
}

impl<'a> ArbitraryClass<'a> {
    fn parse(classname: &'a str, parsed: &ParsedClass) -> Option<Self> {
        if parsed.is_external {
            return None;
        }
        let base = parsed.base_class_range(classname);
        let captures = ARBITRARY_VALUE_REGEX.captures(&classname[base.clone()])?;
        let utility = captures.name("utility")?.as_str();
        let value = captures.name("value")?.as_str();
        Some(Self {
            utility,
            value,
            base,
        })
    }

    /// Range of `[value]` within the class string.
    fn bracket_range(&self) -> Range<usize> {
        self.base.start + self.utility.len() + 1..self.base.end
    }
}

pub fn find_unnecessary_arbitrary_values<S: AsRef<str>>(classnames: &[S]) -> Vec<ClassEdit> {
    find_unnecessary_arbitrary_values_with(classnames, &PresetTable::default(), None)
}

/// Finds arbitrary values that a preset expresses. The edit replaces only the brackets, so
/// variants and the important marker stay as written.
pub fn find_unnecessary_arbitrary_values_with<S: AsRef<str>>(
    classnames: &[S],
    presets: &PresetTable,
    prefix: Option<&str>,
) -> Vec<ClassEdit> {
    classnames
        .iter()
        .enumerate()
        .filter_map(|(index, classname)| {
            let classname = classname.as_ref();
            let parsed = parse_class_name(classname, prefix);
            let arbitrary = ArbitraryClass::parse(classname, &parsed)?;
            let preset = presets.get(arbitrary.utility, arbitrary.value)?;
            Some(ClassEdit {
                index,
                range: arbitrary.bracket_range(),
                replacement: preset.to_string(),
            })
        })
        .collect()
}

pub fn find_unnecessary_negative_arbitrary_values<S: AsRef<str>>(classnames: &[S]) -> Vec<ClassEdit> {
    find_unnecessary_negative_arbitrary_values_with(classnames, None)
}

/// Finds `utility-[-length]` classes that have the canonical form `-utility-[length]`.
/// The edit rewrites the base class name only.
pub fn find_unnecessary_negative_arbitrary_values_with<S: AsRef<str>>(
    classnames: &[S],
    prefix: Option<&str>,
) -> Vec<ClassEdit> {
    classnames
        .iter()
        .enumerate()
        .filter_map(|(index, classname)| {
            let classname = classname.as_ref();
            let parsed = parse_class_name(classname, prefix);
            let arbitrary = ArbitraryClass::parse(classname, &parsed)?;
            if !NEGATIVE_UTILITIES.contains(&arbitrary.utility)
                || !NEGATIVE_LENGTH_REGEX.is_match(arbitrary.value)
            {
                return None;
            }
            Some(ClassEdit {
                index,
                replacement: format!("-{}-[{}]", arbitrary.utility, &arbitrary.value[1..]),
                range: arbitrary.base,
            })
        })
        .collect()
}
