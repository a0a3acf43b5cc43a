pub mod arbitrary;
pub mod bridge;
pub mod catalog;
pub mod class_value;
pub mod config;
pub mod conflicts;
pub mod diff;
pub mod duplicates;
pub mod oracle;
pub mod patch;
pub mod report;
pub mod rules;
pub mod shorthand;
pub mod tokenizer;

pub use catalog::CatalogDesignSystem;
pub use class_value::{ClassValueParts, join_class_value_parts, split_class_value};
pub use config::Config;
pub use oracle::{DesignSystem, InertDesignSystem};
pub use patch::{StringChange, apply_changes};
pub use rules::{Diagnostic, RuleCollection, RuleContext};
pub use tokenizer::{ParsedClass, parse_class_name};
