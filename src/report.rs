//! # Diagnostic Report
//!
//! Formats diagnostics for the terminal: the analyzed value, a marker line underlining the
//! reported range and the message tagged with the rule name.

use crate::rules::Diagnostic;
use console::style;

/// Renders every diagnostic of `value`, separated by blank lines.
pub fn render_diagnostics(value: &str, diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|diagnostic| render_diagnostic(value, diagnostic))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render_diagnostic(value: &str, diagnostic: &Diagnostic) -> String {
    let fixable = if diagnostic.fix.is_some() {
        style(" (fixable)").dim().to_string()
    } else {
        String::new()
    };
    format!(
        "{} {}{fixable}\n  {}\n  {}",
        style(format!("[{}]", diagnostic.rule)).yellow(),
        diagnostic.message,
        visible(value),
        style(marker_line(value, diagnostic)).red()
    )
}

/// One display column per `char`, so the marker lines up with [`visible`].
fn marker_line(value: &str, diagnostic: &Diagnostic) -> String {
    let start = value
        .get(..diagnostic.range.start)
        .map_or(0, |prefix| prefix.chars().count());
    let width = value
        .get(diagnostic.range.clone())
        .map_or(0, |range| range.chars().count())
        .max(1);
    format!("{}{}", " ".repeat(start), "^".repeat(width))
}

/// Makes tabs and line breaks visible without changing the character count.
fn visible(value: &str) -> String {
    value
        .chars()
        .map(|character| match character {
            '\t' => '→',
            '\n' | '\r' => '↵',
            character if character.is_whitespace() => '·',
            character => character,
        })
        .collect()
}
