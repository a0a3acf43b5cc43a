use console::style;
use similar::{ChangeTag, TextDiff};

/// Renders `old` and `new` as a two-line diff with the changed words highlighted.
pub fn generate_value_diff(old: &str, new: &str) -> String {
    if old == new {
        return "No changes detected.".to_string();
    }

    let diff = TextDiff::from_words(old, new);
    let mut removed = String::new();
    let mut added = String::new();

    for change in diff.iter_all_changes() {
        let text = change.value();
        match change.tag() {
            ChangeTag::Equal => {
                removed.push_str(&style(text).red().to_string());
                added.push_str(&style(text).green().to_string());
            }
            ChangeTag::Delete => {
                removed.push_str(&style(text).red().bold().underlined().to_string());
            }
            ChangeTag::Insert => {
                added.push_str(&style(text).green().bold().underlined().to_string());
            }
        }
    }

    format!(
        "{}{removed}\n{}{added}",
        style("- ").red(),
        style("+ ").green()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::style;

    #[test]
    fn test_no_changes() {
        assert_eq!(generate_value_diff("flex", "flex"), "No changes detected.");
    }

    #[test]
    fn test_changed_words_are_emphasized() {
        let diff = generate_value_diff("flex w-4 h-4", "flex size-4");
        let mut lines = diff.lines();
        let removed = lines.next().unwrap();
        let added = lines.next().unwrap();
        assert!(lines.next().is_none());

        assert!(removed.starts_with(&style("- ").red().to_string()));
        assert!(removed.contains(&style("flex").red().to_string()));
        assert!(removed.contains(&style("w-4").red().bold().underlined().to_string()));
        assert!(added.starts_with(&style("+ ").green().to_string()));
        assert!(added.contains(&style("size-4").green().bold().underlined().to_string()));
        assert!(!added.contains("w-4"));
    }

    #[test]
    fn test_whitespace_change() {
        let diff = generate_value_diff("flex  w-4", "flex w-4");
        assert_ne!(diff, "No changes detected.");
        assert_eq!(diff.lines().count(), 2);
    }
}
