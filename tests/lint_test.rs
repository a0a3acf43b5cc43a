use anyhow::Result;
use classlint::bridge::{CatalogLoader, DesignSystemBridge, LoadRequest, OracleCache};
use classlint::config::{self, Config};
use classlint::rules::{RuleCollection, RuleContext};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

const CATALOG: &str = r#"
prefix = "tw"
variants = ["hover", "md"]

[patterns]
scale = '^\d+$'

[[groups]]
id = "display"
classes = ["block", "flex"]

[[groups]]
id = "size"
roots = ["size"]
values = "scale"

[[groups]]
id = "w"
roots = ["w"]
values = "scale"

[[groups]]
id = "h"
roots = ["h"]
values = "scale"

[conflicts]
w = ["size"]
h = ["size"]
"#;

fn write_catalog(dir: &Path) -> Result<PathBuf> {
    let path = dir.join("catalog.toml");
    fs::write(&path, CATALOG)?;
    Ok(path)
}

fn write_config(dir: &Path, config: &Config) -> Result<PathBuf> {
    let path = dir.join("config.toml");
    fs::write(&path, toml::to_string_pretty(config)?)?;
    Ok(path)
}

fn bridge() -> Result<DesignSystemBridge> {
    DesignSystemBridge::new(
        Arc::new(CatalogLoader),
        Arc::new(OracleCache::new(Duration::from_secs(5))),
    )
}

#[test]
fn test_fix_with_custom_catalog() -> Result<()> {
    let temp_dir = tempdir()?;
    let catalog = write_catalog(temp_dir.path())?;
    let config_path = write_config(
        temp_dir.path(),
        &Config {
            catalog: Some(catalog),
            ..Default::default()
        },
    )?;

    let config = config::load_from(&config_path)?;
    let bridge = bridge()?;
    let design_system = bridge.resolve(&config.load_request());
    let context = RuleContext::new(design_system.as_ref(), &config);

    let outcome = RuleCollection::with_default_rules().fix("tw:w-4 tw:flex tw:h-4 md:w-2", &context)?;

    // `md:w-2` lacks the prefix, so it is external and sorts first.
    assert_eq!(outcome.output, "md:w-2 tw:flex tw:size-4");
    assert_eq!(outcome.passes, 2);
    assert!(outcome.remaining.is_empty());
    Ok(())
}

#[test]
fn test_conflicts_remain_after_fixing() -> Result<()> {
    let temp_dir = tempdir()?;
    let request = LoadRequest {
        catalog: Some(write_catalog(temp_dir.path())?),
        prefix: None,
    };
    let bridge = bridge()?;
    let design_system = bridge.resolve(&request);
    let context = RuleContext::new(design_system.as_ref(), &Config::default());

    let outcome = RuleCollection::with_default_rules().fix("tw:w-4  tw:size-2", &context)?;
    assert_eq!(outcome.output, "tw:size-2 tw:w-4");
    assert!(outcome.remaining.is_empty());

    let diagnostics = RuleCollection::with_default_rules().lint("tw:w-4 tw:size-2", &context);
    assert!(
        diagnostics
            .iter()
            .any(|d| d.message == "`tw:size-2` conflicts with `tw:w-4`")
    );
    Ok(())
}

#[test]
fn test_missing_catalog_degrades_to_syntactic_rules() -> Result<()> {
    let temp_dir = tempdir()?;
    let request = LoadRequest {
        catalog: Some(temp_dir.path().join("absent.toml")),
        prefix: None,
    };
    let bridge = bridge()?;
    let design_system = bridge.resolve(&request);
    let context = RuleContext::new(design_system.as_ref(), &Config::default());
    let rules = RuleCollection::with_default_rules();

    assert!(rules.lint("w-4 w-2 h-2 flex", &context).is_empty());

    let diagnostics = rules.lint("flex  flex", &context);
    let names: Vec<_> = diagnostics.iter().map(|d| d.rule).collect();
    assert_eq!(names, vec!["no-unnecessary-whitespace", "no-duplicate-classes"]);
    Ok(())
}

#[test]
fn test_config_controls_rules_and_whitespace() -> Result<()> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "disabled_rules = [\"enforce-consistent-class-order\"]\nallow_multiline = false\n",
    )?;
    let config = config::load_from(&config_path)?;

    let bridge = bridge()?;
    let design_system = bridge.resolve(&config.load_request());
    let context = RuleContext::new(design_system.as_ref(), &config);
    let rules = RuleCollection::with_default_rules().without(&config.disabled_rules);

    let outcome = rules.fix("\n  w-4\n  flex\n", &context)?;
    assert_eq!(outcome.output, "w-4 flex");
    assert!(outcome.remaining.is_empty());
    Ok(())
}

#[test]
fn test_builtin_catalog_end_to_end() -> Result<()> {
    let bridge = bridge()?;
    let config = Config::default();
    let design_system = bridge.resolve(&config.load_request());
    let context = RuleContext::new(design_system.as_ref(), &config);

    let outcome = RuleCollection::with_default_rules()
        .fix("  p-[0px] mt-2 mb-2  hover:m-[-4px] w-[100%] ", &context)?;
    assert_eq!(outcome.output, "my-2 w-full p-0 hover:-m-[4px]");
    assert_eq!(outcome.passes, 2);
    assert!(outcome.remaining.is_empty());
    Ok(())
}
