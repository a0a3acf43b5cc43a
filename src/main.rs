use anyhow::{Result, bail};
use clap::Parser;
use classlint::bridge::{CatalogLoader, DesignSystemBridge, OracleCache};
use classlint::config::{self, Config};
use classlint::diff::generate_value_diff;
use classlint::report::render_diagnostics;
use classlint::rules::{RuleCollection, RuleContext};
use console::style;
use std::io::BufRead;
use std::sync::Arc;

mod cli;

fn main() -> Result<()> {
    env_logger::init();
    let cli = cli::Cli::parse();

    let mut config = config::load(cli.config.as_deref())?;
    if let Some(catalog) = &cli.catalog {
        config.catalog = Some(catalog.clone());
    }
    if let Some(prefix) = &cli.prefix {
        config.prefix = Some(prefix.clone()).filter(|prefix| !prefix.is_empty());
    }

    let rules = RuleCollection::with_default_rules().without(&config.disabled_rules);
    if cli.list_rules {
        for rule in rules.iter() {
            println!("{} {}", style(rule.name()).bold(), style(rule.description()).dim());
        }
        return Ok(());
    }

    let values = if cli.stdin {
        std::io::stdin().lock().lines().collect::<Result<Vec<_>, _>>()?
    } else {
        cli.values.clone()
    };
    if values.is_empty() {
        bail!("No values given; pass them as arguments or use --stdin");
    }

    let unresolved = run(&cli, &config, &rules, &values)?;
    if unresolved > 0 {
        eprintln!(
            "{}",
            style(format!("{unresolved} problem(s) remaining")).red().bold()
        );
        std::process::exit(1);
    }
    Ok(())
}

/// Lints or fixes every value and returns the number of diagnostics left unfixed.
fn run(cli: &cli::Cli, config: &Config, rules: &RuleCollection, values: &[String]) -> Result<usize> {
    let bridge = DesignSystemBridge::new(
        Arc::new(CatalogLoader),
        Arc::new(OracleCache::new(config.cache_ttl())),
    )?;
    let design_system = bridge.resolve(&config.load_request());
    let context = RuleContext::new(design_system.as_ref(), config);

    let mut unresolved = 0;
    for value in values {
        // Diagnostics of a fixed value point into the fixed output.
        let (checked, remaining) = if cli.fix {
            let outcome = rules.fix(value, &context)?;
            if outcome.output != *value {
                eprintln!("{}", generate_value_diff(value, &outcome.output));
            }
            println!("{}", outcome.output);
            (outcome.output, outcome.remaining)
        } else {
            (value.clone(), rules.lint(value, &context))
        };

        if !remaining.is_empty() {
            eprintln!("{}\n", render_diagnostics(&checked, &remaining));
        }
        unresolved += remaining.len();
    }
    Ok(unresolved)
}
